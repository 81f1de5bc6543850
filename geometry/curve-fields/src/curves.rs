//! Built-in path curves.
//!
//! The shapes that recur across tube designs: circles and tori for closed
//! loops, helices for rising spirals, straight lines for capped rods, and
//! polylines for anything sampled elsewhere.

use crate::{FieldError, PathCurve};
use nalgebra::{Point3, Vector3};
use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A horizontal circle, one revolution per `2π` of parameter.
///
/// # Example
///
/// ```
/// use curve_fields::{Circle, PathCurve};
/// use nalgebra::Point3;
///
/// let circle = Circle::new(Point3::origin(), 10.0);
/// let p = circle.position(std::f64::consts::FRAC_PI_2);
/// assert!((p.y - 10.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Circle {
    center: Point3<f64>,
    radius: f64,
}

impl Circle {
    /// Create a circle in the plane `z = center.z`.
    #[must_use]
    pub fn new(center: Point3<f64>, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Get the center.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        self.center
    }

    /// Get the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl PathCurve for Circle {
    fn position(&self, t: f64) -> Point3<f64> {
        self.center + Vector3::new(t.cos(), t.sin(), 0.0) * self.radius
    }
}

/// A straight segment traversed linearly over a parameter span.
///
/// Outside the span the line keeps going.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Line {
    start: Point3<f64>,
    end: Point3<f64>,
    span: (f64, f64),
}

impl Line {
    /// Create a line reaching `start` at `t = 0` and `end` at `t = 1`.
    #[must_use]
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self {
            start,
            end,
            span: (0.0, 1.0),
        }
    }

    /// Re-map the line so it reaches `start` at `t0` and `end` at `t1`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidSpan`] unless `t0 < t1` and both are finite.
    pub fn with_span(self, t0: f64, t1: f64) -> Result<Self, FieldError> {
        Self::from_parts(self.points, self.closed, (t0, t1))
    }

    /// Get the start point.
    #[must_use]
    pub fn start(&self) -> Point3<f64> {
        self.start
    }

    /// Get the end point.
    #[must_use]
    pub fn end(&self) -> Point3<f64> {
        self.end
    }
}

impl PathCurve for Line {
    fn position(&self, t: f64) -> Point3<f64> {
        let (t0, t1) = self.span;
        let alpha = (t - t0) / (t1 - t0);
        self.start + (self.end - self.start) * alpha
    }
}

/// A vertical helix around the Z axis.
///
/// `frequency` is the number of revolutions per `2π` of parameter and
/// `pitch` the rise per revolution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Helix {
    radius: f64,
    frequency: f64,
    pitch: f64,
}

impl Helix {
    /// Create a helix.
    #[must_use]
    pub fn new(radius: f64, frequency: f64, pitch: f64) -> Self {
        Self {
            radius,
            frequency,
            pitch,
        }
    }

    /// Get the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Rise over one full `2π` span of parameter.
    #[must_use]
    pub fn rise_per_span(&self) -> f64 {
        self.pitch * self.frequency
    }
}

impl PathCurve for Helix {
    fn position(&self, t: f64) -> Point3<f64> {
        let angle = self.frequency * t;
        Point3::new(
            self.radius * angle.cos(),
            self.radius * angle.sin(),
            self.pitch * angle / TAU,
        )
    }
}

/// A `(p, q)` torus knot.
///
/// The curve winds `p` times around the Z axis and `q` times through the
/// hole of a torus with the given major and minor radii, rising and falling
/// by `height` as it does. With integral `p` and `q` the knot closes over
/// any `2π` span, which makes it the usual spine for seamless tubes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TorusKnot {
    major_radius: f64,
    minor_radius: f64,
    height: f64,
    p: f64,
    q: f64,
}

impl TorusKnot {
    /// Create a torus knot.
    #[must_use]
    pub fn new(major_radius: f64, minor_radius: f64, height: f64, p: f64, q: f64) -> Self {
        Self {
            major_radius,
            minor_radius,
            height,
            p,
            q,
        }
    }

    /// The classic trefoil, `(2, 3)`.
    #[must_use]
    pub fn trefoil(major_radius: f64, minor_radius: f64) -> Self {
        Self::new(major_radius, minor_radius, minor_radius, 2.0, 3.0)
    }

    /// Check whether the knot returns to its start after a `2π` span.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.p.fract() == 0.0 && self.q.fract() == 0.0
    }
}

impl PathCurve for TorusKnot {
    fn position(&self, t: f64) -> Point3<f64> {
        let (sin_q, cos_q) = (self.q * t).sin_cos();
        let (sin_p, cos_p) = (self.p * t).sin_cos();
        let ring = self.major_radius + self.minor_radius * cos_q;
        Point3::new(ring * cos_p, ring * sin_p, self.height * sin_q)
    }
}

/// Piecewise-linear interpolation through a point list.
///
/// The points are spread evenly over the parameter span. An open polyline
/// clamps to its end points outside the span; a closed one repeats with the
/// span as its period and includes the segment from the last point back to
/// the first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "PolylineParts")
)]
pub struct Polyline {
    points: Vec<Point3<f64>>,
    closed: bool,
    span: (f64, f64),
}

/// Unchecked serialized form of a [`Polyline`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct PolylineParts {
    points: Vec<Point3<f64>>,
    closed: bool,
    span: (f64, f64),
}

#[cfg(feature = "serde")]
impl TryFrom<PolylineParts> for Polyline {
    type Error = FieldError;

    fn try_from(parts: PolylineParts) -> Result<Self, Self::Error> {
        Self::from_parts(parts.points, parts.closed, parts.span)
    }
}

impl Polyline {
    /// Create an open polyline over `t ∈ [0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InsufficientPoints`] for fewer than 2 points.
    pub fn new(points: Vec<Point3<f64>>) -> Result<Self, FieldError> {
        Self::from_parts(points, false, (0.0, 1.0))
    }

    /// Create a closed polyline over `t ∈ [0, 2π)`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InsufficientPoints`] for fewer than 3 points.
    pub fn closed(points: Vec<Point3<f64>>) -> Result<Self, FieldError> {
        Self::from_parts(points, true, (0.0, TAU))
    }

    /// Build from raw fields: at least 2 points open or 3 closed, and a
    /// finite increasing span.
    fn from_parts(
        points: Vec<Point3<f64>>,
        closed: bool,
        span: (f64, f64),
    ) -> Result<Self, FieldError> {
        let required = if closed { 3 } else { 2 };
        if points.len() < required {
            return Err(FieldError::insufficient_points(required, points.len()));
        }
        let (start, end) = span;
        if !(start.is_finite() && end.is_finite() && start < end) {
            return Err(FieldError::InvalidSpan { start, end });
        }
        Ok(Self {
            points,
            closed,
            span,
        })
    }

    /// Re-map the polyline onto the span `[t0, t1]`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidSpan`] unless `t0 < t1` and both are finite.
    pub fn with_span(self, t0: f64, t1: f64) -> Result<Self, FieldError> {
        Self::from_parts(self.points, self.closed, (t0, t1))
    }

    /// Get the control points.
    #[must_use]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Check if the polyline wraps around.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn segment_count(&self) -> usize {
        if self.closed {
            self.points.len()
        } else {
            self.points.len() - 1
        }
    }
}

impl PathCurve for Polyline {
    fn position(&self, t: f64) -> Point3<f64> {
        let (t0, t1) = self.span;
        let mut alpha = (t - t0) / (t1 - t0);
        if self.closed {
            alpha = alpha.rem_euclid(1.0);
        } else if alpha.is_finite() {
            alpha = alpha.clamp(0.0, 1.0);
        }
        if !alpha.is_finite() {
            return Point3::new(alpha, alpha, alpha);
        }

        let n = self.points.len();
        let segments = self.segment_count();
        let u = alpha * segments as f64;
        let index = (u.floor() as usize).min(segments - 1);
        let local = u - index as f64;

        let a = self.points[index % n];
        let b = self.points[(index + 1) % n];
        a + (b - a) * local
    }
}
