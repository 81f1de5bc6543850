//! Core evaluator traits.
//!
//! A tube is described by two independent pure functions of the path
//! parameter `t`: where the centerline is, and how thick the tube is there.

use nalgebra::Point3;

/// A parametric space curve.
///
/// Unlike a bounded CAD curve, a path curve is total over the real line:
/// generators pick the parameter span, and evaluation outside any "natural"
/// span simply continues the formula. Periodic curves repeat every `2π`.
///
/// Any closure `Fn(f64) -> Point3<f64>` is a path curve, so one-off shapes
/// need no dedicated type.
///
/// # Example
///
/// ```
/// use curve_fields::PathCurve;
/// use nalgebra::Point3;
///
/// let wave = |t: f64| Point3::new(t, t.sin(), 0.0);
/// assert!((wave.position(0.0).y).abs() < 1e-12);
/// ```
pub trait PathCurve {
    /// Evaluate the centerline position at parameter `t`.
    fn position(&self, t: f64) -> Point3<f64>;
}

impl<F> PathCurve for F
where
    F: Fn(f64) -> Point3<f64>,
{
    fn position(&self, t: f64) -> Point3<f64> {
        self(t)
    }
}

/// A scalar radius field along a path.
///
/// Evaluated once per ring; the tube cross-section has constant radius
/// within a ring.
pub trait RadiusField {
    /// Evaluate the radius at parameter `t`.
    fn radius(&self, t: f64) -> f64;
}

impl<F> RadiusField for F
where
    F: Fn(f64) -> f64,
{
    fn radius(&self, t: f64) -> f64 {
        self(t)
    }
}
