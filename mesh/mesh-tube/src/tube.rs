//! Tube configuration and the path-to-mesh pipeline.

use curve_fields::{PathCurve, RadiusField};
use mesh_poly::PolyMesh;
use std::f64::consts::TAU;
use tracing::{debug, info, warn};

use crate::assemble::{Closure, assemble};
use crate::error::{TubeError, TubeResult};
use crate::frame::FrameMode;
use crate::ring::{Ring, sample_ring};
use crate::sample::{Sample, SampleSet, sample_path};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Twist fractions closer than this to a whole side count as whole.
const SEAM_TWIST_TOLERANCE: f64 = 1e-9;

/// Configuration for tube generation.
///
/// Read-only for a generation run. The defaults describe a smooth seamless
/// loop over one full turn of a periodic curve.
///
/// # Example
///
/// ```
/// use mesh_tube::{Closure, TubeConfig};
///
/// let config = TubeConfig::default()
///     .with_resolution(128)
///     .with_sides(8)
///     .with_twist_turns(0.5)
///     .capped();
///
/// assert_eq!(config.closure, Closure::Capped);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TubeConfig {
    /// Number of rings sampled along the path.
    pub resolution: usize,
    /// Number of vertices per ring.
    pub sides: usize,
    /// Whole-tube twist in turns, spread evenly over the rings.
    pub twist_turns: f64,
    /// How the tube ends are closed.
    pub closure: Closure,
    /// How ring frames are derived from the path.
    pub frame_mode: FrameMode,
    /// Parameter domain `(start, end)` in radians.
    pub domain: (f64, f64),
}

impl Default for TubeConfig {
    fn default() -> Self {
        Self {
            resolution: 64,
            sides: 16,
            twist_turns: 0.0,
            closure: Closure::Seamless,
            frame_mode: FrameMode::Absolute,
            domain: (0.0, TAU),
        }
    }
}

impl TubeConfig {
    /// Set the number of rings.
    #[must_use]
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the number of vertices per ring.
    #[must_use]
    pub fn with_sides(mut self, sides: usize) -> Self {
        self.sides = sides;
        self
    }

    /// Set the whole-tube twist in turns.
    #[must_use]
    pub fn with_twist_turns(mut self, twist_turns: f64) -> Self {
        self.twist_turns = twist_turns;
        self
    }

    /// Close the ends with triangle fans.
    #[must_use]
    pub fn capped(mut self) -> Self {
        self.closure = Closure::Capped;
        self
    }

    /// Wrap the last ring onto the first.
    #[must_use]
    pub fn seamless(mut self) -> Self {
        self.closure = Closure::Seamless;
        self
    }

    /// Set the frame construction mode.
    #[must_use]
    pub fn with_frame_mode(mut self, frame_mode: FrameMode) -> Self {
        self.frame_mode = frame_mode;
        self
    }

    /// Set the parameter domain.
    #[must_use]
    pub fn with_domain(mut self, start: f64, end: f64) -> Self {
        self.domain = (start, end);
        self
    }

    /// Check the configuration before any sampling happens.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `resolution` is below 2 (capped) or 3 (seamless)
    /// - `sides` is below 3
    /// - `twist_turns` is not finite
    /// - the domain is not finite or not increasing
    pub fn validate(&self) -> TubeResult<()> {
        let min_rings = self.min_rings();
        if self.resolution < min_rings {
            return Err(TubeError::TooFewRings {
                min: min_rings,
                actual: self.resolution,
            });
        }
        if self.sides < 3 {
            return Err(TubeError::TooFewSides {
                min: 3,
                actual: self.sides,
            });
        }
        if !self.twist_turns.is_finite() {
            return Err(TubeError::NonFinite {
                name: "twist_turns",
                value: self.twist_turns,
            });
        }
        let (start, end) = self.domain;
        if !(start.is_finite() && end.is_finite() && start < end) {
            return Err(TubeError::InvalidDomain { start, end });
        }
        Ok(())
    }

    /// Fewest rings accepted for the configured closure.
    #[must_use]
    pub fn min_rings(&self) -> usize {
        self.closure.min_rings()
    }

    /// Divisor that turns a sample index into a fraction of the domain.
    ///
    /// A seamless path excludes the domain end (it coincides with the
    /// start); a capped path includes it.
    fn step_divisor(&self) -> f64 {
        match self.closure {
            Closure::Seamless => self.resolution as f64,
            Closure::Capped => self.resolution.saturating_sub(1).max(1) as f64,
        }
    }

    /// Parameter step between consecutive rings.
    #[must_use]
    pub fn step(&self) -> f64 {
        (self.domain.1 - self.domain.0) / self.step_divisor()
    }

    /// The `resolution` sample parameters in increasing order.
    #[must_use]
    pub fn parameters(&self) -> Vec<f64> {
        let (start, end) = self.domain;
        let divisor = self.step_divisor();
        (0..self.resolution)
            .map(|i| {
                let s = i as f64 / divisor;
                start * (1.0 - s) + end * s
            })
            .collect()
    }

    /// Accumulated twist of ring `index`, in radians.
    #[must_use]
    pub fn twist_angle(&self, index: usize) -> f64 {
        TAU * self.twist_turns * index as f64 / self.step_divisor()
    }

    /// Side offset at which a seamless tube's last ring meets its first.
    ///
    /// After `twist_turns` turns the first ring's vertex `j` has moved to
    /// where vertex `j + twist_turns·N` started. Only whole-side offsets
    /// close cleanly; the nearest one is used and a warning is logged
    /// otherwise. Capped tubes have no seam and return 0.
    #[must_use]
    pub fn seam_shift(&self) -> usize {
        if self.closure == Closure::Capped || self.sides == 0 {
            return 0;
        }
        let sides_turned = self.twist_turns * self.sides as f64;
        let rounded = sides_turned.round();
        if (sides_turned - rounded).abs() > SEAM_TWIST_TOLERANCE {
            warn!(
                twist_turns = self.twist_turns,
                sides = self.sides,
                "twist is not a whole number of sides; the seam band will be skewed"
            );
        }
        (rounded as i64).rem_euclid(self.sides as i64) as usize
    }
}

/// A generated tube: the mesh plus the samples it was built from.
#[derive(Debug, Clone)]
pub struct TubeMesh {
    /// The vertex and face buffers.
    pub mesh: PolyMesh,
    /// The path samples, one per ring.
    pub samples: Vec<Sample>,
    /// Samples whose look-ahead tangent had zero length.
    pub degenerate_tangents: usize,
    /// Side offset used when wrapping the last ring onto the first.
    pub seam_shift: usize,
}

impl TubeMesh {
    /// Number of rings.
    #[must_use]
    pub fn ring_count(&self) -> usize {
        self.samples.len()
    }
}

/// Generate a tube mesh along `curve` with thickness from `radius`.
///
/// Runs the full pipeline: sample the path, build frames, place rings,
/// stitch them together. Generation either completes or fails before any
/// mesh is built.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, or if the radius
/// field yields a negative or non-finite radius at any sample.
///
/// # Example
///
/// ```
/// use curve_fields::{Circle, Constant};
/// use mesh_tube::{generate_tube, TubeConfig};
/// use nalgebra::Point3;
///
/// let spine = Circle::new(Point3::origin(), 10.0);
/// let config = TubeConfig::default().with_resolution(32).with_sides(8);
///
/// let tube = generate_tube(&spine, &Constant(1.0), &config).unwrap();
/// assert_eq!(tube.mesh.vertex_count(), 32 * 8);
/// assert!(tube.mesh.signed_volume() > 0.0);
/// ```
pub fn generate_tube<C, R>(curve: &C, radius: &R, config: &TubeConfig) -> TubeResult<TubeMesh>
where
    C: PathCurve + ?Sized,
    R: RadiusField + ?Sized,
{
    info!(
        resolution = config.resolution,
        sides = config.sides,
        closure = ?config.closure,
        frame_mode = ?config.frame_mode,
        "Generating tube"
    );

    let samples = sample_path(curve, radius, config)?;
    let tube = tube_from_samples(samples, config)?;

    info!(
        vertices = tube.mesh.vertex_count(),
        faces = tube.mesh.face_count(),
        degenerate_tangents = tube.degenerate_tangents,
        "Tube generated"
    );
    Ok(tube)
}

/// Place rings on already computed samples and stitch them into a mesh.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the samples cannot
/// be assembled (too few of them for the closure mode).
pub fn tube_from_samples(samples: SampleSet, config: &TubeConfig) -> TubeResult<TubeMesh> {
    config.validate()?;

    let rings: Vec<Ring> = samples
        .samples
        .iter()
        .map(|s| sample_ring(&s.frame, &s.position, s.radius, config.sides, s.twist))
        .collect();

    let seam_shift = config.seam_shift();
    let mesh = assemble(&rings, config.closure, seam_shift)?;

    debug!(
        rings = rings.len(),
        quads = mesh.quad_count(),
        triangles = mesh.triangle_count(),
        seam_shift,
        "assembled tube"
    );

    Ok(TubeMesh {
        mesh,
        samples: samples.samples,
        degenerate_tangents: samples.degenerate_tangents,
        seam_shift,
    })
}
