//! Path sampling.

use curve_fields::{PathCurve, RadiusField};
use nalgebra::Point3;
use tracing::{debug, warn};

use crate::assemble::Closure;
use crate::error::{TubeError, TubeResult};
use crate::frame::{Frame, build_frames};
use crate::tube::TubeConfig;

/// Relative distance below which a seamless path counts as closed.
pub const SEAM_TOLERANCE: f64 = 1e-6;

/// Everything the ring sampler needs at one point of the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Path parameter.
    pub t: f64,
    /// Centerline position.
    pub position: Point3<f64>,
    /// Tube radius.
    pub radius: f64,
    /// Cross-section orientation.
    pub frame: Frame,
    /// Accumulated twist in radians.
    pub twist: f64,
}

/// Samples for one path, in increasing `t`.
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    /// One sample per ring.
    pub samples: Vec<Sample>,
    /// Samples whose look-ahead tangent had zero length.
    pub degenerate_tangents: usize,
}

impl SampleSet {
    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if there are no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The sampled centerline positions.
    #[must_use]
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.samples.iter().map(|s| s.position).collect()
    }
}

/// Sample `curve` and `radius` at the configured parameters and build a
/// frame at every sample.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, or
/// [`TubeError::InvalidRadius`] for the first negative or non-finite
/// radius. Zero radii are accepted and collapse their ring to a point.
///
/// # Example
///
/// ```
/// use curve_fields::{Circle, Pulse};
/// use mesh_tube::{sample_path, TubeConfig};
/// use nalgebra::Point3;
///
/// let config = TubeConfig::default().with_resolution(16);
/// let set = sample_path(&Circle::new(Point3::origin(), 5.0), &Pulse::new(1.0, 0.2, 3.0), &config).unwrap();
///
/// assert_eq!(set.len(), 16);
/// assert!((set.samples[0].radius - 1.0).abs() < 1e-12);
/// ```
pub fn sample_path<C, R>(curve: &C, radius: &R, config: &TubeConfig) -> TubeResult<SampleSet>
where
    C: PathCurve + ?Sized,
    R: RadiusField + ?Sized,
{
    config.validate()?;

    let params = config.parameters();
    let positions: Vec<Point3<f64>> = params.iter().map(|&t| curve.position(t)).collect();
    let radii: Vec<f64> = params.iter().map(|&t| radius.radius(t)).collect();

    if config.closure == Closure::Seamless {
        if let Some(first) = positions.first() {
            check_seam(first, &curve.position(config.domain.1));
        }
    }

    samples_from_positions(&params, positions, &radii, config)
}

/// Assemble samples from precomputed positions and radii.
///
/// All three inputs are indexed by sample; `params` must have the
/// configured length.
pub(crate) fn samples_from_positions(
    params: &[f64],
    positions: Vec<Point3<f64>>,
    radii: &[f64],
    config: &TubeConfig,
) -> TubeResult<SampleSet> {
    if let Some((index, &value)) = radii
        .iter()
        .enumerate()
        .find(|&(_, r)| !(r.is_finite() && *r >= 0.0))
    {
        return Err(TubeError::InvalidRadius { index, value });
    }

    let frame_set = build_frames(&positions, config.closure, config.frame_mode);

    let samples: Vec<Sample> = params
        .iter()
        .zip(positions)
        .zip(radii)
        .zip(frame_set.frames)
        .enumerate()
        .map(|(i, (((&t, position), &radius), frame))| Sample {
            t,
            position,
            radius,
            frame,
            twist: config.twist_angle(i),
        })
        .collect();

    debug!(
        samples = samples.len(),
        degenerate_tangents = frame_set.degenerate_tangents,
        "sampled path"
    );

    Ok(SampleSet {
        samples,
        degenerate_tangents: frame_set.degenerate_tangents,
    })
}

/// Warn when a path meant to be seamless ends away from its start.
pub(crate) fn check_seam(start: &Point3<f64>, end: &Point3<f64>) -> bool {
    let gap = (end - start).norm();
    let closed = gap <= SEAM_TOLERANCE * (1.0 + start.coords.norm());
    if !closed {
        warn!(
            gap,
            "seamless path does not return to its start; the wrap band will stretch"
        );
    }
    closed
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use curve_fields::{Circle, Constant, Helix, Line};
    use nalgebra::Vector3;

    #[test]
    fn samples_follow_curve_and_radius() {
        let circle = Circle::new(Point3::origin(), 3.0);
        let config = TubeConfig::default().with_resolution(8);
        let set = sample_path(&circle, &|t: f64| 1.0 + t, &config).unwrap();

        assert_eq!(set.len(), 8);
        for (i, s) in set.samples.iter().enumerate() {
            let t = config.parameters()[i];
            assert_relative_eq!(s.t, t);
            assert_relative_eq!(s.position, circle.position(t));
            assert_relative_eq!(s.radius, 1.0 + t);
            assert!(s.frame.is_orthonormal(1e-10));
        }
        assert_eq!(set.positions().len(), 8);
    }

    #[test]
    fn twist_is_applied_per_sample() {
        let config = TubeConfig::default()
            .with_resolution(4)
            .with_twist_turns(1.0)
            .capped();
        let line = Line::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        let set = sample_path(&line, &Constant(1.0), &config.clone().with_domain(0.0, 1.0)).unwrap();
        for (i, s) in set.samples.iter().enumerate() {
            assert_relative_eq!(s.twist, config.twist_angle(i));
        }
        assert_relative_eq!(set.samples[3].twist, std::f64::consts::TAU, epsilon = 1e-12);
    }

    #[test]
    fn invalid_radius_reports_first_sample() {
        let config = TubeConfig::default().with_resolution(10);
        let circle = Circle::new(Point3::origin(), 3.0);

        let err = sample_path(&circle, &|t: f64| 2.0 - t, &config).unwrap_err();
        // t = 2π·i/10 first exceeds 2 at i = 4
        assert!(matches!(err, TubeError::InvalidRadius { index: 4, .. }));

        let err = sample_path(&circle, &Constant(f64::NAN), &config).unwrap_err();
        assert!(matches!(err, TubeError::InvalidRadius { index: 0, .. }));

        assert!(sample_path(&circle, &Constant(0.0), &config).is_ok());
    }

    #[test]
    fn config_errors_come_first() {
        let circle = Circle::new(Point3::origin(), 3.0);
        let config = TubeConfig::default().with_sides(1);
        let err = sample_path(&circle, &Constant(-1.0), &config).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn repeated_points_are_counted() {
        let stall = |t: f64| Point3::new(t.min(1.0), 0.0, 0.0);
        let config = TubeConfig::default()
            .with_resolution(5)
            .with_domain(0.0, 2.0)
            .capped();
        let set = sample_path(&stall, &Constant(1.0), &config).unwrap();
        // Every sample from t = 1 on sits on the same point
        assert_eq!(set.degenerate_tangents, 3);
        for s in &set.samples {
            assert_relative_eq!(s.frame.forward(), Vector3::x(), epsilon = 1e-12);
        }
    }

    #[test]
    fn seam_check() {
        assert!(check_seam(&Point3::new(10.0, 0.0, 0.0), &Point3::new(10.0, 1e-9, 0.0)));
        let helix = Helix::new(2.0, 1.0, 3.0);
        assert!(!check_seam(&helix.position(0.0), &helix.position(std::f64::consts::TAU)));
    }
}
