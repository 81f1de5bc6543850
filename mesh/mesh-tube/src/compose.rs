//! Composite structures: a spine tube plus dependent secondary tubes.
//!
//! A secondary curve (a rib, a strand) is defined relative to the spine: at
//! each spine sample its centerline sits at the spine position plus an
//! [`OrbitOffset`] expressed in that sample's frame. The secondary tube then
//! runs through the ordinary pipeline with frames recomputed from its own
//! positions, so its rings stay perpendicular to its own path rather than
//! to the spine's.

use curve_fields::{OrbitOffset, PathCurve, RadiusField};
use mesh_poly::PolyMesh;
use nalgebra::Point3;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::assemble::Closure;
use crate::error::TubeResult;
use crate::frame::Frame;
use crate::sample::{Sample, SampleSet, check_seam, sample_path, samples_from_positions};
use crate::tube::{TubeConfig, TubeMesh, tube_from_samples};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A curve that follows the spine at a frame-relative offset.
///
/// Resolution, closure, domain, and frame mode come from the spine's
/// configuration; cross-section and twist are the secondary's own.
///
/// Secondaries passed to one [`compose`] call share the radius type `R`.
/// Mixing field types works through boxed closures such as
/// `Box<dyn Fn(f64) -> f64 + Send + Sync>`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SecondaryCurve<R> {
    /// Position relative to the spine, in the spine's ring plane.
    pub offset: OrbitOffset,
    /// Radius field, evaluated at the spine's parameters.
    pub radius: R,
    /// Vertices per ring.
    pub sides: usize,
    /// Whole-tube twist in turns.
    pub twist_turns: f64,
}

impl<R> SecondaryCurve<R> {
    /// Create a secondary with 12 sides and no twist.
    #[must_use]
    pub fn new(offset: OrbitOffset, radius: R) -> Self {
        Self {
            offset,
            radius,
            sides: 12,
            twist_turns: 0.0,
        }
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

    /// The tube configuration this secondary runs with.
    #[must_use]
    pub fn config(&self, spine: &TubeConfig) -> TubeConfig {
        spine
            .clone()
            .with_sides(self.sides)
            .with_twist_turns(self.twist_turns)
    }
}

/// A spine tube and its secondary tubes, all placed in one scene.
#[derive(Debug, Clone)]
pub struct Composite {
    /// The primary tube.
    pub spine: TubeMesh,
    /// Secondary tubes, in the order they were given.
    pub secondaries: Vec<TubeMesh>,
}

impl Composite {
    /// Merge every tube into one mesh. Overlaps are left as they are.
    ///
    /// # Errors
    ///
    /// Returns an error if the combined vertex count overflows `u32`.
    pub fn scene(&self) -> TubeResult<PolyMesh> {
        let mut scene = self.spine.mesh.clone();
        for tube in &self.secondaries {
            scene.merge(&tube.mesh)?;
        }
        Ok(scene)
    }

    /// Merge only the secondary tubes, for shapes whose spine is a guide
    /// rather than geometry.
    ///
    /// # Errors
    ///
    /// Returns an error if the combined vertex count overflows `u32`.
    pub fn secondary_scene(&self) -> TubeResult<PolyMesh> {
        let mut scene = PolyMesh::new();
        for tube in &self.secondaries {
            scene.merge(&tube.mesh)?;
        }
        Ok(scene)
    }
}

/// Secondary centerline positions, one per spine sample.
#[must_use]
pub fn derive_positions(spine: &[Sample], offset: &OrbitOffset) -> Vec<Point3<f64>> {
    spine
        .iter()
        .map(|s| s.position + s.frame.to_world(&offset.local_3d(s.t)))
        .collect()
}

/// The secondary position at `t` straight from the spine curve.
///
/// The frame comes from the look-ahead tangent towards `t + step`, the same
/// rule [`FrameMode::Absolute`](crate::FrameMode::Absolute) applies to
/// samples.
///
/// # Example
///
/// ```
/// use curve_fields::{Circle, OrbitOffset};
/// use mesh_tube::offset_point;
/// use nalgebra::Point3;
/// use std::f64::consts::TAU;
///
/// let spine = Circle::new(Point3::origin(), 20.0);
/// let rib = OrbitOffset::new(5.0, 2.0);
/// let step = TAU / 64.0;
///
/// let start = offset_point(&spine, 0.0, step, &rib);
/// let end = offset_point(&spine, TAU, step, &rib);
/// assert!((start - end).norm() < 1e-9);
/// ```
#[must_use]
pub fn offset_point<C>(curve: &C, t: f64, step: f64, offset: &OrbitOffset) -> Point3<f64>
where
    C: PathCurve + ?Sized,
{
    let position = curve.position(t);
    let frame = Frame::from_tangent(&(curve.position(t + step) - position));
    position + frame.to_world(&offset.local_3d(t))
}

/// Generate secondary tubes from an already sampled spine.
///
/// Secondaries are generated in parallel; the result keeps their input
/// order, and on failure the error of the first failing secondary is
/// returned.
///
/// # Errors
///
/// Returns an error if a secondary's configuration is invalid or its radius
/// field yields a negative or non-finite radius.
pub fn compose_from_spine<R>(
    spine: &SampleSet,
    spine_config: &TubeConfig,
    secondaries: &[SecondaryCurve<R>],
) -> TubeResult<Vec<TubeMesh>>
where
    R: RadiusField + Sync,
{
    let params: Vec<f64> = spine.samples.iter().map(|s| s.t).collect();

    let results: Vec<TubeResult<TubeMesh>> = secondaries
        .par_iter()
        .map(|secondary| -> TubeResult<TubeMesh> {
            let config = secondary.config(spine_config);
            config.validate()?;
            let positions = derive_positions(&spine.samples, &secondary.offset);
            let radii: Vec<f64> = params.iter().map(|&t| secondary.radius.radius(t)).collect();
            let samples = samples_from_positions(&params, positions, &radii, &config)?;
            tube_from_samples(samples, &config)
        })
        .collect();

    let tubes = results.into_iter().collect::<TubeResult<Vec<_>>>()?;
    debug!(secondaries = tubes.len(), "generated secondary tubes");
    Ok(tubes)
}

/// Generate a spine tube and every secondary tube that follows it.
///
/// # Errors
///
/// Returns an error if the spine or any secondary configuration is invalid,
/// or if any radius field yields a negative or non-finite radius. Nothing is
/// returned unless every tube succeeds.
///
/// # Example
///
/// ```
/// use curve_fields::{Circle, Constant, OrbitOffset};
/// use mesh_tube::{compose, SecondaryCurve, TubeConfig};
/// use nalgebra::Point3;
/// use std::f64::consts::PI;
///
/// let spine = Circle::new(Point3::origin(), 20.0);
/// let rib = OrbitOffset::new(5.0, 2.0);
/// let ribs = [
///     SecondaryCurve::new(rib, Constant(1.0)),
///     SecondaryCurve::new(rib.phase_shifted(PI), Constant(1.0)),
/// ];
///
/// let config = TubeConfig::default().with_resolution(48);
/// let composite = compose(&spine, &Constant(3.0), &config, &ribs).unwrap();
///
/// assert_eq!(composite.secondaries.len(), 2);
/// assert_eq!(composite.scene().unwrap().vertex_count(), 48 * 16 + 2 * 48 * 12);
/// ```
pub fn compose<C, S, R>(
    spine_curve: &C,
    spine_radius: &S,
    spine_config: &TubeConfig,
    secondaries: &[SecondaryCurve<R>],
) -> TubeResult<Composite>
where
    C: PathCurve + ?Sized,
    S: RadiusField + ?Sized,
    R: RadiusField + Sync,
{
    info!(
        resolution = spine_config.resolution,
        secondaries = secondaries.len(),
        "Composing tubes"
    );

    spine_config.validate()?;
    for secondary in secondaries {
        secondary.config(spine_config).validate()?;
    }

    let spine = sample_path(spine_curve, spine_radius, spine_config)?;

    if spine_config.closure == Closure::Seamless {
        let (start, end) = spine_config.domain;
        let step = spine_config.step();
        for secondary in secondaries {
            check_seam(
                &offset_point(spine_curve, start, step, &secondary.offset),
                &offset_point(spine_curve, end, step, &secondary.offset),
            );
        }
    }

    let secondary_tubes = compose_from_spine(&spine, spine_config, secondaries)?;
    let spine = tube_from_samples(spine, spine_config)?;

    info!(
        spine_vertices = spine.mesh.vertex_count(),
        secondary_vertices = secondary_tubes
            .iter()
            .map(|t| t.mesh.vertex_count())
            .sum::<usize>(),
        "Composite generated"
    );

    Ok(Composite {
        spine,
        secondaries: secondary_tubes,
    })
}
