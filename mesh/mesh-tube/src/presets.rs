//! Ready-made shapes built on the generic tube pipeline.
//!
//! Each preset is a parameter struct with sensible defaults and a function
//! that turns it into meshes. They only pick curves and radius fields; all
//! geometry goes through [`generate_tube`] and [`compose`].

use curve_fields::{OrbitOffset, Pulse, Taper, TorusKnot};
use nalgebra::Point3;
use std::f64::consts::TAU;
use tracing::info;

use crate::compose::{Composite, SecondaryCurve, compose, compose_from_spine};
use crate::error::TubeResult;
use crate::frame::FrameMode;
use crate::sample::sample_path;
use crate::tube::{TubeConfig, TubeMesh, generate_tube};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single pulsating tube along a `(p, q)` torus knot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KnotParams {
    /// Distance from the knot's axis to the torus tube center.
    pub major_radius: f64,
    /// Radius of the torus tube the knot winds around.
    pub minor_radius: f64,
    /// Vertical amplitude.
    pub height: f64,
    /// Turns around the axis.
    pub p: f64,
    /// Turns through the hole.
    pub q: f64,
    /// Mean tube radius.
    pub thickness: f64,
    /// Radius pulse amplitude.
    pub pulse_amplitude: f64,
    /// Radius pulses per lap.
    pub pulse_frequency: f64,
    /// Sampling and cross-section.
    pub config: TubeConfig,
}

impl Default for KnotParams {
    fn default() -> Self {
        Self {
            major_radius: 20.0,
            minor_radius: 6.0,
            height: 6.0,
            p: 2.0,
            q: 3.0,
            thickness: 2.0,
            pulse_amplitude: 0.5,
            pulse_frequency: 9.0,
            config: TubeConfig::default().with_resolution(256).with_sides(12),
        }
    }
}

/// Generate a knot tube.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the pulse drives the
/// radius negative.
///
/// # Example
///
/// ```
/// use mesh_tube::presets::{knot_tube, KnotParams};
///
/// let tube = knot_tube(&KnotParams::default()).unwrap();
/// assert_eq!(tube.mesh.vertex_count(), 256 * 12);
/// ```
pub fn knot_tube(params: &KnotParams) -> TubeResult<TubeMesh> {
    let spine = TorusKnot::new(
        params.major_radius,
        params.minor_radius,
        params.height,
        params.p,
        params.q,
    );
    let radius = Pulse::new(
        params.thickness,
        params.pulse_amplitude,
        params.pulse_frequency,
    );
    generate_tube(&spine, &radius, &params.config)
}

/// Strands twisting around a swaying, rising guide curve, each tapering
/// towards the tip with a flicker.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlameParams {
    /// Number of strands, spread evenly around the guide.
    pub strands: usize,
    /// Total rise of the guide.
    pub height: f64,
    /// Horizontal sway of the guide.
    pub sway: f64,
    /// Sway cycles over the height.
    pub sway_frequency: f64,
    /// Strand distance from the guide.
    pub spread: f64,
    /// Turns each strand makes around the guide.
    pub wraps: f64,
    /// Strand radius at the base.
    pub base_radius: f64,
    /// Strand radius at the tip.
    pub tip_radius: f64,
    /// Flicker amplitude on the strand radius.
    pub flicker: f64,
    /// Flicker cycles over the height.
    pub flicker_frequency: f64,
    /// Sampling and cross-section.
    ///
    /// The guide runs close to vertical, where absolute frames switch
    /// reference axis and roll abruptly, so the default transports them.
    pub config: TubeConfig,
}

impl Default for FlameParams {
    fn default() -> Self {
        Self {
            strands: 5,
            height: 40.0,
            sway: 3.0,
            sway_frequency: 1.5,
            spread: 4.0,
            wraps: 1.5,
            base_radius: 2.0,
            tip_radius: 0.4,
            flicker: 0.15,
            flicker_frequency: 12.0,
            config: TubeConfig::default()
                .with_resolution(96)
                .with_sides(8)
                .with_frame_mode(FrameMode::ParallelTransport)
                .capped(),
        }
    }
}

/// Generate flame strands. The guide curve itself is not meshed.
///
/// Strand `k` starts at phase `2πk / strands` around the guide, and its
/// flicker is phased the same way so the strands do not pulse in step.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the domain is
/// degenerate, or a strand radius goes negative.
pub fn flame(params: &FlameParams) -> TubeResult<Vec<TubeMesh>> {
    let (start, end) = params.config.domain;
    let span = end - start;
    let (height, sway, sway_frequency) = (params.height, params.sway, params.sway_frequency);
    let guide = move |t: f64| {
        let rise = (t - start) / span;
        let (sin_s, cos_s) = (TAU * sway_frequency * rise).sin_cos();
        Point3::new(sway * sin_s, 0.5 * sway * cos_s, height * rise)
    };

    let strand_frequency = params.wraps * TAU / span;
    let strands = (0..params.strands)
        .map(|k| -> TubeResult<SecondaryCurve<Taper>> {
            let phase = TAU * k as f64 / params.strands as f64;
            let radius = Taper::new(params.base_radius, params.tip_radius, start, end)?.with_pulse(
                params.flicker,
                params.flicker_frequency * TAU / span,
                phase,
            );
            let offset = OrbitOffset::new(params.spread, strand_frequency).phase_shifted(phase);
            Ok(SecondaryCurve::new(offset, radius).with_sides(params.config.sides))
        })
        .collect::<TubeResult<Vec<_>>>()?;

    let spine = sample_path(&guide, &|_: f64| 0.0, &params.config)?;
    let meshes = compose_from_spine(&spine, &params.config, &strands)?;

    info!(strands = meshes.len(), "Flame generated");
    Ok(meshes)
}

/// A thick wavy loop with two thinner ribs spiralling around it in
/// opposite phase.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GargoyleParams {
    /// Radius of the spine loop.
    pub loop_radius: f64,
    /// Vertical amplitude of the spine's waves.
    pub wave_height: f64,
    /// Waves per lap; whole numbers keep the loop closed.
    pub waves: f64,
    /// Mean spine thickness.
    pub spine_thickness: f64,
    /// Spine thickness pulse amplitude.
    pub spine_pulse: f64,
    /// Spine pulses per lap.
    pub spine_pulse_frequency: f64,
    /// Rib distance from the spine centerline.
    pub rib_offset: f64,
    /// Rib turns around the spine per lap.
    pub rib_wraps: f64,
    /// Mean rib thickness.
    pub rib_thickness: f64,
    /// Rib thickness pulse amplitude.
    pub rib_pulse: f64,
    /// Rib pulses per lap.
    pub rib_pulse_frequency: f64,
    /// Rib cross-section sides.
    pub rib_sides: usize,
    /// Spine sampling and cross-section; ribs share its sampling.
    pub config: TubeConfig,
}

impl Default for GargoyleParams {
    fn default() -> Self {
        Self {
            loop_radius: 25.0,
            wave_height: 8.0,
            waves: 3.0,
            spine_thickness: 4.0,
            spine_pulse: 1.0,
            spine_pulse_frequency: 6.0,
            rib_offset: 6.0,
            rib_wraps: 4.0,
            rib_thickness: 1.2,
            rib_pulse: 0.4,
            rib_pulse_frequency: 8.0,
            rib_sides: 8,
            config: TubeConfig::default().with_resolution(192).with_sides(16),
        }
    }
}

/// Generate the gargoyle: spine plus two ribs phased `0` and `π`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a pulse drives a
/// radius negative.
///
/// # Example
///
/// ```
/// use mesh_tube::presets::{gargoyle, GargoyleParams};
///
/// let composite = gargoyle(&GargoyleParams::default()).unwrap();
/// assert_eq!(composite.secondaries.len(), 2);
/// ```
pub fn gargoyle(params: &GargoyleParams) -> TubeResult<Composite> {
    // A (1, waves) torus knot with no minor radius is a circle that rises
    // and falls `waves` times.
    let spine = TorusKnot::new(params.loop_radius, 0.0, params.wave_height, 1.0, params.waves);
    let spine_radius = Pulse::new(
        params.spine_thickness,
        params.spine_pulse,
        params.spine_pulse_frequency,
    );

    let rib = OrbitOffset::new(params.rib_offset, params.rib_wraps);
    let rib_radius = Pulse::new(
        params.rib_thickness,
        params.rib_pulse,
        params.rib_pulse_frequency,
    );
    let ribs = [
        SecondaryCurve::new(rib, rib_radius).with_sides(params.rib_sides),
        SecondaryCurve::new(rib.phase_shifted(std::f64::consts::PI), rib_radius)
            .with_sides(params.rib_sides),
    ];

    compose(&spine, &spine_radius, &params.config, &ribs)
}
