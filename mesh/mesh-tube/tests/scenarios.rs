//! End-to-end tube generation scenarios.
//!
//! Each test drives the public API from curve definition to mesh buffers
//! and checks the shape of the output.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use approx::assert_relative_eq;
use curve_fields::{Circle, Constant, Line, OrbitOffset, Pulse, TorusKnot};
use mesh_tube::{
    Closure, Face, FrameMode, PathCurve, SecondaryCurve, TubeConfig, compose, generate_tube, offset_point,
};
use nalgebra::Point3;
use std::f64::consts::{PI, TAU};

// =============================================================================
// Single tubes
// =============================================================================

#[test]
fn seamless_square_torus() {
    let spine = Circle::new(Point3::origin(), 10.0);
    let config = TubeConfig::default().with_resolution(4).with_sides(4);

    let tube = generate_tube(&spine, &Constant(1.0), &config).unwrap();
    let mesh = &tube.mesh;

    assert_eq!(mesh.vertex_count(), 16);
    assert_eq!(mesh.face_count(), 16);
    assert_eq!(mesh.quad_count(), 16);
    assert!(mesh.validate().is_ok());

    for (i, sample) in tube.samples.iter().enumerate() {
        assert_relative_eq!(sample.position.coords.norm(), 10.0, epsilon = 1e-12);
        assert_relative_eq!(sample.position.z, 0.0);
        for vertex in &mesh.vertices[i * 4..(i + 1) * 4] {
            assert_relative_eq!((vertex - sample.position).norm(), 1.0, epsilon = 1e-12);
        }
    }
    assert!(mesh.signed_volume() > 0.0);
}

#[test]
fn capped_straight_tube() {
    let spine = Line::new(Point3::origin(), Point3::new(0.0, 0.0, 10.0));
    let config = TubeConfig::default()
        .with_resolution(3)
        .with_sides(3)
        .with_domain(0.0, 1.0)
        .capped();

    let tube = generate_tube(&spine, &Constant(2.0), &config).unwrap();
    let mesh = &tube.mesh;

    assert_eq!(mesh.vertex_count(), 3 * 3 + 2);
    assert_eq!(mesh.quad_count(), (3 - 1) * 3);
    assert_eq!(mesh.triangle_count(), 3 + 3);
    assert_eq!(mesh.face_count(), 12);
    assert!(mesh.validate().is_ok());

    // Cap centers are the path end points
    assert_relative_eq!(mesh.vertices[9], Point3::origin(), epsilon = 1e-12);
    assert_relative_eq!(mesh.vertices[10], Point3::new(0.0, 0.0, 10.0), epsilon = 1e-12);

    // Triangular prism of circumradius 2 and length 10
    let triangle_area = 0.75 * 3.0_f64.sqrt() * 4.0;
    assert_relative_eq!(mesh.signed_volume(), triangle_area * 10.0, epsilon = 1e-9);
}

#[test]
fn straight_path_has_one_frame() {
    let spine = Line::new(Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, -2.0, 8.0));
    for mode in [FrameMode::Absolute, FrameMode::ParallelTransport] {
        let config = TubeConfig::default()
            .with_resolution(12)
            .with_domain(0.0, 1.0)
            .with_frame_mode(mode)
            .capped();
        let tube = generate_tube(&spine, &Constant(0.5), &config).unwrap();
        let first = tube.samples[0].frame;
        for sample in &tube.samples {
            assert_relative_eq!(*sample.frame.matrix(), *first.matrix(), epsilon = 1e-12);
        }
    }
}

#[test]
fn seamless_wrap_appears_once() {
    let resolution = 10;
    let sides = 6;
    let spine = TorusKnot::trefoil(20.0, 6.0);
    let config = TubeConfig::default()
        .with_resolution(resolution)
        .with_sides(sides);
    let tube = generate_tube(&spine, &Constant(1.0), &config).unwrap();

    let last_ring = resolution - 1;
    let wraps = tube
        .mesh
        .faces
        .iter()
        .filter(|face| {
            let idx = face.indices();
            idx[0] as usize / sides == last_ring && idx[3] as usize / sides == 0
        })
        .count();
    assert_eq!(wraps, sides);

    // Every ring is stitched to its successor by exactly `sides` quads
    for ring in 0..resolution {
        let next = (ring + 1) % resolution;
        let count = tube
            .mesh
            .faces
            .iter()
            .filter(|face| {
                let idx = face.indices();
                idx[0] as usize / sides == ring && idx[3] as usize / sides == next
            })
            .count();
        assert_eq!(count, sides);
    }
}

#[test]
fn regeneration_is_bit_identical() {
    let spine = TorusKnot::new(15.0, 5.0, 4.0, 3.0, 5.0);
    let radius = Pulse::new(1.5, 0.4, 7.0);
    let config = TubeConfig::default()
        .with_resolution(180)
        .with_sides(10)
        .with_twist_turns(0.3)
        .with_frame_mode(FrameMode::ParallelTransport);

    let a = generate_tube(&spine, &radius, &config).unwrap();
    let b = generate_tube(&spine, &radius, &config).unwrap();
    assert_eq!(a.mesh, b.mesh);
    assert_eq!(a.samples, b.samples);
}

#[test]
fn transported_frames_close_the_seam() {
    let spine = TorusKnot::trefoil(20.0, 6.0);
    let sides = 8;
    let resolution = 256;
    let config = TubeConfig::default()
        .with_resolution(resolution)
        .with_sides(sides)
        .with_frame_mode(FrameMode::ParallelTransport);
    let tube = generate_tube(&spine, &Constant(1.5), &config).unwrap();
    let mesh = &tube.mesh;

    let band_edge = |from: usize, to: usize| {
        (0..sides)
            .map(|j| (mesh.vertices[to * sides + j] - mesh.vertices[from * sides + j]).norm())
            .fold(0.0, f64::max)
    };
    let widest_inner = (0..resolution - 1)
        .map(|i| band_edge(i, i + 1))
        .fold(0.0, f64::max);
    let seam = band_edge(resolution - 1, 0);
    assert!(seam < 1.5 * widest_inner, "seam {seam} vs {widest_inner}");
    assert!(mesh.signed_volume() > 0.0);
}

#[test]
fn transported_rings_keep_their_radius_on_an_upright_loop() {
    let spine = |t: f64| Point3::new(10.0 * t.cos(), 0.0, 10.0 * t.sin());
    let sides = 8;
    for resolution in [64, 256] {
        for closure in [Closure::Seamless, Closure::Capped] {
            let config = TubeConfig::default()
                .with_resolution(resolution)
                .with_sides(sides)
                .with_frame_mode(FrameMode::ParallelTransport);
            let config = match closure {
                Closure::Seamless => config.seamless(),
                Closure::Capped => config.capped(),
            };
            let tube = generate_tube(&spine, &Constant(1.0), &config).unwrap();

            for (i, sample) in tube.samples.iter().enumerate() {
                assert!(sample.frame.is_orthonormal(1e-9), "frame {i} drifted");
                for vertex in &tube.mesh.vertices[i * sides..(i + 1) * sides] {
                    assert_relative_eq!((vertex - sample.position).norm(), 1.0, epsilon = 1e-9);
                }
            }
            assert!(tube.mesh.signed_volume() > 0.0);
        }
    }
}

#[test]
fn zero_radius_pinches_but_stays_indexed() {
    let spine = Circle::new(Point3::origin(), 10.0);
    let radius = |t: f64| (t / 2.0).sin().abs();
    let config = TubeConfig::default().with_resolution(16).with_sides(5);
    let tube = generate_tube(&spine, &radius, &config).unwrap();

    // Ring 0 sits at t = 0, where the radius vanishes
    for vertex in &tube.mesh.vertices[..5] {
        assert_relative_eq!(*vertex, tube.samples[0].position, epsilon = 1e-12);
    }
    assert!(tube.mesh.validate().is_ok());
}

#[test]
fn configuration_errors_reject_generation() {
    let spine = Circle::new(Point3::origin(), 10.0);
    assert!(generate_tube(&spine, &Constant(1.0), &TubeConfig::default().with_resolution(1)).is_err());
    assert!(generate_tube(&spine, &Constant(1.0), &TubeConfig::default().with_sides(2)).is_err());
    assert!(
        generate_tube(
            &spine,
            &Constant(1.0),
            &TubeConfig::default().with_domain(1.0, 0.0)
        )
        .is_err()
    );
}

// =============================================================================
// Composite structures
// =============================================================================

#[test]
fn rib_closes_with_spine() {
    let spine = Circle::new(Point3::origin(), 20.0);
    let rib = OrbitOffset::new(5.0, 2.0);
    let step = TAU / 64.0;

    let start = offset_point(&spine, 0.0, step, &rib);
    let end = offset_point(&spine, TAU, step, &rib);
    assert_relative_eq!(start, end, epsilon = 1e-9);
    assert_relative_eq!((start - spine.position(0.0)).norm(), 5.0, epsilon = 1e-12);
}

#[test]
fn composite_scene_places_every_tube() {
    let spine = Circle::new(Point3::origin(), 20.0);
    let rib = OrbitOffset::new(5.0, 2.0);
    let ribs = [
        SecondaryCurve::new(rib, Pulse::new(1.0, 0.2, 4.0)).with_sides(6),
        SecondaryCurve::new(rib.phase_shifted(PI), Pulse::new(1.0, 0.2, 4.0)).with_sides(6),
    ];
    let config = TubeConfig::default().with_resolution(64).with_sides(12);

    let composite = compose(&spine, &Constant(3.0), &config, &ribs).unwrap();
    let scene = composite.scene().unwrap();

    assert_eq!(scene.vertex_count(), 64 * 12 + 2 * 64 * 6);
    assert_eq!(scene.face_count(), 64 * 12 + 2 * 64 * 6);
    assert!(scene.validate().is_ok());

    // The second tube's faces were shifted past the spine's vertices
    let first_rib_face = scene.faces[64 * 12];
    assert!(first_rib_face.indices().iter().all(|&i| i as usize >= 64 * 12));
    assert!(matches!(first_rib_face, Face::Quad(_)));

    // Ribs stay on the spine's closure and sampling
    for tube in &composite.secondaries {
        assert_eq!(tube.ring_count(), 64);
        assert_eq!(tube.seam_shift, 0);
        assert!(tube.mesh.signed_volume() > 0.0);
    }
    assert_eq!(config.closure, Closure::Seamless);
}
