//! Benchmarks for tube generation.
//!
//! Run with: cargo bench -p mesh-tube
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-tube -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-tube -- --baseline main

#![allow(missing_docs, clippy::cast_possible_truncation, clippy::unwrap_used)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use curve_fields::{Pulse, TorusKnot};
use mesh_tube::presets::{GargoyleParams, gargoyle};
use mesh_tube::{FrameMode, TubeConfig, build_frames, generate_tube};

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_generate_tube(c: &mut Criterion) {
    let mut group = c.benchmark_group("GenerateTube");

    let spine = TorusKnot::trefoil(20.0, 6.0);
    let radius = Pulse::new(2.0, 0.5, 9.0);

    for resolution in [64usize, 256, 1024] {
        let config = TubeConfig::default()
            .with_resolution(resolution)
            .with_sides(16);
        group.throughput(Throughput::Elements((resolution * 16) as u64));
        group.bench_with_input(
            BenchmarkId::new("trefoil", resolution),
            &config,
            |b, config| {
                b.iter(|| generate_tube(black_box(&spine), black_box(&radius), config));
            },
        );
    }

    group.finish();
}

fn bench_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("Frames");

    let spine = TorusKnot::trefoil(20.0, 6.0);
    let config = TubeConfig::default().with_resolution(1024);
    let positions: Vec<_> = config
        .parameters()
        .iter()
        .map(|&t| curve_fields::PathCurve::position(&spine, t))
        .collect();

    for mode in [FrameMode::Absolute, FrameMode::ParallelTransport] {
        group.bench_function(format!("{mode:?}"), |b| {
            b.iter(|| build_frames(black_box(&positions), config.closure, mode));
        });
    }

    group.finish();
}

fn bench_composite(c: &mut Criterion) {
    let mut group = c.benchmark_group("Composite");
    group.sample_size(20);

    let params = GargoyleParams::default();
    group.bench_function("gargoyle", |b| {
        b.iter(|| gargoyle(black_box(&params)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_generate_tube, bench_frames, bench_composite);
criterion_main!(benches);
