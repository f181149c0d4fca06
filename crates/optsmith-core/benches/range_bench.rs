//! Criterion benchmarks for optsmith-core range mapping
//!
//! Run with: cargo bench -p optsmith-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use optsmith_core::{RangeSpec, SliderTrack, convert_range, snap_to};

const SAMPLE_COUNTS: &[usize] = &[64, 1024];

fn generate_positions(count: usize) -> Vec<f64> {
    (0..count).map(|i| (i as f64 * 7.3) % 400.0 - 50.0).collect()
}

fn bench_snap(c: &mut Criterion) {
    let mut group = c.benchmark_group("snap_to");

    for &count in SAMPLE_COUNTS {
        let values = generate_positions(count);

        group.bench_with_input(BenchmarkId::new("integer_step", count), &count, |b, _| {
            b.iter(|| {
                for &v in &values {
                    black_box(snap_to(black_box(v), 10.0, 0.0, 100.0));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("fractional_step", count), &count, |b, _| {
            b.iter(|| {
                for &v in &values {
                    black_box(snap_to(black_box(v), 0.25, 0.0, 100.0));
                }
            });
        });

        // Precision derived once up front
        let spec = RangeSpec::new(0.0, 100.0).with_step(0.25);
        group.bench_with_input(BenchmarkId::new("range_spec", count), &count, |b, _| {
            b.iter(|| {
                for &v in &values {
                    black_box(spec.snap(black_box(v)));
                }
            });
        });
    }

    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_range");

    group.bench_function("single", |b| {
        b.iter(|| {
            black_box(convert_range(
                black_box(25.0),
                black_box(0.0),
                black_box(100.0),
                black_box(0.0),
                black_box(1.0),
            ))
        });
    });

    let track = SliderTrack::new(0.0, 320.0);
    let spec = RangeSpec::new(5.0, 95.0).with_step(5.0);
    let positions = generate_positions(1024);
    group.bench_function("slider_drag_1024", |b| {
        b.iter(|| {
            for &p in &positions {
                let _ = black_box(track.value_at(black_box(p), &spec));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_snap, bench_convert);
criterion_main!(benches);
