//! Benchmarks for waveshaping distortion.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use keyloop::dsp::distortion::{drive_to_k, saturate, Saturator};

use crate::BLOCK_SIZES;

pub fn bench_distortion(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/distortion");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        // Bare shaping curve
        let k = drive_to_k(0.75);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("curve", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(&input) {
                    *out = saturate(black_box(x), k);
                }
            })
        });

        // Curve plus slope filter
        let mut saturator = Saturator::new(0.85, 0.5);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("saturator", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                saturator.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
