//! Benchmarks for state-variable filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use keyloop::dsp::filter::SVFilter;

use crate::BLOCK_SIZES;

const SR: f32 = 48_000.0;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Ramp test signal
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        let filters = [
            ("lowpass", SVFilter::lowpass(880.0)),
            ("highpass", SVFilter::highpass(7_000.0)),
            ("bandpass", SVFilter::bandpass(1_000.0)),
        ];

        for (name, mut filter) in filters {
            filter.set_resonance(0.5);
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    filter.render(black_box(&mut buffer), SR);
                })
            });
        }
    }

    group.finish();
}
