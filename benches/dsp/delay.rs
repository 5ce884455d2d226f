//! Benchmarks for delay line operations.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use keyloop::dsp::delay::DelayLine;

use crate::BLOCK_SIZES;

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    // Half a beat and a beat at 125 BPM, 48kHz
    let delay_times: &[usize] = &[11_520, 23_040];

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        for &delay_samples in delay_times {
            let mut delay = DelayLine::new(delay_samples, 0.3);
            let mut buffer = input.clone();
            group.bench_with_input(
                BenchmarkId::new(format!("feedback_{delay_samples}"), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        for (out, &x) in buffer.iter_mut().zip(&input) {
                            *out = delay.next_sample(black_box(x));
                        }
                    })
                },
            );
        }
    }

    group.finish();
}
