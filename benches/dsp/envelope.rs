//! Benchmarks for envelope table lookup.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use keyloop::dsp::envelope::EnvelopeTable;

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    // Table construction happens once per voice, on the control thread.
    group.bench_function("build_cosine", |b| {
        b.iter(|| {
            EnvelopeTable::cosine(black_box(&[
                (0, 0.0),
                (3000, 1.0),
                (4000, 0.5),
                (5500, 0.6),
                (8191, 0.0),
            ]))
        })
    });

    let table = EnvelopeTable::cosine(&[(0, 0.0), (10, 1.0), (1000, 0.5), (8191, 0.0)])
        .expect("valid breakpoints");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];
        let step = 1.0 / 21_600.0;
        group.bench_with_input(BenchmarkId::new("lookup", size), &size, |b, _| {
            b.iter(|| {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    *sample = table.lookup(black_box(i as f32 * step));
                }
            })
        });
    }

    group.finish();
}
