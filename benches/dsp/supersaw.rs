//! Benchmarks for the seven-saw bank and the band-limited impulse train.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use keyloop::dsp::{blit::BlitBlock, supersaw::SawBank};

use crate::BLOCK_SIZES;

const SR: f32 = 48_000.0;

pub fn bench_supersaw(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/supersaw");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Seven PolyBLEP saws per sample
        let mut bank = SawBank::new(0.65, 0.7, 1);
        group.bench_with_input(BenchmarkId::new("bank", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = bank.next_sample(black_box(130.8), SR);
                }
            })
        });

        // Closed-form impulse train, one sin pair per sample
        let mut blit = BlitBlock::new();
        group.bench_with_input(BenchmarkId::new("blit_30", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = blit.next_sample(black_box(100.0), 30.0, SR);
                }
            })
        });
    }

    group.finish();
}
