//! Benchmarks for the trigger network.

use std::{hint::black_box, sync::Arc};

use criterion::{BenchmarkId, Criterion};
use keyloop::sequencing::{ClockNetwork, Conductor, RhythmSpec, Tick};

use crate::BLOCK_SIZES;

pub fn bench_conductor(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/conductor");
    let clocks = Arc::new(ClockNetwork::new(125.0, 48_000.0).expect("valid tempo"));

    for &size in BLOCK_SIZES {
        let mut conductor =
            Conductor::new(clocks.clone(), RhythmSpec::default(), 1).expect("default rhythm");
        let mut ticks = vec![Tick::default(); size];

        group.bench_with_input(BenchmarkId::new("advance", size), &size, |b, _| {
            b.iter(|| {
                conductor.advance(black_box(&mut ticks));
            })
        });
    }

    group.finish();
}
