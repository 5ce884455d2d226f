//! Benchmarks for the engine mixing the whole loop.

use std::{hint::black_box, sync::Arc};

use criterion::{BenchmarkId, Criterion};
use keyloop::{
    engine::Engine,
    sequencing::{ClockNetwork, RhythmSpec},
    synth::{Keymap, VoiceManager},
};

use crate::BLOCK_SIZES;

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");
    let clocks = Arc::new(ClockNetwork::new(125.0, 48_000.0).expect("valid tempo"));

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === EMPTY: clocks only ===
        let mut idle = Engine::new(clocks.clone(), RhythmSpec::default(), 0).expect("engine");
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| idle.render(black_box(&mut buffer)))
        });

        // === FULL LOOP: all eight keys toggled on ===
        let engine = Engine::new(clocks.clone(), RhythmSpec::default(), 0).expect("engine");
        let mut voices = VoiceManager::new(Keymap::techno_loop(), clocks.clone(), engine, 0);
        for key in 'a'..='h' {
            voices.on_key_press(key).expect("voice connects");
        }
        let full = voices.sink_mut();
        group.bench_with_input(BenchmarkId::new("full_loop", size), &size, |b, _| {
            b.iter(|| full.render(black_box(&mut buffer)))
        });
    }

    group.finish();
}
