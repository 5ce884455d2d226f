//! Benchmarks for complete instrument graphs.
//!
//! Each voice renders against frames taken from a running conductor, so
//! envelopes fire and lanes move the way they do in the loop.

use std::{hint::black_box, sync::Arc};

use criterion::{BenchmarkId, Criterion};
use keyloop::{
    graph::RenderCtx,
    sequencing::{ClockNetwork, Conductor, RhythmSpec, Tick},
    voices::{Instrument, VoiceContext},
};

use crate::BLOCK_SIZES;

const SR: f64 = 48_000.0;

const INSTRUMENTS: [Instrument; 9] = [
    Instrument::Kick,
    Instrument::ClosedHat,
    Instrument::OpenHat,
    Instrument::Bass,
    Instrument::Chord,
    Instrument::LowChord,
    Instrument::Melody,
    Instrument::Sparkle,
    Instrument::Drone(110.0),
];

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let clocks = Arc::new(ClockNetwork::new(125.0, SR).expect("valid tempo"));
    let ctx = VoiceContext::new(clocks.clone(), 3);

    for &size in BLOCK_SIZES {
        // Start nine bars in so every pattern is already running.
        let mut conductor =
            Conductor::new(clocks.clone(), RhythmSpec::default(), 3).expect("default rhythm");
        conductor.skip(9 * 92_160);
        let mut ticks = vec![Tick::default(); size];
        conductor.advance(&mut ticks);
        let render_ctx = RenderCtx::with_ticks(SR as f32, &ticks);

        let mut buffer = vec![0.0f32; size];
        for instrument in INSTRUMENTS {
            let mut voice = instrument.build(&ctx).expect("instrument builds");
            group.bench_with_input(
                BenchmarkId::new(instrument.name(), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        voice.render_block(black_box(&mut buffer), black_box(&render_ctx));
                    })
                },
            );
        }
    }

    group.finish();
}
