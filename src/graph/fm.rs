use std::f32::consts::TAU;

use crate::{
    graph::{
        node::{GraphNode, RenderCtx},
        oscillator::Pitch,
    },
    sequencing::PitchLane,
    MAX_BLOCK_SIZE,
};

/*
FM Pair
=======

Two sine operators: a modulator running at `carrier × ratio` bends the phase
of the carrier.

    out = sin(2π·φc + index · sin(2π·φm))

The modulation index is itself a signal: another node rendered per block, so
an envelope can open the spectrum on the attack and close it on the decay.

    index 0     plain sine at the carrier
    index ~1    a few sidebands at carrier ± k · modulator
    index 3+    bright and metallic

Ratios just off a simple fraction (0.2498 instead of 0.25) make the sidebands
beat slowly against each other, which is where the growl comes from.

Example usage:
  let env = TriggerEnvelope::new(trigger, table);
  let bass = FmPair::new(Pitch::Lane(PitchLane::Bass, 0.0), 0.2498, env);
*/

pub struct FmPair<I> {
    pitch: Pitch,
    ratio: f32,
    index: I,
    carrier_phase: f32,
    modulator_phase: f32,
    index_buffer: Vec<f32>,
}

impl<I: GraphNode> FmPair<I> {
    pub fn new(pitch: Pitch, ratio: f32, index: I) -> Self {
        Self {
            pitch,
            ratio,
            index,
            carrier_phase: 0.0,
            modulator_phase: 0.0,
            index_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    /// Carrier following a pitch lane, shifted by `offset_hz`.
    pub fn on_lane(lane: PitchLane, offset_hz: f32, ratio: f32, index: I) -> Self {
        Self::new(Pitch::Lane(lane, offset_hz), ratio, index)
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }
}

impl<I: GraphNode> GraphNode for FmPair<I> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        debug_assert!(out.len() <= MAX_BLOCK_SIZE, "block of {} frames", out.len());
        let len = out.len();
        let index = &mut self.index_buffer[..len];
        self.index.render_block(index, ctx);

        let fixed = match self.pitch {
            Pitch::Fixed(hz) => hz,
            _ => 0.0,
        };

        for (i, sample) in out.iter_mut().enumerate() {
            let carrier = self.pitch.frequency(ctx, i, fixed);
            if !carrier.is_finite() || carrier <= 0.0 {
                *sample = 0.0;
                continue;
            }

            *sample = (TAU * self.carrier_phase + index[i] * (TAU * self.modulator_phase).sin()).sin();

            self.carrier_phase = (self.carrier_phase + carrier / ctx.sample_rate).fract();
            self.modulator_phase =
                (self.modulator_phase + carrier * self.ratio / ctx.sample_rate).fract();
        }
    }
}
