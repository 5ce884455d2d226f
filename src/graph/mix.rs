use crate::{
    dsp::mix::mix_in_place,
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
Parallel Signal Mixing
======================

Renders two sources and crossfades them linearly:

    output = A × (1 - balance) + B × balance

  balance = 0.0 → all A
  balance = 0.5 → half of each
  balance = 1.0 → all B

The weights sum to 1, so the mix never exceeds the louder input. Both
sources see the same render context, so an envelope inside either one still
fires on its own trigger.

Example usage:
  // Two detuned FM pairs as one bass
  let bass = fm_low.mix(fm_high, 0.5);

  // Keep some dry signal around an echo
  let wet_dry = dry.mix(delayed, 0.4);
*/

pub struct Mix<A, B> {
    pub source_a: A,
    pub source_b: B,
    pub balance: f32, // 0.0 = all A, 1.0 = all B, 0.5 = equal mix
    temp_buffer: Vec<f32>,
}

impl<A, B> Mix<A, B> {
    pub fn new(source_a: A, source_b: B, balance: f32) -> Self {
        Mix {
            source_a,
            source_b,
            balance: balance.clamp(0.0, 1.0),
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<S: GraphNode, M: GraphNode> GraphNode for Mix<S, M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        debug_assert!(out.len() <= MAX_BLOCK_SIZE, "block of {} frames", out.len());
        self.source_a.render_block(out, ctx);

        let frames = &mut self.temp_buffer[..out.len()];
        frames.fill(0.0);
        self.source_b.render_block(frames, ctx);

        mix_in_place(out, frames, self.balance);
    }
}
