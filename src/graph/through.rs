use crate::graph::node::{GraphNode, RenderCtx};

/*
Serial Chain
============

`a.through(b)` renders `a` into the block, then lets `b` process that block
in place. Every effect stage of an instrument hangs off this:

    [FmPair] ──→ [Distortion] ──→ out
    [SuperSaw] ──→ [LowPass] ──→ [Delay] ──→ out

An effect that is also a source (an oscillator) simply overwrites the
buffer, so the order matters.

Compare:
  through   serial, source → effect
  amplify   product, signal × modulator
  mix       parallel, crossfade of two sources
*/

pub struct Through<S, F> {
    source: S,
    filter: F,
}

impl<S, F> Through<S, F> {
    pub fn new(source: S, filter: F) -> Self {
        Self { source, filter }
    }
}

impl<S: GraphNode, F: GraphNode> GraphNode for Through<S, F> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.filter.render_block(out, ctx);
    }
}
