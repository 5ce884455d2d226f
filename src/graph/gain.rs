use crate::{
    dsp::mix::apply_gain,
    graph::node::{GraphNode, RenderCtx},
};

/// Scale a node's output by a constant. Instruments use this for their
/// output level, the equivalent of a `mul` on the final stage.
pub struct Gain<N> {
    node: N,
    gain: f32,
}

impl<N> Gain<N> {
    pub fn new(node: N, gain: f32) -> Self {
        Self { node, gain }
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }
}

impl<N: GraphNode> GraphNode for Gain<N> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.node.render_block(out, ctx);
        apply_gain(out, self.gain);
    }
}
