use crate::{
    dsp::modulate::block_average,
    graph::node::{GraphNode, Modulatable, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
Parameter Modulation
====================

`node.modulate(lfo, param, depth)` drives one parameter of `node` from
another signal:

    value = base + lfo × depth

The base is whatever `get_param` reports, so it is never overwritten by the
modulation and the sweep stays centred. With base 30 and depth 10, a sine
LFO moves the parameter between 20 and 40.

Modulation is applied once per block from the average of the modulator
block (see `dsp::modulate`). For slow LFOs against 64-2048 sample blocks
that is indistinguishable from per-sample updates.

A `Modulate` is itself `Modulatable` (forwarding to the wrapped node), so
several parameters of one node can be driven by chaining:

    BlitNode::new(100.0, 30.0)
        .modulate(LfoNode::sine(4.0), BlitParam::Frequency, 2.0)
        .modulate(LfoNode::sine(0.25), BlitParam::Harmonics, 10.0)
*/

pub struct Modulate<S, L>
where
    S: GraphNode + Modulatable,
    L: GraphNode,
{
    source: S,
    lfo: L,
    param: S::Param,
    depth: f32,
    lfo_buffer: Vec<f32>,
}

impl<S, L> Modulate<S, L>
where
    S: GraphNode + Modulatable,
    L: GraphNode,
{
    pub fn new(source: S, lfo: L, param: S::Param, depth: f32) -> Self {
        Self {
            source,
            lfo,
            param,
            depth,
            lfo_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<S, L> GraphNode for Modulate<S, L>
where
    S: GraphNode + Modulatable,
    L: GraphNode,
{
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        debug_assert!(out.len() <= MAX_BLOCK_SIZE, "block of {} frames", out.len());
        let len = out.len();
        let lfo = &mut self.lfo_buffer[..len];
        self.lfo.render_block(lfo, ctx);

        let base = self.source.get_param(self.param);
        self.source
            .apply_modulation(self.param, base, block_average(lfo) * self.depth);

        self.source.render_block(out, ctx);
    }
}

impl<S, L> Modulatable for Modulate<S, L>
where
    S: GraphNode + Modulatable,
    L: GraphNode,
{
    type Param = S::Param;

    fn get_param(&self, param: Self::Param) -> f32 {
        self.source.get_param(param)
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        self.source.apply_modulation(param, base, modulation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{
        extensions::NodeExt,
        filter::{FilterNode, FilterParam},
        lfo::LfoNode,
        oscillator::OscNode,
    };

    fn ctx() -> RenderCtx<'static> {
        RenderCtx::from_freq(48_000.0, 440.0, 1.0)
    }

    #[test]
    fn base_survives_modulation() {
        let mut node =
            FilterNode::lowpass(880.0).modulate(LfoNode::square(1.0), FilterParam::Cutoff, 400.0);
        let mut buffer = vec![0.0; 256];
        for _ in 0..8 {
            node.render_block(&mut buffer, &ctx());
        }
        assert_eq!(node.get_param(FilterParam::Cutoff), 880.0);
    }

    #[test]
    fn huge_depth_stays_finite() {
        let sweep =
            FilterNode::lowpass(1_000.0).modulate(LfoNode::square(1.0), FilterParam::Cutoff, 1.0e6);
        let mut node = OscNode::sawtooth().through(sweep);
        let mut buffer = vec![0.0; 1024];
        for _ in 0..4 {
            node.render_block(&mut buffer, &ctx());
            assert!(buffer.iter().all(|s| s.is_finite()));
        }
    }

    #[test]
    fn chained_modulations_reach_the_same_node() {
        let mut node = FilterNode::lowpass(2_000.0)
            .modulate(LfoNode::sine(3.0), FilterParam::Cutoff, 800.0)
            .modulate(LfoNode::sine(0.5), FilterParam::Resonance, 0.2);
        let mut buffer = vec![0.0; 256];
        node.render_block(&mut buffer, &ctx());
        assert_eq!(node.get_param(FilterParam::Cutoff), 2_000.0);
    }
}
