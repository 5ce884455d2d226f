use crate::{
    dsp::blit::BlitBlock,
    graph::node::{GraphNode, Modulatable, RenderCtx},
};

/// Band-limited impulse train with modulatable pitch and harmonic count.
///
/// ```ignore
/// // Slow harmonic sweep with a little vibrato
/// BlitNode::new(100.0, 30.0)
///     .modulate(LfoNode::sine(4.0), BlitParam::Frequency, 2.0)
///     .modulate(LfoNode::sine(0.25), BlitParam::Harmonics, 10.0)
/// ```
pub struct BlitNode {
    blit: BlitBlock,
    base_frequency: f32,
    base_harmonics: f32,
    frequency: f32,
    harmonics: f32,
}

#[derive(Clone, Copy, Debug)]
pub enum BlitParam {
    Frequency,
    Harmonics,
}

impl BlitNode {
    pub fn new(frequency: f32, harmonics: f32) -> Self {
        Self {
            blit: BlitBlock::new(),
            base_frequency: frequency,
            base_harmonics: harmonics,
            frequency,
            harmonics,
        }
    }
}

impl GraphNode for BlitNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for sample in out.iter_mut() {
            *sample = self
                .blit
                .next_sample(self.frequency, self.harmonics, ctx.sample_rate);
        }
    }
}

impl Modulatable for BlitNode {
    type Param = BlitParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            BlitParam::Frequency => self.base_frequency,
            BlitParam::Harmonics => self.base_harmonics,
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        match param {
            BlitParam::Frequency => self.frequency = (base + modulation).clamp(1.0, 20_000.0),
            BlitParam::Harmonics => self.harmonics = (base + modulation).max(1.0),
        }
    }
}
