use crate::{
    dsp::oscillator::OscillatorBlock,
    graph::node::{GraphNode, RenderCtx},
};

/*
LFO (Low Frequency Oscillator)
==============================

An oscillator at sub-audio rate (fractions of a hertz up to ~20 Hz) used to
move a parameter of another node through `.modulate()`. It runs at its own
fixed frequency and ignores pitch context and lanes.

Output is bipolar, -1.0 to +1.0, so the target swings both ways around its
base value:

  // Vibrato: ±2% around 100 Hz at 4 Hz
  BlitNode::new(100.0, 30.0).modulate(LfoNode::sine(4.0), BlitParam::Frequency, 2.0)

  // Harmonic sweep: 20..40 partials over four seconds
  node.modulate(LfoNode::sine(0.25), BlitParam::Harmonics, 10.0)
*/

pub struct LfoNode {
    osc: OscillatorBlock,
    frequency: f32, // Fixed frequency in Hz (ignores note context)
}

impl LfoNode {
    pub fn sine(frequency: f32) -> Self {
        Self {
            osc: OscillatorBlock::sine(),
            frequency,
        }
    }

    pub fn square(frequency: f32) -> Self {
        Self {
            osc: OscillatorBlock::square(),
            frequency,
        }
    }
}

impl GraphNode for LfoNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.osc.render(out, self.frequency, ctx.sample_rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_shapes_are_bipolar_unit() {
        let shapes = [LfoNode::sine(4.0), LfoNode::square(10.0)];
        let ctx = RenderCtx::from_freq(48_000.0, 440.0, 1.0);
        for mut lfo in shapes {
            let mut buffer = vec![0.0; 24_000];
            lfo.render_block(&mut buffer, &ctx);
            assert!(buffer.iter().all(|&s| (-1.0..=1.0).contains(&s)));
            assert!(buffer.iter().any(|&s| s > 0.5) && buffer.iter().any(|&s| s < -0.5));
        }
    }

    #[test]
    fn ignores_context_pitch() {
        let mut a = LfoNode::sine(0.25);
        let mut b = LfoNode::sine(0.25);
        let mut out_a = vec![0.0; 512];
        let mut out_b = vec![0.0; 512];
        a.render_block(&mut out_a, &RenderCtx::from_freq(48_000.0, 440.0, 1.0));
        b.render_block(&mut out_b, &RenderCtx::from_freq(48_000.0, 880.0, 1.0));
        assert_eq!(out_a, out_b);
    }
}
