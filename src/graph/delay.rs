use crate::{
    dsp::{delay::DelayLine, mix::blend_dry_wet},
    graph::node::{GraphNode, RenderCtx},
};

/*
Multi-Tap Feedback Delay
========================

One or more independent feedback delay lines fed from the same input and
averaged to a mono output:

    in ──┬──→ [line 0: beat]   ──┐
         └──→ [line 1: ½ beat] ──┴─ avg ──→ wet

`mix` blends the wet signal with the input. The default is fully wet, so the
node behaves as a pure echo; put a dry path around it with `.mix()` if the
direct sound is wanted too.

Delay lines are allocated here, at build time, for the sample rate the
voice is built for. Tap lengths are musical: voices convert beats to
seconds with their clock network.
*/

pub struct DelayNode {
    lines: Vec<DelayLine>,
    mix: f32,
}

impl DelayNode {
    pub fn new(taps_secs: &[f32], feedback: f32, sample_rate: f32) -> Self {
        let lines = taps_secs
            .iter()
            .map(|&secs| DelayLine::from_secs(secs, sample_rate, feedback))
            .collect();
        Self { lines, mix: 1.0 }
    }

    pub fn with_mix(mut self, mix: f32) -> Self {
        self.mix = mix.clamp(0.0, 1.0);
        self
    }

    pub fn tap_samples(&self) -> impl Iterator<Item = usize> + '_ {
        self.lines.iter().map(DelayLine::delay_samples)
    }
}

impl GraphNode for DelayNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        if self.lines.is_empty() {
            return;
        }
        let norm = 1.0 / self.lines.len() as f32;
        for sample in out.iter_mut() {
            let dry = *sample;
            let wet: f32 = self.lines.iter_mut().map(|line| line.next_sample(dry)).sum();
            *sample = blend_dry_wet(dry, wet * norm, self.mix);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse(len: usize) -> Vec<f32> {
        let mut buffer = vec![0.0f32; len];
        buffer[0] = 1.0;
        buffer
    }

    #[test]
    fn taps_are_averaged() {
        let sr = 1_000.0;
        let mut delay = DelayNode::new(&[0.010, 0.005], 0.0, sr);
        let mut buffer = impulse(32);
        delay.render_block(&mut buffer, &RenderCtx::from_freq(sr, 0.0, 1.0));
        assert_eq!(buffer[0], 0.0);
        assert_eq!(buffer[5], 0.5);
        assert_eq!(buffer[10], 0.5);
    }

    #[test]
    fn feedback_echoes_across_blocks() {
        let sr = 1_000.0;
        let ctx = RenderCtx::from_freq(sr, 0.0, 1.0);
        let mut delay = DelayNode::new(&[0.008], 0.3, sr);
        let mut first = impulse(10);
        delay.render_block(&mut first, &ctx);
        let mut second = vec![0.0f32; 10];
        delay.render_block(&mut second, &ctx);
        assert_eq!(first[8], 1.0);
        assert!((second[6] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn dry_mix_passes_input() {
        let sr = 1_000.0;
        let mut delay = DelayNode::new(&[0.004], 0.0, sr).with_mix(0.0);
        let mut buffer = impulse(8);
        delay.render_block(&mut buffer, &RenderCtx::from_freq(sr, 0.0, 1.0));
        assert_eq!(buffer, impulse(8));
    }
}
