use crate::{
    dsp::filter::SVFilter,
    graph::node::{GraphNode, Modulatable, RenderCtx},
};

/*
State-Variable Filter Node
==========================

Wraps the TPT state-variable filter from `dsp::filter` as a graph node, with
cutoff and resonance exposed to `.modulate()`.

  lowpass    keeps what is below the cutoff; chords and pads
  highpass   keeps what is above; turns noise into hats
  bandpass   keeps a band around the cutoff

Cutoff (Hz): modulation results are clamped to 20 Hz - 20 kHz, and the
filter itself keeps it below Nyquist.

Resonance: Emphasis at the cutoff frequency, 0.0 to just under 1.0.
  - 0.0:  No emphasis (gentle rolloff)
  - 0.5:  Slight peak (the chord stack)
  - 0.8:  Strong, vocal peak (the low chord)

Example usage:
  // Dark chord stack
  let pad = SuperSaw::chord(&notes, 1.0, 0.65, 0.7, seed)
      .through(FilterNode::lowpass(880.0).with_resonance(0.5));

  // Thin, airy noise for hats
  let hat = OscNode::noise(seed).through(FilterNode::highpass(7_000.0));
*/

#[derive(Clone, Copy, Debug)]
pub enum FilterParam {
    Cutoff,
    Resonance,
}

pub struct FilterNode {
    filter: SVFilter,
    base_cutoff: f32,
    base_resonance: f32,
}

impl FilterNode {
    fn new(filter: SVFilter) -> Self {
        FilterNode {
            base_cutoff: filter.cutoff(),
            base_resonance: filter.resonance(),
            filter,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(SVFilter::lowpass(cutoff_hz))
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(SVFilter::highpass(cutoff_hz))
    }

    pub fn bandpass(cutoff_hz: f32) -> Self {
        Self::new(SVFilter::bandpass(cutoff_hz))
    }

    pub fn with_resonance(mut self, resonance: f32) -> Self {
        self.filter.set_resonance(resonance);
        self.base_resonance = self.filter.resonance();
        self
    }
}

impl Modulatable for FilterNode {
    type Param = FilterParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            FilterParam::Cutoff => self.base_cutoff,
            FilterParam::Resonance => self.base_resonance,
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        let final_value = base + modulation;
        match param {
            FilterParam::Cutoff => {
                self.base_cutoff = base;
                self.filter.set_cutoff(final_value.clamp(20.0, 20_000.0));
            }
            FilterParam::Resonance => {
                self.base_resonance = base;
                self.filter.set_resonance(final_value);
            }
        }
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.filter.render(out, ctx.sample_rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{extensions::NodeExt, lfo::LfoNode, oscillator::OscNode};

    fn peak(buffer: &[f32]) -> f32 {
        buffer[buffer.len() / 2..]
            .iter()
            .fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    #[test]
    fn highpass_thins_out_a_low_tone() {
        let ctx = RenderCtx::from_freq(48_000.0, 100.0, 1.0);
        let mut dry = OscNode::sine();
        let mut wet = OscNode::sine().through(FilterNode::highpass(7_000.0));
        let mut a = vec![0.0f32; 2048];
        let mut b = vec![0.0f32; 2048];
        dry.render_block(&mut a, &ctx);
        wet.render_block(&mut b, &ctx);
        assert!(peak(&b) < peak(&a) * 0.01);
    }

    #[test]
    fn resonance_builder_is_clamped() {
        let filter = FilterNode::lowpass(770.0).with_resonance(3.0);
        assert!(filter.get_param(FilterParam::Resonance) < 1.0);
        assert_eq!(filter.get_param(FilterParam::Cutoff), 770.0);
    }

    #[test]
    fn cutoff_sweep_keeps_base() {
        let mut node = FilterNode::lowpass(1_000.0).modulate(
            LfoNode::square(1.0),
            FilterParam::Cutoff,
            100_000.0,
        );
        let ctx = RenderCtx::from_freq(48_000.0, 440.0, 1.0);
        let mut buffer = vec![0.5f32; 1024];
        node.render_block(&mut buffer, &ctx);
        assert!(buffer.iter().all(|s| s.is_finite()));
        assert_eq!(node.get_param(FilterParam::Cutoff), 1_000.0);
    }
}
