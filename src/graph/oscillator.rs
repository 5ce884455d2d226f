use crate::dsp::oscillator::OscillatorBlock;
use crate::graph::node::{GraphNode, Modulatable, RenderCtx};
use crate::sequencing::PitchLane;

/*
Audio Oscillator
================

An oscillator is the raw sound source of every voice. What it plays is set
by its `Pitch`:

  Context       follow `ctx.frequency` (offline rendering, tests)
  Fixed(hz)     a constant pitch; drums and drones use this
  Lane(l, off)  follow a pitch lane of the trigger network, plus an offset
                in Hz. The lane can change on any sample, so the pitch is
                read per sample from the tick frames.

A lane that has not resolved yet (NaN) or a missing frame gives silence.

Waveforms:

  sine      pure, no harmonics: kick, sub
  saw       all harmonics at 1/n: chords, leads
  square    odd harmonics at 1/n: hollow tones
  triangle  odd harmonics at 1/n²: soft tones
  noise     unpitched: hats

Example usage:
  let kick = OscNode::sine().with_frequency(61.0);
  let hat  = OscNode::noise(seed).through(FilterNode::highpass(7_000.0));
  let bass = OscNode::sawtooth().with_lane(PitchLane::Bass, 0.0);
*/

/// Where an oscillating node takes its frequency from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pitch {
    Context,
    Fixed(f32),
    Lane(PitchLane, f32),
}

impl Pitch {
    /// Frequency for sample `index` of the block. `fixed` is the (possibly
    /// modulated) value used for `Pitch::Fixed`.
    #[inline]
    pub fn frequency(&self, ctx: &RenderCtx, index: usize, fixed: f32) -> f32 {
        match *self {
            Pitch::Context => ctx.frequency,
            Pitch::Fixed(_) => fixed,
            Pitch::Lane(lane, offset) => ctx
                .tick(index)
                .map_or(f32::NAN, |tick| tick.note(lane) + offset),
        }
    }
}

pub struct OscNode {
    osc: OscillatorBlock,
    pitch: Pitch,
    /// Current frequency after modulation (only used with a fixed pitch)
    current_frequency: f32,
}

/// Parameters that can be modulated on an oscillator
#[derive(Clone, Copy, Debug)]
pub enum OscParam {
    /// Oscillator frequency in Hz
    Frequency,
}

impl OscNode {
    fn new(osc: OscillatorBlock) -> Self {
        Self {
            osc,
            pitch: Pitch::Context,
            current_frequency: 440.0,
        }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorBlock::sine())
    }

    pub fn sawtooth() -> Self {
        Self::new(OscillatorBlock::sawtooth())
    }

    pub fn square() -> Self {
        Self::new(OscillatorBlock::square())
    }

    pub fn triangle() -> Self {
        Self::new(OscillatorBlock::triangle())
    }

    /// Seeded white noise. Voices derive the seed from their own seed so
    /// two hats never share a noise stream.
    pub fn noise(seed: u64) -> Self {
        Self::new(OscillatorBlock::noise(seed))
    }

    /// Play a constant frequency, ignoring context and lanes. The frequency
    /// can then be moved with `.modulate()`.
    pub fn with_frequency(mut self, freq: f32) -> Self {
        self.pitch = Pitch::Fixed(freq);
        self.current_frequency = freq;
        self
    }

    /// Follow a pitch lane, shifted by `offset_hz`.
    pub fn with_lane(mut self, lane: PitchLane, offset_hz: f32) -> Self {
        self.pitch = Pitch::Lane(lane, offset_hz);
        self
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for (i, sample) in out.iter_mut().enumerate() {
            let freq = self.pitch.frequency(ctx, i, self.current_frequency);
            *sample = self.osc.next_sample(freq, ctx.sample_rate);
        }
    }
}

impl Modulatable for OscNode {
    type Param = OscParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match (param, self.pitch) {
            (OscParam::Frequency, Pitch::Fixed(base)) => base,
            (OscParam::Frequency, _) => 0.0,
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        match param {
            // Audible range only
            OscParam::Frequency => {
                self.current_frequency = (base + modulation).clamp(20.0, 20_000.0)
            }
        }
    }
}
