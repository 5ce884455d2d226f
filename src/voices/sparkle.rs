//! Sparkle voice.
//!
//! Two band-limited impulse trains a third of a hertz apart, with a 4 Hz
//! vibrato of ±2% and a slow sweep of the harmonic count between 20 and 40.
//! Short pattern-fired blips, entering after eight bars.

use crate::{
    dsp::envelope::EnvelopeTable,
    error::ConfigError,
    graph::{
        blit::{BlitNode, BlitParam},
        envelope::{EnvAmplitude, TriggerEnvelope},
        extensions::NodeExt,
        lfo::LfoNode,
        GraphNode,
    },
    sequencing::{PatternLane, Trigger},
    voices::VoiceContext,
};

const VIBRATO_HZ: f32 = 4.0;
const VIBRATO_DEPTH: f32 = 0.02;
const SWEEP_HZ: f32 = 0.25;

fn train(frequency: f32) -> impl GraphNode {
    BlitNode::new(frequency, 30.0)
        .modulate(
            LfoNode::sine(VIBRATO_HZ),
            BlitParam::Frequency,
            frequency * VIBRATO_DEPTH,
        )
        .modulate(LfoNode::sine(SWEEP_HZ), BlitParam::Harmonics, 10.0)
}

pub fn sparkle(_ctx: &VoiceContext) -> Result<impl GraphNode, ConfigError> {
    let table = EnvelopeTable::cosine(&[(0, 0.0), (100, 1.0), (200, 0.1), (800, 0.0)])?;
    let env = TriggerEnvelope::new(Trigger::Pattern(PatternLane::Sparkle), table)
        .with_amplitude(EnvAmplitude::Fixed(0.2));

    Ok(train(100.0).mix(train(99.7), 0.5).amplify(env))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voices::tests::{context, frames, render};

    #[test]
    fn enters_on_the_ninth_bar() {
        // 240 BPM: eight bars are 384000 samples.
        let ctx = context(240.0);
        let ticks = frames(&ctx, 480_000);
        let mut voice = sparkle(&ctx).unwrap();
        let out = render(&mut voice, &ticks);

        let first = out.iter().position(|&s| s != 0.0).expect("sparkle never sounded");
        assert!((384_000..432_000).contains(&first), "first sound at {first}");
        assert!(out.iter().all(|s| s.is_finite() && s.abs() <= 1.0));

        let peak = out[first..].iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
        assert!(peak > 0.01, "peak {peak}");
    }
}
