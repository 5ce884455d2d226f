//! Closed hi-hat voice.
//!
//! A tick of bright noise played by the hat pattern: sixteen sixteenth taps
//! per bar, each a weighted draw between rest, normal hit and accent. The
//! envelope only opens for the first tenth of its one-second span, so every
//! hit is a short "tss" whose level follows the tap's amplitude.
//!
//! # How It Works
//!
//! 1. Seeded white noise
//! 2. High-pass keeps only the sizzle
//! 3. Pattern-fired cosine envelope, scaled by the tap amplitude

use crate::{
    dsp::envelope::EnvelopeTable,
    error::ConfigError,
    graph::{
        envelope::{EnvAmplitude, EnvDuration, TriggerEnvelope},
        extensions::NodeExt,
        filter::FilterNode,
        oscillator::OscNode,
        GraphNode,
    },
    sequencing::{PatternLane, Trigger},
    voices::VoiceContext,
};

const NOISE_LEVEL: f32 = 0.03;

/// Create the closed hat: fires on the hat pattern.
pub fn closed_hat(ctx: &VoiceContext) -> Result<impl GraphNode, ConfigError> {
    let table = EnvelopeTable::cosine(&[(0, 0.0), (100, 1.0), (200, 0.1), (800, 0.0)])?;
    let env = TriggerEnvelope::new(Trigger::Pattern(PatternLane::Hats), table)
        .with_duration(EnvDuration::Fixed(1.0))
        .with_amplitude(EnvAmplitude::FromPattern(PatternLane::Hats, 1.0));

    Ok(OscNode::noise(ctx.seed)
        .through(FilterNode::highpass(7_000.0))
        .amplify(env)
        .gain(NOISE_LEVEL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        sequencing::Tick,
        voices::tests::{context, frames, render},
    };

    #[test]
    fn sounds_only_after_pattern_hits() {
        let ctx = context(125.0);
        let ticks = frames(&ctx, 96_000);
        let first_hit = ticks
            .iter()
            .position(|t: &Tick| t.fired(Trigger::Pattern(PatternLane::Hats)));
        let mut voice = closed_hat(&ctx).unwrap();
        let out = render(&mut voice, &ticks);

        match first_hit {
            Some(n) => {
                assert!(out[..n].iter().all(|&s| s == 0.0));
                assert!(out[n..(n + 2_000).min(out.len())].iter().any(|&s| s != 0.0));
            }
            None => assert!(out.iter().all(|&s| s == 0.0)),
        }
    }
}
