//! Chord voices.
//!
//! An eight-note super saw stack (C minor with a slightly sharp third and
//! fifth), darkened by a resonant low-pass and heard only through its
//! echoes: the delay is fully wet, one tap a beat behind and one half a
//! beat behind.
//!
//! `chord` plays once per phrase, on the first bar after the fifth kick of
//! every eight. `low_chord` is the same stack an octave down on every
//! four-bar pulse, more detuned, more resonant and pushed through the
//! saturator at the end.

use crate::{
    dsp::envelope::EnvelopeTable,
    error::ConfigError,
    graph::{
        delay::DelayNode,
        distortion::DistortionNode,
        envelope::{EnvAmplitude, EnvDuration, TriggerEnvelope},
        extensions::NodeExt,
        filter::FilterNode,
        supersaw::SuperSaw,
        GraphNode,
    },
    sequencing::{Stream, Trigger},
    voices::VoiceContext,
};

/// Fractional MIDI notes of the stack.
pub const CHORD_NOTES: [f32; 8] = [48.0, 50.0, 51.93, 53.0, 55.01, 57.0, 59.0, 60.0];

const BALANCE: f32 = 0.7;
const ECHO_FEEDBACK: f32 = 0.3;

fn echoes(ctx: &VoiceContext) -> DelayNode {
    DelayNode::new(
        &[ctx.beats(1.0), ctx.beats(0.5)],
        ECHO_FEEDBACK,
        ctx.sample_rate(),
    )
}

pub fn chord(ctx: &VoiceContext) -> Result<impl GraphNode, ConfigError> {
    let table = EnvelopeTable::cosine(&[
        (0, 0.0),
        (3000, 1.0),
        (4000, 0.5),
        (5500, 0.6),
        (8191, 0.0),
    ])?;
    let env = TriggerEnvelope::new(Trigger::Phrase, table)
        .with_duration(EnvDuration::Uniform {
            min: ctx.beats(1.0),
            max: ctx.beats(2.0),
        })
        .with_amplitude(EnvAmplitude::Fixed(0.5))
        .seeded(ctx.seed);

    Ok(SuperSaw::chord(&CHORD_NOTES, 1.0, 0.65, BALANCE, ctx.seed)
        .amplify(env)
        .through(FilterNode::lowpass(880.0).with_resonance(0.5))
        .through(echoes(ctx))
        .gain(0.5))
}

pub fn low_chord(ctx: &VoiceContext) -> Result<impl GraphNode, ConfigError> {
    let table = EnvelopeTable::cosine(&[
        (0, 0.0),
        (3000, 0.4),
        (5000, 1.0),
        (5500, 0.6),
        (8191, 0.0),
    ])?;
    let env = TriggerEnvelope::new(Trigger::Pulse(Stream::FourBar), table)
        .with_duration(EnvDuration::Uniform {
            min: ctx.beats(1.5),
            max: ctx.beats(2.0),
        })
        .with_amplitude(EnvAmplitude::Fixed(0.3))
        .seeded(ctx.seed);

    Ok(SuperSaw::chord(&CHORD_NOTES, 0.5, 0.8, BALANCE, ctx.seed)
        .amplify(env)
        .through(FilterNode::lowpass(770.0).with_resonance(0.8))
        .through(echoes(ctx))
        .gain(0.2)
        .through(DistortionNode::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voices::tests::{context, frames, render};

    fn energy(samples: &[f32]) -> f32 {
        samples.iter().map(|s| s * s).sum()
    }

    #[test]
    fn chord_waits_for_the_phrase_cue() {
        // 240 BPM, bar = 48000 samples: the first phrase cue is the bar at
        // 48000, and the wet-only delay adds a half beat (6000 samples).
        let ctx = context(240.0);
        let ticks = frames(&ctx, 60_000);
        let mut voice = chord(&ctx).unwrap();
        let out = render(&mut voice, &ticks);

        assert!(out[..54_000].iter().all(|&s| s == 0.0));
        assert!(energy(&out[54_000..]) > 0.0);
    }

    #[test]
    fn low_chord_fires_at_the_origin() {
        let ctx = context(240.0);
        let ticks = frames(&ctx, 24_000);
        let mut voice = low_chord(&ctx).unwrap();
        let out = render(&mut voice, &ticks);

        // Silent until the half-beat echo arrives.
        assert!(out[..6_000].iter().all(|&s| s == 0.0));
        assert!(energy(&out[6_000..]) > 0.0);
    }
}
