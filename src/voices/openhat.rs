//! Open hi-hat voice.
//!
//! Noise on the "and" of every beat: the odd steps of the offbeat counter.
//! A linear table holds the hit near full level for most of its attack
//! before the long fade, so it rings against the kick instead of ticking.

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
    sequencing::Trigger,
    voices::VoiceContext,
};

const NOISE_LEVEL: f32 = 0.1;

pub fn open_hat(ctx: &VoiceContext) -> Result<impl GraphNode, ConfigError> {
    let table = EnvelopeTable::linear(&[(0, 0.0), (100, 1.0), (800, 0.7), (8191, 0.0)])?;
    let env = TriggerEnvelope::new(Trigger::OddOffbeat, table)
        .with_duration(EnvDuration::Fixed(0.2))
        .with_amplitude(EnvAmplitude::Fixed(0.3));

    Ok(OscNode::noise(ctx.seed)
        .through(FilterNode::highpass(6_000.0))
        .amplify(env)
        .gain(NOISE_LEVEL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voices::tests::{context, frames, render};

    #[test]
    fn first_hit_is_the_second_eighth() {
        // 125 BPM: offbeat pulses every 11520 samples, odd steps at 11520, 34560, ...
        let ctx = context(125.0);
        let ticks = frames(&ctx, 40_000);
        let mut voice = open_hat(&ctx).unwrap();
        let out = render(&mut voice, &ticks);

        assert!(out[..11_520].iter().all(|&s| s == 0.0));
        assert!(out[11_520..11_520 + 4_000].iter().any(|&s| s.abs() > 1e-3));
        // 0.2 s later the hit has decayed completely.
        assert!(out[21_200..34_560].iter().all(|&s| s == 0.0));
    }
}
