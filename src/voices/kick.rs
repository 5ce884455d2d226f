//! Kick drum voice.
//!
//! A pure 61 Hz sine gated by a cosine envelope on every beat. The table
//! leaps to full level within a few positions and sags to half by about an
//! eighth of its span, which gives the thump without a pitch sweep.
//!
//! # Variations
//!
//! - Longer duration = boomier tail
//! - Lower frequency = more sub, less punch

use crate::{
    dsp::envelope::EnvelopeTable,
    error::ConfigError,
    graph::{
        envelope::{EnvAmplitude, EnvDuration, TriggerEnvelope},
        extensions::NodeExt,
        oscillator::OscNode,
        GraphNode,
    },
    sequencing::{Stream, Trigger},
    voices::VoiceContext,
};

pub const KICK_HZ: f32 = 61.0;

/// Create the kick: fires on every `Kick` pulse.
pub fn kick(_ctx: &VoiceContext) -> Result<impl GraphNode, ConfigError> {
    let table = EnvelopeTable::cosine(&[(0, 0.0), (10, 1.0), (1000, 0.5), (8191, 0.0)])?;
    let env = TriggerEnvelope::new(Trigger::Pulse(Stream::Kick), table)
        .with_duration(EnvDuration::Fixed(0.45))
        .with_amplitude(EnvAmplitude::Fixed(0.5));

    Ok(OscNode::sine().with_frequency(KICK_HZ).amplify(env))
}
