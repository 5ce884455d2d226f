//! Melody voice.
//!
//! A growling FM line driven entirely by the melody pattern, which enters
//! after four bars. Each tap that fires draws a new pitch into the melody
//! lane (MIDI 48 to 60, root or minor third) and carries its own duration
//! and amplitude; the envelope takes both from the event, so accented taps
//! ring longer and louder. The pair is then driven hard into the saturator.

use crate::{
    dsp::envelope::EnvelopeTable,
    error::ConfigError,
    graph::{
        distortion::DistortionNode,
        envelope::{EnvAmplitude, EnvDuration, TriggerEnvelope},
        extensions::NodeExt,
        fm::FmPair,
        GraphNode,
    },
    sequencing::{PatternLane, PitchLane, Trigger},
    voices::VoiceContext,
};

pub fn melody(_ctx: &VoiceContext) -> Result<impl GraphNode, ConfigError> {
    let table = EnvelopeTable::cosine(&[(0, 0.0), (100, 1.0), (500, 0.3), (8191, 0.0)])?;
    let env = |mul: f32| {
        TriggerEnvelope::new(Trigger::Pattern(PatternLane::Melody), table.clone())
            .with_duration(EnvDuration::FromPattern(PatternLane::Melody))
            .with_amplitude(EnvAmplitude::FromPattern(PatternLane::Melody, mul))
    };

    let first = FmPair::on_lane(PitchLane::Melody, 0.0, 0.2498, env(1.0));
    let second = FmPair::on_lane(PitchLane::Melody, 0.0, 0.2503, env(1.0));

    Ok(first
        .mix(second, 0.5)
        .amplify(env(0.3))
        .through(DistortionNode::new(0.85))
        .gain(0.2))
}
