//! Bass voice.
//!
//! Two FM pairs a hertz apart, both following the bass lane: on every
//! offbeat pulse the conductor draws a new note between MIDI 38 and 48 and
//! snaps it to the root, second or minor third. The voice only speaks on the
//! odd offbeats, the "and" of each beat.
//!
//! # How It Works
//!
//! 1. Carrier pitch from the bass lane (`f` and `f - 1 Hz`)
//! 2. Modulators at just under and just over a quarter of the carrier
//!    (ratios 0.2498 / 0.2503), so the two pairs drift against each other
//! 3. One envelope shape drives both the modulation index and the amplitude:
//!    the note opens up as it gets louder
//!
//! # Variations
//!
//! - Larger envelope scale on the index = more growl
//! - Ratios on exactly 0.25 = static, organ-like tone

use crate::{
    dsp::envelope::EnvelopeTable,
    error::ConfigError,
    graph::{
        envelope::{EnvAmplitude, EnvDuration, TriggerEnvelope},
        extensions::NodeExt,
        fm::FmPair,
        GraphNode,
    },
    sequencing::{PitchLane, Trigger},
    voices::VoiceContext,
};

const LEVEL: f32 = 0.3;

pub fn bass(_ctx: &VoiceContext) -> Result<impl GraphNode, ConfigError> {
    let table = EnvelopeTable::cosine(&[(0, 0.0), (500, 1.0), (1000, 0.8), (8191, 0.0)])?;
    let env = || {
        TriggerEnvelope::new(Trigger::OddOffbeat, table.clone())
            .with_duration(EnvDuration::Fixed(0.4))
            .with_amplitude(EnvAmplitude::Fixed(LEVEL))
    };

    let upper = FmPair::on_lane(PitchLane::Bass, 0.0, 0.2498, env());
    let lower = FmPair::on_lane(PitchLane::Bass, -1.0, 0.2503, env());

    Ok(upper.mix(lower, 0.5).amplify(env()))
}
