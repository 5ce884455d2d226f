//! The instruments of the loop.
//!
//! Each instrument is a fixed node graph whose envelopes listen to the
//! trigger network: building one never needs a note, only the shared
//! `ClockNetwork` (for beat-relative times) and a seed for its own random
//! sources. Topology is decided here, at build time; at run time only the
//! triggers, lane pitches and pattern values flowing through `RenderCtx`
//! change.
//!
//! # Example
//!
//! ```ignore
//! use keyloop::voices::{Instrument, VoiceContext};
//!
//! let ctx = VoiceContext::new(clocks.clone(), 7);
//! let kick = Instrument::Kick.build(&ctx)?;
//! let drone = Instrument::Drone(110.0).build(&ctx)?;
//! ```

use std::{fmt, sync::Arc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, graph::GraphNode, sequencing::ClockNetwork};

mod bass;
mod chord;
mod drone;
mod hihat;
mod kick;
mod melody;
mod openhat;
mod sparkle;

pub use bass::bass;
pub use chord::{chord, low_chord, CHORD_NOTES};
pub use drone::drone;
pub use hihat::closed_hat;
pub use kick::kick;
pub use melody::melody;
pub use openhat::open_hat;
pub use sparkle::sparkle;

/// What an instrument needs to build its graph.
#[derive(Debug, Clone)]
pub struct VoiceContext {
    pub clocks: Arc<ClockNetwork>,
    pub seed: u64,
}

impl VoiceContext {
    pub fn new(clocks: Arc<ClockNetwork>, seed: u64) -> Self {
        Self { clocks, seed }
    }

    pub fn sample_rate(&self) -> f32 {
        self.clocks.sample_rate() as f32
    }

    /// `beats` quarter notes at the session tempo, in seconds.
    pub fn beats(&self, beats: f32) -> f32 {
        self.clocks.beat_secs() as f32 * beats
    }
}

/// Every voice a key can bring into the mix.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instrument {
    Kick,
    ClosedHat,
    OpenHat,
    Bass,
    Chord,
    LowChord,
    Melody,
    Sparkle,
    /// A held super saw at a fixed frequency.
    Drone(f32),
}

impl Instrument {
    pub fn name(&self) -> &'static str {
        match self {
            Instrument::Kick => "kick",
            Instrument::ClosedHat => "closed hat",
            Instrument::OpenHat => "open hat",
            Instrument::Bass => "bass",
            Instrument::Chord => "chord",
            Instrument::LowChord => "low chord",
            Instrument::Melody => "melody",
            Instrument::Sparkle => "sparkle",
            Instrument::Drone(_) => "drone",
        }
    }

    pub fn build(&self, ctx: &VoiceContext) -> Result<Box<dyn GraphNode>, ConfigError> {
        Ok(match *self {
            Instrument::Kick => Box::new(kick(ctx)?),
            Instrument::ClosedHat => Box::new(closed_hat(ctx)?),
            Instrument::OpenHat => Box::new(open_hat(ctx)?),
            Instrument::Bass => Box::new(bass(ctx)?),
            Instrument::Chord => Box::new(chord(ctx)?),
            Instrument::LowChord => Box::new(low_chord(ctx)?),
            Instrument::Melody => Box::new(melody(ctx)?),
            Instrument::Sparkle => Box::new(sparkle(ctx)?),
            Instrument::Drone(hz) => Box::new(drone(ctx, hz)),
        })
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instrument::Drone(hz) => write!(f, "drone {hz:.2} Hz"),
            other => f.write_str(other.name()),
        }
    }
}
