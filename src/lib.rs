pub mod config;
pub mod dsp;
pub mod engine; // Render-side mixing and the lock-free control handle
pub mod error;
pub mod graph; // Composable audio graph nodes
pub mod sequencing; // Clocks, counters and rhythm patterns
pub mod synth; // Key-driven voice lifecycle
pub mod voices;

pub use config::{KeyMode, SessionConfig};
pub use error::{ConfigError, SinkError, VoiceError};

pub const MAX_BLOCK_SIZE: usize = 2048;
/// Upper bound on simultaneously connected voices.
pub const MAX_VOICES: usize = 32;
/// Longest delay line a voice may allocate (two seconds at 96 kHz).
pub const MAX_DELAY_SAMPLES: usize = 192_000;
