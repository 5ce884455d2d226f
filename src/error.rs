use thiserror::Error;

/// Rejected configuration. Every constructor that can fail returns this, so an
/// engine is never built in a half-configured state.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("tempo must be a positive, finite BPM value (got {0})")]
    InvalidTempo(f64),

    #[error("sample rate must be positive and finite (got {0})")]
    InvalidSampleRate(f64),

    #[error("counter range [{min}, {max}) is empty")]
    EmptyCounterRange { min: i64, max: i64 },

    #[error("a pattern needs at least one tap per cycle")]
    NoTaps,

    #[error("pattern weights must be non-negative and not all zero (got {rest}, {normal}, {accent})")]
    InvalidWeights { rest: f32, normal: f32, accent: f32 },

    #[error("pattern {field} bounds must be finite and non-negative (got {lo}, {hi})")]
    InvalidJitter { field: &'static str, lo: f32, hi: f32 },

    #[error("scale has no degrees to snap to")]
    EmptyScale,

    #[error("envelope table needs at least one breakpoint")]
    EmptyEnvelope,

    #[error("envelope breakpoints must be sorted by position (position {0} is out of order)")]
    UnsortedEnvelope(u32),

    #[error("could not parse session config: {0}")]
    Parse(String),
}

/// Failure to hand a command to the render side.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    #[error("render command queue is full")]
    QueueFull,

    #[error("no free voice slot on the render side")]
    NoFreeSlot,
}

/// Failure while handling a key.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VoiceError {
    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("could not build voice: {0}")]
    Build(#[from] ConfigError),
}
