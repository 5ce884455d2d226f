//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free once built and realtime-safe, so they
//! can be embedded directly inside voice structs. They stay focused on the
//! signal-processing math; graph nodes layer triggers and modulation on top.

/// Band-limited impulse train.
pub mod blit;
/// Fixed-length feedback delay line.
pub mod delay;
/// Rational waveshaping saturation.
pub mod distortion;
/// Breakpoint envelope lookup tables.
pub mod envelope;
/// State-variable filter implementation with multiple responses.
pub mod filter;
/// Crossfade, sum and gain helpers.
pub mod mix;
/// Block-rate modulation math.
pub mod modulate;
/// Oscillator waveforms and noise sources.
pub mod oscillator;
/// Seven-saw detuned oscillator bank.
pub mod supersaw;

pub use envelope::{EnvelopeTable, Interpolation, TABLE_LEN};
pub use oscillator::{OscillatorBlock, OscillatorWaveform};
