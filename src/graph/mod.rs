//! Composable nodes for building instrument graphs.
//!
//! Every node renders a block against a `RenderCtx`, which carries the
//! trigger-network frames for that block. Envelopes fire from those frames
//! and oscillators can follow its pitch lanes, so a voice needs no note
//! events. `extensions` provides the fluent `.through()`, `.amplify()` style
//! API the instruments are written in.

/// Signal × modulator (envelope gating).
pub mod amplify;
/// Band-limited impulse train.
pub mod blit;
/// Multi-tap feedback echo.
pub mod delay;
/// Soft-clip saturation.
pub mod distortion;
/// Trigger-fired table envelope.
pub mod envelope;
/// Fluent combinators (`.amplify()`, `.mix()`, etc.).
pub mod extensions;
/// State-variable filter node.
pub mod filter;
/// Two-operator phase modulation.
pub mod fm;
/// Constant output level.
pub mod gain;
/// Low frequency oscillators for parameter modulation.
pub mod lfo;
/// Crossfade of two sources.
pub mod mix;
/// Drive node parameters from another signal.
pub mod modulate;
/// Render context and the core node traits.
pub mod node;
/// Audio-band oscillators and noise.
pub mod oscillator;
/// Detuned saw stacks.
pub mod supersaw;
/// Serial chaining of two nodes (source → effect).
pub mod through;

pub use extensions::NodeExt;
pub use node::{GraphNode, Modulatable, RenderCtx};
