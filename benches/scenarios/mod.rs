//! Real-world scenario benchmarks.
//!
//! The trigger network on its own, each instrument against real frames, and
//! the engine mixing the full loop.

mod conductor;
mod engine;
mod voices;

pub use conductor::bench_conductor;
pub use engine::bench_engine;
pub use voices::bench_voices;
