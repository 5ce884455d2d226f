//! Benchmarks for low-level DSP primitives.

mod delay;
mod distortion;
mod envelope;
mod filter;
mod oscillator;
mod supersaw;

pub use delay::bench_delay;
pub use distortion::bench_distortion;
pub use envelope::bench_envelope;
pub use filter::bench_filter;
pub use oscillator::bench_oscillator;
pub use supersaw::bench_supersaw;
