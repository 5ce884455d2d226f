use std::f32::consts::TAU;

use rand::{rngs::StdRng, Rng, SeedableRng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Phase-Accumulator Oscillator
============================

Every periodic source in the crate runs on the same idea: a phase in [0, 1)
advances by `freq / sample_rate` each sample and wraps. The waveform is a
function of that phase.

    phase:  0 ──────────────→ 1 (wrap) 0 ──────────────→ 1
    saw:   -1 ──────────────→ 1       -1 ──────────────→ 1
    sine:   sin(2π · phase)

Saw and square have hard edges that alias. A PolyBLEP correction smooths the
discontinuity over one sample on each side of the wrap:

    naive saw ─────┐           polyblep'd saw ────╮
                   │                              │
                   └─────                         ╰─────

Noise ignores phase and draws a fresh uniform sample every tick from a seeded
generator, so two noise sources built with the same seed are identical.

A frequency that is not finite or not positive produces silence and leaves
the phase where it was.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillatorWaveform {
    Sine,
    Saw,
    Square,
    Triangle,
    Noise,
}

pub struct OscillatorBlock {
    waveform: OscillatorWaveform,
    phase: f32,
    rng: StdRng,
}

impl OscillatorBlock {
    pub fn new(waveform: OscillatorWaveform) -> Self {
        Self::with_seed(waveform, 0)
    }

    pub fn with_seed(waveform: OscillatorWaveform, seed: u64) -> Self {
        Self {
            waveform,
            phase: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorWaveform::Sine)
    }

    pub fn sawtooth() -> Self {
        Self::new(OscillatorWaveform::Saw)
    }

    pub fn square() -> Self {
        Self::new(OscillatorWaveform::Square)
    }

    pub fn triangle() -> Self {
        Self::new(OscillatorWaveform::Triangle)
    }

    pub fn noise(seed: u64) -> Self {
        Self::with_seed(OscillatorWaveform::Noise, seed)
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Start from an explicit phase, wrapped into `[0, 1)`.
    pub fn set_phase(&mut self, phase: f32) {
        self.phase = phase.rem_euclid(1.0);
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        if self.waveform == OscillatorWaveform::Noise {
            return self.rng.gen_range(-1.0..=1.0);
        }
        if !frequency.is_finite() || frequency <= 0.0 {
            return 0.0;
        }

        let increment = (frequency / sample_rate).min(0.5);
        let phase = self.phase;
        let value = match self.waveform {
            OscillatorWaveform::Sine => (TAU * phase).sin(),
            OscillatorWaveform::Saw => 2.0 * phase - 1.0 - poly_blep(phase, increment),
            OscillatorWaveform::Square => {
                let naive = if phase < 0.5 { 1.0 } else { -1.0 };
                naive + poly_blep(phase, increment) - poly_blep((phase + 0.5).fract(), increment)
            }
            OscillatorWaveform::Triangle => {
                if phase < 0.5 {
                    4.0 * phase - 1.0
                } else {
                    3.0 - 4.0 * phase
                }
            }
            OscillatorWaveform::Noise => 0.0,
        };

        self.phase = (phase + increment).fract();
        value
    }

    /// Fill `out` at a constant frequency.
    pub fn render(&mut self, out: &mut [f32], frequency: f32, sample_rate: f32) {
        for sample in out.iter_mut() {
            *sample = self.next_sample(frequency, sample_rate);
        }
    }
}

/// Polynomial band-limited step residual for a wrap at phase 0.
#[inline]
pub(crate) fn poly_blep(phase: f32, increment: f32) -> f32 {
    if phase < increment {
        let t = phase / increment;
        2.0 * t - t * t - 1.0
    } else if phase > 1.0 - increment {
        let t = (phase - 1.0) / increment;
        t * t + 2.0 * t + 1.0
    } else {
        0.0
    }
}
