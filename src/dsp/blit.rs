use std::f32::consts::PI;

/*
Band-Limited Impulse Train
==========================

A periodic click whose spectrum is a flat comb of `harmonics` partials and
nothing above them. With M = 2·harmonics + 1 and phase φ in [0, 1):

              sin(π · M · φ)
    blit(φ) = ──────────────
              M · sin(π · φ)

At φ = 0 (and its wraps) the quotient is 0/0; the limit is 1, so the peak of
every impulse is exactly 1 whatever the harmonic count.

Harmonics are rounded down to a whole number and never allowed to exceed
Nyquist, so sweeping them with an LFO is always alias-free.
*/

pub struct BlitBlock {
    phase: f32,
}

impl BlitBlock {
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    #[inline]
    pub fn next_sample(&mut self, frequency: f32, harmonics: f32, sample_rate: f32) -> f32 {
        if !frequency.is_finite() || frequency <= 0.0 {
            return 0.0;
        }

        let nyquist_limit = (sample_rate * 0.5 / frequency).floor().max(1.0);
        let harms = harmonics.floor().clamp(1.0, nyquist_limit);
        let m = 2.0 * harms + 1.0;

        let denominator = m * (PI * self.phase).sin();
        let value = if denominator.abs() < 1e-6 {
            1.0
        } else {
            (PI * m * self.phase).sin() / denominator
        };

        self.phase = (self.phase + frequency / sample_rate).fract();
        value
    }
}

impl Default for BlitBlock {
    fn default() -> Self {
        Self::new()
    }
}
