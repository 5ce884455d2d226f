//! Distortion / Waveshaping
//!
//! A waveshaper applies a transfer function to each sample. The one used here
//! is a rational saturation curve driven by a normalized `drive` in `[0, 1)`:
//!
//!   k = 2·drive / (1 - drive)
//!   f(x) = (1 + k)·x / (1 + k·|x|)
//!
//! At drive 0 the curve is the identity. As drive approaches 1, k grows
//! without bound and the curve approaches a hard clip at ±1. The curve always
//! passes through (±1, ±1), so a full-scale signal stays full scale.
//!
//!   drive 0.0   clean
//!   drive 0.5   k = 2, gentle saturation
//!   drive 0.75  k = 6, obvious grit
//!   drive 0.85  k ≈ 11, heavy
//!
//! Saturation adds upper harmonics. A one-pole low-pass after the shaper
//! (`slope`, 0 = open, toward 1 = darker) tames the fizz.

/// Drive is held just below 1 so `k` stays finite.
const MAX_DRIVE: f32 = 0.999;

#[inline]
pub fn drive_to_k(drive: f32) -> f32 {
    let d = drive.clamp(0.0, MAX_DRIVE);
    2.0 * d / (1.0 - d)
}

#[inline]
pub fn saturate(sample: f32, k: f32) -> f32 {
    (1.0 + k) * sample / (1.0 + k * sample.abs())
}

/// Saturation followed by a one-pole smoothing filter.
pub struct Saturator {
    k: f32,
    slope: f32,
    state: f32,
}

impl Saturator {
    pub fn new(drive: f32, slope: f32) -> Self {
        Self {
            k: drive_to_k(drive),
            slope: slope.clamp(0.0, 0.99),
            state: 0.0,
        }
    }

    pub fn set_drive(&mut self, drive: f32) {
        self.k = drive_to_k(drive);
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32) -> f32 {
        let shaped = saturate(sample, self.k);
        self.state = shaped + (self.state - shaped) * self.slope;
        self.state
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}
