//! Quantized random pitch: draw a MIDI note in a range, snap it to a scale.

use rand::Rng;

use crate::error::ConfigError;

/// A MIDI note number (fractional values allowed) to Hz. A4 = 69 = 440 Hz.
#[inline]
pub fn midi_to_hz(note: f32) -> f32 {
    440.0 * 2.0_f32.powf((note - 69.0) / 12.0)
}

/// Allowed pitch classes, as semitone offsets within an octave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scale {
    degrees: Vec<u8>,
}

impl Scale {
    pub fn new(degrees: &[u8]) -> Result<Self, ConfigError> {
        let mut degrees: Vec<u8> = degrees.iter().map(|d| d % 12).collect();
        degrees.sort_unstable();
        degrees.dedup();
        if degrees.is_empty() {
            return Err(ConfigError::EmptyScale);
        }
        Ok(Self { degrees })
    }

    pub fn degrees(&self) -> &[u8] {
        &self.degrees
    }

    /// Nearest scale note to `note`; ties resolve downward.
    pub fn snap(&self, note: f32) -> f32 {
        let octave = (note / 12.0).floor();
        let class = note - octave * 12.0;

        let first = self.degrees[0] as f32;
        let last = self.degrees[self.degrees.len() - 1] as f32;
        let candidates = self
            .degrees
            .iter()
            .map(|&d| d as f32)
            .chain([first + 12.0, last - 12.0]);

        let mut best = first;
        let mut best_dist = f32::INFINITY;
        for candidate in candidates {
            let dist = (candidate - class).abs();
            if dist < best_dist || (dist == best_dist && candidate < best) {
                best = candidate;
                best_dist = dist;
            }
        }
        octave * 12.0 + best
    }
}

/// A pitch input shared by the voices that follow it. Holds the last drawn
/// frequency; NaN until the first draw.
#[derive(Debug, Clone)]
pub struct NoteLane {
    low: u8,
    high: u8,
    scale: Scale,
    hz: f32,
}

impl NoteLane {
    /// Notes are drawn from `[low, high)`.
    pub fn new(low: u8, high: u8, scale: Scale) -> Result<Self, ConfigError> {
        if low >= high {
            return Err(ConfigError::EmptyCounterRange {
                min: low as i64,
                max: high as i64,
            });
        }
        Ok(Self {
            low,
            high,
            scale,
            hz: f32::NAN,
        })
    }

    /// Draw a new note and return its frequency.
    pub fn pick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f32 {
        let note = rng.gen_range(self.low..self.high) as f32;
        self.hz = midi_to_hz(self.scale.snap(note));
        self.hz
    }

    #[inline]
    pub fn hz(&self) -> f32 {
        self.hz
    }

    pub(crate) fn set_hz(&mut self, hz: f32) {
        self.hz = hz;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn empty_scale_is_rejected() {
        assert_eq!(Scale::new(&[]), Err(ConfigError::EmptyScale));
    }

    #[test]
    fn snaps_to_nearest_degree() {
        let minor = Scale::new(&[0, 2, 3]).unwrap();
        assert_eq!(minor.snap(48.0), 48.0);
        assert_eq!(minor.snap(49.0), 48.0); // tie between 48 and 50 goes down
        assert_eq!(minor.snap(51.0), 51.0);
        assert_eq!(minor.snap(53.0), 51.0);
        assert_eq!(minor.snap(58.0), 60.0); // wraps up to the next octave root
    }

    #[test]
    fn a4_is_440() {
        assert!((midi_to_hz(69.0) - 440.0).abs() < 1e-3);
        assert!((midi_to_hz(57.0) - 220.0).abs() < 1e-3);
    }

    #[test]
    fn lane_starts_unresolved_then_stays_in_scale() {
        let scale = Scale::new(&[0, 3]).unwrap();
        let mut lane = NoteLane::new(48, 60, scale.clone()).unwrap();
        assert!(lane.hz().is_nan());

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let hz = lane.pick(&mut rng);
            let note = 69.0 + 12.0 * (hz / 440.0).log2();
            let class = (note.round() as i32).rem_euclid(12) as u8;
            assert!(scale.degrees().contains(&class), "note {note} off scale");
        }
    }
}
