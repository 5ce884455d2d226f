/*
Generative Rhythm Patterns
==========================

A pattern is a denser, "humanized" trigger stream laid over the clock grid.
One cycle is `taps` equal subdivisions. On every tap a weighted draw decides
what happens:

    rest    nothing fires
    normal  a hit at normal amplitude
    accent  a louder hit

The three weights are relative; they are normalized internally, so
(40, 50, 10) and (0.4, 0.5, 0.1) behave the same. All-zero weights are
rejected at construction.

Each hit also carries a duration and an amplitude, jittered uniformly inside
configured bounds. Duration is measured in taps and converted to seconds with
the current tap length, so a pattern stays tempo-relative.

A pattern may start late: with a delay of four bars, the first tap lands
exactly four bars after session start and the grid continues from there.

    tick:   0 ........ delay   +tap   +2tap  ...
    taps:              |       |      |
                       tap 0   tap 1  tap 2
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use rand::Rng;

use super::clock::{crossed, PPQ};
use super::duration::Duration;
use crate::error::ConfigError;

/// Relative probability mass for rest, normal hit and accented hit.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternWeights {
    pub rest: f32,
    pub normal: f32,
    pub accent: f32,
}

impl PatternWeights {
    pub const fn new(rest: f32, normal: f32, accent: f32) -> Self {
        Self {
            rest,
            normal,
            accent,
        }
    }

    /// Cumulative thresholds `[rest, rest + normal]` over a unit range.
    fn thresholds(&self) -> Result<[f32; 2], ConfigError> {
        let weights = [self.rest, self.normal, self.accent];
        let total: f32 = weights.iter().sum();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) || total <= 0.0 {
            return Err(ConfigError::InvalidWeights {
                rest: self.rest,
                normal: self.normal,
                accent: self.accent,
            });
        }
        let rest = self.rest / total;
        Ok([rest, rest + self.normal / total])
    }
}

/// Outcome of one tap's draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Rest,
    Normal,
    Accent,
}

/// One tap's output: whether it fires, for how long, and how loud.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PatternEvent {
    pub trigger: bool,
    /// Seconds.
    pub duration: f32,
    pub amplitude: f32,
}

/// Static description of a pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternSpec {
    pub taps: u32,
    pub tap: Duration,
    pub weights: PatternWeights,
    /// Amplitude bounds for normal hits.
    pub normal_amp: (f32, f32),
    /// Amplitude bounds for accented hits.
    pub accent_amp: (f32, f32),
    /// Hit length bounds, in taps.
    pub duration: (f32, f32),
    /// Offset of the first tap from session start.
    pub delay: Option<Duration>,
}

impl PatternSpec {
    /// Sixteen sixteenth-note taps per bar.
    pub fn sixteenths(weights: PatternWeights) -> Self {
        Self {
            taps: 16,
            tap: Duration::SIXTEENTH,
            weights,
            normal_amp: (0.5, 0.7),
            accent_amp: (0.9, 1.0),
            duration: (1.0, 1.0),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_duration(mut self, min_taps: f32, max_taps: f32) -> Self {
        self.duration = (min_taps, max_taps);
        self
    }

    pub fn with_amplitudes(mut self, normal: (f32, f32), accent: (f32, f32)) -> Self {
        self.normal_amp = normal;
        self.accent_amp = accent;
        self
    }
}

/// Snapshot of a running pattern.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternState {
    pub taps_fired: u64,
}

/// Weighted-random tap generator running on the shared tick grid.
#[derive(Debug, Clone)]
pub struct PatternGenerator {
    spec: PatternSpec,
    thresholds: [f32; 2],
    tap_ticks: u64,
    delay_ticks: u64,
    taps_fired: u64,
    last: PatternEvent,
}

impl PatternGenerator {
    pub fn new(spec: PatternSpec) -> Result<Self, ConfigError> {
        if spec.taps == 0 {
            return Err(ConfigError::NoTaps);
        }
        let thresholds = spec.weights.thresholds()?;
        check_bounds("normal amplitude", spec.normal_amp)?;
        check_bounds("accent amplitude", spec.accent_amp)?;
        check_bounds("duration", spec.duration)?;
        let tap_ticks = spec.tap.to_ticks(PPQ).max(1);
        let delay_ticks = spec.delay.map_or(0, |d| d.to_ticks(PPQ));

        Ok(Self {
            spec,
            thresholds,
            tap_ticks,
            delay_ticks,
            taps_fired: 0,
            last: PatternEvent::default(),
        })
    }

    pub fn spec(&self) -> &PatternSpec {
        &self.spec
    }

    /// True when a tap lands between the previous and current tick.
    #[inline]
    pub fn fires(&self, prev_tick: Option<u64>, tick: u64) -> bool {
        crossed(prev_tick, tick, self.delay_ticks, self.tap_ticks)
    }

    /// Draw the outcome of a single tap.
    #[inline]
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Hit {
        let r: f32 = rng.gen();
        if r < self.thresholds[0] {
            Hit::Rest
        } else if r < self.thresholds[1] {
            Hit::Normal
        } else {
            Hit::Accent
        }
    }

    /// Run one tap: draw, jitter and record the event.
    pub fn on_tap<R: Rng + ?Sized>(&mut self, rng: &mut R, tap_secs: f32) -> PatternEvent {
        let event = match self.draw(rng) {
            Hit::Rest => PatternEvent::default(),
            hit => {
                let amp_range = if hit == Hit::Accent {
                    self.spec.accent_amp
                } else {
                    self.spec.normal_amp
                };
                PatternEvent {
                    trigger: true,
                    duration: uniform(rng, self.spec.duration) * tap_secs,
                    amplitude: uniform(rng, amp_range),
                }
            }
        };

        self.taps_fired += 1;
        self.last = event;
        event
    }

    /// Position of the most recent tap within its cycle.
    pub fn tap_index(&self) -> Option<u32> {
        self.taps_fired
            .checked_sub(1)
            .map(|n| (n % self.spec.taps as u64) as u32)
    }

    pub fn taps_fired(&self) -> u64 {
        self.taps_fired
    }

    pub fn last_event(&self) -> PatternEvent {
        self.last
    }

    pub fn state(&self) -> PatternState {
        PatternState {
            taps_fired: self.taps_fired,
        }
    }

    pub fn restore(&mut self, state: PatternState) {
        self.taps_fired = state.taps_fired;
        self.last = PatternEvent::default();
    }
}

fn check_bounds(field: &'static str, (lo, hi): (f32, f32)) -> Result<(), ConfigError> {
    if [lo, hi].iter().all(|b| b.is_finite() && *b >= 0.0) {
        Ok(())
    } else {
        Err(ConfigError::InvalidJitter { field, lo, hi })
    }
}

#[inline]
fn uniform<R: Rng + ?Sized>(rng: &mut R, (a, b): (f32, f32)) -> f32 {
    let (lo, hi) = (a.min(b), a.max(b));
    if lo == hi {
        lo
    } else {
        rng.gen_range(lo..=hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn generator(weights: PatternWeights) -> PatternGenerator {
        PatternGenerator::new(PatternSpec::sixteenths(weights)).unwrap()
    }

    #[test]
    fn rejects_bad_configuration() {
        let mut spec = PatternSpec::sixteenths(PatternWeights::new(1.0, 1.0, 1.0));
        spec.taps = 0;
        assert_eq!(PatternGenerator::new(spec).unwrap_err(), ConfigError::NoTaps);

        let zero = PatternSpec::sixteenths(PatternWeights::new(0.0, 0.0, 0.0));
        assert!(matches!(
            PatternGenerator::new(zero),
            Err(ConfigError::InvalidWeights { .. })
        ));

        let negative = PatternSpec::sixteenths(PatternWeights::new(-1.0, 2.0, 0.0));
        assert!(PatternGenerator::new(negative).is_err());

        let endless = PatternSpec::sixteenths(PatternWeights::new(0.0, 1.0, 0.0))
            .with_amplitudes((0.5, f32::INFINITY), (0.9, 1.0));
        assert_eq!(
            PatternGenerator::new(endless).unwrap_err(),
            ConfigError::InvalidJitter {
                field: "normal amplitude",
                lo: 0.5,
                hi: f32::INFINITY
            }
        );

        let unset = PatternSpec::sixteenths(PatternWeights::new(0.0, 1.0, 0.0))
            .with_amplitudes((0.5, 0.7), (f32::NAN, 1.0));
        assert!(matches!(
            PatternGenerator::new(unset),
            Err(ConfigError::InvalidJitter { field: "accent amplitude", .. })
        ));

        let backwards = PatternSpec::sixteenths(PatternWeights::new(0.0, 1.0, 0.0))
            .with_duration(-1.0, 2.0);
        assert!(matches!(
            PatternGenerator::new(backwards),
            Err(ConfigError::InvalidJitter { field: "duration", .. })
        ));
    }

    #[test]
    fn all_rest_never_fires() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pattern = generator(PatternWeights::new(1.0, 0.0, 0.0));
        for _ in 0..16 * 64 {
            assert!(!pattern.on_tap(&mut rng, 0.12).trigger);
        }
    }

    #[test]
    fn all_normal_fires_every_tap() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pattern = generator(PatternWeights::new(0.0, 1.0, 0.0));
        for _ in 0..16 * 64 {
            let event = pattern.on_tap(&mut rng, 0.12);
            assert!(event.trigger);
            assert!((0.5..=0.7).contains(&event.amplitude));
            assert!((event.duration - 0.12).abs() < 1e-6);
        }
    }

    #[test]
    fn weights_are_normalized() {
        let a = generator(PatternWeights::new(40.0, 50.0, 10.0));
        let b = generator(PatternWeights::new(0.4, 0.5, 0.1));
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        for _ in 0..256 {
            assert_eq!(a.draw(&mut rng_a), b.draw(&mut rng_b));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let weights = PatternWeights::new(0.3, 0.5, 0.2);
        let mut a = generator(weights);
        let mut b = generator(weights);
        let mut rng_a = StdRng::seed_from_u64(1234);
        let mut rng_b = StdRng::seed_from_u64(1234);
        for _ in 0..64 {
            assert_eq!(a.on_tap(&mut rng_a, 0.1), b.on_tap(&mut rng_b, 0.1));
        }
    }

    #[test]
    fn delayed_start_lands_on_offset() {
        let spec = PatternSpec::sixteenths(PatternWeights::new(0.0, 1.0, 0.0))
            .with_delay(Duration::WHOLE.times(4));
        let pattern = PatternGenerator::new(spec).unwrap();
        let delay = Duration::WHOLE.times(4).to_ticks(PPQ);

        assert!(!pattern.fires(None, 0));
        assert!(!pattern.fires(Some(delay - 2), delay - 1));
        assert!(pattern.fires(Some(delay - 1), delay));
        assert!(!pattern.fires(Some(delay), delay + 1));
        assert!(pattern.fires(Some(delay + 119), delay + 120));
    }

    #[test]
    fn tap_index_wraps_per_cycle() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut pattern = generator(PatternWeights::new(1.0, 1.0, 1.0));
        assert_eq!(pattern.tap_index(), None);
        for _ in 0..17 {
            pattern.on_tap(&mut rng, 0.1);
        }
        assert_eq!(pattern.tap_index(), Some(0));
    }
}
