//! Tempo-locked pulse streams.
//!
//! Every stream is a rational multiple of the beat, converted to an integer
//! number of ticks. The absolute tick is always derived from the absolute
//! sample index, never accumulated, so streams with integer period ratios
//! land on exactly the same samples forever.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::duration::Duration;
use crate::error::ConfigError;

/// Tick resolution in pulses per quarter note.
pub const PPQ: u32 = 480;

/// The named pulse streams this instrument set runs on.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    /// Pattern tap grid, a quarter of a beat.
    Sixteenth,
    /// Twice the kick rate.
    Offbeat,
    /// One pulse per beat.
    Kick,
    /// Four beats.
    Bar,
    /// Four bars.
    FourBar,
}

impl Stream {
    pub const ALL: [Stream; 5] = [
        Stream::Sixteenth,
        Stream::Offbeat,
        Stream::Kick,
        Stream::Bar,
        Stream::FourBar,
    ];

    /// Period as an exact fraction of a whole note.
    pub const fn period(self) -> Duration {
        match self {
            Stream::Sixteenth => Duration::SIXTEENTH,
            Stream::Offbeat => Duration::EIGHTH,
            Stream::Kick => Duration::QUARTER,
            Stream::Bar => Duration::WHOLE,
            Stream::FourBar => Duration::WHOLE.times(4),
        }
    }

    pub(crate) const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Immutable timing description shared by the render side and every voice
/// factory. The running position lives with whoever advances it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockNetwork {
    bpm: f64,
    sample_rate: f64,
    // tick(n) = floor(n * ticks_num / ticks_den); kept split so integral
    // tempos divide exactly.
    ticks_num: f64,
    ticks_den: f64,
}

impl ClockNetwork {
    pub fn new(bpm: f64, sample_rate: f64) -> Result<Self, ConfigError> {
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(ConfigError::InvalidTempo(bpm));
        }
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(ConfigError::InvalidSampleRate(sample_rate));
        }

        Ok(Self {
            bpm,
            sample_rate,
            ticks_num: bpm * PPQ as f64,
            ticks_den: 60.0 * sample_rate,
        })
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn beat_secs(&self) -> f64 {
        60.0 / self.bpm
    }

    pub fn period(&self, stream: Stream) -> Duration {
        stream.period()
    }

    pub fn period_ticks(&self, stream: Stream) -> u64 {
        stream.period().to_ticks(PPQ)
    }

    pub fn period_secs(&self, stream: Stream) -> f64 {
        stream.period().to_secs(self.bpm)
    }

    /// Seconds for an arbitrary musical length at this tempo.
    pub fn secs(&self, duration: Duration) -> f64 {
        duration.to_secs(self.bpm)
    }

    /// Absolute tick position of a sample.
    #[inline]
    pub fn tick_at(&self, sample: u64) -> u64 {
        ((sample as f64 * self.ticks_num) / self.ticks_den).floor() as u64
    }

    /// Pulses fired on `stream` up to and including `sample`.
    pub fn pulse_count(&self, stream: Stream, sample: u64) -> u64 {
        self.tick_at(sample) / self.period_ticks(stream) + 1
    }

    /// True when a pulse of `stream` lands on `sample`. All streams fire on
    /// sample 0.
    #[inline]
    pub fn fires(&self, stream: Stream, sample: u64) -> bool {
        crossed(self.tick_at_prev(sample), self.tick_at(sample), 0, self.period_ticks(stream))
    }

    /// First sample whose tick is at or past `tick`.
    pub fn sample_for_tick(&self, tick: u64) -> u64 {
        let estimate = ((tick as f64 * self.ticks_den) / self.ticks_num).floor() as u64;
        let mut sample = estimate.saturating_sub(1);
        while self.tick_at(sample) < tick {
            sample += 1;
        }
        sample
    }

    #[inline]
    pub(crate) fn tick_at_prev(&self, sample: u64) -> Option<u64> {
        sample.checked_sub(1).map(|prev| self.tick_at(prev))
    }
}

/// Did a grid line `offset + k * period` fall in `(prev, now]`?
///
/// `prev == None` is the session origin, which counts as crossing every line
/// at or before `now` exactly when `now` sits on or past `offset`.
#[inline]
pub(crate) fn crossed(prev: Option<u64>, now: u64, offset: u64, period: u64) -> bool {
    if now < offset {
        return false;
    }
    let now_index = (now - offset) / period;
    match prev {
        None => true,
        Some(prev) if prev < offset => true,
        Some(prev) => (prev - offset) / period != now_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f64 = 48_000.0;

    #[test]
    fn rejects_non_positive_tempo() {
        assert_eq!(ClockNetwork::new(0.0, SR), Err(ConfigError::InvalidTempo(0.0)));
        assert_eq!(ClockNetwork::new(-10.0, SR), Err(ConfigError::InvalidTempo(-10.0)));
        assert!(ClockNetwork::new(f64::NAN, SR).is_err());
        assert!(ClockNetwork::new(120.0, 0.0).is_err());
    }

    #[test]
    fn stream_periods_are_exact_ratios() {
        for bpm in [60.0, 97.3, 125.0, 174.0] {
            let clocks = ClockNetwork::new(bpm, SR).unwrap();
            let kick = clocks.period(Stream::Kick);
            assert_eq!(clocks.period(Stream::Bar).ratio_to(kick), (4, 1));
            assert_eq!(clocks.period(Stream::Offbeat).ratio_to(kick), (1, 2));
            assert_eq!(
                clocks.period(Stream::FourBar).ratio_to(clocks.period(Stream::Bar)),
                (4, 1)
            );
            assert_eq!(
                clocks.period_ticks(Stream::Bar),
                4 * clocks.period_ticks(Stream::Kick)
            );
        }
    }

    #[test]
    fn kick_lands_every_beat_at_125_bpm() {
        let clocks = ClockNetwork::new(125.0, SR).unwrap();
        assert!((clocks.period_secs(Stream::Kick) - 0.48).abs() < 1e-12);

        let fired: Vec<u64> = (0..(SR as u64 * 2))
            .filter(|&n| clocks.fires(Stream::Kick, n))
            .collect();
        assert_eq!(fired, vec![0, 23_040, 46_080, 69_120, 92_160]);
    }

    #[test]
    fn every_stream_fires_at_origin() {
        let clocks = ClockNetwork::new(131.0, SR).unwrap();
        for stream in Stream::ALL {
            assert!(clocks.fires(stream, 0), "{stream:?} should fire at sample 0");
            assert_eq!(clocks.pulse_count(stream, 0), 1);
        }
    }

    #[test]
    fn integer_multiples_stay_aligned() {
        let clocks = ClockNetwork::new(133.7, 44_100.0).unwrap();
        let horizon = 44_100 * 60;
        for n in 0..horizon {
            if clocks.fires(Stream::Bar, n) {
                assert!(clocks.fires(Stream::Kick, n), "bar without kick at {n}");
                assert!(clocks.fires(Stream::Offbeat, n));
            }
        }
        let kicks = clocks.pulse_count(Stream::Kick, horizon);
        let bars = clocks.pulse_count(Stream::Bar, horizon);
        assert_eq!((kicks - 1) / 4, bars - 1);
    }

    #[test]
    fn sample_for_tick_inverts_tick_at() {
        let clocks = ClockNetwork::new(125.0, SR).unwrap();
        assert_eq!(clocks.sample_for_tick(0), 0);
        assert_eq!(clocks.sample_for_tick(480), 23_040);
        let s = clocks.sample_for_tick(7);
        assert!(clocks.tick_at(s) >= 7 && clocks.tick_at(s - 1) < 7);
    }
}
