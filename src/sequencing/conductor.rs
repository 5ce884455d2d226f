//! The running trigger network.
//!
//! The conductor owns everything that advances with the render timeline:
//! the sample position on the clock grid, the counters, the phrase gate, the
//! generative patterns and the pitch lanes. Once per sample it produces a
//! `Tick`, a small `Copy` frame that voices read their triggers and pitches
//! from. Voices never mutate it, so toggling voices on and off leaves the
//! rhythm untouched.

use std::sync::Arc;

use rand::{rngs::StdRng, SeedableRng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{
    clock::{ClockNetwork, Stream},
    counter::{Counter, CounterState, NextTrigger, Selector},
    duration::Duration,
    pattern::{PatternEvent, PatternGenerator, PatternSpec, PatternState, PatternWeights},
    scale::{NoteLane, Scale},
};
use crate::error::ConfigError;

/// Generative pattern slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternLane {
    Hats,
    Melody,
    Sparkle,
}

impl PatternLane {
    pub const COUNT: usize = 3;
    pub const ALL: [PatternLane; Self::COUNT] =
        [PatternLane::Hats, PatternLane::Melody, PatternLane::Sparkle];
}

/// Quantized random pitch slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PitchLane {
    Bass,
    Melody,
}

impl PitchLane {
    pub const COUNT: usize = 2;
}

/// Anything an envelope can be retriggered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Pulse(Stream),
    /// Odd steps of the offbeat counter: the "and" of every beat.
    OddOffbeat,
    /// First bar pulse after the phrase counter reaches its start offset.
    Phrase,
    /// A pattern tap that decided to fire.
    Pattern(PatternLane),
}

const CUE_ODD_OFFBEAT: u8 = 1;
const CUE_PHRASE: u8 = 1 << 1;

/// One sample's worth of trigger network output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub sample: u64,
    pulses: u8,
    cues: u8,
    events: [PatternEvent; PatternLane::COUNT],
    notes: [f32; PitchLane::COUNT],
}

impl Default for Tick {
    fn default() -> Self {
        Self {
            sample: 0,
            pulses: 0,
            cues: 0,
            events: [PatternEvent::default(); PatternLane::COUNT],
            notes: [f32::NAN; PitchLane::COUNT],
        }
    }
}

impl Tick {
    #[inline]
    pub fn pulsed(&self, stream: Stream) -> bool {
        self.pulses & stream.bit() != 0
    }

    #[inline]
    pub fn fired(&self, trigger: Trigger) -> bool {
        match trigger {
            Trigger::Pulse(stream) => self.pulsed(stream),
            Trigger::OddOffbeat => self.cues & CUE_ODD_OFFBEAT != 0,
            Trigger::Phrase => self.cues & CUE_PHRASE != 0,
            Trigger::Pattern(lane) => self.events[lane as usize].trigger,
        }
    }

    /// The tap event for `lane` on this sample (non-firing if no tap landed).
    #[inline]
    pub fn event(&self, lane: PatternLane) -> PatternEvent {
        self.events[lane as usize]
    }

    /// Current frequency of a pitch lane; NaN until the lane first resolves.
    #[inline]
    pub fn note(&self, lane: PitchLane) -> f32 {
        self.notes[lane as usize]
    }
}

/// Pitch lane description: notes drawn from `[low, high)`, snapped to `degrees`.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneSpec {
    pub low: u8,
    pub high: u8,
    pub degrees: Vec<u8>,
}

impl LaneSpec {
    fn build(&self) -> Result<NoteLane, ConfigError> {
        NoteLane::new(self.low, self.high, Scale::new(&self.degrees)?)
    }
}

/// Everything configurable about the trigger network.
#[derive(Debug, Clone, PartialEq)]
pub struct RhythmSpec {
    /// Offbeat counter span; its odd steps form the offbeat cue.
    pub offbeat_cycle: i64,
    /// Kicks per phrase.
    pub phrase_length: i64,
    /// Kick index within the phrase that arms the phrase cue.
    pub phrase_start: i64,
    pub hats: PatternSpec,
    pub melody: PatternSpec,
    pub sparkle: PatternSpec,
    pub bass_notes: LaneSpec,
    pub melody_notes: LaneSpec,
}

impl Default for RhythmSpec {
    fn default() -> Self {
        Self {
            offbeat_cycle: 8,
            phrase_length: 8,
            phrase_start: 4,
            // Busy sixteenths with light accents.
            hats: PatternSpec::sixteenths(PatternWeights::new(40.0, 50.0, 10.0))
                .with_amplitudes((0.4, 0.6), (0.8, 1.0)),
            // Sparse melody, held a little longer, enters after four bars.
            melody: PatternSpec::sixteenths(PatternWeights::new(60.0, 40.0, 10.0))
                .with_duration(1.0, 3.0)
                .with_amplitudes((0.4, 0.7), (0.9, 1.0))
                .with_delay(Duration::WHOLE.times(4)),
            // Blips enter after eight bars.
            sparkle: PatternSpec::sixteenths(PatternWeights::new(30.0, 20.0, 20.0))
                .with_delay(Duration::WHOLE.times(8)),
            bass_notes: LaneSpec {
                low: 38,
                high: 48,
                degrees: vec![0, 2, 3],
            },
            melody_notes: LaneSpec {
                low: 48,
                high: 60,
                degrees: vec![0, 3],
            },
        }
    }
}

/// Serializable position of the clock grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockState {
    /// Next sample to be produced.
    pub position: u64,
}

/// Serializable snapshot of the whole network (minus the random stream).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ConductorState {
    pub clock: ClockState,
    pub offbeat_counter: CounterState,
    pub phrase_counter: CounterState,
    pub phrase_gate: NextTrigger,
    pub patterns: [PatternState; PatternLane::COUNT],
    /// Lane pitches in Hz, `None` while a lane is unresolved.
    pub notes: [Option<f32>; PitchLane::COUNT],
}

pub struct Conductor {
    clocks: Arc<ClockNetwork>,
    position: u64,
    offbeat_counter: Counter,
    phrase_counter: Counter,
    phrase_start: Selector,
    phrase_gate: NextTrigger,
    patterns: [PatternGenerator; PatternLane::COUNT],
    tap_secs: [f32; PatternLane::COUNT],
    bass_lane: NoteLane,
    melody_lane: NoteLane,
    rng: StdRng,
}

impl Conductor {
    pub fn new(clocks: Arc<ClockNetwork>, spec: RhythmSpec, seed: u64) -> Result<Self, ConfigError> {
        let offbeat_counter = Counter::new(0, spec.offbeat_cycle)?;
        let phrase_counter = Counter::new(0, spec.phrase_length)?;

        let patterns = [
            PatternGenerator::new(spec.hats)?,
            PatternGenerator::new(spec.melody)?,
            PatternGenerator::new(spec.sparkle)?,
        ];
        let tap_secs = [0, 1, 2].map(|i| clocks.secs(patterns[i].spec().tap) as f32);

        Ok(Self {
            position: 0,
            offbeat_counter,
            phrase_counter,
            phrase_start: Selector::new(spec.phrase_start),
            phrase_gate: NextTrigger::new(),
            patterns,
            tap_secs,
            bass_lane: spec.bass_notes.build()?,
            melody_lane: spec.melody_notes.build()?,
            rng: StdRng::seed_from_u64(seed),
            clocks,
        })
    }

    pub fn clocks(&self) -> &Arc<ClockNetwork> {
        &self.clocks
    }

    /// Next sample to be produced.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Restart the random stream; pattern and pitch draws after this are
    /// fully determined by `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn offbeat_counter(&self) -> &Counter {
        &self.offbeat_counter
    }

    pub fn phrase_counter(&self) -> &Counter {
        &self.phrase_counter
    }

    pub fn pattern(&self, lane: PatternLane) -> &PatternGenerator {
        &self.patterns[lane as usize]
    }

    /// Completed bars and the beat within the current bar.
    pub fn bar_and_beat(&self) -> (u64, u64) {
        let Some(last) = self.position.checked_sub(1) else {
            return (0, 0);
        };
        let beats = self.clocks.pulse_count(Stream::Kick, last) - 1;
        (beats / 4, beats % 4)
    }

    /// Produce the next sample's frame.
    pub fn advance_one(&mut self) -> Tick {
        let n = self.position;
        let now = self.clocks.tick_at(n);
        let prev = self.clocks.tick_at_prev(n);

        let mut tick = Tick {
            sample: n,
            ..Tick::default()
        };

        for stream in Stream::ALL {
            if self.clocks.fires(stream, n) {
                tick.pulses |= stream.bit();
            }
        }

        if tick.pulsed(Stream::Kick) && self.phrase_start.select(self.phrase_counter.advance()) {
            self.phrase_gate.arm();
        }
        if self.phrase_gate.release(tick.pulsed(Stream::Bar)) {
            tick.cues |= CUE_PHRASE;
        }

        if tick.pulsed(Stream::Offbeat) {
            self.offbeat_counter.advance();
            self.bass_lane.pick(&mut self.rng);
            if self.offbeat_counter.is_odd() {
                tick.cues |= CUE_ODD_OFFBEAT;
            }
        }

        for lane in PatternLane::ALL {
            let i = lane as usize;
            if self.patterns[i].fires(prev, now) {
                let event = self.patterns[i].on_tap(&mut self.rng, self.tap_secs[i]);
                if event.trigger && lane == PatternLane::Melody {
                    self.melody_lane.pick(&mut self.rng);
                }
                tick.events[i] = event;
            }
        }

        tick.notes = [self.bass_lane.hz(), self.melody_lane.hz()];
        self.position += 1;
        tick
    }

    /// Fill `out` with consecutive frames.
    pub fn advance(&mut self, out: &mut [Tick]) {
        for slot in out.iter_mut() {
            *slot = self.advance_one();
        }
    }

    /// Advance without keeping the frames.
    pub fn skip(&mut self, frames: usize) {
        for _ in 0..frames {
            self.advance_one();
        }
    }

    pub fn state(&self) -> ConductorState {
        ConductorState {
            clock: ClockState {
                position: self.position,
            },
            offbeat_counter: self.offbeat_counter.state(),
            phrase_counter: self.phrase_counter.state(),
            phrase_gate: self.phrase_gate,
            patterns: [0, 1, 2].map(|i| self.patterns[i].state()),
            notes: [self.bass_lane.hz(), self.melody_lane.hz()]
                .map(|hz| Some(hz).filter(|hz| hz.is_finite())),
        }
    }

    pub fn restore(&mut self, state: &ConductorState) {
        self.position = state.clock.position;
        self.offbeat_counter.restore(state.offbeat_counter);
        self.phrase_counter.restore(state.phrase_counter);
        self.phrase_gate = state.phrase_gate;
        for (pattern, saved) in self.patterns.iter_mut().zip(state.patterns) {
            pattern.restore(saved);
        }
        let [bass, melody] = state.notes.map(|hz| hz.unwrap_or(f32::NAN));
        self.bass_lane.set_hz(bass);
        self.melody_lane.set_hz(melody);
    }
}
