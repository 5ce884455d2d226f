pub mod clock;
pub mod conductor;
pub mod counter;
pub mod duration;
pub mod pattern;
pub mod scale;

pub use clock::{ClockNetwork, Stream, PPQ};
pub use conductor::{
    ClockState, Conductor, ConductorState, LaneSpec, PatternLane, PitchLane, RhythmSpec, Tick,
    Trigger,
};
pub use counter::{Counter, CounterState, NextTrigger, Selector};
pub use duration::Duration;
pub use pattern::{Hit, PatternEvent, PatternGenerator, PatternSpec, PatternState, PatternWeights};
pub use scale::{midi_to_hz, NoteLane, Scale};
