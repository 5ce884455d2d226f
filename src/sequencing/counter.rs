//! Pulse-driven counters and the small selection helpers built on them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Cyclic integer state in `[min, max)`, stepped once per driving pulse.
///
/// A fresh counter sits on `max - 1`, so the first pulse lands on `min`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    min: i64,
    max: i64,
    value: i64,
}

/// Snapshot of a counter's position.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterState {
    pub value: i64,
}

impl Counter {
    pub fn new(min: i64, max: i64) -> Result<Self, ConfigError> {
        if min >= max {
            return Err(ConfigError::EmptyCounterRange { min, max });
        }
        Ok(Self {
            min,
            max,
            value: max - 1,
        })
    }

    /// Step once and return the new value.
    #[inline]
    pub fn advance(&mut self) -> i64 {
        self.value = self.min + (self.value - self.min + 1).rem_euclid(self.max - self.min);
        self.value
    }

    #[inline]
    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Number of pulses in one full cycle.
    pub fn span(&self) -> i64 {
        self.max - self.min
    }

    /// `value mod 2 == 1`, recomputed from the current value.
    #[inline]
    pub fn is_odd(&self) -> bool {
        self.value.rem_euclid(2) == 1
    }

    pub fn state(&self) -> CounterState {
        CounterState { value: self.value }
    }

    /// Restore a snapshot. Out-of-range values are wrapped into range.
    pub fn restore(&mut self, state: CounterState) {
        self.value = self.min + (state.value - self.min).rem_euclid(self.span());
    }
}

/// Fires when a counter value matches a fixed offset; once per counter cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    offset: i64,
}

impl Selector {
    pub const fn new(offset: i64) -> Self {
        Self { offset }
    }

    #[inline]
    pub fn select(&self, value: i64) -> bool {
        value == self.offset
    }
}

/// Passes exactly one pulse of a second stream after being armed.
///
/// Arming and releasing on the same sample counts: call `arm` before
/// `release` within a sample.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NextTrigger {
    armed: bool,
}

impl NextTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn arm(&mut self) {
        self.armed = true;
    }

    /// Feed a pulse of the released stream; true if it passes.
    #[inline]
    pub fn release(&mut self, pulse: bool) -> bool {
        if pulse && self.armed {
            self.armed = false;
            true
        } else {
            false
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}
