use std::f32::consts::PI;

use crate::error::ConfigError;

/*
Breakpoint Envelope Tables
==========================

An envelope shape is drawn once, as a list of `(position, value)`
breakpoints over a fixed span of `TABLE_LEN` positions, and rendered into a
lookup table at construction time. Playback then only reads the table.

    value
      1 ┤   ●
        │  ╱ ╲___●
        │ ╱        ╲_____
      0 ●────────────────────●──→ position
        0   10   1000       8191

Between breakpoints the shape is interpolated either linearly or with a
half-cosine, which eases in and out of every breakpoint:

    linear:  v = a + (b - a) · t
    cosine:  v = a + (b - a) · (1 - cos(π·t)) / 2

Positions must be non-decreasing. Two breakpoints at the same position make
a vertical step. Before the first breakpoint the table holds the first value;
after the last one it holds the last value.

Time is mapped onto the table by a phase in [0, 1]: phase 0 is position 0,
phase 1 is the end of the span. Reads past the end return the final value,
so an envelope that outlives its duration simply rests there.
*/

/// Positions in one table span.
pub const TABLE_LEN: usize = 8192;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    Linear,
    Cosine,
}

#[derive(Debug, Clone)]
pub struct EnvelopeTable {
    values: Box<[f32]>,
    interpolation: Interpolation,
}

impl EnvelopeTable {
    pub fn linear(points: &[(u32, f32)]) -> Result<Self, ConfigError> {
        Self::new(points, Interpolation::Linear)
    }

    pub fn cosine(points: &[(u32, f32)]) -> Result<Self, ConfigError> {
        Self::new(points, Interpolation::Cosine)
    }

    pub fn new(points: &[(u32, f32)], interpolation: Interpolation) -> Result<Self, ConfigError> {
        let Some(&(_, first)) = points.first() else {
            return Err(ConfigError::EmptyEnvelope);
        };
        if let Some(pair) = points.windows(2).find(|pair| pair[1].0 < pair[0].0) {
            return Err(ConfigError::UnsortedEnvelope(pair[1].0));
        }

        let last_index = TABLE_LEN - 1;
        let mut values = vec![first; TABLE_LEN].into_boxed_slice();

        for pair in points.windows(2) {
            let (p0, v0) = pair[0];
            let (p1, v1) = pair[1];
            let start = (p0 as usize).min(last_index);
            let end = (p1 as usize).min(last_index);
            if end == start {
                values[end] = v1;
                continue;
            }
            let span = (end - start) as f32;
            for (offset, slot) in values[start..=end].iter_mut().enumerate() {
                let t = offset as f32 / span;
                let eased = match interpolation {
                    Interpolation::Linear => t,
                    Interpolation::Cosine => (1.0 - (PI * t).cos()) * 0.5,
                };
                *slot = v0 + (v1 - v0) * eased;
            }
        }

        if let Some(&(p, v)) = points.last() {
            let from = (p as usize).min(last_index);
            values[from..].fill(v);
        }

        Ok(Self {
            values,
            interpolation,
        })
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Value at `phase` in `[0, 1]`; anything past 1 reads the final value.
    #[inline]
    pub fn lookup(&self, phase: f32) -> f32 {
        let last = self.values.len() - 1;
        if !(phase < 1.0) {
            return self.values[last];
        }
        let position = phase.max(0.0) * last as f32;
        let index = position as usize;
        let frac = position - index as f32;
        let a = self.values[index];
        let b = self.values[(index + 1).min(last)];
        a + (b - a) * frac
    }

    pub fn final_value(&self) -> f32 {
        self.values[self.values.len() - 1]
    }
}
