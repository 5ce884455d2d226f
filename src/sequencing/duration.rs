#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Musical length as an exact fraction of a whole note.
///
/// Clock periods are built from these so that tempo-relative relationships
/// (a kick is a quarter of a bar, an offbeat half a kick) are exact integers
/// and never drift apart in floating point.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Duration {
    pub numerator: u32,
    pub denominator: u32,
}

impl Duration {
    pub const WHOLE: Duration = Duration::new(1, 1);
    pub const HALF: Duration = Duration::new(1, 2);
    pub const QUARTER: Duration = Duration::new(1, 4);
    pub const EIGHTH: Duration = Duration::new(1, 8);
    pub const SIXTEENTH: Duration = Duration::new(1, 16);

    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Duration {
            numerator,
            denominator,
        }
    }

    /// `n` of these back to back.
    pub const fn times(self, n: u32) -> Self {
        Duration {
            numerator: self.numerator * n,
            denominator: self.denominator,
        }
        .reduce()
    }

    /// One `n`-th of this duration.
    pub const fn divided(self, n: u32) -> Self {
        Duration {
            numerator: self.numerator,
            denominator: self.denominator * n,
        }
        .reduce()
    }

    pub const fn reduce(self) -> Self {
        let gcd = const_gcd(self.numerator, self.denominator);
        if gcd == 0 {
            return self;
        }
        Duration {
            numerator: self.numerator / gcd,
            denominator: self.denominator / gcd,
        }
    }

    /// Integer ticks at `ppq` pulses per quarter note.
    ///
    /// ticks = numerator * 4 * ppq / denominator
    pub fn to_ticks(&self, ppq: u32) -> u64 {
        (self.numerator as u64 * 4 * ppq as u64) / self.denominator as u64
    }

    /// Length in quarter-note beats.
    pub fn to_beats(&self) -> f64 {
        self.numerator as f64 * 4.0 / self.denominator as f64
    }

    /// Length in seconds at the given tempo.
    pub fn to_secs(&self, bpm: f64) -> f64 {
        self.to_beats() * 60.0 / bpm
    }

    /// Exact ratio `self / other`, reduced.
    pub const fn ratio_to(self, other: Duration) -> (u32, u32) {
        let r = Duration {
            numerator: self.numerator * other.denominator,
            denominator: self.denominator * other.numerator,
        }
        .reduce();
        (r.numerator, r.denominator)
    }
}

const fn const_gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let temp = b;
        b = a % b;
        a = temp;
    }
    a
}
