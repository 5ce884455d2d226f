/*
Block-Rate Parameter Modulation
===============================

A modulator (usually an LFO) moves a parameter around a base value:

    value = base + modulator × depth

The target parameter is updated once per rendered block, from the average of
the modulator over that block. Blocks are at most a few milliseconds long
while the LFOs in this crate run at a few hertz, so the steps are inaudible
and filter or oscillator coefficients are not recomputed every sample.

The target node clamps the result to its own valid range.
*/

/// `base + modulator × depth`.
#[inline]
pub fn apply_modulation(base_value: f32, modulator: f32, depth: f32) -> f32 {
    base_value + modulator * depth
}

/// Mean of a block of modulator samples; 0 for an empty block.
#[inline]
pub fn block_average(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f32>() / samples.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vibrato_depth_around_base_pitch() {
        // A 2% vibrato around 100 Hz.
        assert_eq!(apply_modulation(100.0, 0.0, 2.0), 100.0);
        assert_eq!(apply_modulation(100.0, 1.0, 2.0), 102.0);
        assert_eq!(apply_modulation(100.0, -1.0, 2.0), 98.0);
    }

    #[test]
    fn averages_block() {
        assert_eq!(block_average(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(block_average(&[]), 0.0);
        assert_eq!(block_average(&[-0.5]), -0.5);
    }
}
