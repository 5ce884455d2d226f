//! Signal mixing and crossfading primitives.

/*
Signal Mixing
=============

Mixing adds signals, optionally weighted.

  crossfade   complementary weights: (1 - balance) · A + balance · B
  dry/wet     the same crossfade between an unprocessed and a processed copy
  sum         plain addition, used when many voices land on one bus

A linear crossfade keeps the weights summing to 1, so two full-scale inputs
never exceed full scale. Summing does not; the engine accumulates voices with
`sum_in_place` and each instrument carries its own output gain to leave
headroom.
*/

/// Crossfade `b` into `a` in place. `balance` 0 keeps `a`, 1 replaces it.
#[inline]
pub fn mix_in_place(a: &mut [f32], b: &[f32], balance: f32) {
    debug_assert_eq!(a.len(), b.len());
    let weight_a = 1.0 - balance;
    for (x, &y) in a.iter_mut().zip(b) {
        *x = *x * weight_a + y * balance;
    }
}

/// `a += b`, sample by sample.
#[inline]
pub fn sum_in_place(a: &mut [f32], b: &[f32]) {
    debug_assert_eq!(a.len(), b.len());
    for (x, &y) in a.iter_mut().zip(b) {
        *x += y;
    }
}

#[inline]
pub fn blend_dry_wet(dry: f32, wet: f32, mix: f32) -> f32 {
    dry * (1.0 - mix) + wet * mix
}

/// Blend a saved dry copy into `wet` in place.
#[inline]
pub fn apply_dry_wet(dry: &[f32], wet: &mut [f32], mix: f32) {
    debug_assert_eq!(dry.len(), wet.len());
    for (w, &d) in wet.iter_mut().zip(dry) {
        *w = blend_dry_wet(d, *w, mix);
    }
}

/// Multiply every sample by a constant.
#[inline]
pub fn apply_gain(signal: &mut [f32], gain: f32) {
    for sample in signal.iter_mut() {
        *sample *= gain;
    }
}
