use rand::{rngs::StdRng, Rng, SeedableRng};

use super::oscillator::{OscillatorBlock, OscillatorWaveform};

/*
Super Saw
=========

Seven free-running sawtooth oscillators around one pitch. The centre saw
plays the pitch exactly; the six side saws are spread by fixed relative
offsets scaled by a detune amount.

    offsets (relative to the pitch):
      -0.110  -0.063  -0.020   0   +0.020  +0.062  +0.107

`detune` in [0, 1] is mapped through a curve that stays tiny for most of the
range and rises steeply near 1, so small values give a gentle chorus and
values near 1 a wide smear.

`balance` in [0, 1] trades the centre saw against the sides:

    centre gain = 1 - 0.55 · balance
    side gain   = -0.74 · balance² + 1.28 · balance + 0.04

The sum is divided by the total gain, so a bank never leaves [-1, 1].

Each saw starts at a random phase drawn from the bank's seed. With aligned
phases the first cycle would be a single loud spike.
*/

const SIDE_OFFSETS: [f32; 7] = [
    -0.110_023_13,
    -0.062_884_39,
    -0.019_523_56,
    0.0,
    0.019_912_21,
    0.062_165_38,
    0.107_452_42,
];
const CENTRE: usize = 3;

/// Detune amount in [0, 1] to a relative spread multiplier.
pub fn detune_curve(detune: f32) -> f32 {
    let x = detune.clamp(0.0, 1.0) as f64;
    let coefficients = [
        10_028.731_289_163_4,
        -50_818.865_204_592_4,
        111_363.480_872_936_8,
        -138_150.676_108_054_8,
        106_649.667_915_829_2,
        -53_046.964_275_187_5,
        17_019.951_858_008_0,
        -3_425.083_659_131_8,
        404.270_393_838_8,
        -24.187_882_439_1,
        0.671_741_763_4,
        0.003_011_559_6,
    ];
    coefficients.iter().fold(0.0f64, |acc, &c| acc * x + c) as f32
}

pub fn centre_gain(balance: f32) -> f32 {
    let b = balance.clamp(0.0, 1.0);
    -0.553_66 * b + 0.997_85
}

pub fn side_gain(balance: f32) -> f32 {
    let b = balance.clamp(0.0, 1.0);
    -0.737_64 * b * b + 1.284_1 * b + 0.044_372
}

pub struct SawBank {
    saws: [OscillatorBlock; 7],
    ratios: [f32; 7],
    centre_gain: f32,
    side_gain: f32,
    norm: f32,
}

impl SawBank {
    pub fn new(detune: f32, balance: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let spread = detune_curve(detune);
        let saws = std::array::from_fn(|_| {
            let mut saw = OscillatorBlock::new(OscillatorWaveform::Saw);
            saw.set_phase(rng.gen());
            saw
        });

        let centre = centre_gain(balance);
        let side = side_gain(balance);

        Self {
            saws,
            ratios: SIDE_OFFSETS.map(|offset| 1.0 + offset * spread),
            centre_gain: centre,
            side_gain: side,
            norm: 1.0 / (centre + 6.0 * side),
        }
    }

    /// Frequency multipliers of the seven saws.
    pub fn ratios(&self) -> &[f32; 7] {
        &self.ratios
    }

    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let mut acc = 0.0;
        for (i, (saw, ratio)) in self.saws.iter_mut().zip(self.ratios).enumerate() {
            let gain = if i == CENTRE {
                self.centre_gain
            } else {
                self.side_gain
            };
            acc += gain * saw.next_sample(frequency * ratio, sample_rate);
        }
        acc * self.norm
    }
}
