use crate::{
    dsp::supersaw::SawBank,
    graph::node::{GraphNode, RenderCtx},
    sequencing::midi_to_hz,
};

/// A super saw bank per note, summed. With a single note this is a drone;
/// with several it is a chord stack.
///
/// The sum is scaled by `1 / sqrt(notes)` so a wide chord sits at roughly
/// the loudness of one note.
pub struct SuperSaw {
    banks: Vec<SawBank>,
    frequencies: Vec<f32>,
    norm: f32,
}

impl SuperSaw {
    pub fn new(frequencies: &[f32], detune: f32, balance: f32, seed: u64) -> Self {
        let banks = (0..frequencies.len() as u64)
            .map(|i| SawBank::new(detune, balance, seed.wrapping_add(i)))
            .collect();
        let norm = if frequencies.is_empty() {
            0.0
        } else {
            1.0 / (frequencies.len() as f32).sqrt()
        };

        Self {
            banks,
            frequencies: frequencies.to_vec(),
            norm,
        }
    }

    /// A stack over fractional MIDI notes, transposed by `transpose` (a
    /// frequency multiplier: 0.5 is an octave down).
    pub fn chord(notes: &[f32], transpose: f32, detune: f32, balance: f32, seed: u64) -> Self {
        let frequencies: Vec<f32> = notes.iter().map(|&n| midi_to_hz(n) * transpose).collect();
        Self::new(&frequencies, detune, balance, seed)
    }

    pub fn frequencies(&self) -> &[f32] {
        &self.frequencies
    }
}

impl GraphNode for SuperSaw {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for sample in out.iter_mut() {
            let mut acc = 0.0;
            for (bank, &freq) in self.banks.iter_mut().zip(&self.frequencies) {
                acc += bank.next_sample(freq, ctx.sample_rate);
            }
            *sample = acc * self.norm;
        }
    }
}
