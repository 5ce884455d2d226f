use crate::MAX_DELAY_SAMPLES;

/*
Feedback Delay Line
===================

A circular buffer written once per sample and read `delay` samples behind
the write head:

    write ─→ [ x x x x x x x x ] ─→ read (write - delay)
                    ↑                  │
                    └── feedback × ────┘

With feedback the line feeds its own output back in, so each echo repeats
at `feedback` times the previous level. Feedback is clamped below 1 so the
echoes always die out.

The buffer is sized once at construction (never on the audio thread) and
capped at `MAX_DELAY_SAMPLES`.
*/

const MAX_FEEDBACK: f32 = 0.99;

pub struct DelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
    delay: usize,
    feedback: f32,
}

impl DelayLine {
    /// A line holding exactly `delay_samples` of history.
    pub fn new(delay_samples: usize, feedback: f32) -> Self {
        let delay = delay_samples.clamp(1, MAX_DELAY_SAMPLES);
        Self {
            buffer: vec![0.0; delay],
            write_pos: 0,
            delay,
            feedback: feedback.clamp(0.0, MAX_FEEDBACK),
        }
    }

    /// A line whose delay is `secs` at `sample_rate`.
    pub fn from_secs(secs: f32, sample_rate: f32, feedback: f32) -> Self {
        let samples = (secs.max(0.0) * sample_rate).round() as usize;
        Self::new(samples, feedback)
    }

    pub fn delay_samples(&self) -> usize {
        self.delay
    }

    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Push one input sample and return the delayed (wet) sample.
    #[inline]
    pub fn next_sample(&mut self, sample: f32) -> f32 {
        // The slot about to be overwritten is exactly `delay` samples old.
        let delayed = self.buffer[self.write_pos];
        self.buffer[self.write_pos] = sample + delayed * self.feedback;
        self.write_pos += 1;
        if self.write_pos == self.delay {
            self.write_pos = 0;
        }
        delayed
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}
