use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    dsp::envelope::EnvelopeTable,
    graph::node::{GraphNode, RenderCtx},
    sequencing::{PatternLane, Trigger},
};

/*
Triggered Envelope
==================

A `TriggerEnvelope` replays an envelope table every time its trigger fires.

    trigger:   │           │     │
    output:    ╱╲___       ╱╲__  ╱╲___
              fire        fire  fire (restarts mid-shape)

On a firing sample the elapsed-time counter goes back to zero and a duration
is chosen, which stretches the table span over that many seconds:

  Fixed(secs)          always the same
  Uniform { min, max } drawn afresh on every firing, from the node's own rng
  FromPattern(lane)    the duration carried by the pattern event that fired

The amplitude is either a fixed multiplier or the pattern event's amplitude
times a multiplier. Between firings the envelope keeps running forward and
then rests on the table's final value. Before the first firing it outputs 0.

Each node owns its counter and rng, so two voices bound to the same trigger
never influence each other.
*/

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnvDuration {
    Fixed(f32),
    Uniform { min: f32, max: f32 },
    FromPattern(PatternLane),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnvAmplitude {
    Fixed(f32),
    FromPattern(PatternLane, f32),
}

pub struct TriggerEnvelope {
    trigger: Trigger,
    table: EnvelopeTable,
    duration: EnvDuration,
    amplitude: EnvAmplitude,
    rng: StdRng,
    fired: bool,
    elapsed: u64,
    step: f32,
    gain: f32,
    level: f32,
    firings: u64,
}

impl TriggerEnvelope {
    /// One-second envelope at unit gain, as a starting point for the builders.
    pub fn new(trigger: Trigger, table: EnvelopeTable) -> Self {
        Self {
            trigger,
            table,
            duration: EnvDuration::Fixed(1.0),
            amplitude: EnvAmplitude::Fixed(1.0),
            rng: StdRng::seed_from_u64(0),
            fired: false,
            elapsed: 0,
            step: 0.0,
            gain: 0.0,
            level: 0.0,
            firings: 0,
        }
    }

    pub fn with_duration(mut self, duration: EnvDuration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_amplitude(mut self, amplitude: EnvAmplitude) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Seed for `EnvDuration::Uniform` draws.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    /// Most recent output value.
    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn firings(&self) -> u64 {
        self.firings
    }

    fn fire(&mut self, ctx: &RenderCtx, index: usize) {
        let event = |lane: PatternLane| ctx.tick(index).map(|t| t.event(lane)).unwrap_or_default();

        let secs = match self.duration {
            EnvDuration::Fixed(secs) => secs,
            EnvDuration::Uniform { min, max } if min >= 0.0 && max.is_finite() && max > min => {
                self.rng.gen_range(min..=max)
            }
            EnvDuration::Uniform { min, .. } => min,
            EnvDuration::FromPattern(lane) => event(lane).duration,
        };
        self.gain = match self.amplitude {
            EnvAmplitude::Fixed(mul) => mul,
            EnvAmplitude::FromPattern(lane, mul) => event(lane).amplitude * mul,
        };

        let samples = secs * ctx.sample_rate;
        // A zero-length envelope jumps straight to its final value.
        self.step = if samples > 0.0 { 1.0 / samples } else { f32::INFINITY };
        self.elapsed = 0;
        self.fired = true;
        self.firings += 1;
    }
}

impl GraphNode for TriggerEnvelope {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for (i, sample) in out.iter_mut().enumerate() {
            if ctx.fired(i, self.trigger) {
                self.fire(ctx, i);
            }
            if !self.fired {
                *sample = 0.0;
                continue;
            }
            let phase = if self.step.is_finite() {
                self.elapsed as f32 * self.step
            } else {
                1.0
            };
            self.level = self.gain * self.table.lookup(phase);
            *sample = self.level;
            self.elapsed += 1;
        }
    }
}
