use crate::sequencing::{midi_to_hz, Tick, Trigger};

/// Context passed to graph nodes during rendering
///
/// - sample_rate: Audio sample rate (e.g., 48000.0)
/// - frequency: Pitch for nodes that follow the context (Hz)
/// - velocity: Intensity, 0.0-1.0
/// - ticks: One trigger-network frame per output sample. May be shorter than
///   the block (or empty) when rendering outside the engine; samples without
///   a frame see no triggers and no lane pitch.
#[derive(Clone, Copy, Debug)]
pub struct RenderCtx<'a> {
    pub sample_rate: f32,
    pub frequency: f32,
    pub velocity: f32,
    pub ticks: &'a [Tick],
}

impl RenderCtx<'static> {
    /// Create context from a MIDI note, with no trigger frames.
    pub fn from_note(sample_rate: f32, note: u8, velocity: f32) -> Self {
        Self::from_freq(sample_rate, midi_to_hz(note as f32), velocity)
    }

    /// Create context from a direct frequency, with no trigger frames.
    pub fn from_freq(sample_rate: f32, frequency: f32, velocity: f32) -> Self {
        Self {
            sample_rate,
            frequency,
            velocity,
            ticks: &[],
        }
    }
}

impl<'a> RenderCtx<'a> {
    /// Context for one engine block: frames come from the conductor and there
    /// is no context pitch.
    pub fn with_ticks(sample_rate: f32, ticks: &'a [Tick]) -> Self {
        Self {
            sample_rate,
            frequency: f32::NAN,
            velocity: 1.0,
            ticks,
        }
    }

    #[inline]
    pub fn tick(&self, index: usize) -> Option<&'a Tick> {
        self.ticks.get(index)
    }

    /// Did `trigger` fire on sample `index` of this block?
    #[inline]
    pub fn fired(&self, index: usize, trigger: Trigger) -> bool {
        self.ticks.get(index).is_some_and(|t| t.fired(trigger))
    }
}

/// Trait for nodes that support parameter modulation
pub trait Modulatable: Send {
    type Param: Copy + Send;

    fn get_param(&self, param: Self::Param) -> f32;

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32);
}

/// Core trait for audio processing graph nodes
///
/// A node fills `out` for the block described by `ctx`. Triggers and lane
/// pitches arrive through `ctx.ticks`, so a node reacts to the rhythm without
/// being told about it.
///
/// `out` is at most [`crate::MAX_BLOCK_SIZE`] frames long; the engine splits
/// longer buffers before they reach a graph.
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);
}

/// Allow boxed graph nodes to be used as graph nodes (for dynamic dispatch)
impl GraphNode for Box<dyn GraphNode> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        (**self).render_block(out, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencing::Stream;

    #[test]
    fn note_context_has_no_frames() {
        let ctx = RenderCtx::from_note(48_000.0, 69, 1.0);
        assert!((ctx.frequency - 440.0).abs() < 1e-3);
        assert!(ctx.tick(0).is_none());
        assert!(!ctx.fired(0, Trigger::Pulse(Stream::Kick)));
    }
}
