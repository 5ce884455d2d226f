use crate::dsp::distortion::Saturator;
use crate::dsp::mix::apply_dry_wet;
use crate::graph::node::{GraphNode, Modulatable, RenderCtx};
use crate::MAX_BLOCK_SIZE;

/*
Distortion Node
===============

Saturation with a normalized drive (see `dsp::distortion` for the curve).

Drive (0.0 - 1.0):
  0.0 = clean, 0.75 = default grit, 0.85+ = heavy

Slope (0.0 - 1.0):
  Post-shaper smoothing. 0.0 leaves the fizz in, 0.5 (default) rounds it off.

Mix (0.0 - 1.0):
  Dry/wet blend. 0.0 = all dry, 1.0 = all wet (default)

Example usage:

  // Low chord, default drive after the echoes
  let grit = chord.through(delay).through(DistortionNode::new(0.75));

  // Melody pushed hard
  let lead = fm.through(DistortionNode::new(0.85));
*/

/// Parameters that can be modulated
#[derive(Clone, Copy, Debug)]
pub enum DistortionParam {
    Drive,
    Mix,
}

pub struct DistortionNode {
    saturator: Saturator,
    drive: f32,
    mix: f32,
    dry_buffer: [f32; MAX_BLOCK_SIZE], // Pre-allocated for allocation-free rendering
}

impl DistortionNode {
    pub const DEFAULT_DRIVE: f32 = 0.75;
    pub const DEFAULT_SLOPE: f32 = 0.5;

    pub fn new(drive: f32) -> Self {
        Self::with_slope(drive, Self::DEFAULT_SLOPE)
    }

    pub fn with_slope(drive: f32, slope: f32) -> Self {
        Self {
            saturator: Saturator::new(drive, slope),
            drive,
            mix: 1.0,
            dry_buffer: [0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn with_mix(mut self, mix: f32) -> Self {
        self.mix = mix.clamp(0.0, 1.0);
        self
    }
}

impl Default for DistortionNode {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DRIVE)
    }
}

impl GraphNode for DistortionNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        debug_assert!(out.len() <= MAX_BLOCK_SIZE, "block of {} frames", out.len());
        let len = out.len();

        self.dry_buffer[..len].copy_from_slice(out);
        self.saturator.render(out);
        apply_dry_wet(&self.dry_buffer[..len], out, self.mix);
    }
}

impl Modulatable for DistortionNode {
    type Param = DistortionParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            DistortionParam::Drive => self.drive,
            DistortionParam::Mix => self.mix,
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        match param {
            DistortionParam::Drive => {
                self.drive = base;
                self.saturator.set_drive(base + modulation);
            }
            DistortionParam::Mix => {
                self.mix = (base + modulation).clamp(0.0, 1.0);
            }
        }
    }
}
