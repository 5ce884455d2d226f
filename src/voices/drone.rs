//! Drone voice.
//!
//! A single wide super saw with no envelope: it sounds for exactly as long
//! as it is connected, which makes it the natural instrument for hold-mode
//! keys.

use crate::{
    graph::{extensions::NodeExt, supersaw::SuperSaw, GraphNode},
    voices::VoiceContext,
};

const LEVEL: f32 = 0.3;

pub fn drone(ctx: &VoiceContext, frequency: f32) -> impl GraphNode {
    SuperSaw::new(&[frequency], 0.8, 0.7, ctx.seed).gain(LEVEL)
}
