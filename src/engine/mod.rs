//! Render-side mixing and the lock-free control handle.
//!
//! The `Engine` lives on the audio thread. It owns the `Conductor`, the list
//! of connected voice graphs and every scratch buffer it renders with, all
//! allocated up front. Per block it advances the conductor one frame per
//! sample, renders each connected voice against those frames and sums them.
//!
//! The control thread talks to it through an `EngineHandle`:
//!
//!   control ──Command──→ [rtrb] ──→ Engine (applied at the next block)
//!   control ←──graph──── [rtrb] ←── Engine (disconnected voices come back)
//!   control ←─status──── [rtrb] ←── Engine (once per block)
//!
//! Graphs are built on the control thread and dropped there too, so the
//! render path never allocates or frees. For offline use the `Engine` itself
//! is a `VoiceSink` and can be driven without any rings.

mod handle;

pub use handle::EngineHandle;

use std::sync::Arc;

use rtrb::{Consumer, Producer, RingBuffer};

use crate::{
    dsp::mix::sum_in_place,
    error::{ConfigError, SinkError},
    graph::{GraphNode, RenderCtx},
    sequencing::{ClockNetwork, Conductor, ConductorState, RhythmSpec, Tick},
    MAX_BLOCK_SIZE, MAX_VOICES,
};

/// Identifies one connected voice graph.
pub type VoiceId = u64;

/// Connection commands sent to the render side.
pub enum Command {
    Connect { id: VoiceId, graph: Box<dyn GraphNode> },
    Disconnect { id: VoiceId },
}

/// Anything voices can be connected to and disconnected from.
pub trait VoiceSink {
    fn connect_voice(&mut self, id: VoiceId, graph: Box<dyn GraphNode>) -> Result<(), SinkError>;
    fn disconnect_voice(&mut self, id: VoiceId) -> Result<(), SinkError>;
}

/// Small snapshot of the render side for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineStatus {
    pub position: u64,
    pub bar: u64,
    pub beat: u64,
    pub voices: usize,
}

const COMMAND_CAPACITY: usize = 64;
const STATUS_CAPACITY: usize = 16;

struct LiveVoice {
    id: VoiceId,
    graph: Box<dyn GraphNode>,
}

/// Rings connecting the engine to its handle.
struct Link {
    commands: Consumer<Command>,
    retired: Producer<Box<dyn GraphNode>>,
    status: Producer<EngineStatus>,
}

pub struct Engine {
    conductor: Conductor,
    sample_rate: f32,
    voices: Vec<LiveVoice>,
    ticks: Vec<Tick>,
    voice_buffer: Vec<f32>,
    link: Option<Link>,
}

impl Engine {
    /// A standalone engine, driven directly through `VoiceSink`.
    pub fn new(clocks: Arc<ClockNetwork>, rhythm: RhythmSpec, seed: u64) -> Result<Self, ConfigError> {
        let sample_rate = clocks.sample_rate() as f32;
        Ok(Self {
            conductor: Conductor::new(clocks, rhythm, seed)?,
            sample_rate,
            voices: Vec::with_capacity(MAX_VOICES),
            ticks: vec![Tick::default(); MAX_BLOCK_SIZE],
            voice_buffer: vec![0.0; MAX_BLOCK_SIZE],
            link: None,
        })
    }

    /// An engine for the audio thread plus the handle that controls it.
    pub fn with_handle(
        clocks: Arc<ClockNetwork>,
        rhythm: RhythmSpec,
        seed: u64,
    ) -> Result<(Self, EngineHandle), ConfigError> {
        let mut engine = Self::new(clocks, rhythm, seed)?;

        let (command_tx, command_rx) = RingBuffer::new(COMMAND_CAPACITY);
        // Room for every voice to come back even if the control side is slow.
        let (retired_tx, retired_rx) = RingBuffer::new(MAX_VOICES + COMMAND_CAPACITY);
        let (status_tx, status_rx) = RingBuffer::new(STATUS_CAPACITY);

        engine.link = Some(Link {
            commands: command_rx,
            retired: retired_tx,
            status: status_tx,
        });
        Ok((engine, EngineHandle::new(command_tx, retired_rx, status_rx)))
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn conductor(&self) -> &Conductor {
        &self.conductor
    }

    pub fn position(&self) -> u64 {
        self.conductor.position()
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    pub fn is_connected(&self, id: VoiceId) -> bool {
        self.voices.iter().any(|v| v.id == id)
    }

    pub fn status(&self) -> EngineStatus {
        let (bar, beat) = self.conductor.bar_and_beat();
        EngineStatus {
            position: self.conductor.position(),
            bar,
            beat,
            voices: self.voices.len(),
        }
    }

    pub fn snapshot(&self) -> ConductorState {
        self.conductor.state()
    }

    pub fn restore(&mut self, state: &ConductorState) {
        self.conductor.restore(state);
    }

    /// Render `out.len()` samples of the mix. Any length is accepted; it is
    /// processed in chunks of at most `MAX_BLOCK_SIZE`.
    pub fn render(&mut self, out: &mut [f32]) {
        self.apply_commands();

        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            let frames = chunk.len();
            let ticks = &mut self.ticks[..frames];
            self.conductor.advance(ticks);

            chunk.fill(0.0);
            let ctx = RenderCtx::with_ticks(self.sample_rate, ticks);
            for voice in self.voices.iter_mut() {
                let buffer = &mut self.voice_buffer[..frames];
                buffer.fill(0.0);
                voice.graph.render_block(buffer, &ctx);
                sum_in_place(chunk, buffer);
            }
        }

        self.publish_status();
    }

    /// Advance the trigger network by `frames` samples without mixing.
    pub fn tick(&mut self, frames: usize) {
        self.apply_commands();
        self.conductor.skip(frames);
        self.publish_status();
    }

    fn apply_commands(&mut self) {
        let Some(link) = self.link.as_mut() else {
            return;
        };
        while let Ok(command) = link.commands.pop() {
            let rejected = match command {
                Command::Connect { id, graph } => {
                    if self.voices.len() < MAX_VOICES && !self.voices.iter().any(|v| v.id == id) {
                        self.voices.push(LiveVoice { id, graph });
                        None
                    } else {
                        Some(graph)
                    }
                }
                Command::Disconnect { id } => self
                    .voices
                    .iter()
                    .position(|v| v.id == id)
                    .map(|index| self.voices.swap_remove(index).graph),
            };
            if let Some(graph) = rejected {
                // Only fails if the control side stopped collecting; the
                // graph is then dropped here.
                let _ = link.retired.push(graph);
            }
        }
    }

    fn publish_status(&mut self) {
        let status = self.status();
        if let Some(link) = self.link.as_mut() {
            let _ = link.status.push(status);
        }
    }
}

impl VoiceSink for Engine {
    fn connect_voice(&mut self, id: VoiceId, graph: Box<dyn GraphNode>) -> Result<(), SinkError> {
        if self.voices.len() >= MAX_VOICES {
            return Err(SinkError::NoFreeSlot);
        }
        self.voices.retain(|v| v.id != id);
        self.voices.push(LiveVoice { id, graph });
        Ok(())
    }

    fn disconnect_voice(&mut self, id: VoiceId) -> Result<(), SinkError> {
        self.voices.retain(|v| v.id != id);
        Ok(())
    }
}
