use rtrb::{Consumer, Producer};
use tracing::warn;

use super::{Command, EngineStatus, VoiceId, VoiceSink};
use crate::{error::SinkError, graph::GraphNode, MAX_VOICES};

/// Control-thread side of a live `Engine`.
///
/// Sends connect/disconnect commands, drops graphs the engine hands back and
/// keeps the latest status it published. It also counts what it has
/// connected, so a full engine is reported here instead of silently
/// rejecting the graph on the audio thread.
pub struct EngineHandle {
    commands: Producer<Command>,
    retired: Consumer<Box<dyn GraphNode>>,
    status: Consumer<EngineStatus>,
    latest: EngineStatus,
    connected: usize,
}

impl EngineHandle {
    pub(super) fn new(
        commands: Producer<Command>,
        retired: Consumer<Box<dyn GraphNode>>,
        status: Consumer<EngineStatus>,
    ) -> Self {
        Self {
            commands,
            retired,
            status,
            latest: EngineStatus::default(),
            connected: 0,
        }
    }

    /// Drop every graph the engine has handed back. Returns how many.
    pub fn collect_retired(&mut self) -> usize {
        let mut count = 0;
        while let Ok(graph) = self.retired.pop() {
            drop(graph);
            count += 1;
        }
        count
    }

    /// Most recent status published by the engine.
    pub fn latest_status(&mut self) -> EngineStatus {
        while let Ok(status) = self.status.pop() {
            self.latest = status;
        }
        self.latest
    }

    pub fn connected(&self) -> usize {
        self.connected
    }
}

impl VoiceSink for EngineHandle {
    fn connect_voice(&mut self, id: VoiceId, graph: Box<dyn GraphNode>) -> Result<(), SinkError> {
        self.collect_retired();
        if self.connected >= MAX_VOICES {
            return Err(SinkError::NoFreeSlot);
        }
        self.commands
            .push(Command::Connect { id, graph })
            .map_err(|_| {
                warn!(id, "command queue full, voice not connected");
                SinkError::QueueFull
            })?;
        self.connected += 1;
        Ok(())
    }

    fn disconnect_voice(&mut self, id: VoiceId) -> Result<(), SinkError> {
        self.collect_retired();
        self.commands
            .push(Command::Disconnect { id })
            .map_err(|_| {
                warn!(id, "command queue full, voice not disconnected");
                SinkError::QueueFull
            })?;
        self.connected = self.connected.saturating_sub(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RenderCtx;
    use rtrb::RingBuffer;

    struct Silence;

    impl GraphNode for Silence {
        fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
            out.fill(0.0);
        }
    }

    #[test]
    fn full_queue_is_reported() {
        let (tx, _rx) = RingBuffer::new(1);
        let (_retired_tx, retired_rx) = RingBuffer::new(1);
        let (_status_tx, status_rx) = RingBuffer::new(1);
        let mut handle = EngineHandle::new(tx, retired_rx, status_rx);

        handle.connect_voice(1, Box::new(Silence)).unwrap();
        assert_eq!(
            handle.connect_voice(2, Box::new(Silence)),
            Err(SinkError::QueueFull)
        );
        assert_eq!(handle.connected(), 1);
    }
}
