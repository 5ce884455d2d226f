use std::{collections::BTreeMap, sync::Arc};

use tracing::{debug, trace};

use crate::{
    config::KeyMode,
    engine::{VoiceId, VoiceSink},
    error::VoiceError,
    sequencing::ClockNetwork,
    synth::{
        keymap::Keymap,
        message::{KeyEvent, KeyOutcome},
    },
    voices::VoiceContext,
};

/// Turns key events into voice connections.
///
/// Holds the registry of live voices (at most one per key) and decides,
/// according to the keymap's mode, whether a press or release connects or
/// disconnects. Graphs are built here on the control side and handed to the
/// sink; a failed hand-off leaves the registry as it was.
pub struct VoiceManager<S: VoiceSink> {
    keymap: Keymap,
    clocks: Arc<ClockNetwork>,
    sink: S,
    seed: u64,
    next_id: VoiceId,
    live: BTreeMap<char, VoiceId>,
}

impl<S: VoiceSink> VoiceManager<S> {
    pub fn new(keymap: Keymap, clocks: Arc<ClockNetwork>, sink: S, seed: u64) -> Self {
        Self {
            keymap,
            clocks,
            sink,
            seed,
            next_id: 0,
            live: BTreeMap::new(),
        }
    }

    pub fn handle(&mut self, event: KeyEvent) -> Result<KeyOutcome, VoiceError> {
        match event {
            KeyEvent::Press(key) => self.on_key_press(key),
            KeyEvent::Release(key) => self.on_key_release(key),
        }
    }

    pub fn on_key_press(&mut self, key: char) -> Result<KeyOutcome, VoiceError> {
        if self.keymap.instrument(key).is_none() {
            trace!(%key, "unmapped key");
            return Ok(KeyOutcome::Ignored);
        }

        match (self.keymap.mode(), self.live.contains_key(&key)) {
            (KeyMode::Toggle, true) => self.disconnect(key),
            (KeyMode::Hold, true) => Ok(KeyOutcome::Ignored),
            (_, false) => self.connect(key),
        }
    }

    pub fn on_key_release(&mut self, key: char) -> Result<KeyOutcome, VoiceError> {
        match self.keymap.mode() {
            KeyMode::Hold if self.live.contains_key(&key) => self.disconnect(key),
            _ => Ok(KeyOutcome::Ignored),
        }
    }

    /// Disconnect every live voice. Keys whose disconnect fails stay live;
    /// the first failure is returned after trying them all.
    pub fn all_off(&mut self) -> Result<usize, VoiceError> {
        let keys: Vec<char> = self.live.keys().copied().collect();
        let mut first_error = None;
        let mut count = 0;

        for key in keys {
            match self.disconnect(key) {
                Ok(_) => count += 1,
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(count),
        }
    }

    pub fn is_active(&self, key: char) -> bool {
        self.live.contains_key(&key)
    }

    pub fn active_keys(&self) -> impl Iterator<Item = char> + '_ {
        self.live.keys().copied()
    }

    pub fn active_count(&self) -> usize {
        self.live.len()
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn connect(&mut self, key: char) -> Result<KeyOutcome, VoiceError> {
        let Some(instrument) = self.keymap.instrument(key) else {
            return Ok(KeyOutcome::Ignored);
        };

        let id = self.next_id;
        self.next_id += 1;

        let ctx = VoiceContext::new(self.clocks.clone(), self.seed.wrapping_add(id));
        let graph = instrument.build(&ctx)?;
        self.sink.connect_voice(id, graph)?;
        self.live.insert(key, id);

        debug!(%key, %instrument, id, "voice connected");
        Ok(KeyOutcome::Connected)
    }

    fn disconnect(&mut self, key: char) -> Result<KeyOutcome, VoiceError> {
        let Some(&id) = self.live.get(&key) else {
            return Ok(KeyOutcome::Ignored);
        };

        self.sink.disconnect_voice(id)?;
        self.live.remove(&key);

        debug!(%key, id, "voice disconnected");
        Ok(KeyOutcome::Disconnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        engine::Engine,
        error::SinkError,
        graph::GraphNode,
        sequencing::RhythmSpec,
    };

    fn clocks() -> Arc<ClockNetwork> {
        Arc::new(ClockNetwork::new(125.0, 48_000.0).unwrap())
    }

    fn manager(keymap: Keymap) -> VoiceManager<Engine> {
        let clocks = clocks();
        let engine = Engine::new(clocks.clone(), RhythmSpec::default(), 0).unwrap();
        VoiceManager::new(keymap, clocks, engine, 0)
    }

    /// Sink whose queue is always full.
    struct Jammed;

    impl VoiceSink for Jammed {
        fn connect_voice(&mut self, _: VoiceId, _: Box<dyn GraphNode>) -> Result<(), SinkError> {
            Err(SinkError::QueueFull)
        }

        fn disconnect_voice(&mut self, _: VoiceId) -> Result<(), SinkError> {
            Err(SinkError::QueueFull)
        }
    }

    #[test]
    fn toggle_flips_on_press_and_ignores_release() {
        let mut voices = manager(Keymap::techno_loop());

        assert_eq!(voices.on_key_press('a'), Ok(KeyOutcome::Connected));
        assert_eq!(voices.on_key_release('a'), Ok(KeyOutcome::Ignored));
        assert!(voices.is_active('a'));
        assert_eq!(voices.sink().active_voices(), 1);

        assert_eq!(voices.on_key_press('a'), Ok(KeyOutcome::Disconnected));
        assert!(!voices.is_active('a'));
        assert_eq!(voices.sink().active_voices(), 0);
    }

    #[test]
    fn hold_connects_once_and_releases() {
        let mut voices = manager(Keymap::drone_keys());

        assert_eq!(voices.on_key_press('c'), Ok(KeyOutcome::Connected));
        assert_eq!(voices.on_key_press('c'), Ok(KeyOutcome::Ignored));
        assert_eq!(voices.sink().active_voices(), 1);

        assert_eq!(voices.on_key_release('c'), Ok(KeyOutcome::Disconnected));
        assert_eq!(voices.on_key_release('c'), Ok(KeyOutcome::Ignored));
        assert_eq!(voices.active_count(), 0);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut voices = manager(Keymap::techno_loop());
        assert_eq!(voices.handle(KeyEvent::Press('z')), Ok(KeyOutcome::Ignored));
        assert_eq!(voices.active_count(), 0);
    }

    #[test]
    fn failed_hand_off_leaves_registry_untouched() {
        let mut voices = VoiceManager::new(Keymap::techno_loop(), clocks(), Jammed, 0);
        assert_eq!(
            voices.on_key_press('a'),
            Err(VoiceError::Sink(SinkError::QueueFull))
        );
        assert!(!voices.is_active('a'));
    }

    #[test]
    fn all_off_clears_every_key() {
        let mut voices = manager(Keymap::techno_loop());
        for key in ['a', 'b', 'c', 'g'] {
            voices.on_key_press(key).unwrap();
        }
        assert_eq!(voices.active_keys().collect::<Vec<_>>(), ['a', 'b', 'c', 'g']);

        assert_eq!(voices.all_off(), Ok(4));
        assert_eq!(voices.active_count(), 0);
        assert_eq!(voices.sink().active_voices(), 0);
    }
}
