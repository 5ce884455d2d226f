use std::collections::BTreeMap;

use crate::{config::KeyMode, voices::Instrument};

/// Key → instrument assignments plus the mode they are played in.
#[derive(Debug, Clone, PartialEq)]
pub struct Keymap {
    mode: KeyMode,
    keys: BTreeMap<char, Instrument>,
}

/// One octave of naturals from A2, with sharps on the shifted key.
const DRONE_OCTAVE: [(char, f32); 12] = [
    ('a', 110.0),
    ('A', 116.54),
    ('b', 123.47),
    ('c', 130.81),
    ('C', 138.59),
    ('d', 146.83),
    ('D', 155.56),
    ('e', 164.81),
    ('f', 174.61),
    ('F', 185.00),
    ('g', 196.00),
    ('G', 207.65),
];

impl Keymap {
    pub fn new(mode: KeyMode) -> Self {
        Self {
            mode,
            keys: BTreeMap::new(),
        }
    }

    pub fn bind(mut self, key: char, instrument: Instrument) -> Self {
        self.keys.insert(key, instrument);
        self
    }

    pub fn with_mode(mut self, mode: KeyMode) -> Self {
        self.mode = mode;
        self
    }

    /// The loop's eight voices on a-h, toggled.
    pub fn techno_loop() -> Self {
        Self::new(KeyMode::Toggle)
            .bind('a', Instrument::Kick)
            .bind('b', Instrument::Bass)
            .bind('c', Instrument::ClosedHat)
            .bind('d', Instrument::Chord)
            .bind('e', Instrument::LowChord)
            .bind('f', Instrument::Melody)
            .bind('g', Instrument::OpenHat)
            .bind('h', Instrument::Sparkle)
    }

    /// A playable drone octave, held.
    pub fn drone_keys() -> Self {
        DRONE_OCTAVE
            .iter()
            .fold(Self::new(KeyMode::Hold), |map, &(key, hz)| {
                map.bind(key, Instrument::Drone(hz))
            })
    }

    pub fn mode(&self) -> KeyMode {
        self.mode
    }

    pub fn instrument(&self, key: char) -> Option<Instrument> {
        self.keys.get(&key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, Instrument)> + '_ {
        self.keys.iter().map(|(&key, &instrument)| (key, instrument))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn techno_loop_layout() {
        let map = Keymap::techno_loop();
        assert_eq!(map.mode(), KeyMode::Toggle);
        assert_eq!(map.len(), 8);
        assert_eq!(map.instrument('a'), Some(Instrument::Kick));
        assert_eq!(map.instrument('h'), Some(Instrument::Sparkle));
        assert_eq!(map.instrument('z'), None);
    }

    #[test]
    fn drone_keys_hold_sharps_on_shift() {
        let map = Keymap::drone_keys();
        assert_eq!(map.mode(), KeyMode::Hold);
        assert_eq!(map.instrument('a'), Some(Instrument::Drone(110.0)));
        assert_eq!(map.instrument('F'), Some(Instrument::Drone(185.0)));
        assert_eq!(map.instrument('B'), None);
    }
}
