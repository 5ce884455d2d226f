/// A key event from the keyboard collaborator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    Press(char),
    Release(char),
}

/// What a key event did to the voice registry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Connected,
    Disconnected,
    /// Unmapped key, release in toggle mode, or a repeat press in hold mode.
    Ignored,
}

impl KeyEvent {
    pub fn key(&self) -> char {
        match *self {
            KeyEvent::Press(key) | KeyEvent::Release(key) => key,
        }
    }
}
