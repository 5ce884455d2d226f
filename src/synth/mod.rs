// Key-driven voice lifecycle: which keys map to which instruments, and
// the manager that connects and disconnects their graphs.

pub mod keymap;
pub mod manager;
pub mod message;

pub use keymap::Keymap;
pub use manager::VoiceManager;
pub use message::{KeyEvent, KeyOutcome};
