//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`tui_2048_types::GameAction`] and
//! provides a move gate that serializes direction commands: the engine
//! expects at most one in-flight move, so a second command is held back until
//! the previous snapshot has settled on screen.

pub mod gate;
pub mod map;

pub use tui_2048_types as types;

pub use gate::MoveGate;
pub use map::{handle_key_event, should_quit};
