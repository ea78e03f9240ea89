//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into logical [`GameAction`]s. The game never
//! sees raw key events, and nothing here keeps state: repeat handling is left
//! to the terminal's own key repeat.
//!
//! [`GameAction`]: crate::types::GameAction

pub mod map;

pub use classic_tetris_types as types;

pub use map::{handle_key_event, should_quit};
