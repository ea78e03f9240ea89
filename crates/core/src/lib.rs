//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has **no dependencies** on rendering, input devices or clocks:
//!
//! - **Deterministic**: an injectable [`PieceRng`] makes piece order reproducible
//! - **Testable**: every rule is reachable through plain method calls
//! - **Portable**: the same state drives a terminal, a GUI or a headless test
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven tetromino templates and uniform random selection
//! - [`board`]: fixed-size grid with collision queries and line clearing
//! - [`piece`]: the falling piece and its move/rotate/drop validation
//! - [`scoring`]: line-clear score table, level-up rule and gravity interval
//! - [`rng`]: seeded LCG and fixed-sequence random sources
//! - [`game_state`]: the authoritative session state machine
//! - [`snapshot`]: read-only copies handed to render sinks
//!
//! # Game Rules
//!
//! Classic rules, deliberately simple:
//!
//! - **Uniform randomizer**: each spawn picks one of seven pieces uniformly (no bag)
//! - **Simple rotation**: clockwise matrix rotation, discarded when blocked (no wall kicks)
//! - **Immediate lock**: a piece locks on the first gravity step it cannot take
//! - **Scoring**: 40/100/300/1200 times the current level
//! - **Levels**: one level per 10 lines, gravity 1000ms at level 1 minus
//!   100ms per level (floor 100ms)
//!
//! # Example
//!
//! ```
//! use classic_tetris_core::GameState;
//! use classic_tetris_types::{GameAction, GameStatus};
//!
//! let mut game = GameState::new(12345);
//! assert_eq!(game.status(), GameStatus::Running);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Gravity is driven by elapsed milliseconds.
//! game.tick(1000);
//! assert_eq!(game.level(), 1);
//! ```

pub mod board;
pub mod error;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use classic_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use error::CoreError;
pub use game_state::GameState;
pub use piece::{is_valid_move, ActivePiece, DropOutcome};
pub use pieces::{pick_random, shape_template, shape_template_at, Shape, SHAPE_COUNT};
pub use rng::{PieceRng, SequenceRng, SimpleRng};
pub use scoring::{gravity_interval_ms, line_clear_score, score_lock, ScoreResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
