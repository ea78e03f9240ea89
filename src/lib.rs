//! Classic Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `classic_tetris::{core,engine,input,term,types}`
//! and owns the host configuration used by the terminal binary.

pub mod config;

pub use classic_tetris_core as core;
pub use classic_tetris_engine as engine;
pub use classic_tetris_input as input;
pub use classic_tetris_term as term;
pub use classic_tetris_types as types;
