//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. Snapshots
//! are drawn into a plain framebuffer by [`GameView`], and
//! [`TerminalRenderer`] flushes only the glyphs that changed since the last
//! frame. [`TerminalSink`] bundles both behind the engine's render sink
//! trait.
//!
//! Board cells are drawn 2 columns wide to offset the tall aspect ratio of
//! terminal glyphs.

pub mod fb;
pub mod game_view;
pub mod palette;
pub mod renderer;
pub mod sink;

pub use classic_tetris_core as core;
pub use classic_tetris_engine as engine;
pub use classic_tetris_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use palette::Theme;
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, Run, TerminalRenderer};
pub use sink::TerminalSink;
