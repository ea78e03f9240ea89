//! Engine crate - fixed-timestep scheduling around the game state
//!
//! The [`Scheduler`] owns the authoritative [`GameState`] and is the only
//! thing that advances it. Hosts feed it three things from the outside:
//!
//! - input signals via [`Scheduler::submit`]
//! - timestamps from a [`Clock`] via [`Scheduler::frame`]
//! - a [`RenderSink`] that receives a read-only snapshot after every tick
//!
//! Nothing here sleeps or spawns threads. The host decides when frames run.
//!
//! [`GameState`]: classic_tetris_core::GameState

pub mod clock;
pub mod scheduler;

pub use clock::{Clock, ManualClock, SystemClock};
pub use scheduler::{FrameOutcome, RenderSink, Scheduler, TickHandle, INBOX_CAPACITY};
