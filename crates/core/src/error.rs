//! Construction errors.
//!
//! Gameplay never fails: illegal moves are no-ops and game over is a state.
//! Only host misconfiguration reaches this type.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u16, height: u16 },
}
