//! Scoring module - classic line-clear scoring and level progression
//!
//! Pure functions: the game loop feeds in what one lock-in did and applies
//! the result.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
};

/// Outcome of scoring one lock-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub score_delta: u32,
    /// Line total after this lock-in
    pub total_lines: u32,
    /// Whether the line total crossed a multiple of [`LINES_PER_LEVEL`]
    pub level_up: bool,
}

/// Points for clearing `lines` rows at `level`.
/// Counts outside the table (more than 4) score nothing.
pub fn line_clear_score(lines: u32, level: u32) -> u32 {
    LINE_SCORES
        .get(lines as usize)
        .map_or(0, |&base| base.saturating_mul(level))
}

/// Whether going from `total_lines` to `total_lines + cleared` enters a new
/// ten-line bucket. At most one level per lock-in, however many lines.
pub fn crosses_level_boundary(total_lines: u32, cleared: u32) -> bool {
    let after = total_lines.saturating_add(cleared);
    after / LINES_PER_LEVEL > total_lines / LINES_PER_LEVEL
}

/// Score one lock-in. `level` is the level in effect when the piece locked.
pub fn score_lock(lines_cleared: u32, level: u32, total_lines: u32) -> ScoreResult {
    ScoreResult {
        score_delta: line_clear_score(lines_cleared, level),
        total_lines: total_lines.saturating_add(lines_cleared),
        level_up: crosses_level_boundary(total_lines, lines_cleared),
    }
}

/// Gravity interval for a level (in milliseconds)
/// 1000ms at level 1, 100ms faster per level, never below 100ms
pub fn gravity_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_MIN_MS)
}
