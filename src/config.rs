//! Host configuration from `TETRIS_*` environment variables.
//!
//! Every variable is optional. Unset, empty or unparsable values fall back to
//! the defaults below; nothing here fails.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::term::Theme;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, TICK_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// RNG seed; `None` derives one from the system time
    pub seed: Option<u32>,
    pub board_width: u16,
    pub board_height: u16,
    pub theme: Theme,
    /// Host frame period in milliseconds
    pub frame_ms: u32,
    /// Enables file logging when set
    pub log_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            theme: Theme::default(),
            frame_ms: TICK_MS,
            log_path: None,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment, or a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let defaults = Self::default();

        Self {
            seed: get("TETRIS_SEED").and_then(|s| s.parse().ok()),
            board_width: get("TETRIS_BOARD_WIDTH")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.board_width),
            board_height: get("TETRIS_BOARD_HEIGHT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.board_height),
            theme: get("TETRIS_THEME")
                .and_then(|s| Theme::from_str(&s))
                .unwrap_or(defaults.theme),
            frame_ms: get("TETRIS_FRAME_MS")
                .and_then(|s| s.parse().ok())
                .filter(|&ms| ms > 0)
                .unwrap_or(defaults.frame_ms),
            log_path: get("TETRIS_LOG_PATH").map(PathBuf::from),
        }
    }

    /// Configured seed, or one taken from the clock
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}
