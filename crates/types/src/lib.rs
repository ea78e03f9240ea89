//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so the same values
//! flow between the engine, the scheduler and any render sink.
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: (`width / 2 - 1`, 0), i.e. (4, 0) on the standard board
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host frame period (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_STEP_MS` | 100 | Interval reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Gravity interval floor |
//!
//! # Examples
//!
//! ```
//! use classic_tetris_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(piece.cell_value(), 6);
//! assert_eq!(PieceKind::from_cell_value(6), Some(PieceKind::T));
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u16 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u16 = 20;

/// Host frame period in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity interval reduction per level above 1
pub const DROP_STEP_MS: u32 = 100;

/// Gravity interval floor
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Level a fresh game starts at
pub const START_LEVEL: u32 = 1;

/// Line clear scoring table (classic scoring)
///
/// Base points for clearing N lines with one lock-in:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by the current level.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// The seven tetromino piece kinds, in catalog order
///
/// The discriminant order is significant: catalog index `i` is the piece whose
/// cell value is `i + 1`.
/// - **I**: horizontal bar (1)
/// - **J**: (2)
/// - **L**: mirror of J (3)
/// - **O**: 2x2 square (4)
/// - **S**: (5)
/// - **T**: (6)
/// - **Z**: mirror of S (7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Catalog index (0-6)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Kind at a catalog index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Integer cell value stored on the board (1-7)
    pub fn cell_value(self) -> u8 {
        self as u8 + 1
    }

    /// Inverse of [`PieceKind::cell_value`]; 0 and values above 7 map to `None`
    pub fn from_cell_value(value: u8) -> Option<Self> {
        match value {
            0 => None,
            v => Self::from_index((v - 1) as usize),
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Single uppercase letter
    pub fn letter(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }
}

/// A cell on the game board or in a piece shape
///
/// - `None`: empty (cell value 0)
/// - `Some(PieceKind)`: filled by that piece kind (cell value 1-7)
///
/// Only catalog kinds can be represented, so the board can never hold an
/// out-of-range value.
pub type Cell = Option<PieceKind>;

/// Integer form of a cell (0 = empty)
#[inline]
pub fn cell_value(cell: Cell) -> u8 {
    cell.map_or(0, PieceKind::cell_value)
}

/// Logical input signals accepted by the game loop
///
/// Input sources translate raw device events into these; the engine never sees
/// device events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one row, locking it when it cannot move
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Drop piece until it locks
    HardDrop,
    /// Toggle pause/resume
    Pause,
    /// Start a fresh game
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Running,
    Paused,
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Running => "running",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "gameOver",
        }
    }
}

/// Event recorded when a piece locks.
///
/// Observers (the scheduler, logging) consume it once per lock-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub score_delta: u32,
    pub level_up: bool,
    pub game_over: bool,
}
