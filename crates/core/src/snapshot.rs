//! Read-only copies of the game state for renderers and observers.

use crate::piece::ActivePiece;
use crate::pieces::Shape;
use crate::types::{GameStatus, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            shape: *value.shape(),
            x: value.x(),
            y: value.y(),
        }
    }
}

/// Read-only copy of everything a render sink may draw.
///
/// The game state stays authoritative; sinks only ever see these copies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    /// Cell values 0-7, row-major (`y * width + x`)
    pub board: Vec<u8>,
    pub active: Option<ActiveSnapshot>,
    pub next: Shape,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub status: GameStatus,
    pub episode_id: u32,
    pub piece_id: u32,
}

impl GameSnapshot {
    /// Settled cell value at (x, y); 0 outside the board
    pub fn cell(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return 0;
        }
        self.board[y as usize * self.width as usize + x as usize]
    }

    /// Cell value at (x, y) with the active piece drawn over the board
    pub fn composed_cell(&self, x: i32, y: i32) -> u8 {
        if let Some(active) = &self.active {
            let (row, col) = (y - active.y, x - active.x);
            if row >= 0 && col >= 0 {
                let value = active.shape.value(row as usize, col as usize);
                if value != 0 {
                    return value;
                }
            }
        }
        self.cell(x, y)
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Running
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            board: vec![0; BOARD_WIDTH as usize * BOARD_HEIGHT as usize],
            active: None,
            next: Shape::EMPTY,
            score: 0,
            level: 1,
            lines: 0,
            status: GameStatus::Running,
            episode_id: 0,
            piece_id: 0,
        }
    }
}
