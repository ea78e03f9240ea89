//! Active piece controller
//!
//! Holds the falling piece's working shape and position and validates every
//! move against the board. The controller never writes to the board: when a
//! drop is impossible it reports [`DropOutcome::LockRequired`] and the game
//! loop performs the lock-in.

use crate::board::Board;
use crate::pieces::Shape;
use crate::types::PieceKind;

/// Result of a one-row drop attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Moved,
    LockRequired,
}

/// Whether `shape` fits with its top-left corner at (x, y).
///
/// Filled cells must stay between the side walls, above the floor and off
/// settled cells. Cells above row 0 always fit.
pub fn is_valid_move(shape: &Shape, x: i32, y: i32, board: &Board) -> bool {
    shape
        .filled()
        .all(|(row, col, _)| !board.is_occupied(x + col as i32, y + row as i32))
}

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    shape: Shape,
    x: i32,
    y: i32,
}

impl ActivePiece {
    pub fn new(shape: Shape, x: i32, y: i32) -> Self {
        Self { shape, x, y }
    }

    /// Place `shape` at the spawn point: column `width / 2 - 1`, row 0
    pub fn spawn(shape: Shape, board: &Board) -> Self {
        Self::new(shape, Self::spawn_x(board), 0)
    }

    pub fn spawn_x(board: &Board) -> i32 {
        board.width() as i32 / 2 - 1
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn kind(&self) -> Option<PieceKind> {
        self.shape.kind()
    }

    /// Whether the piece fits where it stands
    pub fn fits(&self, board: &Board) -> bool {
        is_valid_move(&self.shape, self.x, self.y, board)
    }

    /// Board coordinates of filled cells as `(x, y, kind)`
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, PieceKind)> + '_ {
        self.shape
            .filled()
            .map(move |(row, col, kind)| (self.x + col as i32, self.y + row as i32, kind))
    }

    /// Shift horizontally by `dx`; invalid shifts are ignored
    pub fn try_move(&mut self, dx: i32, board: &Board) -> bool {
        let x = self.x + dx;
        if !is_valid_move(&self.shape, x, self.y, board) {
            return false;
        }
        self.x = x;
        true
    }

    /// Rotate clockwise in place; a blocked rotation is discarded (no kicks)
    pub fn try_rotate(&mut self, board: &Board) -> bool {
        let rotated = self.shape.rotated_cw();
        if !is_valid_move(&rotated, self.x, self.y, board) {
            return false;
        }
        self.shape = rotated;
        true
    }

    /// Move down one row, or report that the piece must lock
    pub fn soft_drop(&mut self, board: &Board) -> DropOutcome {
        if !is_valid_move(&self.shape, self.x, self.y + 1, board) {
            return DropOutcome::LockRequired;
        }
        self.y += 1;
        DropOutcome::Moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::shape_template;

    #[test]
    fn test_spawn_position() {
        let board = Board::new();
        let piece = ActivePiece::spawn(shape_template(PieceKind::T), &board);
        assert_eq!((piece.x(), piece.y()), (4, 0));
        assert!(piece.fits(&board));
    }

    #[test]
    fn test_try_move_stops_at_walls() {
        let board = Board::new();
        let mut piece = ActivePiece::spawn(shape_template(PieceKind::O), &board);

        let mut moved = 0;
        while piece.try_move(-1, &board) {
            moved += 1;
        }
        assert_eq!(moved, 4);
        assert_eq!(piece.x(), 0);

        while piece.try_move(1, &board) {}
        assert_eq!(piece.x(), 8);
    }

    #[test]
    fn test_rotation_blocked_by_settled_cell() {
        let mut board = Board::new();
        let mut piece = ActivePiece::new(shape_template(PieceKind::T), 3, 5);
        // Rotated T fills row 2, col 1 of its matrix, i.e. board (4, 7).
        board.set(4, 7, Some(PieceKind::O));

        let before = *piece.shape();
        assert!(!piece.try_rotate(&board));
        assert_eq!(*piece.shape(), before);
    }

    #[test]
    fn test_rotation_allowed_above_board() {
        let board = Board::new();
        // Horizontal I at row -1 of its matrix; vertical I reaches above row 0.
        let mut piece = ActivePiece::new(shape_template(PieceKind::I), 3, -1);
        assert!(piece.fits(&board));
        assert!(piece.try_rotate(&board));
    }

    #[test]
    fn test_soft_drop_reports_lock_on_floor() {
        let board = Board::new();
        let mut piece = ActivePiece::spawn(shape_template(PieceKind::O), &board);

        let mut drops = 0;
        while piece.soft_drop(&board) == DropOutcome::Moved {
            drops += 1;
        }
        assert_eq!(drops, 18);
        assert_eq!(piece.y(), 18);
        assert!(board.cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_cells_map_to_board_coordinates() {
        let piece = ActivePiece::new(shape_template(PieceKind::O), 2, 3);
        let cells: Vec<_> = piece.cells().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(cells, vec![(2, 3), (3, 3), (2, 4), (3, 4)]);
    }
}
