//! Board module - manages the game grid
//!
//! The board is a `width x height` grid (10x20 by default) where each cell is
//! empty or holds a piece kind. Cells live in one flat row-major vector.
//! Coordinates: (x, y) with x growing left to right and y growing top to bottom.
//! Rows above the board (y < 0) do not exist but count as free space, so a
//! piece may spawn or rotate with part of its matrix above row 0.

use crate::error::CoreError;
use crate::pieces::Shape;
use crate::types::{cell_value, Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty 10x20 board
    pub fn new() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            cells: vec![None; BOARD_WIDTH as usize * BOARD_HEIGHT as usize],
        }
    }

    /// Create an empty board of the given size.
    ///
    /// Zero in either dimension is a host programming error.
    pub fn with_dimensions(width: u16, height: u16) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a piece cell may not occupy (x, y).
    ///
    /// True outside the side walls, at or below the floor, or on a settled
    /// cell. Positions above the board (y < 0) between the walls are free.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return true;
        }
        if y < 0 {
            return false;
        }
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map_or(false, |row| row.iter().all(|cell| cell.is_some()))
    }

    /// Cells of row `y`
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let width = self.width as usize;
        let start = y * width;
        Some(&self.cells[start..start + width])
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width as usize)
    }

    /// Merge a shape into the board with its top-left corner at (x, y).
    ///
    /// Cells that land above row 0 are dropped. Callers validate the position
    /// first; cells outside the side walls or floor are skipped as well.
    pub fn lock(&mut self, shape: &Shape, x: i32, y: i32) {
        for (row, col, kind) in shape.filled() {
            let board_y = y + row as i32;
            if board_y < 0 {
                continue;
            }
            self.set(x + col as i32, board_y, Some(kind));
        }
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Rows above each removed row move down, keeping their order, and empty
    /// rows fill in at the top. Dimensions never change.
    pub fn clear_full_lines(&mut self) -> usize {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut cleared = 0;
        let mut write_y = height;

        // Scan from bottom to top, compacting surviving rows downward.
        for read_y in (0..height).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        // Whatever is left above the compacted stack becomes empty rows.
        self.cells[..write_y * width].fill(None);

        cleared
    }

    /// Whether row 0 holds any settled cell (the game-over condition)
    pub fn top_row_occupied(&self) -> bool {
        self.row(0)
            .map_or(false, |row| row.iter().any(|cell| cell.is_some()))
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write integer cell values (0-7), row-major, reusing `out`'s allocation
    pub fn write_cell_values(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(self.cells.iter().map(|&cell| cell_value(cell)));
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
