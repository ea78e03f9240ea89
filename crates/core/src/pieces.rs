//! Pieces module - Tetromino templates
//!
//! Each template is a square matrix of cells (2x2 for O, 4x4 for I, 3x3 for the
//! rest). Filled cells carry the piece kind, so a shape's cell values double as
//! its identity and color index.

use crate::rng::PieceRng;
use crate::types::{cell_value, Cell, PieceKind};

/// Number of templates in the catalog
pub const SHAPE_COUNT: usize = 7;

/// Largest template side length
pub const MAX_SHAPE_SIZE: usize = 4;

/// A piece shape: up to 4x4 cells, top-left anchored.
///
/// Shapes are `Copy`; the active piece owns its own working copy and rotating
/// it never touches the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// A 0x0 shape with no cells
    pub const EMPTY: Shape = Shape {
        rows: 0,
        cols: 0,
        cells: [[None; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
    };

    /// Build a square template from a `#`/`.` pattern.
    const fn template(kind: PieceKind, size: usize, pattern: [&[u8]; MAX_SHAPE_SIZE]) -> Self {
        let mut cells = [[None; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut row = 0;
        while row < size {
            let mut col = 0;
            while col < size {
                if pattern[row][col] == b'#' {
                    cells[row][col] = Some(kind);
                }
                col += 1;
            }
            row += 1;
        }
        Shape {
            rows: size as u8,
            cols: size as u8,
            cells,
        }
    }

    /// Number of matrix rows
    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    /// Number of matrix columns
    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Cell at (row, col); `None` outside the matrix
    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        self.cells[row][col]
    }

    /// Integer cell value at (row, col)
    pub fn value(&self, row: usize, col: usize) -> u8 {
        cell_value(self.get(row, col))
    }

    /// Piece kind of the first filled cell
    pub fn kind(&self) -> Option<PieceKind> {
        self.filled().next().map(|(_, _, kind)| kind)
    }

    /// Iterate filled cells as `(row, col, kind)`
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize, PieceKind)> + '_ {
        (0..self.rows()).flat_map(move |row| {
            (0..self.cols())
                .filter_map(move |col| self.cells[row][col].map(|kind| (row, col, kind)))
        })
    }

    /// 90° clockwise rotation: `new[col][rows - 1 - row] = old[row][col]`
    pub fn rotated_cw(&self) -> Shape {
        let rows = self.rows();
        let mut cells = [[None; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for row in 0..rows {
            for col in 0..self.cols() {
                cells[col][rows - 1 - row] = self.cells[row][col];
            }
        }
        Shape {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Immutable catalog, indexed by [`PieceKind::index`]
static TEMPLATES: [Shape; SHAPE_COUNT] = [
    Shape::template(PieceKind::I, 4, [b"....", b"####", b"....", b"...."]),
    Shape::template(PieceKind::J, 3, [b"#..", b"###", b"...", b""]),
    Shape::template(PieceKind::L, 3, [b"..#", b"###", b"...", b""]),
    Shape::template(PieceKind::O, 2, [b"##", b"##", b"", b""]),
    Shape::template(PieceKind::S, 3, [b".##", b"##.", b"...", b""]),
    Shape::template(PieceKind::T, 3, [b".#.", b"###", b"...", b""]),
    Shape::template(PieceKind::Z, 3, [b"##.", b".##", b"...", b""]),
];

/// Template for a piece kind
pub fn shape_template(kind: PieceKind) -> Shape {
    TEMPLATES[kind.index()]
}

/// Template at a catalog index, `None` past [`SHAPE_COUNT`]
pub fn shape_template_at(index: usize) -> Option<Shape> {
    TEMPLATES.get(index).copied()
}

/// Uniformly random template (no bag, every call independent)
pub fn pick_random<R: PieceRng + ?Sized>(rng: &mut R) -> Shape {
    TEMPLATES[rng.next_index(SHAPE_COUNT)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRng;

    #[test]
    fn test_templates_hold_index_plus_one() {
        for index in 0..SHAPE_COUNT {
            let shape = shape_template_at(index).unwrap();
            assert_eq!(shape.filled().count(), 4, "template {} has 4 cells", index);
            for (row, col, _) in shape.filled() {
                assert_eq!(shape.value(row, col) as usize, index + 1);
            }
        }
        assert!(shape_template_at(SHAPE_COUNT).is_none());
    }

    #[test]
    fn test_template_sizes() {
        assert_eq!(shape_template(PieceKind::I).rows(), 4);
        assert_eq!(shape_template(PieceKind::O).rows(), 2);
        for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
            let shape = shape_template(kind);
            assert_eq!((shape.rows(), shape.cols()), (3, 3));
        }
    }

    #[test]
    fn test_t_rotation_points_right() {
        let t = shape_template(PieceKind::T).rotated_cw();
        let filled: Vec<_> = t.filled().map(|(r, c, _)| (r, c)).collect();
        // .#.      .#.
        // ###  ->  .##
        // ...      .#.
        assert_eq!(filled, vec![(0, 1), (1, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_i_rotation_is_vertical() {
        let i = shape_template(PieceKind::I).rotated_cw();
        let filled: Vec<_> = i.filled().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(filled, vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_pick_random_follows_rng() {
        let mut rng = SequenceRng::new(vec![3, 0, 6]);
        assert_eq!(pick_random(&mut rng).kind(), Some(PieceKind::O));
        assert_eq!(pick_random(&mut rng).kind(), Some(PieceKind::I));
        assert_eq!(pick_random(&mut rng).kind(), Some(PieceKind::Z));
    }

    #[test]
    fn test_empty_shape() {
        assert_eq!(Shape::EMPTY.filled().count(), 0);
        assert_eq!(Shape::EMPTY.kind(), None);
        assert_eq!(Shape::EMPTY.get(0, 0), None);
    }
}
