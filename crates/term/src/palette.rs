//! Light and dark color themes.
//!
//! Piece colors are indexed by cell value, so a board value maps straight to
//! its color without going through the piece kind.

use crate::fb::{CellStyle, Rgb};
use crate::types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Light piece colors, I J L O S T Z
const LIGHT_PIECES: [Rgb; 7] = [
    Rgb::new(0x00, 0xFF, 0xFF),
    Rgb::new(0x00, 0x00, 0xFF),
    Rgb::new(0xFF, 0xA5, 0x00),
    Rgb::new(0xFF, 0xFF, 0x00),
    Rgb::new(0x00, 0xFF, 0x00),
    Rgb::new(0x80, 0x00, 0x80),
    Rgb::new(0xFF, 0x00, 0x00),
];

/// Dark piece colors, I J L O S T Z
const DARK_PIECES: [Rgb; 7] = [
    Rgb::new(0x00, 0xCC, 0xCC),
    Rgb::new(0x00, 0x00, 0xCC),
    Rgb::new(0xCC, 0x85, 0x00),
    Rgb::new(0xCC, 0xCC, 0x00),
    Rgb::new(0x00, 0xCC, 0x00),
    Rgb::new(0x66, 0x00, 0x66),
    Rgb::new(0xCC, 0x00, 0x00),
];

impl Theme {
    /// Parse a theme name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn piece_color(self, kind: PieceKind) -> Rgb {
        match self {
            Theme::Light => LIGHT_PIECES[kind.index()],
            Theme::Dark => DARK_PIECES[kind.index()],
        }
    }

    /// Color for a board cell value; `None` for empty or unknown values
    pub fn cell_color(self, value: u8) -> Option<Rgb> {
        PieceKind::from_cell_value(value).map(|kind| self.piece_color(kind))
    }

    /// Screen background outside the board
    pub fn background(self) -> Rgb {
        match self {
            Theme::Light => Rgb::new(250, 250, 250),
            Theme::Dark => Rgb::new(0, 0, 0),
        }
    }

    /// Empty board cells
    pub fn well(self) -> Rgb {
        match self {
            Theme::Light => Rgb::new(229, 231, 235),
            Theme::Dark => Rgb::new(31, 41, 55),
        }
    }

    pub fn text(self) -> CellStyle {
        match self {
            Theme::Light => CellStyle::new(Rgb::new(17, 24, 39), self.background()),
            Theme::Dark => CellStyle::new(Rgb::new(229, 231, 235), self.background()),
        }
    }

    pub fn label(self) -> CellStyle {
        self.text().bold()
    }

    pub fn border(self) -> CellStyle {
        match self {
            Theme::Light => CellStyle::new(Rgb::new(107, 114, 128), self.background()),
            Theme::Dark => CellStyle::new(Rgb::new(156, 163, 175), self.background()),
        }
    }

    /// Dotted grid marks on empty cells
    pub fn grid(self) -> CellStyle {
        match self {
            Theme::Light => CellStyle::new(Rgb::new(200, 202, 206), self.well()).dim(),
            Theme::Dark => CellStyle::new(Rgb::new(75, 85, 99), self.well()).dim(),
        }
    }

    /// Banner text drawn over the board
    pub fn overlay(self) -> CellStyle {
        match self {
            Theme::Light => CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(17, 24, 39)).bold(),
            Theme::Dark => CellStyle::new(Rgb::new(0, 0, 0), Rgb::new(229, 231, 235)).bold(),
        }
    }
}
