//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Shape};
use crate::fb::{CellStyle, FrameBuffer};
use crate::palette::Theme;
use crate::types::GameStatus;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const CONTROLS: [&str; 6] = [
    "\u{2190}\u{2192}  move",
    "\u{2191}   rotate",
    "\u{2193}   soft drop",
    "SPC hard drop",
    "P   pause",
    "Q   quit",
];

/// Minimum side panel width worth drawing
const PANEL_MIN_W: u16 = 12;

/// Block glyph for filled cells
const BLOCK: char = '\u{2588}';

/// A lightweight terminal renderer for the Tetris game.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    theme: Theme,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 makes cells look roughly square in most terminal fonts.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
            theme: Theme::default(),
        }
    }
}

/// Placement of the board frame in the viewport
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse the framebuffer across frames; it is only resized
    /// when the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(self.theme.text().glyph(' '));

        let board_w = snap.width.saturating_mul(self.cell_w);
        let board_h = snap.height.saturating_mul(self.cell_h);
        let w = board_w.saturating_add(2);
        let h = board_h.saturating_add(2);
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        self.draw_border(fb, frame);

        // Settled cells with the active piece composed over them. Cells past
        // the viewport edge are clipped.
        for y in 0..snap.height {
            let py = cell_origin(frame.y, y, self.cell_h);
            if py >= viewport.height {
                break;
            }
            for x in 0..snap.width {
                let px = cell_origin(frame.x, x, self.cell_w);
                if px >= viewport.width {
                    break;
                }
                let value = snap.composed_cell(x as i32, y as i32);
                match self.theme.cell_color(value) {
                    Some(color) => {
                        let style = CellStyle::new(color, self.theme.well());
                        fb.fill_rect(px, py, self.cell_w, self.cell_h, BLOCK, style);
                    }
                    None => {
                        let grid = self.theme.grid();
                        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', grid);
                        fb.put_char(px, py, '\u{00b7}', grid);
                    }
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.status {
            GameStatus::Running => {}
            GameStatus::Paused => {
                self.draw_banner(fb, frame, 0, "PAUSED", None);
                self.draw_banner(fb, frame, 2, "P TO RESUME", None);
            }
            GameStatus::GameOver => {
                self.draw_banner(fb, frame, -1, "GAME OVER", None);
                self.draw_banner(fb, frame, 1, "SCORE ", Some(snap.score));
                self.draw_banner(fb, frame, 3, "ENTER TO RESTART", None);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }
        let style = self.theme.border();

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_W {
            return;
        }

        let label = self.theme.label();
        let value = self.theme.text();

        let mut y = frame.y;
        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        self.draw_preview(fb, &snap.next, panel_x, y);
        y = y.saturating_add(self.cell_h.saturating_mul(4)).saturating_add(1);

        let stats = [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ];
        for (name, number) in stats {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "CONTROLS", label);
        for line in CONTROLS {
            y = y.saturating_add(1);
            fb.put_str(panel_x, y, line, value.dim());
        }
    }

    /// Draw the next shape at its template orientation
    fn draw_preview(&self, fb: &mut FrameBuffer, shape: &Shape, x: u16, y: u16) {
        let bg = self.theme.background();
        for (row, col, kind) in shape.filled() {
            let style = CellStyle::new(self.theme.piece_color(kind), bg);
            fb.fill_rect(
                x.saturating_add((col as u16).saturating_mul(self.cell_w)),
                y.saturating_add((row as u16).saturating_mul(self.cell_h)),
                self.cell_w,
                self.cell_h,
                BLOCK,
                style,
            );
        }
    }

    /// Centered text `offset` rows from the middle of the frame, with an
    /// optional number appended.
    fn draw_banner(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        offset: i32,
        text: &str,
        number: Option<u32>,
    ) {
        let digits = number.map_or(0, |n| n.checked_ilog10().unwrap_or(0) as u16 + 1);
        let text_w = text.chars().count() as u16 + digits + 2;
        let mid = frame.y as i32 + frame.h as i32 / 2 + offset;
        let Ok(y) = u16::try_from(mid) else {
            return;
        };
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = self.theme.overlay();

        let mut cx = fb.put_str(x, y, " ", style);
        cx = fb.put_str(cx, y, text, style);
        if let Some(n) = number {
            cx = fb.put_u32(cx, y, n, style);
        }
        fb.put_str(cx, y, " ", style);
    }
}

/// Screen coordinate of board cell `i` inside a frame starting at `start`
fn cell_origin(start: u16, i: u16, cell: u16) -> u16 {
    start.saturating_add(1).saturating_add(i.saturating_mul(cell))
}
