//! TerminalRenderer: flushes framebuffers to a terminal.
//!
//! The first frame (and any frame after a resize or [`invalidate`]) is a full
//! redraw. After that only runs of glyphs that differ from the previous frame
//! are written.
//!
//! [`invalidate`]: TerminalRenderer::invalidate

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Glyph, Rgb};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    prev: FrameBuffer,
    /// Whether `prev` reflects what is on screen
    synced: bool,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            prev: FrameBuffer::new(0, 0),
            synced: false,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Switch to raw mode and the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.synced = false;
        Ok(())
    }

    /// Undo [`TerminalRenderer::enter`].
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw (e.g. after a resize event).
    pub fn invalidate(&mut self) {
        self.synced = false;
    }

    /// Draw `fb`, then swap it with the previous frame.
    ///
    /// After the call `fb` holds stale contents the caller renders over, so
    /// no frame is ever cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let same_size = self.prev.width() == fb.width() && self.prev.height() == fb.height();
        if self.synced && same_size {
            encode_diff_into(&self.prev, fb, &mut self.buf)?;
        } else {
            encode_full_into(fb, &mut self.buf)?;
        }
        self.flush_buf()?;

        std::mem::swap(&mut self.prev, fb);
        self.synced = true;
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut pen = Pen::default();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        if let Some(row) = fb.row(y) {
            for glyph in row {
                pen.print(out, *glyph)?;
            }
        }
    }

    pen.reset(out)
}

/// Encode only the glyph runs that changed between `prev` and `next`.
///
/// Writes nothing when the frames are identical.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for run in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(run.x, run.y))?;
        if let Some(row) = next.row(run.y) {
            let start = run.x as usize;
            for glyph in &row[start..start + run.len as usize] {
                pen.print(out, *glyph)?;
            }
        }
    }

    if pen.style.is_some() {
        pen.reset(out)?;
    }
    Ok(())
}

/// Horizontal span of changed glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

/// Changed runs, row by row. Frames of different sizes yield every row of
/// `next` as one run.
pub fn changed_runs<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
) -> impl Iterator<Item = Run> + 'a {
    let resized = prev.width() != next.width() || prev.height() != next.height();

    (0..next.height()).flat_map(move |y| RowRuns {
        old: if resized { None } else { prev.row(y) },
        new: next.row(y).unwrap_or(&[]),
        y,
        x: 0,
    })
}

struct RowRuns<'a> {
    old: Option<&'a [Glyph]>,
    new: &'a [Glyph],
    y: u16,
    x: usize,
}

impl RowRuns<'_> {
    fn differs(&self, x: usize) -> bool {
        self.old.map_or(true, |old| old[x] != self.new[x])
    }
}

impl Iterator for RowRuns<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        while self.x < self.new.len() && !self.differs(self.x) {
            self.x += 1;
        }
        if self.x >= self.new.len() {
            return None;
        }

        let start = self.x;
        while self.x < self.new.len() && self.differs(self.x) {
            self.x += 1;
        }
        Some(Run {
            x: start as u16,
            y: self.y,
            len: (self.x - start) as u16,
        })
    }
}

/// Tracks the active style so it is only emitted when it changes.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, glyph: Glyph) -> Result<()> {
        if self.style != Some(glyph.style) {
            apply_style_into(out, glyph.style)?;
            self.style = Some(glyph.style);
        }
        out.queue(Print(glyph.ch))?;
        Ok(())
    }

    fn reset(&mut self, out: &mut Vec<u8>) -> Result<()> {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
        self.style = None;
        Ok(())
    }
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
        changed_runs(prev, next).map(|r| (r.x, r.y, r.len)).collect()
    }

    #[test]
    fn adjacent_changes_coalesce() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(5, 1);
        let mut b = FrameBuffer::new(5, 1);
        for x in 1..=3 {
            b.put_char(x, 0, 'X', style);
        }
        assert_eq!(runs(&a, &b), vec![(1, 0, 3)]);
    }

    #[test]
    fn separate_changes_split_runs() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(6, 2);
        let mut b = FrameBuffer::new(6, 2);
        b.put_char(0, 0, 'a', style);
        b.put_char(5, 0, 'b', style);
        b.put_char(2, 1, 'c', style);
        assert_eq!(runs(&a, &b), vec![(0, 0, 1), (5, 0, 1), (2, 1, 1)]);
    }

    #[test]
    fn style_change_counts_as_change() {
        let a = FrameBuffer::new(3, 1);
        let mut b = FrameBuffer::new(3, 1);
        b.put_char(1, 0, ' ', CellStyle::default().bold());
        assert_eq!(runs(&a, &b), vec![(1, 0, 1)]);
    }

    #[test]
    fn resize_redraws_every_row() {
        let a = FrameBuffer::new(3, 1);
        let b = FrameBuffer::new(4, 2);
        assert_eq!(runs(&a, &b), vec![(0, 0, 4), (0, 1, 4)]);
    }

    #[test]
    fn identical_frames_encode_nothing() {
        let a = FrameBuffer::new(4, 4);
        let mut out = Vec::new();
        encode_diff_into(&a, &a.clone(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn renderer_diffs_after_first_frame() {
        let mut r = TerminalRenderer::with_writer(Vec::new());
        let mut fb = FrameBuffer::new(4, 2);
        r.draw_swap(&mut fb).unwrap();
        let full = r.writer().len();
        assert!(full > 0);

        let mut fb = FrameBuffer::new(4, 2);
        r.draw_swap(&mut fb).unwrap();
        assert_eq!(r.writer().len(), full);

        let mut fb = FrameBuffer::new(4, 2);
        fb.put_char(3, 1, 'Z', CellStyle::default());
        r.draw_swap(&mut fb).unwrap();
        let written = &r.writer()[full..];
        assert!(written.contains(&b'Z'));
        assert!(written.len() < full);
    }
}
