//! Render sink that draws snapshots to the terminal.

use std::io::{self, Write};

use anyhow::{Error, Result};

use crate::core::GameSnapshot;
use crate::engine::RenderSink;
use crate::fb::FrameBuffer;
use crate::game_view::{GameView, Viewport};
use crate::renderer::TerminalRenderer;

/// Keeps one framebuffer alive across frames and hands it to the diffing
/// renderer, so steady-state frames write only what changed.
pub struct TerminalSink<W: Write = io::Stdout> {
    renderer: TerminalRenderer<W>,
    view: GameView,
    fb: FrameBuffer,
    viewport: Viewport,
    frames: u64,
}

impl TerminalSink<io::Stdout> {
    pub fn new(view: GameView, viewport: Viewport) -> Self {
        Self::with_renderer(TerminalRenderer::new(), view, viewport)
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn with_renderer(
        renderer: TerminalRenderer<W>,
        view: GameView,
        viewport: Viewport,
    ) -> Self {
        Self {
            renderer,
            view,
            fb: FrameBuffer::new(viewport.width, viewport.height),
            viewport,
            frames: 0,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        self.renderer.enter()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }

    /// Adopt a new terminal size; the next frame is a full redraw.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::new(width, height);
        self.renderer.invalidate();
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn renderer(&self) -> &TerminalRenderer<W> {
        &self.renderer
    }
}

impl<W: Write> RenderSink for TerminalSink<W> {
    type Error = Error;

    fn present(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        self.view.render_into(snapshot, self.viewport, &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)?;
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameStatus;

    #[test]
    fn present_writes_frames() {
        let renderer = TerminalRenderer::with_writer(Vec::new());
        let mut sink =
            TerminalSink::with_renderer(renderer, GameView::default(), Viewport::new(60, 24));

        let mut snap = GameSnapshot::default();
        sink.present(&snap).unwrap();
        let first = sink.renderer().writer().len();
        assert!(first > 0);

        snap.status = GameStatus::Paused;
        sink.present(&snap).unwrap();
        assert_eq!(sink.frames(), 2);
        let written = &sink.renderer().writer()[first..];
        assert!(!written.is_empty());
        assert!(written.len() < first);
    }

    #[test]
    fn resize_forces_full_redraw() {
        let renderer = TerminalRenderer::with_writer(Vec::new());
        let mut sink =
            TerminalSink::with_renderer(renderer, GameView::default(), Viewport::new(40, 24));
        let snap = GameSnapshot::default();

        sink.present(&snap).unwrap();
        let first = sink.renderer().writer().len();
        sink.present(&snap).unwrap();
        assert_eq!(sink.renderer().writer().len(), first);

        sink.resize(40, 24);
        sink.present(&snap).unwrap();
        assert_eq!(sink.renderer().writer().len(), 2 * first);
        assert_eq!(sink.viewport(), Viewport::new(40, 24));
    }
}
