//! Terminal-backed frame sink.

use anyhow::Result;
use crossterm::terminal;

use crate::engine::{Clock, FrameSink, SystemClock};
use crate::core::GameSnapshot;
use crate::fb::FrameBuffer;
use crate::game_view::{GameView, Viewport};
use crate::render_throttle::RenderThrottle;
use crate::renderer::TerminalRenderer;

/// Redraw cadence for screens where nothing moves.
pub const STATIC_REDRAW_MS: u64 = 250;

/// Presents snapshots on the controlling terminal.
///
/// Owns the renderer so the binary can restore the terminal through
/// [`TerminalSurface::exit`] no matter how the loop ended.
pub struct TerminalSurface {
    renderer: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
    throttle: RenderThrottle,
    clock: SystemClock,
    size: (u16, u16),
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            view: GameView::new(),
            fb: FrameBuffer::new(0, 0),
            throttle: RenderThrottle::new(STATIC_REDRAW_MS),
            clock: SystemClock::new(),
            size: (0, 0),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        self.renderer.enter()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }
}

impl FrameSink for TerminalSurface {
    fn is_ready(&self) -> bool {
        matches!(terminal::size(), Ok((w, h)) if w > 0 && h > 0)
    }

    fn present(&mut self, snap: &GameSnapshot) -> Result<()> {
        let (w, h) = terminal::size()?;
        if (w, h) != self.size {
            tracing::info!(cols = w, rows = h, "terminal resized");
            self.size = (w, h);
            self.renderer.invalidate();
            self.throttle.reset();
        }

        let now = self.clock.now_ms();
        if !self
            .throttle
            .should_render(now, snap.fingerprint(), snap.is_static())
        {
            return Ok(());
        }

        self.view.render_into(snap, Viewport::new(w, h), &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }
}
