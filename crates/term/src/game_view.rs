//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). The world is rasterized into a pixel
//! [`Canvas`] and then packed two pixels per cell with upper half blocks.

use crate::canvas::Canvas;
use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{
    GameStatus, BIRD_RADIUS, BIRD_X, GROUND_HEIGHT, PIPE_GAP, PIPE_WIDTH, WORLD_HEIGHT,
    WORLD_WIDTH,
};

pub mod palette {
    use crate::fb::Rgb;

    pub const SKY_TOP: Rgb = Rgb::hex(0x08203e);
    pub const SKY_BOTTOM: Rgb = Rgb::hex(0x1d4f7f);
    pub const MOUNTAIN: Rgb = Rgb::hex(0x0f2f53);
    pub const MOUNTAIN_FAR: Rgb = Rgb::hex(0x123a62);
    pub const GROUND: Rgb = Rgb::hex(0x1f2d1e);
    pub const GROUND_STRIPE: Rgb = Rgb::hex(0x56733c);
    pub const BIRD: Rgb = Rgb::hex(0xffda6a);
    pub const BIRD_WING: Rgb = Rgb::hex(0xf7a53d);
    pub const BIRD_EYE: Rgb = Rgb::hex(0x0f1320);
    pub const PIPE: Rgb = Rgb::hex(0x6ccf4f);
    pub const PIPE_SHADOW: Rgb = Rgb::hex(0x397b2f);
    pub const TEXT: Rgb = Rgb::hex(0xf8fbff);

    pub const LETTERBOX: Rgb = Rgb::hex(0x040b16);
    pub const CARD: Rgb = Rgb::hex(0x0a1628);
    pub const PANEL: Rgb = Rgb::hex(0x06101e);
    pub const MUTED: Rgb = Rgb::hex(0x9fb3c8);
    pub const BUTTON: Rgb = Rgb::hex(0xffda6a);
}

const HALF_BLOCK: char = '▀';

const FAR_PERIOD: f32 = 110.0;
const FAR_HEIGHT: f32 = 110.0;
const FAR_PARALLAX: f32 = 0.2;
const NEAR_PERIOD: f32 = 140.0;
const NEAR_HEIGHT: f32 = 150.0;
const NEAR_PARALLAX: f32 = 0.35;
const PIPE_SHADOW_OFFSET: f32 = 8.0;
const STRIPE_PERIOD: f32 = 42.0;
const STRIPE_DEPTH: f32 = 16.0;
const STRIPE_HEIGHT: f32 = 10.0;

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

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Uniform fit of the world into this viewport, centered.
    ///
    /// Each cell carries two vertical pixels, so there are twice as many
    /// pixel rows as terminal rows.
    pub fn layout(&self) -> Layout {
        let scale = (self.width as f32 / WORLD_WIDTH).min(self.height as f32 * 2.0 / WORLD_HEIGHT);
        let cols = ((WORLD_WIDTH * scale).floor() as u16).min(self.width);
        let rows = (((WORLD_HEIGHT * scale) / 2.0).floor() as u16).min(self.height);
        Layout {
            scale,
            x: (self.width - cols) / 2,
            y: (self.height - rows) / 2,
            cols,
            rows,
        }
    }
}

/// Where the world lands on screen, in cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Pixels per world unit.
    pub scale: f32,
    pub x: u16,
    pub y: u16,
    pub cols: u16,
    pub rows: u16,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.cols == 0 || self.rows == 0
    }
}

/// Overlay copy for a non-running status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub title: &'static str,
    pub hint: &'static str,
    pub action: &'static str,
}

impl Overlay {
    pub fn for_status(status: GameStatus) -> Option<Overlay> {
        match status {
            GameStatus::Running => None,
            GameStatus::Start => Some(Overlay {
                title: "Flap Combat",
                hint: "Click or press Space to fly through enemy gates.",
                action: "Start",
            }),
            GameStatus::Paused => Some(Overlay {
                title: "Paused",
                hint: "Game paused while the terminal lost focus. Click or press Space to continue.",
                action: "Resume",
            }),
            GameStatus::GameOver => Some(Overlay {
                title: "Mission Failed",
                hint: "Click or press Space to redeploy.",
                action: "Restart",
            }),
        }
    }
}

/// Renders snapshots. Holds only a scratch canvas reused across frames.
#[derive(Debug, Default)]
pub struct GameView {
    canvas: Canvas,
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render into a new framebuffer (allocates; handy for tests).
    pub fn render(&mut self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// This is the allocation-free hot path once the framebuffer and canvas
    /// have grown to the viewport size.
    pub fn render_into(&mut self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::colors(palette::TEXT, palette::LETTERBOX).cell(' '));

        let layout = viewport.layout();
        if layout.is_empty() {
            let msg = "enlarge terminal";
            let style = CellStyle::colors(palette::TEXT, palette::LETTERBOX);
            fb.put_str(0, 0, msg, style);
            return;
        }

        self.canvas.resize(layout.cols, layout.rows * 2, layout.scale);
        draw_world(&mut self.canvas, snap);
        self.blit(fb, &layout);

        draw_hud(fb, &layout, snap);
        if let Some(overlay) = Overlay::for_status(snap.status) {
            draw_overlay(fb, &layout, &overlay);
        }
    }

    fn blit(&self, fb: &mut FrameBuffer, layout: &Layout) {
        for row in 0..layout.rows {
            for col in 0..layout.cols {
                let top = self.canvas.get(col, row * 2).unwrap_or_default();
                let bottom = self.canvas.get(col, row * 2 + 1).unwrap_or_default();
                fb.put_char(
                    layout.x + col,
                    layout.y + row,
                    HALF_BLOCK,
                    CellStyle::colors(top, bottom),
                );
            }
        }
    }
}

fn draw_world(canvas: &mut Canvas, snap: &GameSnapshot) {
    let ground_y = WORLD_HEIGHT - GROUND_HEIGHT;

    canvas.vertical_gradient(palette::SKY_TOP, palette::SKY_BOTTOM, WORLD_HEIGHT);

    draw_mountains(
        canvas,
        6,
        FAR_PERIOD,
        FAR_HEIGHT,
        snap.ground_offset * FAR_PARALLAX,
        palette::MOUNTAIN_FAR,
    );
    draw_mountains(
        canvas,
        5,
        NEAR_PERIOD,
        NEAR_HEIGHT,
        snap.ground_offset * NEAR_PARALLAX,
        palette::MOUNTAIN,
    );

    for pipe in &snap.pipes {
        let top_h = pipe.gap_y - PIPE_GAP / 2.0;
        let bottom_y = pipe.gap_y + PIPE_GAP / 2.0;
        let bottom_h = ground_y - bottom_y;
        let face_w = PIPE_WIDTH - PIPE_SHADOW_OFFSET;

        let shadow_x = pipe.x + PIPE_SHADOW_OFFSET;
        canvas.fill_rect(shadow_x, 0.0, face_w, top_h, palette::PIPE_SHADOW);
        canvas.fill_rect(shadow_x, bottom_y, face_w, bottom_h, palette::PIPE_SHADOW);

        canvas.fill_rect(pipe.x, 0.0, face_w, top_h, palette::PIPE);
        canvas.fill_rect(pipe.x, bottom_y, face_w, bottom_h, palette::PIPE);
    }

    canvas.fill_rect(0.0, ground_y, WORLD_WIDTH, GROUND_HEIGHT, palette::GROUND);
    let shift = snap.ground_offset % STRIPE_PERIOD;
    let mut x = -STRIPE_PERIOD;
    while x < WORLD_WIDTH + STRIPE_PERIOD {
        canvas.fill_rect(
            x - shift,
            ground_y + STRIPE_DEPTH,
            STRIPE_PERIOD / 2.0,
            STRIPE_HEIGHT,
            palette::GROUND_STRIPE,
        );
        x += STRIPE_PERIOD;
    }

    draw_bird(canvas, snap.bird_y, snap.bird_tilt());
}

fn draw_mountains(canvas: &mut Canvas, count: u16, period: f32, height: f32, scroll: f32, color: Rgb) {
    let base_y = WORLD_HEIGHT - GROUND_HEIGHT;
    let shift = scroll % period;
    for i in 0..count {
        let base_x = i as f32 * period - shift;
        canvas.fill_triangle(
            (base_x, base_y),
            (base_x + period / 2.0, base_y - height),
            (base_x + period, base_y),
            color,
        );
    }
}

fn draw_bird(canvas: &mut Canvas, y: f32, tilt: f32) {
    let (sin, cos) = tilt.sin_cos();
    let local = |ox: f32, oy: f32| (BIRD_X + ox * cos - oy * sin, y + ox * sin + oy * cos);

    canvas.fill_circle(BIRD_X, y, BIRD_RADIUS, palette::BIRD);

    let (wx, wy) = local(-4.0, 4.0);
    canvas.fill_ellipse(wx, wy, 10.0, 8.0, tilt - 0.5, palette::BIRD_WING);

    let (ex, ey) = local(7.0, -6.0);
    canvas.fill_circle(ex, ey, 2.8, palette::BIRD_EYE);
}

fn draw_hud(fb: &mut FrameBuffer, layout: &Layout, snap: &GameSnapshot) {
    let label = CellStyle {
        fg: palette::MUTED,
        bg: palette::CARD,
        bold: false,
        dim: false,
    };
    let value = CellStyle {
        fg: palette::TEXT,
        bg: palette::CARD,
        bold: true,
        dim: false,
    };

    let y = layout.y + 1u16.min(layout.rows - 1);
    let left = layout.x + 1;
    let right_edge = layout.x + layout.cols;

    // " SCORE n " on the left, " BEST n " on the right.
    let score_w = 8 + digits(snap.score);
    fb.fill_rect(left, y, score_w, 1, ' ', label);
    fb.put_str(left + 1, y, "SCORE", label);
    fb.put_u32(left + 7, y, snap.score, value);

    let best_w = 7 + digits(snap.best);
    let best_x = right_edge.saturating_sub(best_w + 1).max(left + score_w + 1);
    fb.fill_rect(best_x, y, best_w, 1, ' ', label);
    fb.put_str(best_x + 1, y, "BEST", label);
    fb.put_u32(best_x + 6, y, snap.best, value);
}

fn draw_overlay(fb: &mut FrameBuffer, layout: &Layout, overlay: &Overlay) {
    let inner_w = layout.cols.saturating_sub(4).max(1);
    let hint_lines = WrappedLines::new(overlay.hint, inner_w as usize).count() as u16;
    // title, gap, hint..., gap, button
    let panel_h = hint_lines + 6;
    let panel_w = inner_w + 2;
    let panel_x = layout.x + (layout.cols - panel_w.min(layout.cols)) / 2;
    let panel_y = layout.y + layout.rows.saturating_sub(panel_h) / 2;

    let panel = CellStyle::colors(palette::TEXT, palette::PANEL);
    fb.fill_rect(panel_x, panel_y, panel_w, panel_h, ' ', panel);

    let title = CellStyle { bold: true, ..panel };
    let mut y = panel_y + 1;
    put_centered(fb, layout, y, overlay.title, title);
    y += 2;

    let hint = CellStyle::colors(palette::MUTED, palette::PANEL);
    for line in WrappedLines::new(overlay.hint, inner_w as usize) {
        put_centered(fb, layout, y, line, hint);
        y += 1;
    }
    y += 1;

    let button = CellStyle {
        fg: palette::BIRD_EYE,
        bg: palette::BUTTON,
        bold: true,
        dim: false,
    };
    let w = overlay.action.chars().count() as u16 + 4;
    let x = layout.x + layout.cols.saturating_sub(w) / 2;
    fb.fill_rect(x, y, w, 1, ' ', button);
    fb.put_str(x + 2, y, overlay.action, button);
}

fn put_centered(fb: &mut FrameBuffer, layout: &Layout, y: u16, text: &str, style: CellStyle) {
    let w = text.chars().count() as u16;
    let x = layout.x + layout.cols.saturating_sub(w) / 2;
    fb.put_str(x, y, text, style);
}

fn digits(mut n: u32) -> u16 {
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}

/// Greedy word wrap over borrowed slices of the input.
///
/// Words longer than `width` get a line of their own and are clipped by the
/// framebuffer.
pub struct WrappedLines<'a> {
    rest: &'a str,
    width: usize,
}

impl<'a> WrappedLines<'a> {
    pub fn new(text: &'a str, width: usize) -> Self {
        Self {
            rest: text.trim(),
            width: width.max(1),
        }
    }
}

impl<'a> Iterator for WrappedLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        let mut end = 0;
        let mut len = 0;
        for (i, word) in self.rest.split(' ').enumerate() {
            let wlen = word.chars().count();
            let next_len = if i == 0 { wlen } else { len + 1 + wlen };
            if i > 0 && next_len > self.width {
                break;
            }
            len = next_len;
            end = if i == 0 { word.len() } else { end + 1 + word.len() };
        }

        let line = &self.rest[..end];
        self.rest = self.rest[end..].trim_start();
        Some(line)
    }
}
