//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget toolkits and instead rasterizes the logical world into a pixel
//! canvas, packs it into a framebuffer of half-block cells, and flushes only
//! the changed runs to the terminal.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Render purely from a snapshot, never touching engine state
//! - Preserve the world's aspect ratio at any terminal size

pub mod canvas;
pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;
pub mod surface;

pub use flap_combat_core as core;
pub use flap_combat_engine as engine;
pub use flap_combat_types as types;

pub use canvas::Canvas;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{palette, GameView, Layout, Overlay, Viewport, WrappedLines};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use surface::{TerminalSurface, STATIC_REDRAW_MS};
