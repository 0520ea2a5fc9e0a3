//! Frame loop (engine-facing).
//!
//! Drives a [`GameState`] once per display frame: update, then present, then
//! wait for the next frame while collecting host input. Time, frame pacing and
//! presentation are injected so the loop can run against a real terminal or a
//! scripted test harness.

pub mod clock;
pub mod frame_loop;

pub use flap_combat_core as core;
pub use flap_combat_store as store;
pub use flap_combat_types as types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use frame_loop::{CancelHandle, FrameLoop, FrameScheduler, FrameSink, FrameWait};
