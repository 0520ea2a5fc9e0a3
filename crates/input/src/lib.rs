//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` events into [`crate::types::GameAction`] and paces the
//! frame loop by polling the terminal event queue until the next frame is due.
//! Focus changes stand in for the host becoming hidden or visible.

pub mod map;
pub mod scheduler;

pub use flap_combat_engine as engine;
pub use flap_combat_types as types;

pub use map::{handle_event, handle_key_event, should_quit};
pub use scheduler::TerminalScheduler;
