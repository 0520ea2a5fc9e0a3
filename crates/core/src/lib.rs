//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI, storage, or I/O, making it:
//!
//! - **Deterministic**: Same seed and frame timestamps produce identical runs
//! - **Testable**: Unit tests cover every state transition and physics rule
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Fast**: Zero-allocation hot paths for frame processing
//!
//! # Module Structure
//!
//! - [`game_state`]: bird, gates, session status and the per-frame physics step
//! - [`rng`]: seedable generator for gate placement
//! - [`snapshot`]: read-only view handed to renderers
//!
//! # Game Rules
//!
//! - **Flap**: assigns a fixed upward velocity (not additive)
//! - **Gravity**: constant downward acceleration, capped at terminal velocity
//! - **Gates**: spawn at the right edge every 1400ms with a random gap center,
//!   scroll left at constant speed, and retire once off screen
//! - **Scoring**: +1 the first time a gate's trailing edge passes the bird
//! - **Game over**: touching the ceiling, the ground, or a gate outside its gap
//!
//! # Example
//!
//! ```
//! use flap_combat_core::GameState;
//! use flap_combat_types::GameStatus;
//!
//! let mut game = GameState::new(12345);
//! assert_eq!(game.status(), GameStatus::Start);
//!
//! // The first flap starts the session.
//! game.flap();
//! assert_eq!(game.status(), GameStatus::Running);
//!
//! // Drive frames with monotonic timestamps (milliseconds).
//! game.frame(0);
//! game.frame(16);
//! assert!(game.bird().velocity > -430.0);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::frame`](game_state::GameState::frame) once per display
//! frame with the current timestamp. Deltas are clamped to 40ms so a stalled
//! host never tunnels the bird through a gate.

pub mod game_state;
pub mod rng;
pub mod snapshot;

pub use flap_combat_types as types;

// Re-export commonly used types for convenience
pub use game_state::{clamp_frame_delta, Bird, GameState, Pipe};
pub use rng::SimpleRng;
pub use snapshot::{GameSnapshot, PipeSnapshot};
