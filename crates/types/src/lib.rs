//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # World Dimensions
//!
//! The game runs in a fixed logical coordinate space, independent of the
//! terminal size:
//!
//! - **Width**: 480 units
//! - **Height**: 720 units (y grows downward)
//! - **Ground**: the bottom 92 units are the ground band
//!
//! # Physics Constants
//!
//! Velocities are in units per second, accelerations in units per second squared:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRAVITY` | 1450 | Downward acceleration |
//! | `FLAP_IMPULSE` | -430 | Velocity assigned on flap (upward) |
//! | `TERMINAL_VELOCITY` | 580 | Maximum downward speed |
//! | `PIPE_SPEED` | 170 | Leftward scroll speed of gates |
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Default frame interval (~60 FPS) |
//! | `PIPE_SPAWN_MS` | 1400 | Interval between gate spawns |
//! | `MAX_FRAME_DT_SECS` | 0.04 | Upper clamp for a single frame delta |
//!
//! # Examples
//!
//! ```
//! use flap_combat_types::{GameAction, GameStatus, WORLD_HEIGHT, WORLD_WIDTH};
//!
//! assert_eq!(GameAction::Flap.as_str(), "flap");
//! assert_eq!(GameStatus::default(), GameStatus::Start);
//! assert_eq!(GameStatus::GameOver.as_str(), "gameover");
//!
//! assert_eq!(WORLD_WIDTH, 480.0);
//! assert_eq!(WORLD_HEIGHT, 720.0);
//! ```

/// Logical world width in units
pub const WORLD_WIDTH: f32 = 480.0;

/// Logical world height in units
pub const WORLD_HEIGHT: f32 = 720.0;

/// Fixed horizontal position of the bird's center
pub const BIRD_X: f32 = 130.0;

/// Bird collision radius
pub const BIRD_RADIUS: f32 = 18.0;

/// Bird starts each session at this fraction of the world height
pub const BIRD_START_Y_FRACTION: f32 = 0.45;

/// Downward acceleration (units/s²)
pub const GRAVITY: f32 = 1450.0;

/// Velocity assigned by a flap (negative = upward)
pub const FLAP_IMPULSE: f32 = -430.0;

/// Maximum downward velocity
pub const TERMINAL_VELOCITY: f32 = 580.0;

/// Gate scroll speed (units/s)
pub const PIPE_SPEED: f32 = 170.0;

/// Gate width
pub const PIPE_WIDTH: f32 = 72.0;

/// Full height of the passable gap
pub const PIPE_GAP: f32 = 176.0;

/// Interval between gate spawns in milliseconds
pub const PIPE_SPAWN_MS: f32 = 1400.0;

/// The first gate of a session arrives after this fraction of the spawn interval
pub const FIRST_SPAWN_FRACTION: f32 = 0.75;

/// Height of the ground band at the bottom of the world
pub const GROUND_HEIGHT: f32 = 92.0;

/// Gap band never reaches closer than this to the top of the world
pub const TOP_MARGIN: f32 = 64.0;

/// Gap band never reaches closer than this to the ground line
pub const GROUND_CLEARANCE: f32 = 64.0;

/// A gate is retired once its trailing edge is this far past the left boundary
pub const RETIRE_MARGIN: f32 = 16.0;

/// Upper bound of live gates; the retirement rule keeps at most 4 alive
pub const MAX_PIPES: usize = 8;

/// Default frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Frame deltas are clamped to this many seconds
pub const MAX_FRAME_DT_SECS: f32 = 0.04;

/// Velocity divisor for the bird's visual tilt
pub const TILT_VELOCITY_SCALE: f32 = 450.0;

/// Tilt clamp in radians (nose up)
pub const TILT_MIN_RAD: f32 = -0.5;

/// Tilt clamp in radians (nose down)
pub const TILT_MAX_RAD: f32 = 0.7;

/// Storage key for the best-score record
pub const BEST_SCORE_KEY: &str = "flap-combat-best-score";

/// y coordinate of the ground line (top edge of the ground band)
pub const fn play_bottom() -> f32 {
    WORLD_HEIGHT - GROUND_HEIGHT
}

/// Lowest allowed gap center (inclusive)
pub const fn gap_center_min() -> f32 {
    TOP_MARGIN + PIPE_GAP / 2.0
}

/// Highest allowed gap center (exclusive)
pub const fn gap_center_max() -> f32 {
    WORLD_HEIGHT - GROUND_HEIGHT - GROUND_CLEARANCE - PIPE_GAP / 2.0
}


/// Session status
///
/// - **Start**: initial screen, nothing moves until the first flap
/// - **Running**: physics advances every frame
/// - **Paused**: frozen, typically because the host lost visibility
/// - **GameOver**: the bird hit a gate or the world bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Start,
    Running,
    Paused,
    GameOver,
}

impl GameStatus {
    /// Lowercase name, as used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Start => "start",
            GameStatus::Running => "running",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "gameover",
        }
    }

    /// Whether physics advances in this status
    pub fn is_running(&self) -> bool {
        matches!(self, GameStatus::Running)
    }
}

/// External commands the engine reacts to
///
/// These come from the host: key presses and clicks become `Flap`,
/// focus/visibility changes become `Hidden` / `Visible`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Start, restart, resume, or flap while running
    Flap,
    /// Host lost visibility (window hidden, terminal unfocused)
    Hidden,
    /// Host regained visibility
    Visible,
}

impl GameAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Flap => "flap",
            GameAction::Hidden => "hidden",
            GameAction::Visible => "visible",
        }
    }
}

/// Core-side event emitted by the engine.
///
/// Consumed by the loop driver, which owns the persistence collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreEvent {
    /// A session ended with a score above the previous best.
    NewBest(u32),
}
