//! Read-only view of the engine state handed to renderers.

use arrayvec::ArrayVec;

use crate::game_state::Pipe;
use crate::types::{
    GameStatus, BIRD_START_Y_FRACTION, MAX_PIPES, PIPE_GAP, PIPE_SPAWN_MS, FIRST_SPAWN_FRACTION,
    TILT_MAX_RAD, TILT_MIN_RAD, TILT_VELOCITY_SCALE, WORLD_HEIGHT,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeSnapshot {
    pub x: f32,
    pub gap_y: f32,
    pub scored: bool,
}

impl PipeSnapshot {
    pub fn gap_top(&self) -> f32 {
        self.gap_y - PIPE_GAP / 2.0
    }

    pub fn gap_bottom(&self) -> f32 {
        self.gap_y + PIPE_GAP / 2.0
    }
}

impl From<Pipe> for PipeSnapshot {
    fn from(value: Pipe) -> Self {
        Self {
            x: value.x,
            gap_y: value.gap_y,
            scored: value.scored,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub status: GameStatus,
    pub bird_y: f32,
    pub bird_velocity: f32,
    pub pipes: ArrayVec<PipeSnapshot, MAX_PIPES>,
    pub score: u32,
    pub best: u32,
    pub ground_offset: f32,
    pub spawn_timer_ms: f32,
    pub paused_while_hidden: bool,
    pub episode_id: u32,
    pub seed: u32,
}

impl GameSnapshot {
    /// Nothing moves between frames in this state.
    pub fn is_static(&self) -> bool {
        !self.status.is_running()
    }

    /// Visual tilt of the bird in radians, derived from its velocity.
    pub fn bird_tilt(&self) -> f32 {
        (self.bird_velocity / TILT_VELOCITY_SCALE).clamp(TILT_MIN_RAD, TILT_MAX_RAD)
    }

    /// FNV-1a hash over every field that affects a rendered frame.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new();
        h.write(&[self.status as u8, self.paused_while_hidden as u8]);
        h.write(&self.bird_y.to_bits().to_le_bytes());
        h.write(&self.bird_velocity.to_bits().to_le_bytes());
        h.write(&self.ground_offset.to_bits().to_le_bytes());
        h.write(&self.score.to_le_bytes());
        h.write(&self.best.to_le_bytes());
        for pipe in &self.pipes {
            h.write(&pipe.x.to_bits().to_le_bytes());
            h.write(&pipe.gap_y.to_bits().to_le_bytes());
        }
        h.finish()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            status: GameStatus::Start,
            bird_y: WORLD_HEIGHT * BIRD_START_Y_FRACTION,
            bird_velocity: 0.0,
            pipes: ArrayVec::new(),
            score: 0,
            best: 0,
            ground_offset: 0.0,
            spawn_timer_ms: PIPE_SPAWN_MS * FIRST_SPAWN_FRACTION,
            paused_while_hidden: false,
            episode_id: 0,
            seed: 0,
        }
    }
}

struct Fnv1a64 {
    state: u64,
}

impl Fnv1a64 {
    const OFFSET: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x00000100000001B3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET,
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }

    fn finish(&self) -> u64 {
        self.state
    }
}
