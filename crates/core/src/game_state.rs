//! Game state module - manages the complete game state
//!
//! This module ties together the bird, the gate collection, the RNG and the
//! session bookkeeping. It handles frame timing, physics integration, gate
//! spawning and retirement, collision detection and the status state machine.

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;
use crate::snapshot::{GameSnapshot, PipeSnapshot};
use crate::types::*;

/// The player avatar. Horizontal position is fixed at [`BIRD_X`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    pub y: f32,
    pub velocity: f32,
}

impl Bird {
    /// Bird at its session start position, at rest
    pub fn new() -> Self {
        Self {
            y: WORLD_HEIGHT * BIRD_START_Y_FRACTION,
            velocity: 0.0,
        }
    }

    pub fn top(&self) -> f32 {
        self.y - BIRD_RADIUS
    }

    pub fn bottom(&self) -> f32 {
        self.y + BIRD_RADIUS
    }
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

/// A gate: two barriers with a passable gap centered on `gap_y`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    pub x: f32,
    pub gap_y: f32,
    pub scored: bool,
}

impl Pipe {
    pub fn new(x: f32, gap_y: f32) -> Self {
        Self {
            x,
            gap_y,
            scored: false,
        }
    }

    /// Trailing (right) edge
    pub fn right(&self) -> f32 {
        self.x + PIPE_WIDTH
    }

    pub fn gap_top(&self) -> f32 {
        self.gap_y - PIPE_GAP / 2.0
    }

    pub fn gap_bottom(&self) -> f32 {
        self.gap_y + PIPE_GAP / 2.0
    }

    /// Check if the bird collides with this gate
    pub fn hits(&self, bird: &Bird) -> bool {
        let overlap_x = BIRD_X + BIRD_RADIUS > self.x && BIRD_X - BIRD_RADIUS < self.right();
        if !overlap_x {
            return false;
        }
        bird.top() < self.gap_top() || bird.bottom() > self.gap_bottom()
    }

    /// Whether the gate has moved far enough past the left boundary to retire
    pub fn is_retired(&self) -> bool {
        self.right() <= -RETIRE_MARGIN
    }
}

/// Clamp an elapsed wall-clock interval into a safe integration step (seconds)
pub fn clamp_frame_delta(elapsed_ms: u64) -> f32 {
    (elapsed_ms as f32 / 1000.0).clamp(0.0, MAX_FRAME_DT_SECS)
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    bird: Bird,
    pipes: ArrayVec<Pipe, MAX_PIPES>,
    rng: SimpleRng,
    /// Milliseconds until the next gate spawns (may go negative within a frame).
    spawn_timer_ms: f32,
    score: u32,
    best: u32,
    status: GameStatus,
    /// Timestamp of the previous frame; `None` until the first frame anchors it.
    last_frame_ms: Option<u64>,
    /// Set only when a visibility loss caused the pause.
    paused_while_hidden: bool,
    /// Cosmetic scroll distance for ground and parallax layers.
    ground_offset: f32,
    /// Monotonic session id (increments on every reset).
    episode_id: u32,
    /// Last core event (consumed by the loop driver).
    last_event: Option<CoreEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self {
            bird: Bird::new(),
            pipes: ArrayVec::new(),
            rng: SimpleRng::new(seed),
            spawn_timer_ms: 0.0,
            score: 0,
            best: 0,
            status: GameStatus::Start,
            last_frame_ms: None,
            paused_while_hidden: false,
            ground_offset: 0.0,
            episode_id: 0,
            last_event: None,
        }
    }

    /// Seed the in-memory best score (read from storage at startup)
    pub fn with_best(mut self, best: u32) -> Self {
        self.best = best;
        self
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn bird(&self) -> Bird {
        self.bird
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn spawn_timer_ms(&self) -> f32 {
        self.spawn_timer_ms
    }

    pub fn ground_offset(&self) -> f32 {
        self.ground_offset
    }

    pub fn paused_while_hidden(&self) -> bool {
        self.paused_while_hidden
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn seed(&self) -> u32 {
        self.rng.state()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.status = self.status;
        out.bird_y = self.bird.y;
        out.bird_velocity = self.bird.velocity;
        out.pipes.clear();
        out.pipes
            .extend(self.pipes.iter().copied().map(PipeSnapshot::from));
        out.score = self.score;
        out.best = self.best;
        out.ground_offset = self.ground_offset;
        out.spawn_timer_ms = self.spawn_timer_ms;
        out.paused_while_hidden = self.paused_while_hidden;
        out.episode_id = self.episode_id;
        out.seed = self.rng.state();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Full session reset into `next`
    fn reset(&mut self, next: GameStatus) {
        self.bird = Bird::new();
        self.pipes.clear();
        self.spawn_timer_ms = PIPE_SPAWN_MS * FIRST_SPAWN_FRACTION;
        self.score = 0;
        self.ground_offset = 0.0;
        self.paused_while_hidden = false;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.status = next;
        tracing::debug!(episode = self.episode_id, best = self.best, "session start");
    }

    /// Discrete flap command.
    ///
    /// Starts or restarts the session from `Start`/`GameOver`, resumes from
    /// `Paused`, and then (whenever the result is `Running`) assigns the flap
    /// impulse. Unpausing by flap therefore also flaps.
    pub fn flap(&mut self) {
        match self.status {
            GameStatus::Start | GameStatus::GameOver => self.reset(GameStatus::Running),
            GameStatus::Paused => {
                self.paused_while_hidden = false;
                self.status = GameStatus::Running;
            }
            GameStatus::Running => {}
        }

        if self.status == GameStatus::Running {
            self.bird.velocity = FLAP_IMPULSE;
        }
    }

    /// Host visibility changed.
    ///
    /// Hiding pauses a running session and tags the pause. Showing resumes
    /// only a pause caused by hiding, and re-anchors frame timing at `now_ms`
    /// so the hidden interval does not leak into the next delta.
    pub fn visibility_changed(&mut self, hidden: bool, now_ms: u64) {
        if hidden {
            if self.status == GameStatus::Running {
                self.paused_while_hidden = true;
                self.status = GameStatus::Paused;
            }
        } else if self.status == GameStatus::Paused && self.paused_while_hidden {
            self.paused_while_hidden = false;
            self.status = GameStatus::Running;
            self.last_frame_ms = Some(now_ms);
        }
    }

    /// Apply a host action
    pub fn apply_action(&mut self, action: GameAction, now_ms: u64) {
        match action {
            GameAction::Flap => self.flap(),
            GameAction::Hidden => self.visibility_changed(true, now_ms),
            GameAction::Visible => self.visibility_changed(false, now_ms),
        }
    }

    /// Advance one display frame at timestamp `now_ms`.
    ///
    /// Computes the clamped delta against the previous frame and runs
    /// [`update`](Self::update). The first frame only anchors timing.
    /// Returns the delta used, in seconds.
    pub fn frame(&mut self, now_ms: u64) -> f32 {
        let last = *self.last_frame_ms.get_or_insert(now_ms);
        let dt = clamp_frame_delta(now_ms.saturating_sub(last));
        self.last_frame_ms = Some(now_ms);
        self.update(dt);
        dt
    }

    /// Physics and collision step. No-op unless running.
    ///
    /// Returns true if the world advanced.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT_SECS)
        } else {
            0.0
        };

        // Integrate.
        self.bird.velocity = (self.bird.velocity + GRAVITY * dt).min(TERMINAL_VELOCITY);
        self.bird.y += self.bird.velocity * dt;

        // Spawn; re-arm by adding so overshoot carries into the next interval.
        self.spawn_timer_ms -= dt * 1000.0;
        if self.spawn_timer_ms <= 0.0 {
            self.spawn_pipe();
            self.spawn_timer_ms += PIPE_SPAWN_MS;
        }

        // Scroll and score.
        let scroll = PIPE_SPEED * dt;
        for pipe in self.pipes.iter_mut() {
            pipe.x -= scroll;
            if !pipe.scored && pipe.right() < BIRD_X {
                pipe.scored = true;
                self.score += 1;
            }
        }

        self.pipes.retain(|p| !p.is_retired());
        self.ground_offset += scroll;

        // World bounds.
        if self.bird.top() <= 0.0 || self.bird.bottom() >= play_bottom() {
            self.game_over();
            return true;
        }

        // Gates.
        if self.pipes.iter().any(|p| p.hits(&self.bird)) {
            self.game_over();
        }

        true
    }

    fn spawn_pipe(&mut self) {
        let gap_y = self.rng.range_f32(gap_center_min(), gap_center_max());
        let pipe = Pipe::new(WORLD_WIDTH + PIPE_WIDTH, gap_y);
        if self.pipes.try_push(pipe).is_err() {
            tracing::warn!(live = self.pipes.len(), "gate collection full, spawn dropped");
        }
    }

    fn game_over(&mut self) {
        self.status = GameStatus::GameOver;
        if self.score > self.best {
            self.best = self.score;
            self.last_event = Some(CoreEvent::NewBest(self.score));
        }
        tracing::info!(
            episode = self.episode_id,
            score = self.score,
            best = self.best,
            "session over"
        );
    }

    /// Take and clear the last core event.
    pub fn take_last_event(&mut self) -> Option<CoreEvent> {
        self.last_event.take()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
