//! The update-then-present loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;

use crate::clock::Clock;
use crate::core::{GameSnapshot, GameState};
use crate::store::{read_best, write_best, ScoreStore};
use crate::types::{CoreEvent, GameAction};

/// Outcome of waiting for the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameWait {
    Continue,
    Quit,
}

/// Paces frames and collects host input between them.
pub trait FrameScheduler {
    /// Block until the next frame is due, appending any host actions that
    /// arrived in the meantime.
    fn wait_for_frame(&mut self, actions: &mut Vec<GameAction>) -> Result<FrameWait>;
}

/// Consumer of per-frame snapshots.
pub trait FrameSink {
    /// Whether the output surface can take a frame right now.
    fn is_ready(&self) -> bool {
        true
    }

    fn present(&mut self, snap: &GameSnapshot) -> Result<()>;
}

/// Cloneable cancellation flag for a running loop.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Owns the game, its clock and its best-score store.
pub struct FrameLoop<C: Clock, S: ScoreStore> {
    game: GameState,
    clock: C,
    store: S,
    snapshot: GameSnapshot,
    actions: Vec<GameAction>,
    cancel: CancelHandle,
    frames: u64,
    skipped: u64,
}

impl<C: Clock, S: ScoreStore> FrameLoop<C, S> {
    pub fn new(game: GameState, clock: C, store: S) -> Self {
        Self {
            game,
            clock,
            store,
            snapshot: GameSnapshot::default(),
            actions: Vec::with_capacity(16),
            cancel: CancelHandle::default(),
            frames: 0,
            skipped: 0,
        }
    }

    /// New game seeded with `seed`, best score read from `store`.
    pub fn with_store(seed: u32, clock: C, store: S) -> Self {
        let best = read_best(&store);
        tracing::info!(seed, best, "loaded best score");
        Self::new(GameState::new(seed).with_best(best), clock, store)
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Snapshot presented by the most recent frame.
    pub fn last_snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn skipped_frames(&self) -> u64 {
        self.skipped
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Apply a host action at the current clock time.
    pub fn apply(&mut self, action: GameAction) {
        let now = self.clock.now_ms();
        self.game.apply_action(action, now);
    }

    /// Produce one frame: update, persist, present.
    ///
    /// Returns false when the sink was not ready and the frame was skipped
    /// entirely (no update, no present).
    pub fn step<K: FrameSink>(&mut self, sink: &mut K) -> Result<bool> {
        if !sink.is_ready() {
            self.skipped += 1;
            tracing::trace!(skipped = self.skipped, "surface not ready, frame skipped");
            return Ok(false);
        }

        let now = self.clock.now_ms();
        let before = self.game.status();
        self.game.frame(now);
        if self.game.status() != before {
            tracing::debug!(
                from = before.as_str(),
                to = self.game.status().as_str(),
                "status changed"
            );
        }
        self.persist_events();

        self.game.snapshot_into(&mut self.snapshot);
        sink.present(&self.snapshot)?;
        self.frames += 1;
        Ok(true)
    }

    /// Run until cancelled or the scheduler asks to quit.
    pub fn run<P: FrameScheduler, K: FrameSink>(
        &mut self,
        scheduler: &mut P,
        sink: &mut K,
    ) -> Result<()> {
        tracing::info!(seed = self.game.seed(), "frame loop started");

        while !self.cancel.is_cancelled() {
            self.step(sink)?;

            self.actions.clear();
            let wait = scheduler.wait_for_frame(&mut self.actions)?;

            let now = self.clock.now_ms();
            for &action in &self.actions {
                tracing::trace!(action = action.as_str(), status = self.game.status().as_str(), "input");
                self.game.apply_action(action, now);
            }

            if wait == FrameWait::Quit {
                self.cancel.cancel();
            }
        }

        tracing::info!(
            frames = self.frames,
            skipped = self.skipped,
            best = self.game.best(),
            "frame loop stopped"
        );
        Ok(())
    }

    fn persist_events(&mut self) {
        while let Some(event) = self.game.take_last_event() {
            match event {
                CoreEvent::NewBest(best) => match write_best(&mut self.store, best) {
                    Ok(()) => tracing::info!(best, "new best score saved"),
                    Err(err) => tracing::warn!(best, error = %err, "failed to save best score"),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::store::MemoryStore;
    use crate::types::{GameStatus, BEST_SCORE_KEY, BIRD_RADIUS, BIRD_X, PIPE_SPEED, WORLD_HEIGHT};

    /// Replays a fixed list of (clock advance, actions) entries, then quits.
    struct ScriptedScheduler {
        clock: ManualClock,
        script: Vec<(u64, Vec<GameAction>)>,
        cursor: usize,
    }

    impl ScriptedScheduler {
        fn new(clock: ManualClock, script: Vec<(u64, Vec<GameAction>)>) -> Self {
            Self {
                clock,
                script,
                cursor: 0,
            }
        }
    }

    impl FrameScheduler for ScriptedScheduler {
        fn wait_for_frame(&mut self, actions: &mut Vec<GameAction>) -> Result<FrameWait> {
            let Some((advance, batch)) = self.script.get(self.cursor) else {
                return Ok(FrameWait::Quit);
            };
            self.cursor += 1;
            self.clock.advance(*advance);
            actions.extend(batch.iter().copied());
            Ok(FrameWait::Continue)
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        not_ready: bool,
        frames: Vec<GameSnapshot>,
    }

    impl FrameSink for RecordingSink {
        fn is_ready(&self) -> bool {
            !self.not_ready
        }

        fn present(&mut self, snap: &GameSnapshot) -> Result<()> {
            self.frames.push(snap.clone());
            Ok(())
        }
    }

    struct FailingStore;

    impl ScoreStore for FailingStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            anyhow::bail!("disk full")
        }
    }

    fn new_loop(clock: &ManualClock) -> FrameLoop<ManualClock, MemoryStore> {
        FrameLoop::with_store(7, clock.clone(), MemoryStore::new())
    }

    /// Flap whenever the bird sinks below the gap of the next gate ahead.
    fn autopilot(game: &GameState) -> bool {
        let target = game
            .pipes()
            .iter()
            .find(|p| p.right() > BIRD_X - BIRD_RADIUS)
            .map(|p| p.gap_y)
            .unwrap_or(WORLD_HEIGHT * 0.45);
        game.bird().y > target
    }

    #[test]
    fn first_frame_presents_start_screen() {
        let clock = ManualClock::new(0);
        let mut frame_loop = new_loop(&clock);
        let mut sink = RecordingSink::default();

        assert!(frame_loop.step(&mut sink).unwrap());
        assert_eq!(sink.frames.len(), 1);
        assert_eq!(sink.frames[0].status, GameStatus::Start);
        assert_eq!(frame_loop.frames(), 1);
    }

    #[test]
    fn present_observes_post_update_state() {
        let clock = ManualClock::new(0);
        let mut frame_loop = new_loop(&clock);
        let mut sink = RecordingSink::default();

        frame_loop.apply(GameAction::Flap);
        frame_loop.step(&mut sink).unwrap();
        clock.advance(16);
        frame_loop.step(&mut sink).unwrap();

        assert_eq!(sink.frames.last().unwrap(), &frame_loop.game().snapshot());
        assert_eq!(frame_loop.last_snapshot(), &frame_loop.game().snapshot());
    }

    #[test]
    fn unready_sink_skips_update_and_present() {
        let clock = ManualClock::new(0);
        let mut frame_loop = new_loop(&clock);
        let mut sink = RecordingSink::default();

        frame_loop.apply(GameAction::Flap);
        frame_loop.step(&mut sink).unwrap();
        let before = frame_loop.game().bird();

        sink.not_ready = true;
        clock.advance(16);
        assert!(!frame_loop.step(&mut sink).unwrap());
        assert_eq!(frame_loop.game().bird(), before);
        assert_eq!(sink.frames.len(), 1);
        assert_eq!(frame_loop.skipped_frames(), 1);

        sink.not_ready = false;
        clock.advance(16);
        assert!(frame_loop.step(&mut sink).unwrap());
        assert_ne!(frame_loop.game().bird(), before);
    }

    #[test]
    fn run_applies_script_until_quit() {
        let clock = ManualClock::new(0);
        let mut frame_loop = new_loop(&clock);
        let mut sink = RecordingSink::default();
        let mut scheduler = ScriptedScheduler::new(
            clock.clone(),
            vec![(16, vec![GameAction::Flap]), (16, vec![]), (16, vec![])],
        );

        frame_loop.run(&mut scheduler, &mut sink).unwrap();

        let statuses: Vec<_> = sink.frames.iter().map(|s| s.status).collect();
        assert_eq!(
            statuses,
            vec![
                GameStatus::Start,
                GameStatus::Running,
                GameStatus::Running,
                GameStatus::Running
            ]
        );
        assert!(frame_loop.cancel_handle().is_cancelled());
    }

    #[test]
    fn cancelled_loop_produces_no_frames() {
        let clock = ManualClock::new(0);
        let mut frame_loop = new_loop(&clock);
        let mut sink = RecordingSink::default();
        let mut scheduler = ScriptedScheduler::new(clock.clone(), vec![(16, vec![])]);

        frame_loop.cancel_handle().cancel();
        frame_loop.run(&mut scheduler, &mut sink).unwrap();
        assert!(sink.frames.is_empty());
    }

    #[test]
    fn visibility_resume_does_not_inflate_delta() {
        let clock = ManualClock::new(0);
        let mut frame_loop = new_loop(&clock);
        let mut sink = RecordingSink::default();
        let mut scheduler = ScriptedScheduler::new(
            clock.clone(),
            vec![
                (16, vec![GameAction::Flap]),
                (16, vec![GameAction::Hidden]),
                (5_000, vec![]),
                (5_000, vec![GameAction::Visible]),
                (16, vec![]),
            ],
        );

        frame_loop.run(&mut scheduler, &mut sink).unwrap();

        let f = &sink.frames;
        assert_eq!(f[2].status, GameStatus::Paused);
        assert!(f[2].paused_while_hidden);
        assert_eq!(f[3].status, GameStatus::Paused);
        assert_eq!(f[4].status, GameStatus::Running);
        // Resume frame sees a zero delta, the following one a normal step.
        assert_eq!(f[4].ground_offset, f[3].ground_offset);
        let step = f[5].ground_offset - f[4].ground_offset;
        assert!((step - PIPE_SPEED * 0.016).abs() < 1e-3, "step was {step}");
    }

    #[test]
    fn new_best_is_persisted_on_game_over() {
        let clock = ManualClock::new(0);
        let mut frame_loop = new_loop(&clock);
        let mut sink = RecordingSink::default();

        frame_loop.apply(GameAction::Flap);
        frame_loop.step(&mut sink).unwrap();

        // Fly through the first gate, then stop flapping.
        let mut frames = 0;
        while frame_loop.game().status() == GameStatus::Running && frames < 5_000 {
            if frame_loop.game().score() == 0 && autopilot(frame_loop.game()) {
                frame_loop.apply(GameAction::Flap);
            }
            clock.advance(16);
            frame_loop.step(&mut sink).unwrap();
            frames += 1;
        }

        let game = frame_loop.game();
        assert_eq!(game.status(), GameStatus::GameOver);
        assert!(game.score() >= 1);
        assert_eq!(game.best(), game.score());
        assert_eq!(
            frame_loop.store().get(BEST_SCORE_KEY),
            Some(game.score().to_string())
        );
    }

    #[test]
    fn best_is_loaded_from_store() {
        let clock = ManualClock::new(0);
        let store = MemoryStore::new().with_record(BEST_SCORE_KEY, "12");
        let frame_loop = FrameLoop::with_store(1, clock, store);
        assert_eq!(frame_loop.game().best(), 12);
    }

    #[test]
    fn failed_persist_does_not_stop_play() {
        let clock = ManualClock::new(0);
        let mut frame_loop = FrameLoop::with_store(7, clock.clone(), FailingStore);
        let mut sink = RecordingSink::default();

        frame_loop.apply(GameAction::Flap);
        let mut frames = 0;
        while frame_loop.game().status() != GameStatus::GameOver && frames < 5_000 {
            if frame_loop.game().score() == 0 && autopilot(frame_loop.game()) {
                frame_loop.apply(GameAction::Flap);
            }
            clock.advance(16);
            frame_loop.step(&mut sink).unwrap();
            frames += 1;
        }

        assert_eq!(frame_loop.game().status(), GameStatus::GameOver);
        assert!(frame_loop.game().best() >= 1);

        // Restart works after the failed write.
        frame_loop.apply(GameAction::Flap);
        assert_eq!(frame_loop.game().status(), GameStatus::Running);
    }
}
