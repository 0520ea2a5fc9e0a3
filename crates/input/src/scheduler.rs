//! Frame pacing against the terminal event queue.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use crate::engine::{FrameScheduler, FrameWait};
use crate::map::{handle_event, should_quit};
use crate::types::GameAction;

/// Polls crossterm until the next frame is due.
pub struct TerminalScheduler {
    frame: Duration,
    next_frame: Instant,
}

impl TerminalScheduler {
    pub fn new(frame_ms: u32) -> Self {
        let frame = Duration::from_millis(frame_ms.max(1) as u64);
        Self {
            frame,
            next_frame: Instant::now() + frame,
        }
    }
}

impl FrameScheduler for TerminalScheduler {
    fn wait_for_frame(&mut self, actions: &mut Vec<GameAction>) -> Result<FrameWait> {
        loop {
            let timeout = self
                .next_frame
                .checked_duration_since(Instant::now())
                .unwrap_or(Duration::ZERO);

            if !event::poll(timeout)? {
                break;
            }

            let ev = event::read()?;
            if let Event::Key(key) = ev {
                if key.kind == KeyEventKind::Press && should_quit(key) {
                    return Ok(FrameWait::Quit);
                }
            }
            if let Some(action) = handle_event(&ev) {
                actions.push(action);
            }
        }

        // Don't try to catch up after a stall; resume the cadence from now.
        let now = Instant::now();
        self.next_frame += self.frame;
        if self.next_frame <= now {
            self.next_frame = now + self.frame;
        }
        Ok(FrameWait::Continue)
    }
}
