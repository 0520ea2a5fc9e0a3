//! Flap Combat terminal runner.
//!
//! Reads configuration from `FLAP_*` variables and flags, loads the best
//! score, then hands the terminal to the frame loop until the player quits.

use anyhow::Result;

use flap_combat::config::AppConfig;
use flap_combat::engine::{FrameLoop, SystemClock};
use flap_combat::input::TerminalScheduler;
use flap_combat::logging;
use flap_combat::store::FileStore;
use flap_combat::term::TerminalSurface;

fn main() -> Result<()> {
    let mut config = AppConfig::from_env();
    let args: Vec<String> = std::env::args().skip(1).collect();
    config.apply_args(&args)?;

    logging::init(config.log_path.as_deref(), &config.log_level)?;
    tracing::info!(seed = config.seed, frame_ms = config.frame_ms, "starting");

    let store = match &config.best_score_path {
        Some(path) => FileStore::open(path)?,
        None => FileStore::open_default()?,
    };
    tracing::debug!(path = %store.path().display(), "best score store");

    let mut surface = TerminalSurface::new();
    surface.enter()?;

    let result = run(&config, store, &mut surface);

    // Always try to restore terminal state.
    let _ = surface.exit();
    if let Err(err) = &result {
        tracing::error!(error = %err, "exited with error");
    }
    result
}

fn run(config: &AppConfig, store: FileStore, surface: &mut TerminalSurface) -> Result<()> {
    let mut frame_loop = FrameLoop::with_store(config.seed, SystemClock::new(), store);
    let mut scheduler = TerminalScheduler::new(config.frame_ms);
    frame_loop.run(&mut scheduler, surface)
}
