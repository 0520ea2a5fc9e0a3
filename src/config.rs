//! Runtime configuration from the environment and command line.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use crate::types::FRAME_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub seed: u32,
    pub frame_ms: u32,
    /// Best-score file; `None` means the platform data directory.
    pub best_score_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            frame_ms: FRAME_MS,
            best_score_path: None,
            log_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Create from `FLAP_*` environment variables.
    ///
    /// Unparseable numbers fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("FLAP_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let frame_ms = lookup("FLAP_FRAME_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(defaults.frame_ms);

        let best_score_path = non_empty(lookup("FLAP_BEST_SCORE_PATH")).map(PathBuf::from);
        let log_path = non_empty(lookup("FLAP_LOG_PATH")).map(PathBuf::from);
        let log_level = non_empty(lookup("FLAP_LOG_LEVEL")).unwrap_or(defaults.log_level);

        Self {
            seed,
            frame_ms,
            best_score_path,
            log_path,
            log_level,
        }
    }

    /// Override fields from command-line arguments (program name excluded).
    pub fn apply_args(&mut self, args: &[String]) -> Result<()> {
        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --seed"))?;
                    self.seed = v
                        .parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
                }
                "--frame-ms" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --frame-ms"))?;
                    self.frame_ms = v
                        .parse::<u32>()
                        .ok()
                        .filter(|&ms| ms > 0)
                        .ok_or_else(|| anyhow!("invalid --frame-ms value: {}", v))?;
                }
                "--best-file" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --best-file"))?;
                    self.best_score_path = Some(PathBuf::from(v));
                }
                other => {
                    return Err(anyhow!("unknown argument: {}", other));
                }
            }
            i += 1;
        }
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn clock_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32) ^ now.subsec_nanos()
}
