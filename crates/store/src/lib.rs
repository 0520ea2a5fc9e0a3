//! Best-score persistence.
//!
//! The engine only needs a tiny key-value collaborator: read one record at
//! startup, write it when a session beats it. [`ScoreStore`] is that seam.
//! [`FileStore`] keeps the records in a JSON file under the platform data
//! directory; [`MemoryStore`] backs tests and headless runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

pub use flap_combat_types as types;

use types::BEST_SCORE_KEY;

/// Key-value persistence collaborator.
pub trait ScoreStore {
    /// Raw stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Durably store `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Parse a stored best score.
///
/// Missing, malformed, non-finite and negative values read as 0; fractional
/// values are floored.
pub fn parse_best(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return 0;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => v.floor().clamp(0.0, u32::MAX as f64) as u32,
        _ => 0,
    }
}

/// Read the best score from a store.
pub fn read_best(store: &dyn ScoreStore) -> u32 {
    parse_best(store.get(BEST_SCORE_KEY).as_deref())
}

/// Persist a new best score.
pub fn write_best(store: &mut dyn ScoreStore, best: u32) -> Result<()> {
    store.set(BEST_SCORE_KEY, &best.to_string())
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, key: &str, value: &str) -> Self {
        self.records.insert(key.to_string(), value.to_string());
        self
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.records.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Records {
    #[serde(flatten)]
    entries: BTreeMap<String, String>,
}

/// JSON file store.
///
/// The whole file is rewritten on every `set`. A missing or unreadable file
/// behaves like an empty store so a corrupt record never blocks play.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    records: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at the platform data directory.
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "flap-combat")
            .ok_or_else(|| anyhow!("could not determine data directory"))?;
        Self::open(dirs.data_dir().join("scores.json"))
    }

    /// Open (or lazily create) the store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = match fs::read(&path) {
            Ok(bytes) => match parse_records(&bytes) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "ignoring malformed score file");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                return Err(err).with_context(|| format!("reading {}", path.display()));
            }
        };
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        let body = serde_json::to_string_pretty(&Records {
            entries: self.records.clone(),
        })?;
        // A torn write must never replace the last good file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

fn parse_records(bytes: &[u8]) -> Result<BTreeMap<String, String>> {
    let text = std::str::from_utf8(bytes).context("score file is not valid UTF-8")?;
    let records: Records = serde_json::from_str(text)?;
    Ok(records.entries)
}

impl ScoreStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.records.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.records.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("flap-combat-store-{}-{}", std::process::id(), name))
            .join("scores.json")
    }

    #[test]
    fn parse_best_clamps_malformed_values() {
        assert_eq!(parse_best(None), 0);
        assert_eq!(parse_best(Some("")), 0);
        assert_eq!(parse_best(Some("abc")), 0);
        assert_eq!(parse_best(Some("-5")), 0);
        assert_eq!(parse_best(Some("NaN")), 0);
        assert_eq!(parse_best(Some("inf")), 0);
        assert_eq!(parse_best(Some("12")), 12);
        assert_eq!(parse_best(Some(" 7 ")), 7);
        assert_eq!(parse_best(Some("9.8")), 9);
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(read_best(&store), 0);
        write_best(&mut store, 14).unwrap();
        assert_eq!(read_best(&store), 14);
        assert_eq!(store.get(BEST_SCORE_KEY).as_deref(), Some("14"));
    }

    #[test]
    fn memory_store_seeded_with_garbage_reads_zero() {
        let store = MemoryStore::new().with_record(BEST_SCORE_KEY, "lots");
        assert_eq!(read_best(&store), 0);
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let path = temp_path("reopen");
        let _ = fs::remove_file(&path);

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(read_best(&store), 0);
        write_best(&mut store, 21).unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(read_best(&reopened), 21);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn file_store_ignores_malformed_file() {
        let path = temp_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(read_best(&store), 0);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn file_store_ignores_non_utf8_file() {
        let path = temp_path("non-utf8");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, [0xff, 0xfe, 0x00, 0x7b]).unwrap();

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(read_best(&store), 0);

        // The next write replaces the bad file.
        write_best(&mut store, 5).unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(read_best(&reopened), 5);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn file_store_write_leaves_no_temp_file() {
        let path = temp_path("atomic");
        let _ = fs::remove_file(&path);

        let mut store = FileStore::open(&path).unwrap();
        write_best(&mut store, 3).unwrap();
        write_best(&mut store, 8).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(read_best(&FileStore::open(&path).unwrap()), 8);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
