//! Progress persistence (load/save of the single progress slot).

use super::types::ProgressRecord;
use crate::error::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

pub trait ProgressStore {
    /// The stored record, or the zero record if absent or unreadable.
    fn load(&self) -> ProgressRecord;

    fn save(&self, record: &ProgressRecord) -> Result<()>;
}

impl<T: ProgressStore + ?Sized> ProgressStore for Arc<T> {
    fn load(&self) -> ProgressRecord {
        (**self).load()
    }

    fn save(&self, record: &ProgressRecord) -> Result<()> {
        (**self).save(record)
    }
}

/// Pretty-printed JSON file, e.g. `~/.dailychess/stats.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self) -> ProgressRecord {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(target: "progress", path = %self.path.display(), "No progress file yet");
                return ProgressRecord::default();
            }
            Err(e) => {
                warn!(target: "progress", path = %self.path.display(), error = %e, "Failed to read progress file");
                return ProgressRecord::default();
            }
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!(target: "progress", path = %self.path.display(), error = %e, "Malformed progress file, starting fresh");
            ProgressRecord::default()
        })
    }

    fn save(&self, record: &ProgressRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, json)?;
        debug!(target: "progress", path = %self.path.display(), total = record.total_solved, streak = record.streak, "Saved progress");
        Ok(())
    }
}

/// In-process store. Used by tests and when no data directory is available.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: Mutex<Option<ProgressRecord>>,
    saves: Mutex<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: ProgressRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
            saves: Mutex::new(0),
        }
    }

    /// The record as last saved (or seeded), if any.
    pub fn snapshot(&self) -> Option<ProgressRecord> {
        self.record
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// How many times `save` was called.
    pub fn save_count(&self) -> u32 {
        *self.saves.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> ProgressRecord {
        self.snapshot().unwrap_or_default()
    }

    fn save(&self, record: &ProgressRecord) -> Result<()> {
        *self.record.lock().unwrap_or_else(|e| e.into_inner()) = Some(record.clone());
        *self.saves.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}
