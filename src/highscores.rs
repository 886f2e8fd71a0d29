//! High score persistence
//!
//! The simulation only ever sees the [`HighScoreStore`] capability. Native
//! builds persist a small JSON record on disk; wasm builds use LocalStorage.
//! Every failure is recoverable: a failed read means "no high score" and a
//! failed write is skipped.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Storage capability for the best score
pub trait HighScoreStore {
    /// Stored best score, or `None` if nothing was saved yet
    fn load_high_score(&self) -> Result<Option<u32>>;

    /// Persist a new best score
    fn save_high_score(&mut self, high_score: u32) -> Result<()>;
}

/// Read the stored high score, treating any failure as 0
pub fn load_or_zero(store: &dyn HighScoreStore) -> u32 {
    match store.load_high_score() {
        Ok(Some(score)) => {
            log::info!("Loaded high score {score}");
            score
        }
        Ok(None) => {
            log::info!("No high score found, starting fresh");
            0
        }
        Err(err) => {
            log::warn!("High score unavailable, starting from 0: {err:#}");
            0
        }
    }
}

/// On-disk record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub high_score: Option<u32>,
    /// Number of successful saves
    pub writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            high_score: Some(high_score),
            writes: 0,
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&self) -> Result<Option<u32>> {
        Ok(self.high_score)
    }

    fn save_high_score(&mut self, high_score: u32) -> Result<()> {
        self.high_score = Some(high_score);
        self.writes += 1;
        Ok(())
    }
}

/// JSON file store: `{ "high_score": n }`
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

impl HighScoreStore for JsonFileStore {
    fn load_high_score(&self) -> Result<Option<u32>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let record: HighScoreRecord = serde_json::from_str(&json)
            .with_context(|| format!("corrupt high score file {}", self.path.display()))?;
        Ok(Some(record.high_score))
    }

    fn save_high_score(&mut self, high_score: u32) -> Result<()> {
        let json = serde_json::to_string(&HighScoreRecord { high_score })?;
        // Write beside the target, then swap in
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        log::info!("High score {high_score} saved to {}", self.path.display());
        Ok(())
    }
}

/// Browser LocalStorage store (wasm only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "coin_run_high_score";

    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| anyhow::anyhow!("LocalStorage unavailable"))
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load_high_score(&self) -> Result<Option<u32>> {
        let storage = Self::storage()?;
        let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) else {
            return Ok(None);
        };
        let record: HighScoreRecord = serde_json::from_str(&json).context("corrupt high score entry")?;
        Ok(Some(record.high_score))
    }

    fn save_high_score(&mut self, high_score: u32) -> Result<()> {
        let storage = Self::storage()?;
        let json = serde_json::to_string(&HighScoreRecord { high_score })?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| anyhow::anyhow!("LocalStorage write rejected"))?;
        log::info!("High score {high_score} saved");
        Ok(())
    }
}
