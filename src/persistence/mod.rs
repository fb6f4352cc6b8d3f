//! High-score persistence
//!
//! Backends:
//! - `MemoryStore`: in-process, used by tests and the headless binary
//! - `FileStore`: JSON file on native targets
//! - `LocalStorageStore`: browser LocalStorage on wasm32
//!
//! Storage is best effort. Callers treat every error as "no stored value" on
//! read and drop failed writes after logging them.

use std::cell::Cell;
use std::rc::Rc;

use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Storage failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored value is malformed: {0}")]
    Malformed(String),
    #[error("storage rejected the write")]
    WriteRejected,
}

/// External key-value home of the single high score
pub trait HighScoreStore {
    /// Stored high score, `None` if nothing has been saved yet
    fn load_high_score(&self) -> Result<Option<u64>, StoreError>;

    fn save_high_score(&mut self, score: u64) -> Result<(), StoreError>;
}

/// Shared view into a [`MemoryStore`] for inspecting it after it was boxed
#[derive(Debug, Clone, Default)]
pub struct MemoryStoreProbe {
    value: Rc<Cell<Option<u64>>>,
    saves: Rc<Cell<u32>>,
}

impl MemoryStoreProbe {
    pub fn value(&self) -> Option<u64> {
        self.value.get()
    }

    /// Number of successful `save_high_score` calls
    pub fn saves(&self) -> u32 {
        self.saves.get()
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    probe: MemoryStoreProbe,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(score: u64) -> Self {
        let store = Self::default();
        store.probe.value.set(Some(score));
        store
    }

    /// Make every read fail with [`StoreError::Unavailable`]
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Make every write fail with [`StoreError::WriteRejected`]
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn probe(&self) -> MemoryStoreProbe {
        self.probe.clone()
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&self) -> Result<Option<u64>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unavailable);
        }
        Ok(self.probe.value.get())
    }

    fn save_high_score(&mut self, score: u64) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::WriteRejected);
        }
        self.probe.value.set(Some(score));
        self.probe.saves.set(self.probe.saves.get() + 1);
        Ok(())
    }
}

/// Parse a stored decimal score
///
/// Reads the leading run of digits after optional whitespace, so `"42.5"`
/// and `"120abc"` load as 42 and 120. Anything without a leading digit is
/// malformed.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn parse_score(raw: &str) -> Result<u64, StoreError> {
    let trimmed = raw.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end]
        .parse::<u64>()
        .map_err(|e| StoreError::Malformed(format!("{raw:?}: {e}")))
}
