//! JSON file backend for native builds

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{HighScoreStore, StoreError};

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u64,
}

/// Stores `{"high_score": n}` at a fixed path
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for FileStore {
    fn load_high_score(&self) -> Result<Option<u64>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let file: HighScoreFile =
            serde_json::from_str(&json).map_err(|e| StoreError::Malformed(e.to_string()))?;
        Ok(Some(file.high_score))
    }

    fn save_high_score(&mut self, score: u64) -> Result<(), StoreError> {
        let json = serde_json::to_string(&HighScoreFile { high_score: score })
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        // Write-then-rename so a crash never leaves a torn file
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
