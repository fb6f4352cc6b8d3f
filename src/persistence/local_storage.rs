//! Browser LocalStorage backend

use super::{HighScoreStore, StoreError, parse_score};

/// Stores the high score as a decimal string under one key
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub const DEFAULT_KEY: &'static str = "monkeyMayhemHighScore";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load_high_score(&self) -> Result<Option<u64>, StoreError> {
        let raw = Self::storage()?
            .get_item(&self.key)
            .map_err(|_| StoreError::Unavailable)?;
        raw.map(|s| parse_score(&s)).transpose()
    }

    fn save_high_score(&mut self, score: u64) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(&self.key, &score.to_string())
            .map_err(|_| StoreError::WriteRejected)
    }
}
