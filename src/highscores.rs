//! High score tracking
//!
//! Keeps the best score seen so far and writes it through to a
//! [`HighScoreStore`] whenever a finished run beats it.

use crate::persistence::HighScoreStore;

/// Best score plus the store it is persisted in
pub struct HighScores {
    best: u64,
    store: Box<dyn HighScoreStore>,
}

impl std::fmt::Debug for HighScores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighScores").field("best", &self.best).finish()
    }
}

impl HighScores {
    /// Load the stored high score. Any failure reads as 0.
    pub fn load(store: Box<dyn HighScoreStore>) -> Self {
        let best = match store.load_high_score() {
            Ok(Some(score)) => {
                log::info!("Loaded high score {}", score);
                score
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Could not read high score ({}), using 0", e);
                0
            }
        };
        Self { best, store }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Check if a final score beats the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run's score
    ///
    /// Saves only when the score beats the current best. A failed write is
    /// logged and dropped; the in-memory best still updates.
    /// Returns whether a new high score was set.
    pub fn commit(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }

        self.best = score;
        log::info!("New high score: {}", score);
        if let Err(e) = self.store.save_high_score(score) {
            log::warn!("Could not save high score ({})", e);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_load_defaults() {
        assert_eq!(HighScores::load(Box::new(MemoryStore::new())).best(), 0);
        assert_eq!(HighScores::load(Box::new(MemoryStore::with_value(90))).best(), 90);
        let failing = MemoryStore::with_value(90).failing_reads();
        assert_eq!(HighScores::load(Box::new(failing)).best(), 0);
    }

    #[test]
    fn test_commit_only_when_beaten() {
        let store = MemoryStore::with_value(50);
        let probe = store.probe();
        let mut scores = HighScores::load(Box::new(store));

        assert!(!scores.commit(50));
        assert!(!scores.commit(20));
        assert_eq!(probe.saves(), 0);

        assert!(scores.commit(60));
        assert_eq!(scores.best(), 60);
        assert_eq!(probe.value(), Some(60));
        assert_eq!(probe.saves(), 1);
    }

    #[test]
    fn test_failed_write_is_ignored() {
        let mut scores = HighScores::load(Box::new(MemoryStore::new().failing_writes()));
        assert!(scores.commit(30));
        assert_eq!(scores.best(), 30);
    }
}
