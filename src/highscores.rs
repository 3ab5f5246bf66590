//! Best-score tracking
//!
//! A single persisted scalar, stored through the host's key/value store.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, KeyValueStore};

/// Best score across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Check if a score beats the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run's score. Returns true if it set a new best.
    pub fn submit(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Load from the store (0 if missing or unreadable)
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let best = persistence::load_high_score(store);
        log::info!("Loaded high score {best}");
        Self { best }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        persistence::save_high_score(store, self.best);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_submit_only_on_improvement() {
        let mut hs = HighScore::new(50);
        assert!(!hs.submit(50));
        assert!(!hs.submit(20));
        assert!(hs.submit(60));
        assert_eq!(hs.best, 60);
    }

    #[test]
    fn test_zero_never_qualifies() {
        assert!(!HighScore::default().qualifies(0));
        assert!(HighScore::default().qualifies(10));
    }

    #[test]
    fn test_load_save() {
        let mut store = MemoryStore::new();
        assert_eq!(HighScore::load(&store).best, 0);
        HighScore::new(90).save(&mut store);
        assert_eq!(HighScore::load(&store), HighScore::new(90));
    }
}
