//! High score leaderboard
//!
//! Keeps the top 10 runs. The session's `best` is seeded from the top entry
//! at boot, so the best score survives restarts.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, Store};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "seahorse_dash_highscores";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a score; returns the rank achieved (1-indexed) if it made the board
    pub fn add_score(&mut self, score: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry { score, timestamp };

        // Ties go below existing entries
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    pub fn load<S: Store + ?Sized>(store: &S) -> Self {
        let mut scores: Self = persistence::load_json_or_default(store, Self::STORAGE_KEY);
        // Hand-edited files may be out of order
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        log::info!("Loaded {} high scores", scores.entries.len());
        scores
    }

    pub fn save<S: Store + ?Sized>(&self, store: &mut S) {
        match persistence::save_json(store, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("High scores saved ({} entries)", self.entries.len()),
            Err(e) => log::warn!("High scores not saved: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_zero_never_qualifies() {
        assert!(!HighScores::new().qualifies(0));
    }

    #[test]
    fn test_ranks_descending() {
        let mut hs = HighScores::new();
        assert_eq!(hs.add_score(5, 1.0), Some(1));
        assert_eq!(hs.add_score(9, 2.0), Some(1));
        assert_eq!(hs.add_score(7, 3.0), Some(2));
        assert_eq!(hs.add_score(5, 4.0), Some(4));
        let scores: Vec<_> = hs.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![9, 7, 5, 5]);
        assert_eq!(hs.top_score(), Some(9));
    }

    #[test]
    fn test_board_is_capped() {
        let mut hs = HighScores::new();
        for s in 1..=15 {
            hs.add_score(s, s as f64);
        }
        assert_eq!(hs.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(hs.entries.last().map(|e| e.score), Some(6));
        assert!(!hs.qualifies(6));
        assert!(hs.qualifies(7));
    }

    #[test]
    fn test_persist_roundtrip() {
        let mut store = MemoryStore::new();
        let mut hs = HighScores::new();
        hs.add_score(12, 100.0);
        hs.add_score(3, 200.0);
        hs.save(&mut store);

        let loaded = HighScores::load(&store);
        assert_eq!(loaded.entries, hs.entries);
    }

    #[test]
    fn test_load_sorts_entries() {
        let mut store = MemoryStore::new();
        store
            .save(
                HighScores::STORAGE_KEY,
                r#"{"entries":[{"score":2,"timestamp":0.0},{"score":8,"timestamp":1.0}]}"#,
            )
            .unwrap();
        assert_eq!(HighScores::load(&store).top_score(), Some(8));
    }
}
