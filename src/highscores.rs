//! High score leaderboard
//!
//! Tracks the top 5 runs. Stored as part of the player profile.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score
    pub score: u64,
    /// Coins collected in the run
    #[serde(default)]
    pub coins: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a run to the leaderboard (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't make it.
    pub fn add_score(&mut self, score: u64, coins: u32, timestamp: f64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                coins,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Restore descending order and the size cap after loading foreign data
    pub fn normalize(&mut self) {
        self.entries
            .sort_by(|a, b| b.score.cmp(&a.score).then(a.timestamp.total_cmp(&b.timestamp)));
        self.entries.truncate(MAX_HIGH_SCORES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_sorted() {
        let mut board = HighScores::new();
        assert_eq!(board.add_score(100, 1, 1.0), Some(1));
        assert_eq!(board.add_score(300, 2, 2.0), Some(1));
        assert_eq!(board.add_score(200, 0, 3.0), Some(2));
        let scores: Vec<_> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![300, 200, 100]);
        assert_eq!(board.top_score(), Some(300));
    }

    #[test]
    fn test_cap_and_qualify() {
        let mut board = HighScores::new();
        for s in [50, 40, 30, 20, 10] {
            board.add_score(s, 0, 0.0);
        }
        assert!(!board.qualifies(10));
        assert_eq!(board.add_score(5, 0, 0.0), None);
        assert_eq!(board.potential_rank(35), Some(3));
        assert_eq!(board.add_score(35, 0, 0.0), Some(3));
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.entries.last().map(|e| e.score), Some(20));
    }

    #[test]
    fn test_zero_score_recorded_on_empty_board() {
        let mut board = HighScores::new();
        assert_eq!(board.add_score(0, 0, 0.0), Some(1));
    }

    #[test]
    fn test_normalize() {
        let mut board = HighScores {
            entries: (0..8)
                .map(|i| HighScoreEntry {
                    score: i * 10,
                    coins: 0,
                    timestamp: i as f64,
                })
                .collect(),
        };
        board.normalize();
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.top_score(), Some(70));
    }
}
