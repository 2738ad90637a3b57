//! Cross-run player profile

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::highscores::HighScores;
use crate::sim::{Achievement, RunSeed, RunSummary};

/// Everything remembered between runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub best_score: u64,
    pub lifetime_coins: u64,
    pub achievements: BTreeSet<Achievement>,
    pub high_scores: HighScores,
}

impl Profile {
    /// Values the simulation needs at reset
    pub fn seed(&self) -> RunSeed {
        RunSeed::new(self.best_score, self.lifetime_coins)
    }

    /// Fold a finished run in. Returns the leaderboard rank, if any.
    pub fn record(&mut self, summary: &RunSummary, timestamp: f64) -> Option<usize> {
        self.best_score = self.best_score.max(summary.score);
        self.lifetime_coins = self.lifetime_coins.saturating_add(summary.coins as u64);
        self.achievements.extend(summary.achievements.iter().copied());
        self.high_scores
            .add_score(summary.score, summary.coins, timestamp)
    }

    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        self.achievements.contains(&achievement)
    }

    /// Parse stored JSON; corrupt data counts as a fresh profile
    pub fn from_json_lenient(json: &str) -> Self {
        match serde_json::from_str::<Profile>(json) {
            Ok(mut profile) => {
                profile.high_scores.normalize();
                profile
            }
            Err(err) => {
                log::warn!("Discarding corrupt profile ({err})");
                Self::default()
            }
        }
    }
}
