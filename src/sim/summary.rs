//! End-of-run summary and achievement predicates
//!
//! The core never owns cross-run storage. It is handed a [`RunSeed`] at reset
//! and hands back a [`RunSummary`] when the run ends.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Achievements, evaluated once per run end
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Achievement {
    #[serde(rename = "s100")]
    Score100,
    #[serde(rename = "s300")]
    Score300,
    #[serde(rename = "s600")]
    Score600,
    #[serde(rename = "c10")]
    Coins10Lifetime,
}

impl Achievement {
    pub const ALL: [Achievement; 4] = [
        Achievement::Score100,
        Achievement::Score300,
        Achievement::Score600,
        Achievement::Coins10Lifetime,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Achievement::Score100 => "s100",
            Achievement::Score300 => "s300",
            Achievement::Score600 => "s600",
            Achievement::Coins10Lifetime => "c10",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Achievement::Score100 => "Reach 100 score",
            Achievement::Score300 => "Reach 300 score",
            Achievement::Score600 => "Reach 600 score",
            Achievement::Coins10Lifetime => "Collect 10 coins (lifetime)",
        }
    }

    /// `lifetime_coins` already includes the coins of the finished run
    pub fn is_met(&self, score: u64, lifetime_coins: u64) -> bool {
        match self {
            Achievement::Score100 => score >= 100,
            Achievement::Score300 => score >= 300,
            Achievement::Score600 => score >= 600,
            Achievement::Coins10Lifetime => lifetime_coins >= 10,
        }
    }
}

/// Cross-run values supplied by the persistence collaborator at reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSeed {
    pub best_score: u64,
    pub lifetime_coins: u64,
}

impl RunSeed {
    pub fn new(best_score: u64, lifetime_coins: u64) -> Self {
        Self {
            best_score,
            lifetime_coins,
        }
    }

    /// Build a seed from raw stored strings. Missing or corrupt values count as zero.
    pub fn from_raw(best_score: Option<&str>, lifetime_coins: Option<&str>) -> Self {
        Self {
            best_score: best_score.map(parse_count).unwrap_or(0),
            lifetime_coins: lifetime_coins.map(parse_count).unwrap_or(0),
        }
    }
}

/// Lenient counter parsing: accepts integers and finite non-negative decimals
pub fn parse_count(raw: &str) -> u64 {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u64>() {
        return n;
    }
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => n.floor() as u64,
        _ => {
            log::warn!("Ignoring malformed stored counter {raw:?}");
            0
        }
    }
}

/// Final result of a run, emitted once per Ended transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u64,
    pub coins: u32,
    #[serde(rename = "achievementsUnlocked")]
    pub achievements: BTreeSet<Achievement>,
    /// Best score after this run
    pub best_score: u64,
    pub new_best: bool,
    /// Lifetime coin total including this run
    pub lifetime_coins: u64,
    /// Ticks the run lasted
    pub ticks: u64,
}

impl RunSummary {
    pub fn evaluate(score: u64, coins: u32, ticks: u64, seed: &RunSeed) -> Self {
        let lifetime_coins = seed.lifetime_coins.saturating_add(coins as u64);
        let achievements = Achievement::ALL
            .into_iter()
            .filter(|a| a.is_met(score, lifetime_coins))
            .collect();
        let new_best = score > seed.best_score;

        Self {
            score,
            coins,
            achievements,
            best_score: seed.best_score.max(score),
            new_best,
            lifetime_coins,
            ticks,
        }
    }

    /// Brag line for sharing
    pub fn share_text(&self) -> String {
        format!(
            "I scored {} and collected {} coins in Sky Runner! Can you beat me?",
            self.score, self.coins
        )
    }
}
