//! Profile persistence
//!
//! Features:
//! - Versionless JSON profile (best score, lifetime coins, achievements, leaderboard)
//! - Atomic-ish file saves (write tmp, then rename)
//! - Corruption treated as a fresh profile
//!
//! Storage failures never reach the simulation: the game logs and carries on.

pub mod profile;

#[cfg(target_arch = "wasm32")]
pub mod local_storage;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use profile::Profile;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use crate::game::SummarySink;
use crate::sim::RunSummary;

/// Storage failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("profile I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("profile encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Somewhere a profile can live
pub trait ProfileStore {
    fn load(&self) -> Result<Profile, StoreError>;
    fn save(&mut self, profile: &Profile) -> Result<(), StoreError>;

    /// Load, treating any failure as a fresh profile
    fn load_or_default(&self) -> Profile {
        self.load().unwrap_or_else(|err| {
            log::warn!("Profile unavailable ({err}), starting fresh");
            Profile::default()
        })
    }
}

/// In-memory store (tests, headless sessions)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub profile: Profile,
    /// Number of successful saves
    pub saves: usize,
}

impl ProfileStore for MemoryStore {
    fn load(&self) -> Result<Profile, StoreError> {
        Ok(self.profile.clone())
    }

    fn save(&mut self, profile: &Profile) -> Result<(), StoreError> {
        self.profile = profile.clone();
        self.saves += 1;
        Ok(())
    }
}

/// JSON file on disk
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

impl ProfileStore for JsonFileStore {
    fn load(&self) -> Result<Profile, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Profile::default()),
            Err(err) => return Err(err.into()),
        };
        let mut profile: Profile = serde_json::from_str(&json)?;
        profile.high_scores.normalize();
        Ok(profile)
    }

    fn save(&mut self, profile: &Profile) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(profile)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("Profile saved to {}", self.path.display());
        Ok(())
    }
}

/// Summary sink that folds each finished run into a stored profile
#[derive(Debug)]
pub struct ProfileSink<S: ProfileStore> {
    store: S,
}

impl<S: ProfileStore> ProfileSink<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: ProfileStore> SummarySink for ProfileSink<S> {
    fn record(&mut self, summary: &RunSummary) -> Result<(), StoreError> {
        let mut profile = self.store.load_or_default();
        if let Some(rank) = profile.record(summary, now_ms()) {
            log::info!("Run placed #{rank} on the leaderboard");
        }
        self.store.save(&profile)
    }
}

/// Wall-clock time in milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::RunSeed;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sky_runner_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_file_round_trip() {
        let path = temp_path("round_trip");
        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.load().unwrap(), Profile::default());

        let mut profile = Profile::default();
        profile.record(&RunSummary::evaluate(320, 4, 600, &RunSeed::default()), 1.0);
        store.save(&profile).unwrap();
        assert_eq!(store.load().unwrap(), profile);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_errors_but_defaults() {
        let path = temp_path("corrupt");
        fs::write(&path, "{{{").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Json(_))));
        assert_eq!(store.load_or_default(), Profile::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_profile_sink_records() {
        let mut sink = ProfileSink::new(MemoryStore::default());
        let summary = RunSummary::evaluate(700, 12, 900, &RunSeed::default());
        sink.record(&summary).unwrap();
        sink.record(&summary).unwrap();

        let store = sink.into_store();
        assert_eq!(store.saves, 2);
        assert_eq!(store.profile.lifetime_coins, 24);
        assert_eq!(store.profile.best_score, 700);
        assert_eq!(store.profile.high_scores.entries.len(), 2);
        assert_eq!(store.profile.achievements.len(), 4);
    }
}
