//! Browser LocalStorage backend (WASM only)

use web_sys::Storage;

use super::{Profile, ProfileStore, StoreError};
use crate::sim::RunSeed;

/// Profile stored as JSON under a single LocalStorage key
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "sky_runner_profile";
    /// Bare counters written by older builds
    const LEGACY_BEST_KEY: &'static str = "sr-best";
    const LEGACY_COINS_KEY: &'static str = "sr-coins-total";

    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("no LocalStorage".to_string()))
    }

    fn get(storage: &Storage, key: &str) -> Option<String> {
        storage.get_item(key).ok().flatten()
    }
}

impl ProfileStore for LocalStorageStore {
    fn load(&self) -> Result<Profile, StoreError> {
        let storage = Self::storage()?;

        if let Some(json) = Self::get(&storage, Self::STORAGE_KEY) {
            return Ok(Profile::from_json_lenient(&json));
        }

        let best = Self::get(&storage, Self::LEGACY_BEST_KEY);
        let coins = Self::get(&storage, Self::LEGACY_COINS_KEY);
        let seed = RunSeed::from_raw(best.as_deref(), coins.as_deref());
        log::info!("No profile found, migrated legacy counters {seed:?}");
        Ok(Profile {
            best_score: seed.best_score,
            lifetime_coins: seed.lifetime_coins,
            ..Profile::default()
        })
    }

    fn save(&mut self, profile: &Profile) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        let json = serde_json::to_string(profile)?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| StoreError::Unavailable("LocalStorage write rejected".to_string()))?;
        log::info!("Profile saved ({} leaderboard entries)", profile.high_scores.entries.len());
        Ok(())
    }
}
