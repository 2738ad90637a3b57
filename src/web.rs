//! Browser host bindings
//!
//! JavaScript drives `tick()` from `requestAnimationFrame`, forwards input,
//! paints `snapshot()` and plays the tones returned by `drain_cues()`.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::audio::Tone;
use crate::game::Game;
use crate::persistence::{LocalStorageStore, ProfileSink, ProfileStore};
use crate::settings::Settings;
use crate::sim::CueEvent;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Sky Runner (web) starting...");
}

/// A cue paired with the tone to play for it
#[derive(Serialize)]
struct CueOut {
    #[serde(flatten)]
    cue: CueEvent,
    tone: Option<Tone>,
}

#[wasm_bindgen]
pub struct SkyRunner {
    game: Game,
}

#[wasm_bindgen]
impl SkyRunner {
    #[wasm_bindgen(constructor)]
    pub fn new() -> SkyRunner {
        let seed = LocalStorageStore::new().load_or_default().seed();
        let game = Game::new(Tuning::default(), Settings::load(), seed)
            .with_sink(ProfileSink::new(LocalStorageStore::new()));
        SkyRunner { game }
    }

    pub fn tick(&mut self) {
        self.game.tick();
    }

    pub fn request_jump(&mut self) {
        self.game.request_jump();
    }

    pub fn set_slide(&mut self, on: bool) {
        self.game.set_slide(on);
    }

    pub fn request_pause(&mut self) {
        self.game.request_pause();
    }

    pub fn request_resume(&mut self) {
        self.game.request_resume();
    }

    pub fn toggle_pause(&mut self) {
        self.game.toggle_pause();
    }

    /// Start a new run seeded from the stored profile
    pub fn reset(&mut self) {
        let seed = LocalStorageStore::new().load_or_default().seed();
        self.game.reset(seed);
    }

    pub fn toggle_sound(&mut self) {
        let mut settings = self.game.settings().clone();
        settings.sound = !settings.sound;
        settings.save();
        self.game.set_settings(settings);
    }

    pub fn toggle_theme(&mut self) -> String {
        let mut settings = self.game.settings().clone();
        settings.theme = settings.theme.toggled();
        settings.save();
        let theme = settings.theme.as_str().to_string();
        self.game.set_settings(settings);
        theme
    }

    pub fn snapshot_json(&self) -> String {
        self.game.snapshot().to_json()
    }

    /// Cues since the last call, with tones when sound is on
    pub fn drain_cues_json(&mut self) -> String {
        let sound = self.game.settings().sound;
        let cues: Vec<CueOut> = self
            .game
            .drain_cues()
            .into_iter()
            .map(|cue| CueOut {
                tone: sound.then(|| Tone::for_cue(&cue)),
                cue,
            })
            .collect();
        serde_json::to_string(&cues).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn summary_json(&self) -> Option<String> {
        self.game
            .last_summary()
            .and_then(|s| serde_json::to_string(s).ok())
    }

    pub fn share_text(&self) -> Option<String> {
        self.game.last_summary().map(|s| s.share_text())
    }

    pub fn profile_json(&self) -> String {
        let profile = LocalStorageStore::new().load_or_default();
        serde_json::to_string(&profile).unwrap_or_default()
    }
}

impl Default for SkyRunner {
    fn default() -> Self {
        Self::new()
    }
}
