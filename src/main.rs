//! Sky Runner entry point
//!
//! Native builds run a headless autopilot session against a profile file.
//! The browser build is driven from JavaScript through `sky_runner::web`.
//!
//! Usage: `sky-runner [seed] [max_ticks] [profile.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sky_runner::persistence::{JsonFileStore, ProfileSink, ProfileStore};
    use sky_runner::sim::{GameRng, RunPhase, TickInput};
    use sky_runner::{Game, Settings, Tuning};

    env_logger::init();
    log::info!("Sky Runner (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok());
    let max_ticks = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(60 * 60 * 5);
    let profile_path = args
        .next()
        .unwrap_or_else(|| "sky_runner_profile.json".to_string());

    let tuning = match std::env::var("SKY_RUNNER_TUNING") {
        Ok(json) => Tuning::from_json(&json),
        Err(_) => Tuning::default(),
    };

    let store = JsonFileStore::new(&profile_path);
    let profile = store.load_or_default();
    log::info!(
        "Profile: best {} / lifetime coins {} / {} achievements",
        profile.best_score,
        profile.lifetime_coins,
        profile.achievements.len()
    );

    let dice = match seed {
        Some(seed) => GameRng::seeded(seed),
        None => GameRng::from_entropy(),
    };
    let mut game = Game::new(tuning, Settings::load(), profile.seed())
        .with_dice(dice)
        .with_sink(ProfileSink::new(store));

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    while game.phase() == RunPhase::Playing && game.state().tick < max_ticks {
        game.tick_with(&input);
        for cue in game.drain_cues() {
            log::trace!("cue {} {:?}", cue.name(), cue.pitch());
        }
    }

    match game.last_summary() {
        Some(summary) => {
            println!("{}", summary.share_text());
            match serde_json::to_string_pretty(summary) {
                Ok(json) => println!("{json}"),
                Err(err) => log::warn!("Could not encode summary: {err}"),
            }
        }
        None => println!(
            "Survived {} ticks: score {} coins {}",
            game.state().tick,
            game.state().score,
            game.state().coins
        ),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `sky_runner::web::start`, this is just to satisfy the compiler
}
