//! Sky Runner - A side-scrolling jump/duck runner
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (physics, spawning, collisions, run state)
//! - `game`: Host-facing facade (inputs, cue draining, run summaries)
//! - `persistence`: Profile storage (best score, lifetime coins, achievements)
//! - `tuning`: Data-driven game balance
//! - `settings`: Host preferences

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game::{Game, SummarySink};
pub use highscores::HighScores;
pub use settings::{Settings, Theme};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation rate the tuning values are expressed in
    pub const TICKS_PER_SECOND: u32 = 60;

    /// World dimensions (pixels)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 300.0;
    /// Feet line of the runner and base of ground obstacles
    pub const GROUND_Y: f32 = 230.0;
    /// Entities are culled once their right edge passes -OFFSCREEN_MARGIN
    pub const OFFSCREEN_MARGIN: f32 = 10.0;

    /// Runner physics (px/tick, px/tick²)
    pub const GRAVITY: f32 = 0.65;
    pub const JUMP_VELOCITY: f32 = -11.5;
    pub const DOUBLE_JUMP_VELOCITY: f32 = -10.0;
    pub const MAX_JUMPS: u8 = 2;

    /// Runner profiles
    pub const RUNNER_X: f32 = 80.0;
    pub const RUNNER_WIDTH: f32 = 34.0;
    pub const RUNNER_HEIGHT: f32 = 46.0;
    pub const RUNNER_SLIDE_HEIGHT: f32 = 26.0;

    /// World scroll speed
    pub const START_SPEED: f32 = 6.0;
    pub const SPEED_RAMP: f32 = 0.00095;

    /// Scoring
    pub const COIN_SCORE: u64 = 50;
    /// Shield duration (8 seconds)
    pub const SHIELD_TICKS: u32 = 8 * TICKS_PER_SECOND;

    /// Flyers scroll faster than the world
    pub const FLYER_SPEED_FACTOR: f32 = 1.15;
    pub const FLYER_WIDTH: f32 = 28.0;
    pub const FLYER_HEIGHT: f32 = 20.0;

    /// Overhead bar: drawn thickness and the extra hit zone below it
    pub const BAR_THICKNESS: f32 = 10.0;
    pub const BAR_HITZONE_EXTRA: f32 = 26.0;

    /// Round pickups
    pub const COIN_RADIUS: f32 = 8.0;
    pub const POWER_UP_RADIUS: f32 = 10.0;

    /// Shield hits push ground hazards back; flyers go to the sentinel
    pub const SHIELD_PUSHBACK: f32 = 10.0;
    pub const NEUTRALIZED_X: f32 = -999.0;

    /// Maximum live particles
    pub const MAX_PARTICLES: usize = 256;
}
