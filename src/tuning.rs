//! Data-driven game balance
//!
//! `Tuning::default()` reproduces the constants in [`crate::consts`] exactly.
//! Hosts may override any subset through JSON; missing fields keep defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Dice;

/// Inclusive-exclusive random span `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Roll a value in the span
    pub fn roll(&self, dice: &mut dyn Dice) -> f32 {
        dice.range(self.min, self.max)
    }

    /// Roll and round to the nearest whole pixel
    pub fn roll_round(&self, dice: &mut dyn Dice) -> f32 {
        self.roll(dice).round()
    }
}

/// World geometry and scroll speed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    pub width: f32,
    pub ground_y: f32,
    pub offscreen_margin: f32,
    pub start_speed: f32,
    /// Added to the scroll speed every tick once the run has started
    pub speed_ramp: f32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            ground_y: GROUND_Y,
            offscreen_margin: OFFSCREEN_MARGIN,
            start_speed: START_SPEED,
            speed_ramp: SPEED_RAMP,
        }
    }
}

/// Runner body and physics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerTuning {
    pub x: f32,
    pub width: f32,
    pub height: f32,
    pub slide_height: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
    pub double_jump_velocity: f32,
    pub shield_ticks: u32,
}

impl Default for RunnerTuning {
    fn default() -> Self {
        Self {
            x: RUNNER_X,
            width: RUNNER_WIDTH,
            height: RUNNER_HEIGHT,
            slide_height: RUNNER_SLIDE_HEIGHT,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            double_jump_velocity: DOUBLE_JUMP_VELOCITY,
            shield_ticks: SHIELD_TICKS,
        }
    }
}

/// Spawn scheduler odds, sizes and timers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Required distance between the last obstacle and the right edge
    pub obstacle_gap: Span,
    /// Ticks between successful obstacle spawns
    pub obstacle_cooldown: Span,
    pub bar_chance: f32,
    pub bar_width: Span,
    /// Height of the bar top above the ground line
    pub bar_gap: Span,
    pub bar_lead_in: Span,
    pub obstacle_width: Span,
    pub obstacle_height: Span,
    pub obstacle_lead_in: f32,
    pub coin_chance: f32,
    /// Coin count is the floor of this roll
    pub coin_count: Span,
    pub coin_lead_in: f32,
    pub coin_spacing: f32,
    pub coin_height: Span,
    /// Amplitude of the sinusoidal coin arc
    pub coin_wave: f32,
    pub power_up_chance: f32,
    pub power_up_lead_in: Span,
    pub power_up_height: Span,
    pub flyer_initial_delay: f32,
    pub flyer_interval: Span,
    pub flyer_lead_in: f32,
    /// Flyer top edge, measured upward from the ground line
    pub flyer_height: Span,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            obstacle_gap: Span::new(320.0, 520.0),
            obstacle_cooldown: Span::new(50.0, 110.0),
            bar_chance: 0.25,
            bar_width: Span::new(40.0, 68.0),
            bar_gap: Span::new(80.0, 110.0),
            bar_lead_in: Span::new(10.0, 50.0),
            obstacle_width: Span::new(18.0, 30.0),
            obstacle_height: Span::new(22.0, 44.0),
            obstacle_lead_in: 20.0,
            coin_chance: 0.5,
            coin_count: Span::new(2.0, 5.0),
            coin_lead_in: 40.0,
            coin_spacing: 18.0,
            coin_height: Span::new(70.0, 120.0),
            coin_wave: 8.0,
            power_up_chance: 0.12,
            power_up_lead_in: Span::new(80.0, 140.0),
            power_up_height: Span::new(70.0, 120.0),
            flyer_initial_delay: 180.0,
            flyer_interval: Span::new(220.0, 360.0),
            flyer_lead_in: 30.0,
            flyer_height: Span::new(60.0, 120.0),
        }
    }
}

/// Score awards
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTuning {
    pub coin_score: u64,
    pub score_per_tick: u64,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            coin_score: COIN_SCORE,
            score_per_tick: 1,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Tick-to-real-time mapping (all timers are tick counted)
    pub ticks_per_second: u32,
    pub world: WorldTuning,
    pub runner: RunnerTuning,
    pub spawn: SpawnTuning,
    pub scoring: ScoringTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ticks_per_second: TICKS_PER_SECOND,
            world: WorldTuning::default(),
            runner: RunnerTuning::default(),
            spawn: SpawnTuning::default(),
            scoring: ScoringTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse tuning overrides, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::warn!("Ignoring malformed tuning ({err}), using defaults");
                Self::default()
            }
        }
    }

    /// Seconds covered by a number of ticks
    pub fn ticks_to_secs(&self, ticks: u64) -> f32 {
        ticks as f32 / self.ticks_per_second.max(1) as f32
    }

    /// Whole ticks for a duration in seconds
    pub fn secs_to_ticks(&self, secs: f32) -> u32 {
        (secs * self.ticks_per_second as f32).round().max(0.0) as u32
    }
}
