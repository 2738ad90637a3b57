//! Run state and the playing/paused/ended state machine
//!
//! `RunState` is owned by the host facade and only mutated through `tick` and
//! the request methods below. It is rebuilt wholesale on reset.

use serde::{Deserialize, Serialize};

use super::cue::{CueEvent, GAME_OVER_PITCH};
use super::entity::{Particle, WorldEntity};
use super::runner::Runner;
use super::spawn::SpawnScheduler;
use super::summary::{RunSeed, RunSummary};
use crate::consts::MAX_PARTICLES;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Active gameplay (possibly not yet started)
    Playing,
    /// Frozen until resumed
    Paused,
    /// Fatal collision; frozen until reset
    Ended,
}

/// Monotonic entity ID allocator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Complete state of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub tuning: Tuning,
    /// Seed values supplied at reset
    pub seed: RunSeed,
    /// Ticks processed while playing
    pub tick: u64,
    /// World scroll speed (px/tick)
    pub speed: f32,
    pub score: u64,
    pub coins: u32,
    pub phase: RunPhase,
    /// Scoring and the speed ramp wait for the first jump request
    pub started: bool,
    pub runner: Runner,
    /// Live world entities, in spawn (ID) order
    pub entities: Vec<WorldEntity>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub max_particles: usize,
    pub spawner: SpawnScheduler,
    pub ids: EntityIds,
    /// Cues raised since the host last drained them
    #[serde(skip)]
    pub cues: Vec<CueEvent>,
    /// Summary waiting to be handed to the persistence collaborator
    #[serde(skip)]
    summary: Option<RunSummary>,
}

impl RunState {
    /// Fresh run: Playing, not started, nothing spawned
    pub fn new(tuning: Tuning, seed: RunSeed) -> Self {
        let runner = Runner::new(&tuning.runner, tuning.world.ground_y);
        let spawner = SpawnScheduler::new(&tuning.spawn);
        Self {
            seed,
            tick: 0,
            speed: tuning.world.start_speed,
            score: 0,
            coins: 0,
            phase: RunPhase::Playing,
            started: false,
            runner,
            entities: Vec::new(),
            particles: Vec::new(),
            max_particles: MAX_PARTICLES,
            spawner,
            ids: EntityIds::default(),
            cues: Vec::new(),
            summary: None,
            tuning,
        }
    }

    /// Rebuild everything, keeping tuning and the particle cap
    pub fn reset(&mut self, seed: RunSeed) {
        let max_particles = self.max_particles;
        *self = Self::new(self.tuning.clone(), seed);
        self.max_particles = max_particles;
        log::info!("Run reset (best {}, lifetime coins {})", seed.best_score, seed.lifetime_coins);
    }

    /// Best score including the current run
    pub fn best_score(&self) -> u64 {
        self.seed.best_score.max(self.score)
    }

    /// Jump request; the first one starts the run
    pub fn request_jump(&mut self) {
        if self.phase != RunPhase::Playing {
            return;
        }
        if !self.started {
            self.started = true;
            log::info!("Run started at tick {}", self.tick);
        }
        if let Some(cue) = self.runner.request_jump(&self.tuning.runner) {
            self.cues.push(cue);
        }
    }

    pub fn set_slide(&mut self, on: bool) {
        if self.phase != RunPhase::Playing {
            return;
        }
        self.runner.set_slide(on);
    }

    pub fn request_pause(&mut self) {
        if self.phase == RunPhase::Playing {
            self.phase = RunPhase::Paused;
        }
    }

    pub fn request_resume(&mut self) {
        if self.phase == RunPhase::Paused {
            self.phase = RunPhase::Playing;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            RunPhase::Playing => self.request_pause(),
            RunPhase::Paused => self.request_resume(),
            RunPhase::Ended => {}
        }
    }

    /// Fatal collision: freeze, settle the best score and queue the summary
    pub fn end_run(&mut self) {
        if self.phase == RunPhase::Ended {
            return;
        }
        self.phase = RunPhase::Ended;

        let summary = RunSummary::evaluate(self.score, self.coins, self.tick, &self.seed);
        log::info!(
            "Run over: score {} coins {} ticks {}{}",
            summary.score,
            summary.coins,
            summary.ticks,
            if summary.new_best { " (new best)" } else { "" }
        );
        self.seed.best_score = summary.best_score;
        self.summary = Some(summary);
        self.cues.push(CueEvent::GameOver {
            pitch: GAME_OVER_PITCH,
        });
    }

    /// Hand over the pending summary (at most once per run end)
    pub fn take_summary(&mut self) -> Option<RunSummary> {
        self.summary.take()
    }

    /// Drop particles beyond the cap (oldest first)
    pub fn set_max_particles(&mut self, max: usize) {
        self.max_particles = max;
        if self.particles.len() > max {
            let excess = self.particles.len() - max;
            self.particles.drain(..excess);
        }
    }
}
