//! Read-only drawable state for renderers
//!
//! Captured once per tick after collisions resolve. Renderers decide colors,
//! sprites and animation curves; this only carries geometry and phases.

use glam::Vec2;
use serde::Serialize;

use super::state::{RunPhase, RunState};

/// Runner pose
#[derive(Debug, Clone, Serialize)]
pub struct RunnerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub grounded: bool,
    pub sliding: bool,
    pub shield: bool,
    /// Shield time left as a fraction of a full pickup
    pub shield_fraction: f32,
    pub anim: u32,
}

/// One drawable entity
#[derive(Debug, Clone, Serialize)]
pub struct EntityView {
    pub id: u32,
    pub kind: &'static str,
    pub pos: Vec2,
    pub size: Vec2,
    /// Variant animation phase in [-1, 1]
    pub anim: f32,
}

/// One particle
#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub alpha: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: RunPhase,
    pub started: bool,
    pub tick: u64,
    pub speed: f32,
    pub score: u64,
    pub coins: u32,
    pub best: u64,
    pub runner: RunnerView,
    pub entities: Vec<EntityView>,
    pub particles: Vec<ParticleView>,
}

impl Snapshot {
    pub fn capture(state: &RunState) -> Self {
        let runner = &state.runner;
        let full_shield = state.tuning.runner.shield_ticks.max(1) as f32;
        Self {
            phase: state.phase,
            started: state.started,
            tick: state.tick,
            speed: state.speed,
            score: state.score,
            coins: state.coins,
            best: state.best_score(),
            runner: RunnerView {
                pos: runner.pos,
                size: runner.size,
                grounded: runner.grounded,
                sliding: runner.sliding,
                shield: runner.shield_active,
                shield_fraction: (runner.shield_ticks as f32 / full_shield).min(1.0),
                anim: runner.anim,
            },
            entities: state
                .entities
                .iter()
                .map(|e| EntityView {
                    id: e.id,
                    kind: e.kind.name(),
                    pos: e.pos,
                    size: e.size,
                    anim: e.anim_phase(),
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    alpha: p.alpha(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
