//! Collision resolution
//!
//! Runs once per tick after everything has moved. Hazards are checked first,
//! then collectibles, then power-ups. An unshielded hazard hit short-circuits.

use glam::Vec2;

use super::cue::{COIN_PITCH, CueEvent, POWER_UP_PITCH, SHIELD_BREAK_FLYER_PITCH, SHIELD_BREAK_PITCH};
use super::dice::Dice;
use super::entity::{EntityKind, Particle, PowerUpKind};
use super::state::RunState;
use crate::tuning::Span;

/// A particle burst recipe
#[derive(Debug, Clone, Copy)]
pub struct Burst {
    pub count: usize,
    pub vel_x: Span,
    pub vel_y: Span,
    pub lifetime: u32,
}

/// Shield shattering at the runner's center
pub const SHIELD_BURST: Burst = Burst {
    count: 12,
    vel_x: Span::new(-2.0, 2.0),
    vel_y: Span::new(-2.0, 0.0),
    lifetime: 30,
};

/// Sparkle where a coin was picked up
pub const COIN_BURST: Burst = Burst {
    count: 10,
    vel_x: Span::new(-1.5, 1.5),
    vel_y: Span::new(-2.0, -0.5),
    lifetime: 26,
};

/// Result of a resolver pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Hazard that ended the run
    pub fatal: Option<u32>,
    /// Hazards absorbed by the shield
    pub absorbed: Vec<u32>,
    pub coins: u32,
    pub power_ups: u32,
}

/// Emit a burst, stopping at the particle cap
pub fn emit_burst(
    particles: &mut Vec<Particle>,
    cap: usize,
    burst: &Burst,
    origin: Vec2,
    dice: &mut dyn Dice,
) {
    for _ in 0..burst.count {
        if particles.len() >= cap {
            break;
        }
        let vel = Vec2::new(burst.vel_x.roll(dice), burst.vel_y.roll(dice));
        particles.push(Particle::new(origin, vel, burst.lifetime));
    }
}

/// Check the runner against every live entity and apply outcomes
pub fn resolve_collisions(state: &mut RunState, dice: &mut dyn Dice) -> CollisionReport {
    let mut report = CollisionReport::default();
    let RunState {
        tuning,
        runner,
        entities,
        particles,
        max_particles,
        cues,
        score,
        coins,
        ..
    } = state;
    let cap = *max_particles;
    let runner_box = runner.bounds();

    for entity in entities.iter_mut().filter(|e| e.kind.is_hazard()) {
        if !runner_box.overlaps(&entity.bounds()) {
            continue;
        }
        if !runner.shield_active {
            report.fatal = Some(entity.id);
            return report;
        }

        runner.break_shield();
        emit_burst(particles, cap, &SHIELD_BURST, runner_box.center(), dice);
        let pitch = match entity.kind {
            EntityKind::Flyer { .. } => SHIELD_BREAK_FLYER_PITCH,
            _ => SHIELD_BREAK_PITCH,
        };
        cues.push(CueEvent::ShieldBreak { pitch });
        log::debug!("Shield absorbed {} #{}", entity.kind.name(), entity.id);
        entity.neutralize();
        report.absorbed.push(entity.id);
    }

    entities.retain(|entity| {
        if !matches!(entity.kind, EntityKind::Collectible { .. })
            || !runner_box.overlaps(&entity.bounds())
        {
            return true;
        }
        *coins += 1;
        *score += tuning.scoring.coin_score;
        emit_burst(particles, cap, &COIN_BURST, entity.center(), dice);
        cues.push(CueEvent::CoinPickup { pitch: COIN_PITCH });
        report.coins += 1;
        false
    });

    entities.retain(|entity| {
        let EntityKind::PowerUp { kind, .. } = entity.kind else {
            return true;
        };
        if !runner_box.overlaps(&entity.bounds()) {
            return true;
        }
        match kind {
            PowerUpKind::Shield => runner.grant_shield(tuning.runner.shield_ticks),
        }
        cues.push(CueEvent::PowerUpPickup {
            kind,
            pitch: POWER_UP_PITCH,
        });
        report.power_ups += 1;
        false
    });

    report
}
