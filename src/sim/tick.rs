//! Fixed-tick simulation step
//!
//! Order inside Playing: clock, speed ramp, runner physics, spawning,
//! entity movement and culling, score, collisions, particles.

use super::autopilot::autopilot_input;
use super::collision::resolve_collisions;
use super::dice::Dice;
use super::state::{RunPhase, RunState};

/// Input commands applied at the start of a tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (space/up/tap)
    pub jump: bool,
    /// Slide held state, if it changed
    pub slide: Option<bool>,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - the simulation plays itself
    pub autopilot: bool,
}

/// Advance the run by one tick
pub fn tick(state: &mut RunState, input: &TickInput, dice: &mut dyn Dice) {
    if input.pause {
        state.toggle_pause();
    }

    // Don't tick if paused or over
    if state.phase != RunPhase::Playing {
        return;
    }

    let mut input = input.clone();
    if input.autopilot {
        let auto = autopilot_input(state);
        input.jump |= auto.jump;
        input.slide = input.slide.or(auto.slide);
    }
    if let Some(on) = input.slide {
        state.set_slide(on);
    }
    if input.jump {
        state.request_jump();
    }

    state.tick += 1;

    if state.started {
        state.speed += state.tuning.world.speed_ramp;
    }

    if let Some(cue) = state.runner.advance(&state.tuning.runner) {
        state.cues.push(cue);
    }

    state
        .spawner
        .step(&state.tuning, &mut state.entities, &mut state.ids, dice);

    let speed = state.speed;
    let margin = state.tuning.world.offscreen_margin;
    for entity in &mut state.entities {
        entity.advance(speed);
    }
    state.entities.retain(|e| !e.is_offscreen(margin));

    if state.started {
        state.score += state.tuning.scoring.score_per_tick;
    }

    let report = resolve_collisions(state, dice);
    if report.fatal.is_some() {
        state.end_run();
        return;
    }

    for particle in &mut state.particles {
        particle.advance();
    }
    state.particles.retain(|p| !p.is_dead());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::entity::WorldEntity;
    use crate::sim::{GameRng, RunSeed, ScriptedDice};
    use crate::tuning::Tuning;

    fn quiet_state() -> RunState {
        let mut state = RunState::new(Tuning::default(), RunSeed::default());
        // Keep the spawner out of the way
        state.spawner.obstacle_timer = f32::MAX;
        state.spawner.flyer_timer = f32::MAX;
        state
    }

    #[test]
    fn test_idle_does_not_score() {
        let mut state = quiet_state();
        let mut dice = ScriptedDice::new([]);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), &mut dice);
        }
        assert_eq!(state.tick, 30);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, START_SPEED);
    }

    #[test]
    fn test_jump_starts_scoring_and_ramp() {
        let mut state = quiet_state();
        let mut dice = ScriptedDice::new([]);
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump, &mut dice);
        assert!(state.started);
        assert_eq!(state.score, 1);
        assert!((state.speed - (START_SPEED + SPEED_RAMP)).abs() < 1e-6);
        assert_eq!(state.runner.jumps_left, 1);
        assert!((state.runner.vel_y - (JUMP_VELOCITY + GRAVITY)).abs() < 1e-6);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = quiet_state();
        let mut dice = ScriptedDice::new([]);
        state.request_jump();
        tick(&mut state, &TickInput::default(), &mut dice);
        let before = (state.tick, state.score, state.runner.pos);

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, &mut dice);
        assert_eq!(state.phase, RunPhase::Paused);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), &mut dice);
        }
        assert_eq!((state.tick, state.score, state.runner.pos), before);

        // Toggling again resumes and ticks in the same call
        tick(&mut state, &pause, &mut dice);
        assert_eq!(state.phase, RunPhase::Playing);
        assert_eq!(state.tick, before.0 + 1);
    }

    #[test]
    fn test_fatal_collision_ends_run() {
        let mut state = quiet_state();
        let mut dice = ScriptedDice::new([]);
        let id = state.ids.next();
        state
            .entities
            .push(WorldEntity::ground_obstacle(id, RUNNER_X + 10.0, GROUND_Y, 20.0, 30.0));

        tick(&mut state, &TickInput::default(), &mut dice);
        assert_eq!(state.phase, RunPhase::Ended);
        assert!(state.take_summary().is_some());

        let frozen = state.tick;
        tick(&mut state, &TickInput::default(), &mut dice);
        assert_eq!(state.tick, frozen);
    }

    #[test]
    fn test_entities_culled_after_passing_margin() {
        let mut state = quiet_state();
        let mut dice = ScriptedDice::new([]);
        let id = state.ids.next();
        // Right edge at -5, moves to -11 this tick
        state
            .entities
            .push(WorldEntity::ground_obstacle(id, -25.0, GROUND_Y, 20.0, 30.0));
        tick(&mut state, &TickInput::default(), &mut dice);
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_particles_age_out() {
        let mut state = quiet_state();
        let mut dice = ScriptedDice::new([]);
        state.runner.grant_shield(SHIELD_TICKS);
        let id = state.ids.next();
        state
            .entities
            .push(WorldEntity::ground_obstacle(id, RUNNER_X + 10.0, GROUND_Y, 20.0, 10.0));
        tick(&mut state, &TickInput::default(), &mut dice);
        assert_eq!(state.phase, RunPhase::Playing);
        assert_eq!(state.particles.len(), 12);
        assert!(state.particles.iter().all(|p| p.age == 1));

        // Jump clear so the pushed-back obstacle can't finish us
        state.request_jump();
        for _ in 0..40 {
            tick(&mut state, &TickInput::default(), &mut dice);
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let mut a = RunState::new(Tuning::default(), RunSeed::default());
        let mut b = RunState::new(Tuning::default(), RunSeed::default());
        let mut dice_a = GameRng::seeded(99);
        let mut dice_b = GameRng::seeded(99);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut a, &input, &mut dice_a);
            tick(&mut b, &input, &mut dice_b);
        }
        assert_eq!(a.tick, b.tick);
        assert_eq!(a.score, b.score);
        assert_eq!(a.entities.len(), b.entities.len());
        assert_eq!(a.phase, b.phase);
    }
}
