//! Idle/demo mode input
//!
//! A simple look-ahead player: duck under anything that would hit a standing
//! runner from above, jump over anything on the ground.

use super::entity::EntityKind;
use super::state::RunState;
use super::tick::TickInput;

/// Ticks of look-ahead before reacting to a low hazard
const JUMP_LEAD_TICKS: f32 = 5.0;
/// Ticks of look-ahead before ducking
const SLIDE_LEAD_TICKS: f32 = 12.0;

/// Pick jump/slide for the current state
pub fn autopilot_input(state: &RunState) -> TickInput {
    let mut input = TickInput::default();
    let runner = &state.runner;

    if !state.started {
        input.jump = true;
        return input;
    }

    let ground = runner.ground_y;
    let stand_top = ground - state.tuning.runner.height;
    let slide_top = ground - state.tuning.runner.slide_height;
    let runner_box = runner.bounds();

    let threat = state
        .entities
        .iter()
        .filter(|e| e.kind.is_hazard())
        .filter(|e| e.bounds().right() > runner_box.left())
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    let Some(threat) = threat else {
        input.slide = Some(false);
        return input;
    };

    let hit_box = threat.bounds();
    let closing = state.speed * threat.kind.scroll_factor();
    let distance = hit_box.left() - runner_box.right();

    // Passes over a standing runner; nothing to do
    if hit_box.bottom() <= stand_top {
        input.slide = Some(false);
        return input;
    }

    // Bars always clear a sliding runner; flyers only when high enough
    let duckable = match threat.kind {
        EntityKind::GroundObstacle => false,
        _ => hit_box.bottom() <= slide_top,
    };

    if duckable {
        input.slide = Some(distance < closing * SLIDE_LEAD_TICKS);
    } else if distance < closing * JUMP_LEAD_TICKS && runner.grounded {
        input.jump = true;
    } else if !runner.grounded && runner.vel_y > 0.0 && distance < 0.0 {
        // Still over the hazard on the way down: use the air jump
        input.jump = true;
    } else {
        input.slide = Some(false);
    }
    input
}
