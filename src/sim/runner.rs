//! The player-controlled runner
//!
//! The runner never moves horizontally; the world scrolls past it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::cue::CueEvent;
use super::rect::Rect;
use crate::consts::MAX_JUMPS;
use crate::tuning::RunnerTuning;

/// The runner entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Runner {
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity (px/tick, negative is up)
    pub vel_y: f32,
    pub size: Vec2,
    /// Feet line the runner lands on
    pub ground_y: f32,
    pub grounded: bool,
    pub jumps_left: u8,
    pub sliding: bool,
    pub shield_active: bool,
    pub shield_ticks: u32,
    /// Animation phase (advances every tick)
    pub anim: u32,
    stand_height: f32,
    slide_height: f32,
}

impl Runner {
    /// Standing on the ground with a full jump budget and no shield
    pub fn new(tuning: &RunnerTuning, ground_y: f32) -> Self {
        Self {
            pos: Vec2::new(tuning.x, ground_y - tuning.height),
            vel_y: 0.0,
            size: Vec2::new(tuning.width, tuning.height),
            ground_y,
            grounded: true,
            jumps_left: MAX_JUMPS,
            sliding: false,
            shield_active: false,
            shield_ticks: 0,
            anim: 0,
            stand_height: tuning.height,
            slide_height: tuning.slide_height,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// y of the runner's feet
    #[inline]
    pub fn feet(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Advance one tick of physics. Returns the land cue on touchdown.
    pub fn advance(&mut self, tuning: &RunnerTuning) -> Option<CueEvent> {
        let mut cue = None;

        self.vel_y += tuning.gravity;
        self.pos.y += self.vel_y;

        let rest_y = self.ground_y - self.size.y;
        if self.pos.y >= rest_y {
            self.pos.y = rest_y;
            self.vel_y = 0.0;
            if !self.grounded {
                self.grounded = true;
                self.jumps_left = MAX_JUMPS;
                cue = Some(CueEvent::Land);
            }
        } else {
            self.grounded = false;
        }

        if self.shield_ticks > 0 {
            self.shield_ticks -= 1;
            if self.shield_ticks == 0 {
                self.shield_active = false;
            }
        }

        self.anim = self.anim.wrapping_add(1);
        cue
    }

    /// Jump (or air-jump). No-op when the budget is spent.
    pub fn request_jump(&mut self, tuning: &RunnerTuning) -> Option<CueEvent> {
        if self.jumps_left == 0 {
            return None;
        }

        self.vel_y = if self.jumps_left == MAX_JUMPS {
            tuning.jump_velocity
        } else {
            tuning.double_jump_velocity
        };
        self.grounded = false;
        self.jumps_left -= 1;
        if self.sliding {
            self.sliding = false;
            self.set_height(self.stand_height);
        }

        let jump = MAX_JUMPS - self.jumps_left;
        Some(CueEvent::jump(jump, self.jumps_left))
    }

    /// Start or stop sliding. Sliding can only start on the ground.
    pub fn set_slide(&mut self, on: bool) {
        if on && !self.grounded {
            return;
        }
        if on == self.sliding {
            return;
        }
        self.sliding = on;
        self.set_height(if on {
            self.slide_height
        } else {
            self.stand_height
        });
    }

    /// Activate (or refresh) the shield
    pub fn grant_shield(&mut self, ticks: u32) {
        self.shield_active = ticks > 0;
        self.shield_ticks = ticks;
    }

    /// Drop the shield immediately
    pub fn break_shield(&mut self) {
        self.shield_active = false;
        self.shield_ticks = 0;
    }

    /// Change profile keeping the feet planted
    fn set_height(&mut self, height: f32) {
        let feet = self.feet();
        self.size.y = height;
        self.pos.y = feet - height;
    }
}
