//! Scrolling world entities and cosmetic particles
//!
//! Every world entity shares one contract: advance by the world speed,
//! expose a hit box, and report when it has scrolled off the left edge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerUpKind {
    Shield,
}

/// Entity variants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EntityKind {
    /// Ground-standing block; jump over it
    GroundObstacle,
    /// Raised bar; slide under it
    OverheadBar,
    /// Flying hazard with a flapping wobble
    Flyer { wobble: u32 },
    /// Coin with a spin phase
    Collectible { spin: f32 },
    /// Pickup with a pulse phase
    PowerUp { kind: PowerUpKind, pulse: u32 },
}

impl EntityKind {
    /// Ends the run on unshielded contact
    pub fn is_hazard(&self) -> bool {
        matches!(
            self,
            EntityKind::GroundObstacle | EntityKind::OverheadBar | EntityKind::Flyer { .. }
        )
    }

    /// Hazards that count toward obstacle spacing
    pub fn is_obstacle(&self) -> bool {
        matches!(self, EntityKind::GroundObstacle | EntityKind::OverheadBar)
    }

    /// Horizontal speed relative to the world scroll
    pub fn scroll_factor(&self) -> f32 {
        match self {
            EntityKind::Flyer { .. } => FLYER_SPEED_FACTOR,
            _ => 1.0,
        }
    }

    /// Stable name for renderers and logs
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::GroundObstacle => "ground-obstacle",
            EntityKind::OverheadBar => "overhead-bar",
            EntityKind::Flyer { .. } => "flyer",
            EntityKind::Collectible { .. } => "collectible",
            EntityKind::PowerUp { .. } => "power-up",
        }
    }
}

/// A scrolling entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldEntity {
    pub id: u32,
    pub kind: EntityKind,
    /// Top-left corner of the drawn shape
    pub pos: Vec2,
    /// Drawn size
    pub size: Vec2,
}

impl WorldEntity {
    pub fn ground_obstacle(id: u32, x: f32, ground_y: f32, w: f32, h: f32) -> Self {
        Self {
            id,
            kind: EntityKind::GroundObstacle,
            pos: Vec2::new(x, ground_y - h),
            size: Vec2::new(w, h),
        }
    }

    /// `top` is the y of the drawn bar
    pub fn overhead_bar(id: u32, x: f32, top: f32, w: f32) -> Self {
        Self {
            id,
            kind: EntityKind::OverheadBar,
            pos: Vec2::new(x, top),
            size: Vec2::new(w, BAR_THICKNESS),
        }
    }

    pub fn flyer(id: u32, x: f32, y: f32) -> Self {
        Self {
            id,
            kind: EntityKind::Flyer { wobble: 0 },
            pos: Vec2::new(x, y),
            size: Vec2::new(FLYER_WIDTH, FLYER_HEIGHT),
        }
    }

    pub fn collectible(id: u32, center: Vec2) -> Self {
        let size = Vec2::splat(COIN_RADIUS * 2.0);
        Self {
            id,
            kind: EntityKind::Collectible { spin: 0.0 },
            pos: center - size / 2.0,
            size,
        }
    }

    pub fn power_up(id: u32, center: Vec2, kind: PowerUpKind) -> Self {
        let size = Vec2::splat(POWER_UP_RADIUS * 2.0);
        Self {
            id,
            kind: EntityKind::PowerUp { kind, pulse: 0 },
            pos: center - size / 2.0,
            size,
        }
    }

    /// Scroll left by the world speed and advance animation
    pub fn advance(&mut self, speed: f32) {
        self.pos.x -= speed * self.kind.scroll_factor();
        match &mut self.kind {
            EntityKind::Flyer { wobble } => *wobble = wobble.wrapping_add(1),
            EntityKind::Collectible { spin } => *spin += 0.25,
            EntityKind::PowerUp { pulse, .. } => *pulse = pulse.wrapping_add(1),
            EntityKind::GroundObstacle | EntityKind::OverheadBar => {}
        }
    }

    /// Drawn rectangle
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Hit box. The overhead bar reaches further down than it is drawn.
    pub fn bounds(&self) -> Rect {
        match self.kind {
            EntityKind::OverheadBar => Rect::from_pos_size(
                self.pos,
                Vec2::new(self.size.x, self.size.y + BAR_HITZONE_EXTRA),
            ),
            _ => self.rect(),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Right edge has passed `-margin`
    #[inline]
    pub fn is_offscreen(&self, margin: f32) -> bool {
        self.pos.x + self.size.x < -margin
    }

    /// Take a shield hit: obstacles are nudged back, flyers sent to the sentinel
    pub fn neutralize(&mut self) {
        match self.kind {
            EntityKind::Flyer { .. } => self.pos.x = NEUTRALIZED_X,
            _ => self.pos.x -= SHIELD_PUSHBACK,
        }
    }

    /// Animation phase for renderers
    pub fn anim_phase(&self) -> f32 {
        match self.kind {
            EntityKind::Flyer { wobble } => (wobble as f32 * 0.4).sin(),
            EntityKind::Collectible { spin } => spin.sin(),
            EntityKind::PowerUp { pulse, .. } => (pulse as f32 * 0.15).sin(),
            EntityKind::GroundObstacle | EntityKind::OverheadBar => 0.0,
        }
    }
}

/// Burst particle gravity (px/tick²)
pub const PARTICLE_GRAVITY: f32 = 0.08;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub age: u32,
    pub lifetime: u32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, lifetime: u32) -> Self {
        Self {
            pos,
            vel,
            age: 0,
            lifetime,
        }
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.age += 1;
    }

    pub fn is_dead(&self) -> bool {
        self.age >= self.lifetime
    }

    /// Fades linearly over the lifetime
    pub fn alpha(&self) -> f32 {
        if self.lifetime == 0 {
            return 0.0;
        }
        (1.0 - self.age as f32 / self.lifetime as f32).max(0.0)
    }
}
