//! Spawn scheduling
//!
//! Two independent countdowns feed the world: one for ground-level obstacles
//! (with optional coin arcs and power-ups riding along), one for flyers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::dice::Dice;
use super::entity::{PowerUpKind, WorldEntity};
use super::state::EntityIds;
use crate::tuning::{SpawnTuning, Tuning};

/// What a scheduler step added to the world
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnReport {
    /// ID of the new obstacle or bar
    pub obstacle: Option<u32>,
    pub coins: usize,
    pub power_up: bool,
    /// ID of the new flyer
    pub flyer: Option<u32>,
}

/// Obstacle and flyer countdowns (ticks)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnScheduler {
    pub obstacle_timer: f32,
    pub flyer_timer: f32,
}

impl SpawnScheduler {
    pub fn new(tuning: &SpawnTuning) -> Self {
        Self {
            obstacle_timer: 0.0,
            flyer_timer: tuning.flyer_initial_delay,
        }
    }

    /// Run both countdowns for one tick
    pub fn step(
        &mut self,
        tuning: &Tuning,
        entities: &mut Vec<WorldEntity>,
        ids: &mut EntityIds,
        dice: &mut dyn Dice,
    ) -> SpawnReport {
        let mut report = SpawnReport::default();

        if self.obstacle_timer > 0.0 {
            self.obstacle_timer -= 1.0;
        }
        if self.obstacle_timer <= 0.0 {
            self.spawn_obstacle(tuning, entities, ids, dice, &mut report);
        }

        self.spawn_flyer(tuning, entities, ids, dice, &mut report);
        report
    }

    /// Obstacle or bar, gated on distance from the previous one.
    /// A failed gap check leaves the timer expired so the next tick retries.
    fn spawn_obstacle(
        &mut self,
        tuning: &Tuning,
        entities: &mut Vec<WorldEntity>,
        ids: &mut EntityIds,
        dice: &mut dyn Dice,
        report: &mut SpawnReport,
    ) {
        let t = &tuning.spawn;
        let width = tuning.world.width;
        let ground = tuning.world.ground_y;

        let last_x = entities
            .iter()
            .rev()
            .find(|e| e.kind.is_obstacle())
            .map(|e| e.pos.x);
        let gap = t.obstacle_gap.roll(dice);
        if !last_x.is_none_or(|x| x < width - gap) {
            return;
        }

        let id = ids.next();
        let obstacle = if dice.chance(t.bar_chance) {
            let x = width + t.bar_lead_in.roll(dice);
            let w = t.bar_width.roll_round(dice);
            let top = ground - t.bar_gap.roll_round(dice);
            WorldEntity::overhead_bar(id, x, top, w)
        } else {
            let h = t.obstacle_height.roll_round(dice);
            let w = t.obstacle_width.roll_round(dice);
            WorldEntity::ground_obstacle(id, width + t.obstacle_lead_in, ground, w, h)
        };
        log::debug!(
            "Spawned {} #{} at x={:.1} gap={:.0}",
            obstacle.kind.name(),
            id,
            obstacle.pos.x,
            gap
        );
        entities.push(obstacle);
        report.obstacle = Some(id);

        self.obstacle_timer = t.obstacle_cooldown.roll(dice);

        if dice.chance(t.coin_chance) {
            let base_y = ground - t.coin_height.roll_round(dice);
            let count = t.coin_count.roll(dice).floor() as usize;
            for i in 0..count {
                let center = Vec2::new(
                    width + t.coin_lead_in + i as f32 * t.coin_spacing,
                    base_y + (i as f32).sin() * t.coin_wave,
                );
                entities.push(WorldEntity::collectible(ids.next(), center));
            }
            report.coins = count;
        }

        if dice.chance(t.power_up_chance) {
            let center = Vec2::new(
                width + t.power_up_lead_in.roll_round(dice),
                ground - t.power_up_height.roll_round(dice),
            );
            entities.push(WorldEntity::power_up(ids.next(), center, PowerUpKind::Shield));
            report.power_up = true;
        }
    }

    /// Flyers ignore obstacle spacing and run on their own timer
    fn spawn_flyer(
        &mut self,
        tuning: &Tuning,
        entities: &mut Vec<WorldEntity>,
        ids: &mut EntityIds,
        dice: &mut dyn Dice,
        report: &mut SpawnReport,
    ) {
        let t = &tuning.spawn;
        let due = self.flyer_timer <= 0.0;
        self.flyer_timer -= 1.0;
        if !due {
            return;
        }

        let ground = tuning.world.ground_y;
        let y = dice.range(ground - t.flyer_height.max, ground - t.flyer_height.min);
        let id = ids.next();
        entities.push(WorldEntity::flyer(id, tuning.world.width + t.flyer_lead_in, y));
        report.flyer = Some(id);
        log::debug!("Spawned flyer #{id} at y={y:.1}");

        self.flyer_timer = t.flyer_interval.roll(dice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::ScriptedDice;
    use crate::sim::entity::EntityKind;

    fn setup() -> (SpawnScheduler, Tuning, Vec<WorldEntity>, EntityIds) {
        let tuning = Tuning::default();
        (
            SpawnScheduler::new(&tuning.spawn),
            tuning,
            Vec::new(),
            EntityIds::default(),
        )
    }

    #[test]
    fn test_ground_obstacle_exact_placement() {
        let (mut s, t, mut ents, mut ids) = setup();
        // gap, bar?, height, width, cooldown, coins?, power?
        let mut dice = ScriptedDice::new([0.0, 0.9, 0.5, 0.5, 0.0, 0.9, 0.9]);
        let report = s.step(&t, &mut ents, &mut ids, &mut dice);

        assert_eq!(report.obstacle, Some(1));
        assert_eq!(report.coins, 0);
        assert!(!report.power_up);
        assert_eq!(ents.len(), 1);
        let ob = &ents[0];
        assert_eq!(ob.kind, EntityKind::GroundObstacle);
        assert_eq!(ob.pos.x, WORLD_WIDTH + 20.0);
        assert_eq!(ob.size, Vec2::new(24.0, 33.0));
        assert_eq!(ob.rect().bottom(), GROUND_Y);
        assert_eq!(s.obstacle_timer, 50.0);
    }

    #[test]
    fn test_overhead_bar_placement() {
        let (mut s, t, mut ents, mut ids) = setup();
        // gap, bar?, lead-in, width, gap height, cooldown, coins?, power?
        let mut dice = ScriptedDice::new([0.0, 0.1, 0.0, 0.0, 0.0, 1.0, 0.9, 0.9]);
        s.step(&t, &mut ents, &mut ids, &mut dice);

        let bar = &ents[0];
        assert_eq!(bar.kind, EntityKind::OverheadBar);
        assert_eq!(bar.pos, Vec2::new(WORLD_WIDTH + 10.0, GROUND_Y - 80.0));
        assert_eq!(bar.size.x, 40.0);
        assert_eq!(s.obstacle_timer, 110.0);
    }

    #[test]
    fn test_coins_and_power_up_ride_along() {
        let (mut s, t, mut ents, mut ids) = setup();
        // gap, bar?, height, width, cooldown, coins?, coin height, count,
        // power?, power lead-in, power height
        let mut dice =
            ScriptedDice::new([0.0, 0.9, 0.0, 0.0, 0.0, 0.1, 0.0, 0.5, 0.05, 0.0, 1.0]);
        let report = s.step(&t, &mut ents, &mut ids, &mut dice);

        assert_eq!(report.coins, 3);
        assert!(report.power_up);
        let coins: Vec<_> = ents
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::Collectible { .. }))
            .collect();
        assert_eq!(coins.len(), 3);
        assert_eq!(coins[0].center(), Vec2::new(WORLD_WIDTH + 40.0, GROUND_Y - 70.0));
        assert_eq!(coins[1].center().x, WORLD_WIDTH + 58.0);
        assert!((coins[1].center().y - (GROUND_Y - 70.0 + 1f32.sin() * 8.0)).abs() < 1e-4);

        let power = ents.last().unwrap();
        assert!(matches!(
            power.kind,
            EntityKind::PowerUp { kind: PowerUpKind::Shield, .. }
        ));
        assert_eq!(power.center(), Vec2::new(WORLD_WIDTH + 80.0, GROUND_Y - 120.0));
    }

    #[test]
    fn test_cooldown_blocks_attempts() {
        let (mut s, t, mut ents, mut ids) = setup();
        s.obstacle_timer = 3.0;
        let mut dice = ScriptedDice::new([]).with_fallback(0.0);
        for _ in 0..2 {
            let report = s.step(&t, &mut ents, &mut ids, &mut dice);
            assert_eq!(report.obstacle, None);
        }
        let report = s.step(&t, &mut ents, &mut ids, &mut dice);
        assert!(report.obstacle.is_some());
    }

    #[test]
    fn test_spacing_failure_keeps_timer_expired() {
        let (mut s, t, mut ents, mut ids) = setup();
        ents.push(WorldEntity::ground_obstacle(ids.next(), 500.0, GROUND_Y, 20.0, 30.0));
        let mut dice = ScriptedDice::new([]).with_fallback(0.0);

        let report = s.step(&t, &mut ents, &mut ids, &mut dice);
        assert_eq!(report.obstacle, None);
        assert_eq!(s.obstacle_timer, 0.0);

        // Scrolled far enough: 479 < 800 - 320
        ents[0].pos.x = 479.0;
        let report = s.step(&t, &mut ents, &mut ids, &mut dice);
        assert!(report.obstacle.is_some());
        assert_eq!(s.obstacle_timer, 50.0);
    }

    #[test]
    fn test_flyer_countdown() {
        let (mut s, t, mut ents, mut ids) = setup();
        s.obstacle_timer = f32::MAX;
        let mut dice = ScriptedDice::new([]).with_fallback(0.0);
        let mut first = None;
        for tick in 1..=400 {
            let report = s.step(&t, &mut ents, &mut ids, &mut dice);
            if report.flyer.is_some() {
                first = Some(tick);
                break;
            }
        }
        assert_eq!(first, Some(181));
        let flyer = ents.last().unwrap();
        assert_eq!(flyer.pos, Vec2::new(WORLD_WIDTH + 30.0, GROUND_Y - 120.0));
        assert_eq!(s.flyer_timer, 220.0);
    }
}
