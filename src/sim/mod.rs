//! Fixed-tick simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick per call, all timers tick-counted
//! - Randomness only through the injected `Dice`
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or storage dependencies

pub mod autopilot;
pub mod collision;
pub mod cue;
pub mod dice;
pub mod entity;
pub mod rect;
pub mod runner;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod summary;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::{COIN_BURST, CollisionReport, SHIELD_BURST, resolve_collisions};
pub use cue::CueEvent;
pub use dice::{Dice, GameRng, ScriptedDice};
pub use entity::{EntityKind, Particle, PowerUpKind, WorldEntity};
pub use rect::Rect;
pub use runner::Runner;
pub use snapshot::Snapshot;
pub use spawn::{SpawnReport, SpawnScheduler};
pub use state::{EntityIds, RunPhase, RunState};
pub use summary::{Achievement, RunSeed, RunSummary};
pub use tick::{TickInput, tick};
