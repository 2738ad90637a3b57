//! Host-facing game facade
//!
//! Owns the run state, the dice, and the summary sink. Hosts call `tick()`
//! once per frame and feed logical inputs in between; every call through
//! `&mut self` happens at a tick boundary, so inputs apply immediately.

use crate::persistence::StoreError;
use crate::settings::Settings;
use crate::sim::{
    CueEvent, Dice, GameRng, RunPhase, RunSeed, RunState, RunSummary, Snapshot, TickInput, tick,
};
use crate::tuning::Tuning;

/// Receives each run summary exactly once, when the run ends
pub trait SummarySink {
    fn record(&mut self, summary: &RunSummary) -> Result<(), StoreError>;
}

/// Sink that drops summaries
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SummarySink for NullSink {
    fn record(&mut self, _summary: &RunSummary) -> Result<(), StoreError> {
        Ok(())
    }
}

/// One player's game session, spanning any number of runs
pub struct Game {
    state: RunState,
    dice: Box<dyn Dice>,
    sink: Box<dyn SummarySink>,
    settings: Settings,
    last_summary: Option<RunSummary>,
}

impl Game {
    /// New session with an unseeded RNG and no persistence
    pub fn new(tuning: Tuning, settings: Settings, seed: RunSeed) -> Self {
        let mut state = RunState::new(tuning, seed);
        state.set_max_particles(settings.max_particles());
        Self {
            state,
            dice: Box::new(GameRng::from_entropy()),
            sink: Box::new(NullSink),
            settings,
            last_summary: None,
        }
    }

    /// Replace the randomness source
    pub fn with_dice(mut self, dice: impl Dice + 'static) -> Self {
        self.dice = Box::new(dice);
        self
    }

    /// Route run summaries to a persistence collaborator
    pub fn with_sink(mut self, sink: impl SummarySink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Advance one frame
    pub fn tick(&mut self) {
        self.tick_with(&TickInput::default());
    }

    /// Advance one frame with batched input
    pub fn tick_with(&mut self, input: &TickInput) {
        tick(&mut self.state, input, self.dice.as_mut());
        self.flush_summary();
    }

    pub fn request_jump(&mut self) {
        self.state.request_jump();
    }

    pub fn set_slide(&mut self, on: bool) {
        self.state.set_slide(on);
    }

    pub fn request_pause(&mut self) {
        self.state.request_pause();
    }

    pub fn request_resume(&mut self) {
        self.state.request_resume();
    }

    pub fn toggle_pause(&mut self) {
        self.state.toggle_pause();
    }

    /// Start over regardless of the current phase
    pub fn reset(&mut self, seed: RunSeed) {
        self.state.reset(seed);
        self.state.set_max_particles(self.settings.max_particles());
        self.last_summary = None;
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Mutable access for hosts that script scenarios
    pub fn state_mut(&mut self) -> &mut RunState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.state.set_max_particles(settings.max_particles());
        self.settings = settings;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Cues raised since the last drain
    pub fn drain_cues(&mut self) -> Vec<CueEvent> {
        std::mem::take(&mut self.state.cues)
    }

    /// Summary of the most recent finished run (cleared on reset)
    pub fn last_summary(&self) -> Option<&RunSummary> {
        self.last_summary.as_ref()
    }

    /// Hand a pending summary to the sink; storage trouble never stops the game
    fn flush_summary(&mut self) {
        let Some(summary) = self.state.take_summary() else {
            return;
        };
        if let Err(err) = self.sink.record(&summary) {
            log::warn!("Failed to record run summary: {err}");
        }
        self.last_summary = Some(summary);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::consts::*;
    use crate::sim::{ScriptedDice, WorldEntity};

    /// Counts summaries, optionally failing every write
    #[derive(Clone, Default)]
    struct CountingSink {
        seen: Rc<RefCell<Vec<RunSummary>>>,
        fail: bool,
    }

    impl SummarySink for CountingSink {
        fn record(&mut self, summary: &RunSummary) -> Result<(), StoreError> {
            self.seen.borrow_mut().push(summary.clone());
            if self.fail {
                Err(StoreError::Unavailable("disk full".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn game(sink: CountingSink) -> Game {
        let mut game = Game::new(Tuning::default(), Settings::default(), RunSeed::new(5, 0))
            .with_dice(ScriptedDice::new([]))
            .with_sink(sink);
        game.state_mut().spawner.obstacle_timer = f32::MAX;
        game.state_mut().spawner.flyer_timer = f32::MAX;
        game
    }

    fn crash(game: &mut Game) {
        let state = game.state_mut();
        let id = state.ids.next();
        state
            .entities
            .push(WorldEntity::ground_obstacle(id, RUNNER_X + 10.0, GROUND_Y, 20.0, 30.0));
    }

    #[test]
    fn test_summary_emitted_once() {
        let sink = CountingSink::default();
        let mut game = game(sink.clone());
        game.request_jump();
        // Let the runner land again so the obstacle hits
        for _ in 0..60 {
            game.tick();
        }
        crash(&mut game);
        game.tick();
        game.tick();
        assert_eq!(game.phase(), RunPhase::Ended);
        assert_eq!(sink.seen.borrow().len(), 1);

        let summary = game.last_summary().unwrap();
        assert_eq!(summary.score, 61);
        assert!(summary.new_best);
        assert!(
            game.drain_cues()
                .iter()
                .any(|c| matches!(c, CueEvent::GameOver { .. }))
        );
    }

    #[test]
    fn test_sink_failure_does_not_stall() {
        let sink = CountingSink {
            fail: true,
            ..Default::default()
        };
        let mut game = game(sink.clone());
        crash(&mut game);
        game.tick();
        assert_eq!(game.phase(), RunPhase::Ended);
        assert!(game.last_summary().is_some());

        game.reset(RunSeed::default());
        assert_eq!(game.phase(), RunPhase::Playing);
        game.tick();
        assert_eq!(game.state().tick, 1);
    }

    #[test]
    fn test_requests_apply_immediately() {
        let mut game = game(CountingSink::default());
        game.request_jump();
        let state = game.state();
        assert!(state.started);
        assert_eq!(state.runner.jumps_left, 1);
        assert_eq!(state.runner.vel_y, JUMP_VELOCITY);
        assert!(!state.runner.grounded);

        game.request_pause();
        game.tick();
        assert_eq!(game.state().tick, 0);
        game.request_resume();
        game.tick();
        assert_eq!(game.state().tick, 1);
    }

    #[test]
    fn test_settings_cap_particles() {
        let mut game = game(CountingSink::default());
        game.set_settings(Settings {
            particles: false,
            ..Settings::default()
        });
        game.state_mut().runner.grant_shield(SHIELD_TICKS);
        crash(&mut game);
        game.tick();
        assert_eq!(game.phase(), RunPhase::Playing);
        assert!(game.state().particles.is_empty());
    }
}
