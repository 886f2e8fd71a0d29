//! Host-facing game session
//!
//! Wraps the simulation with what a platform loop needs: variable frame
//! deltas folded into fixed ticks, one-shot input latching, output event
//! forwarding, and best-effort high score persistence.

use glam::Vec2;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::highscores::{HighScoreStore, load_or_zero};
use crate::settings::WorldConfig;
use crate::sim::{GameEvent, GamePhase, SimulationState, TickInput, tick};

/// A running game plus its high score store
pub struct Session<S: HighScoreStore> {
    state: SimulationState,
    store: S,
    accumulator: f32,
    /// Latched one-shot input for the next tick
    input: TickInput,
    /// Events waiting for the presentation layer
    events: Vec<GameEvent>,
}

impl<S: HighScoreStore> Session<S> {
    /// Load the high score once and start the first run
    pub fn new(config: WorldConfig, store: S) -> Self {
        let high_score = load_or_zero(&store);
        Self::from_state(SimulationState::new(config, high_score), store)
    }

    pub fn with_seed(config: WorldConfig, store: S, seed: u64) -> Self {
        let high_score = load_or_zero(&store);
        Self::from_state(SimulationState::with_seed(config, high_score, seed), store)
    }

    fn from_state(state: SimulationState, store: S) -> Self {
        Self {
            state,
            store,
            accumulator: 0.0,
            input: TickInput::default(),
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Touch/click anywhere while Playing: one upward impulse on the next tick
    pub fn on_jump_requested(&mut self) {
        if self.state.phase == GamePhase::Playing {
            self.input.jump = true;
        }
    }

    /// Tap in world coordinates; only the restart control reacts, and only
    /// while GameOver
    pub fn on_point_tapped(&mut self, x: f32, y: f32) {
        if self.state.phase == GamePhase::GameOver {
            self.input.tap = Some(Vec2::new(x, y));
        }
    }

    /// Run as many fixed ticks as `frame_dt` covers. Returns the tick count.
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        // NaN and infinite deltas from the host count as no time passing
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = std::mem::take(&mut self.input);
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
            self.forward_events();
        }

        // Drop time we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn forward_events(&mut self) {
        for event in self.state.drain_events() {
            if let GameEvent::HighScoreChanged(high_score) = event {
                if let Err(err) = self.store.save_high_score(high_score) {
                    log::warn!("Skipped high score write: {err:#}");
                }
            }
            self.events.push(event);
        }
    }
}
