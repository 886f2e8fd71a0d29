//! Fixed timestep simulation tick
//!
//! One tick runs to completion: player physics, scrolling, spawn triggers,
//! then contacts and their consequences. Spawning after the scroll pass means
//! a new pickup starts moving on the tick after the one it appeared in.
//! While GameOver the world is frozen and only the restart control responds.

use glam::Vec2;

use super::collision::{find_contacts, resolve_contacts};
use super::physics::integrate_player;
use super::scheduler::{SpawnKind, SpawnTrigger};
use super::scroll::advance_scrolling;
use super::spawner::{spawn_coin, spawn_hazard};
use super::state::{GamePhase, SimulationState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Jump requested (touch/click anywhere)
    pub jump: bool,
    /// Tap location in world coordinates, hit-tested against the restart control
    pub tap: Option<Vec2>,
}

/// Advance the simulation by one step
pub fn tick(state: &mut SimulationState, input: &TickInput, dt: f32) {
    if state.phase == GamePhase::GameOver {
        if let Some(point) = input.tap {
            state.on_point_tapped(point);
        }
        return;
    }

    state.run_time += dt;

    integrate_player(&mut state.store, state.player, input.jump, dt);
    advance_scrolling(&mut state.store, dt);

    for trigger in state.scheduler.advance(dt) {
        handle_spawn(state, trigger);
    }

    let contacts = find_contacts(&state.store);
    let outcome = resolve_contacts(&mut state.store, &contacts);
    for _ in 0..outcome.coins_collected() {
        state.collect_coin();
    }
    if outcome.hazard_hit() {
        state.enter_game_over();
    }
}

/// Run a spawn trigger, unless its scheduler generation was cancelled
pub fn handle_spawn(state: &mut SimulationState, trigger: SpawnTrigger) {
    if !state.scheduler.accepts(&trigger) {
        log::debug!("Dropped stale {:?} trigger", trigger.kind);
        return;
    }
    match trigger.kind {
        SpawnKind::Coin => spawn_coin(&mut state.store, &state.config, &mut state.rng),
        SpawnKind::Hazard => spawn_hazard(&mut state.store, &state.config, &mut state.rng),
    };
}
