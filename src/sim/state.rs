//! Game state and the Playing/GameOver state machine
//!
//! Everything the simulation mutates lives in [`SimulationState`]; there is
//! no ambient global scene.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::entity::{EntityId, EntityKind, EntityStore};
use super::physics::is_grounded;
use super::scheduler::Scheduler;
use super::scroll::{Motion, layout_ground};
use crate::consts::GROUND_SCROLL_SPEED;
use crate::settings::WorldConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended, world frozen, waiting for the restart control
    GameOver,
}

/// Output events for the presentation layer, queued per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged(u32),
    HighScoreChanged(u32),
    GameOver { final_score: u32 },
    Restart,
}

/// Complete simulation state
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    /// World geometry
    pub config: WorldConfig,
    /// Seed the spawn RNG started from
    pub seed: u64,
    /// Spawn RNG
    pub rng: Pcg32,
    /// All live entities
    pub store: EntityStore,
    /// The player entity (never destroyed)
    pub player: EntityId,
    /// Coin/hazard spawn timers
    pub scheduler: Scheduler,
    /// Coins collected this run
    pub score: u32,
    /// Best score across runs
    pub high_score: u32,
    pub phase: GamePhase,
    /// Simulated seconds spent Playing this run
    pub run_time: f32,
    /// Completed runs
    pub runs_completed: u32,
    /// Pending output events
    events: Vec<GameEvent>,
}

impl SimulationState {
    /// Build the scene and start playing.
    ///
    /// The seed comes from the config when set, otherwise from OS entropy.
    pub fn new(config: WorldConfig, high_score: u32) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        Self::with_seed(config, high_score, seed)
    }

    pub fn with_seed(config: WorldConfig, high_score: u32, seed: u64) -> Self {
        let mut store = EntityStore::new();

        let ceiling_y = config.half_height() - config.ceiling_thickness / 2.0;
        store.spawn(
            EntityKind::Ceiling,
            Vec2::new(0.0, ceiling_y),
            Vec2::new(config.world_width, config.ceiling_thickness),
        );

        let ground_y = -config.half_height() + config.ground_tile_height / 2.0;
        let tile_size = Vec2::new(config.ground_tile_width, config.ground_tile_height);
        for tile in layout_ground(config.world_width, config.ground_tile_width, GROUND_SCROLL_SPEED) {
            store.spawn_moving(
                EntityKind::Ground,
                Vec2::new(tile.x(), ground_y),
                tile_size,
                Motion::GroundLoop(tile),
            );
        }

        let player = store.spawn(EntityKind::Player, config.player_start(), config.player_size);

        let mut scheduler = Scheduler::new();
        scheduler.start();

        log::info!(
            "Scene ready: {}x{} world, {} ground tiles, high score {}",
            config.world_width,
            config.world_height,
            store.count_of(EntityKind::Ground),
            high_score
        );

        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            store,
            player,
            scheduler,
            score: 0,
            high_score,
            phase: GamePhase::Playing,
            run_time: 0.0,
            runs_completed: 0,
            events: Vec::new(),
        }
    }

    /// Bounds of the restart control shown while GameOver
    pub fn restart_bounds(&self) -> Aabb {
        Aabb::from_center(self.config.restart_center, self.config.restart_size)
    }

    pub fn player_pos(&self) -> Vec2 {
        self.store.get(self.player).map(|p| p.pos).unwrap_or(Vec2::ZERO)
    }

    pub fn player_vel(&self) -> Vec2 {
        self.store.get(self.player).map(|p| p.vel).unwrap_or(Vec2::ZERO)
    }

    /// Whether the player is standing on the ground
    pub fn player_grounded(&self) -> bool {
        is_grounded(&self.store, self.player)
    }

    /// Pending events, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Credit one collected coin
    pub fn collect_coin(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.score += 1;
        self.events.push(GameEvent::ScoreChanged(self.score));
    }

    /// Playing → GameOver. Ignored when already GameOver.
    pub fn enter_game_over(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }

        self.phase = GamePhase::GameOver;
        self.scheduler.stop();
        self.runs_completed += 1;

        if self.score > self.high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::HighScoreChanged(self.high_score));
            log::info!("New high score: {}", self.high_score);
        }
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
        });
        log::info!("Game over after {:.1}s with score {}", self.run_time, self.score);
    }

    /// GameOver → Playing.
    ///
    /// Coins and hazards left from the previous run stay where they froze and
    /// resume scrolling; only the score, player and spawn cadence reset.
    pub fn restart(&mut self) {
        if self.phase != GamePhase::GameOver {
            return;
        }

        self.score = 0;
        self.run_time = 0.0;
        let start = self.config.player_start();
        if let Some(player) = self.store.get_mut(self.player) {
            player.pos = start;
            player.vel = Vec2::ZERO;
        }
        self.scheduler.start();
        self.phase = GamePhase::Playing;

        self.events.push(GameEvent::ScoreChanged(0));
        self.events.push(GameEvent::Restart);
        log::info!("Restarting (run {})", self.runs_completed + 1);
    }

    /// Tap handler: restarts when the tap lands on the restart control during
    /// GameOver. Returns whether a restart happened.
    pub fn on_point_tapped(&mut self, point: Vec2) -> bool {
        if self.phase != GamePhase::GameOver || !self.restart_bounds().contains_point(point) {
            return false;
        }
        self.restart();
        true
    }
}
