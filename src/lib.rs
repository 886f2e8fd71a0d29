//! Coin Run - An endless side-scrolling coin collector
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (physics, spawning, collisions, game state)
//! - `session`: Host-facing driver (fixed timestep, high score persistence)
//! - `settings`: World geometry configuration
//! - `highscores`: Best-score storage capability

pub mod highscores;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::{HighScoreStore, MemoryStore};
pub use session::Session;
pub use settings::WorldConfig;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the driver will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Coin spawn cadence (seconds)
    pub const COIN_SPAWN_INTERVAL: f32 = 1.0;
    /// Hazard spawn cadence (seconds)
    pub const HAZARD_SPAWN_INTERVAL: f32 = 2.0;

    /// Ground strip scroll speed (units/s)
    pub const GROUND_SCROLL_SPEED: f32 = 100.0;
    /// Time for a coin or hazard to cross the world plus its own width (seconds)
    pub const PICKUP_TRAVEL_TIME: f32 = 4.0;

    /// Downward acceleration on the player (units/s²)
    pub const GRAVITY: f32 = 1470.0;
    /// Upward velocity added per jump request (units/s)
    /// Counters roughly 18 frames of gravity at 60 Hz.
    pub const JUMP_IMPULSE: f32 = 450.0;
}

/// Initialise the platform log backend.
///
/// Native builds use `env_logger` (filtered through `RUST_LOG`); wasm builds
/// route to the browser console. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::try_init();
}

#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
