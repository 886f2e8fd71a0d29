//! Coin Run headless runner
//!
//! Plays a few runs with a simple autopilot (jump off the ground, and again
//! whenever the player falls below mid-height) and persists the best score
//! next to the config.
//!
//! Usage: `coin-run [config.json] [runs]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use coin_run::consts::SIM_DT;
    use coin_run::highscores::JsonFileStore;
    use coin_run::sim::{GameEvent, GamePhase};
    use coin_run::{Session, WorldConfig};

    /// Give up on a run after this much simulated time
    const MAX_RUN_SECONDS: f32 = 300.0;

    coin_run::init_logging();
    log::info!("Coin Run (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config_path = PathBuf::from(args.next().unwrap_or_else(|| "coin_run.json".to_string()));
    let runs: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3);

    let config = WorldConfig::load_or_default(&config_path);
    let store = JsonFileStore::new(config_path.with_file_name("coin_run_high_score.json"));
    let mut session = Session::new(config, store);
    log::info!("Spawn seed {}", session.state().seed);

    let mut finished = 0;
    let mut run_ticks = 0u32;
    while finished < runs {
        match session.phase() {
            GamePhase::Playing => {
                let state = session.state();
                let falling = state.player_pos().y < 0.0 && state.player_vel().y <= 0.0;
                if state.player_grounded() || falling {
                    session.on_jump_requested();
                }
                run_ticks += 1;
                if run_ticks as f32 * SIM_DT > MAX_RUN_SECONDS {
                    log::warn!("Run exceeded {MAX_RUN_SECONDS}s, stopping");
                    break;
                }
            }
            GamePhase::GameOver => {
                let restart = session.state().config.restart_center;
                session.on_point_tapped(restart.x, restart.y);
                run_ticks = 0;
            }
        }

        session.update(SIM_DT);

        for event in session.drain_events() {
            if let GameEvent::GameOver { final_score } = event {
                finished += 1;
                log::info!(
                    "Run {finished}/{runs}: score {final_score} (best {})",
                    session.state().high_score
                );
            }
        }
    }

    println!("Best score: {}", session.state().high_score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The host page drives `coin_run::Session` directly
}
