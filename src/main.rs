//! Orbit Feast entry point
//!
//! Loads the config, builds the game and drives it with the headless engine
//! for the configured number of demo frames.

use orbit_feast::engine::InputCommand;
use orbit_feast::headless::{HeadlessEngine, RecordingCanvas};
use orbit_feast::{Action, ActionBinds, Game};

const DEFAULT_CONFIG_PATH: &str = "assets/config.toml";

/// Frames each demo direction is held for
const DEMO_LEG_FRAMES: u64 = 45;

/// Steer a square loop: right, down, left, up, using whatever keys are bound
fn demo_script(binds: &ActionBinds) -> impl FnMut(u64) -> Vec<InputCommand> + use<> {
    let legs: Vec<i32> = [Action::Right, Action::Down, Action::Left, Action::Up]
        .into_iter()
        .filter_map(|action| binds.bind_for_action(action))
        .map(|bind| bind.keycode())
        .collect();

    move |frame| {
        if legs.is_empty() || frame % DEMO_LEG_FRAMES != 0 {
            return Vec::new();
        }
        let leg = (frame / DEMO_LEG_FRAMES) as usize;
        let mut inputs = Vec::with_capacity(2);
        if leg > 0 {
            inputs.push(InputCommand::key_released(legs[(leg - 1) % legs.len()]));
        }
        inputs.push(InputCommand::key_pressed(legs[leg % legs.len()]));
        inputs
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Orbit Feast starting...");

    let config_path =
        std::env::var("ORBIT_FEAST_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let mut game = match Game::from_file(&config_path, RecordingCanvas::default()) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Startup failed: {}", e);
            std::process::exit(1);
        }
    };

    let demo = game.config().demo.clone();
    let script = demo_script(game.action_binds());
    let mut engine = HeadlessEngine::new();
    let frames = engine.run(&mut game, demo.dt, demo.frames, script);

    log::info!(
        "Finished after {} frames ({} presented), final score {}",
        frames,
        engine.presented(),
        game.world().player.score
    );
}
