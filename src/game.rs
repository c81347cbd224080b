//! The game aggregate and its state machine
//!
//! `Game` implements [`GameCallbacks`] so the engine can drive it. Per-state
//! behaviour is dispatched on [`GameState`]; only `Playing` reacts to input,
//! runs the simulation and draws.

use std::path::Path;

use crate::binds::{Action, ActionBinds, bind_for_keycode};
use crate::config::{ConfigError, GameConfig};
use crate::engine::{Canvas, Engine, GameCallbacks, InputCommand, TriggerState};
use crate::render::draw_world;
use crate::sim::{GameEvent, World, tick};

/// Top-level game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    /// Nothing set up yet
    #[default]
    None,
    /// Creating the run (passes straight through to Playing)
    Initializing,
    /// Playing the game
    Playing,
    /// Shutting down
    Quitting,
    /// Final state; signals the engine to stop
    Terminate,
}

/// Outcome of a finished run, captured when play is left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub seed: u64,
    pub score: u32,
}

pub struct Game<C: Canvas> {
    config: GameConfig,
    action_binds: ActionBinds,
    canvas: C,
    imgui_debug: bool,
    game_state: GameState,
    world: World,
    last_run: Option<RunSummary>,
}

impl<C: Canvas> Game<C> {
    /// Build a game from a loaded config
    pub fn new(config: GameConfig, canvas: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let action_binds = ActionBinds::from_table(&config.binds)?;
        let world = World::new(&config, config.seed.unwrap_or_default());
        Ok(Self {
            config,
            action_binds,
            canvas,
            imgui_debug: false,
            game_state: GameState::None,
            world,
            last_run: None,
        })
    }

    /// Load the config (tunables and binds) from `path` and build a game
    pub fn from_file(path: impl AsRef<Path>, canvas: C) -> Result<Self, ConfigError> {
        let config = GameConfig::load_from_file(path)?;
        Self::new(config, canvas)
    }

    pub fn state(&self) -> GameState {
        self.game_state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn action_binds(&self) -> &ActionBinds {
        &self.action_binds
    }

    pub fn imgui_debug(&self) -> bool {
        self.imgui_debug
    }

    /// Summary of the most recently left run
    pub fn last_run(&self) -> Option<RunSummary> {
        self.last_run
    }

    /// Move to `game_state`, running the leave hook of the current state and
    /// the enter hook of the new one
    pub fn transition(&mut self, engine: &mut dyn Engine, game_state: GameState) {
        if self.game_state == game_state {
            return;
        }

        // When leaving a game state
        match self.game_state {
            GameState::Playing => self.playing_leave(),
            GameState::Terminate => return,
            _ => {}
        }

        self.game_state = game_state;

        // When entering a new game state
        match self.game_state {
            GameState::None => {}
            GameState::Initializing => {
                log::info!("Initializing");
                self.transition(engine, GameState::Playing);
            }
            GameState::Playing => {
                log::info!("Playing");
                self.playing_enter(engine);
            }
            GameState::Quitting => {
                log::info!("Quitting");
            }
            GameState::Terminate => {
                log::info!("Terminating");
                engine.terminate();
            }
        }
    }

    fn playing_enter(&mut self, engine: &mut dyn Engine) {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        log::info!("New run with seed: {}", seed);
        self.world = World::new(&self.config, seed);
        engine.init_canvas(&mut self.canvas, &self.config.canvas);
    }

    fn playing_leave(&mut self) {
        log::debug!(
            "Leaving play: score {}, {} bullets in flight",
            self.world.player.score,
            self.world.bullets.len()
        );
        self.last_run = Some(RunSummary {
            seed: self.world.seed,
            score: self.world.player.score,
        });
    }

    fn playing_on_input(&mut self, engine: &mut dyn Engine, input: &InputCommand) {
        let InputCommand::Key { keycode, trigger } = *input else {
            return;
        };

        let Some(bind) = bind_for_keycode(keycode) else {
            log::error!("ActionBind not found for keycode {}", keycode);
            return;
        };

        let pressed = trigger == TriggerState::Pressed;
        let player = &mut self.world.player;
        match self.action_binds.action_for(bind) {
            Action::Quit => {
                if pressed {
                    self.transition(engine, GameState::Quitting);
                }
            }
            Action::Up => hold(&mut player.button_up, trigger),
            Action::Down => hold(&mut player.button_down, trigger),
            Action::Left => hold(&mut player.button_left, trigger),
            Action::Right => hold(&mut player.button_right, trigger),
            Action::Action => hold(&mut player.button_action, trigger),
            Action::Debug => {
                if pressed {
                    self.imgui_debug = !self.imgui_debug;
                    log::debug!("Debug overlay: {}", self.imgui_debug);
                }
            }
            Action::None => {}
        }
    }

    fn playing_update(&mut self, t: f32, dt: f32) {
        tick(&mut self.world, t, dt);

        for event in &self.world.events {
            match event {
                GameEvent::FoodEaten { score } => log::info!("Food eaten, score {}", score),
                GameEvent::DifficultyRaised { bullet_rate } => {
                    log::info!("Difficulty raised, bullet rate {:.2}s", bullet_rate)
                }
                GameEvent::FoodSpawnSkipped => {
                    log::debug!("No room for food this frame, retrying")
                }
                GameEvent::FoodSpawned { pos, sprite } => {
                    log::debug!("Food {} spawned at ({:.1}, {:.1})", sprite, pos.x, pos.y)
                }
                GameEvent::VolleyFired { rot } => log::trace!("Volley at {:.2} rad", rot),
            }
        }
    }

    fn playing_render(&mut self, engine: &mut dyn Engine) {
        draw_world(&mut self.canvas, &self.world);
        engine.render_canvas(&self.canvas);
    }
}

/// Level-triggered button: pressed sets, released clears, repeats change nothing
fn hold(flag: &mut bool, trigger: TriggerState) {
    match trigger {
        TriggerState::Pressed => *flag = true,
        TriggerState::Released => *flag = false,
        TriggerState::Repeat => {}
    }
}

impl<C: Canvas> GameCallbacks for Game<C> {
    fn on_input(&mut self, engine: &mut dyn Engine, input: &InputCommand) {
        if self.game_state == GameState::Playing {
            self.playing_on_input(engine, input);
        }
    }

    fn update(&mut self, engine: &mut dyn Engine, t: f32, dt: f32) {
        match self.game_state {
            GameState::None => self.transition(engine, GameState::Initializing),
            GameState::Playing => self.playing_update(t, dt),
            GameState::Quitting => self.transition(engine, GameState::Terminate),
            GameState::Initializing | GameState::Terminate => {}
        }
    }

    fn render(&mut self, engine: &mut dyn Engine) {
        if self.game_state == GameState::Playing {
            self.playing_render(engine);
        }
    }

    fn render_imgui(&mut self, engine: &mut dyn Engine) {
        if !self.imgui_debug {
            return;
        }
        let w = &self.world;
        engine.debug_text(&format!("state: {:?}", self.game_state));
        engine.debug_text(&format!(
            "player pos: ({:.1}, {:.1}) vel: ({:.2}, {:.2})",
            w.player.pos.x, w.player.pos.y, w.player.vel.x, w.player.vel.y
        ));
        engine.debug_text(&format!("score: {}", w.player.score));
        engine.debug_text(&format!(
            "bullets: {} rate: {:.2}s",
            w.bullets.len(),
            w.enemy.bullet_rate
        ));
        if w.food.spawned {
            engine.debug_text(&format!("food: ({:.1}, {:.1})", w.food.pos.x, w.food.pos.y));
        } else {
            engine.debug_text(&format!("food: in {:.2}s", w.food.grace - w.food.grace_timer));
        }
    }

    fn on_shutdown(&mut self, engine: &mut dyn Engine) {
        log::info!("Quitting");
        engine.terminate();
    }
}
