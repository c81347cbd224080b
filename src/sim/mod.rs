//! Gameplay simulation module
//!
//! All per-frame gameplay logic lives here:
//! - Seeded RNG only, owned by the world
//! - Enemy position is a function of absolute time, not integrated
//! - No rendering or engine dependencies

pub mod state;
pub mod tick;

pub use state::{Bullet, Enemy, Food, GameEvent, Player, World};
pub use tick::{fire_volley, step_bullets, step_enemy, step_player, tick};
