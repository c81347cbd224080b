//! Orbit Feast - dodge the orbiting enemy, grab the food
//!
//! Core modules:
//! - `sim`: Per-frame simulation (player, enemy, bullets, food)
//! - `game`: Game aggregate, state machine and input translation
//! - `engine`: Interface to the host engine (callbacks, canvas, input)
//! - `config`: Data-driven tunables and key binds
//! - `headless`: In-process frame driver and recording canvas

pub mod binds;
pub mod config;
pub mod engine;
pub mod game;
pub mod headless;
pub mod math;
pub mod render;
pub mod sim;

pub use binds::{Action, ActionBinds, Bind};
pub use config::{ConfigError, GameConfig};
pub use game::{Game, GameState, RunSummary};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Bullets per enemy volley, spread evenly around the enemy
    pub const VOLLEY_SIZE: u32 = 4;

    /// Sprite sheet indices
    pub const PLAYER_SPRITE: u32 = 0;
    pub const ENEMY_SPRITE: u32 = 1;
    pub const BULLET_SPRITE: u32 = 2;

    /// Height of the score text baseline inside the top bar
    pub const SCORE_TEXT_Y: i32 = 2;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(2.5 * PI) - PI / 2.0).abs() < 1e-4);
        assert!((normalize_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-4);
        assert_eq!(normalize_angle(0.5), 0.5);
    }

    #[test]
    fn test_polar_to_cartesian_axes() {
        let right = polar_to_cartesian(2.0, 0.0);
        assert!((right - Vec2::new(2.0, 0.0)).length() < 1e-5);
        let down = polar_to_cartesian(3.0, PI / 2.0);
        assert!((down - Vec2::new(0.0, 3.0)).length() < 1e-5);
    }
}
