//! Game configuration and tunables
//!
//! Loaded once at startup from an ini-style TOML file. Every section is
//! optional and falls back to its defaults; a missing or malformed file is
//! a fatal [`ConfigError`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::Deserialize;
use thiserror::Error;

use crate::math::Rect;

/// Startup configuration failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown key name '{0}' in [binds]")]
    UnknownKey(String),
    #[error("unknown action '{0}' in [binds]")]
    UnknownAction(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Canvas and playfield geometry (pixels)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    /// Reserved above the playfield for the score bar
    pub margin_top: f32,
    /// Reserved on the left, right and bottom edges
    pub margin: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 192,
            margin_top: 12.0,
            margin: 2.0,
        }
    }
}

impl CanvasConfig {
    /// Full canvas rect
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    /// Region the player, enemy and food are confined to
    pub fn playfield(&self) -> Rect {
        self.bounds().inset(self.margin_top, self.margin)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Steering acceleration per held direction (pixels/frame per second)
    pub speed_incr: f32,
    /// Maximum speed (pixels/frame)
    pub max_speed: f32,
    /// Fraction of velocity lost per frame, in [0, 1)
    pub drag: f32,
    /// Speeds below this snap to zero
    pub stop_threshold: f32,
    pub bounds: Rect,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed_incr: 8.0,
            max_speed: 2.0,
            drag: 0.025,
            stop_threshold: 0.02,
            bounds: Rect::new(0.0, 4.0, 8.0, 6.0),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Path angular speed (radians/sec)
    pub speed: f32,
    /// Volley rotation speed (radians/sec)
    pub rot_speed: f32,
    /// Seconds between volleys
    pub bullet_rate: f32,
    /// Bullet speed (pixels/sec)
    pub bullet_speed: f32,
    /// Path amplitude as a fraction of the playfield half extents
    pub path_scale: Vec2,
    pub bounds: Rect,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            speed: 0.6,
            rot_speed: 1.2,
            bullet_rate: 0.8,
            bullet_speed: 60.0,
            path_scale: Vec2::new(0.7, 0.6),
            bounds: Rect::new(1.0, 0.0, 14.0, 16.0),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FoodConfig {
    /// Seconds between collection and the next spawn attempt
    pub grace: f32,
    pub bounds: Rect,
    /// First food sprite index in the sheet
    pub sprite_first: u32,
    /// Number of consecutive food sprites
    pub sprite_count: u32,
    /// Placement attempts per frame before giving up until the next frame
    pub spawn_attempts: u32,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            grace: 1.5,
            bounds: Rect::new(2.0, 2.0, 4.0, 4.0),
            sprite_first: 16,
            sprite_count: 4,
            spawn_attempts: 32,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    /// Score from which every pickup speeds up the enemy's volleys
    pub score_threshold: u32,
    /// Seconds taken off `bullet_rate` per pickup past the threshold
    pub rate_step: f32,
    /// Floor for `bullet_rate`
    pub min_rate: f32,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            score_threshold: 5,
            rate_step: 0.05,
            min_rate: 0.25,
        }
    }
}

/// Headless run used by the binary
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub frames: u64,
    pub dt: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            dt: 1.0 / 60.0,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed RNG seed; a fresh random seed per run when absent
    pub seed: Option<u64>,
    pub canvas: CanvasConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub food: FoodConfig,
    pub difficulty: DifficultyConfig,
    pub demo: DemoConfig,
    /// Key name -> action name
    pub binds: HashMap<String, String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            canvas: CanvasConfig::default(),
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            food: FoodConfig::default(),
            difficulty: DifficultyConfig::default(),
            demo: DemoConfig::default(),
            binds: default_binds(),
        }
    }
}

fn default_binds() -> HashMap<String, String> {
    [
        ("ESCAPE", "QUIT"),
        ("UP", "UP"),
        ("W", "UP"),
        ("DOWN", "DOWN"),
        ("S", "DOWN"),
        ("LEFT", "LEFT"),
        ("A", "LEFT"),
        ("RIGHT", "RIGHT"),
        ("D", "RIGHT"),
        ("SPACE", "ACTION"),
        ("F1", "DEBUG"),
        ("BACKQUOTE", "DEBUG"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl GameConfig {
    /// Parse and validate a config document
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject tunables the simulation cannot run with
    ///
    /// NaN and infinite values fail every check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        let p = &self.player;
        if !(0.0..1.0).contains(&p.drag) {
            return invalid(format!("player.drag must be in [0, 1), got {}", p.drag));
        }
        if !positive(p.max_speed) {
            return invalid(format!("player.max_speed must be positive, got {}", p.max_speed));
        }
        if !(0.0..p.max_speed).contains(&p.stop_threshold) {
            return invalid(format!(
                "player.stop_threshold must be in [0, max_speed), got {}",
                p.stop_threshold
            ));
        }
        if !non_negative(p.speed_incr) {
            return invalid(format!("player.speed_incr must be >= 0, got {}", p.speed_incr));
        }

        let playfield = self.canvas.playfield();
        if !playfield.is_valid() {
            return invalid("canvas margins leave no playfield".to_string());
        }
        for (name, bounds) in [
            ("player", &p.bounds),
            ("enemy", &self.enemy.bounds),
            ("food", &self.food.bounds),
        ] {
            if !bounds.is_valid() || !bounds.origin.is_finite() {
                return invalid(format!("{name}.bounds must have a positive size"));
            }
            if bounds.size.x >= playfield.size.x || bounds.size.y >= playfield.size.y {
                return invalid(format!("{name}.bounds do not fit in the playfield"));
            }
        }

        let e = &self.enemy;
        if !positive(e.bullet_rate) || !positive(e.bullet_speed) {
            return invalid("enemy.bullet_rate and enemy.bullet_speed must be positive".into());
        }
        if !e.speed.is_finite() || !e.rot_speed.is_finite() || !e.path_scale.is_finite() {
            return invalid("enemy.speed, rot_speed and path_scale must be finite".into());
        }
        let d = &self.difficulty;
        if !positive(d.min_rate) || !non_negative(d.rate_step) {
            return invalid("difficulty.min_rate must be positive and rate_step >= 0".into());
        }
        let f = &self.food;
        if f.sprite_count == 0 || f.spawn_attempts == 0 || !non_negative(f.grace) {
            return invalid(
                "food.sprite_count and food.spawn_attempts must be >= 1, food.grace >= 0".into(),
            );
        }
        if !positive(self.demo.dt) {
            return invalid(format!("demo.dt must be positive, got {}", self.demo.dt));
        }
        Ok(())
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.binds.get("ESCAPE").map(String::as_str), Some("QUIT"));
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config.canvas.width, 256);
        assert_eq!(config.player.max_speed, 2.0);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let raw = r#"
            seed = 7

            [player]
            max_speed = 3.5
            bounds = { origin = [0.0, 2.0], size = [6.0, 6.0] }

            [binds]
            Q = "QUIT"
        "#;
        let config = GameConfig::from_toml_str(raw).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.player.max_speed, 3.5);
        assert_eq!(config.player.drag, PlayerConfig::default().drag);
        assert_eq!(config.player.bounds, Rect::new(0.0, 2.0, 6.0, 6.0));
        assert_eq!(config.binds.len(), 1);
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let err = GameConfig::from_toml_str("[player\nmax_speed = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_drag_rejected() {
        let err = GameConfig::from_toml_str("[player]\ndrag = 1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_nan_tunables_rejected() {
        for raw in [
            "[player]\nmax_speed = nan",
            "[player]\nstop_threshold = nan",
            "[player]\nspeed_incr = nan",
            "[enemy]\nbullet_rate = nan",
            "[difficulty]\nmin_rate = nan",
            "[demo]\ndt = inf",
        ] {
            assert!(
                matches!(GameConfig::from_toml_str(raw), Err(ConfigError::Invalid(_))),
                "accepted {raw:?}"
            );
        }
    }

    #[test]
    fn test_margins_swallowing_canvas_rejected() {
        let raw = "[canvas]\nwidth = 10\nheight = 10\nmargin_top = 12.0";
        assert!(matches!(
            GameConfig::from_toml_str(raw),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load_from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.toml"));
    }

    #[test]
    fn test_playfield_geometry() {
        let canvas = CanvasConfig::default();
        let field = canvas.playfield();
        assert_eq!(field.min(), Vec2::new(2.0, 12.0));
        assert_eq!(field.max(), Vec2::new(254.0, 190.0));
    }
}
