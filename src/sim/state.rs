//! Entity state and the per-run world
//!
//! Everything a run needs lives in [`World`], rebuilt from config each time
//! play starts.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::{DifficultyConfig, EnemyConfig, FoodConfig, GameConfig, PlayerConfig};
use crate::math::Rect;

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub score: u32,
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    pub button_up: bool,
    pub button_down: bool,
    pub button_left: bool,
    pub button_right: bool,
    pub button_action: bool,
    pub speed_incr: f32,
    pub max_speed: f32,
    pub drag: f32,
    pub stop_threshold: f32,
    /// Relative to `pos`
    pub bounds: Rect,
}

impl Player {
    pub fn new(config: &PlayerConfig, pos: Vec2) -> Self {
        Self {
            score: 0,
            pos,
            vel: Vec2::ZERO,
            button_up: false,
            button_down: false,
            button_left: false,
            button_right: false,
            button_action: false,
            speed_incr: config.speed_incr,
            max_speed: config.max_speed,
            drag: config.drag,
            stop_threshold: config.stop_threshold,
            bounds: config.bounds,
        }
    }

    /// Bounding rect in canvas space
    #[inline]
    pub fn rect(&self) -> Rect {
        self.bounds.translated(self.pos)
    }

    /// Acceleration from the held direction buttons
    ///
    /// Diagonals are not normalized, so they steer slightly faster.
    pub fn steering(&self) -> Vec2 {
        let mut steer = Vec2::ZERO;
        if self.button_up {
            steer.y -= self.speed_incr;
        }
        if self.button_down {
            steer.y += self.speed_incr;
        }
        if self.button_left {
            steer.x -= self.speed_incr;
        }
        if self.button_right {
            steer.x += self.speed_incr;
        }
        steer
    }
}

/// The orbiting enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    /// Path angular speed (radians/sec)
    pub speed: f32,
    /// Volley direction (radians)
    pub rot: f32,
    pub rot_speed: f32,
    /// Seconds between volleys
    pub bullet_rate: f32,
    pub bullet_cooldown: f32,
    pub bullet_speed: f32,
    pub path_scale: Vec2,
    pub bounds: Rect,
}

impl Enemy {
    pub fn new(config: &EnemyConfig) -> Self {
        Self {
            pos: Vec2::ZERO,
            speed: config.speed,
            rot: 0.0,
            rot_speed: config.rot_speed,
            bullet_rate: config.bullet_rate,
            bullet_cooldown: 0.0,
            bullet_speed: config.bullet_speed,
            path_scale: config.path_scale,
            bounds: config.bounds,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.bounds.translated(self.pos)
    }

    /// Volley origin
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Position at absolute time `t` on the figure-eight around the playfield centre
    pub fn path_position(&self, t: f32, playfield: &Rect) -> Vec2 {
        let theta = t * self.speed;
        let half = playfield.size * 0.5;
        let offset = Vec2::new(
            theta.sin() * half.x * self.path_scale.x,
            (2.0 * theta).sin() * half.y * self.path_scale.y,
        );
        playfield.center() + offset - self.bounds.center()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    /// Pixels per second
    pub vel: Vec2,
}

/// The single food pickup
#[derive(Debug, Clone)]
pub struct Food {
    pub spawned: bool,
    pub pos: Vec2,
    pub bounds: Rect,
    pub sprite: u32,
    /// Seconds since the food was last collected
    pub grace_timer: f32,
    pub grace: f32,
    pub sprite_first: u32,
    pub sprite_count: u32,
    pub spawn_attempts: u32,
}

impl Food {
    pub fn new(config: &FoodConfig) -> Self {
        Self {
            spawned: false,
            pos: Vec2::ZERO,
            bounds: config.bounds,
            sprite: config.sprite_first,
            grace_timer: 0.0,
            grace: config.grace,
            sprite_first: config.sprite_first,
            sprite_count: config.sprite_count,
            spawn_attempts: config.spawn_attempts,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.bounds.translated(self.pos)
    }
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    VolleyFired { rot: f32 },
    FoodSpawned { pos: Vec2, sprite: u32 },
    /// Every placement candidate overlapped the player or enemy
    FoodSpawnSkipped,
    FoodEaten { score: u32 },
    DifficultyRaised { bullet_rate: f32 },
}

/// Complete per-run simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub seed: u64,
    pub player: Player,
    pub enemy: Enemy,
    /// Unordered; removal swaps with the last bullet
    pub bullets: Vec<Bullet>,
    pub food: Food,
    pub playfield: Rect,
    /// Bullets leaving this rect are removed
    pub bullet_bounds: Rect,
    pub difficulty: DifficultyConfig,
    pub rng: Pcg32,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl World {
    /// Fresh run: player centred at rest, enemy at the start of its path, no food yet
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let playfield = config.canvas.playfield();

        let spawn = playfield.center() - config.player.bounds.center();
        let player = Player::new(&config.player, spawn);

        let mut enemy = Enemy::new(&config.enemy);
        enemy.pos = enemy.path_position(0.0, &playfield);

        Self {
            seed,
            player,
            enemy,
            bullets: Vec::new(),
            food: Food::new(&config.food),
            playfield,
            bullet_bounds: playfield,
            difficulty: config.difficulty.clone(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }
}
