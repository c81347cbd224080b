//! Per-frame simulation step
//!
//! Advances the player, enemy, bullets and food by one frame. The caller
//! passes absolute time `t` (seconds since engine start) and the frame delta
//! `dt`; all randomness comes from the world's seeded RNG.

use glam::Vec2;
use rand::Rng;

use super::state::{Bullet, Enemy, GameEvent, Player, World};
use crate::consts::VOLLEY_SIZE;
use crate::math::Rect;
use crate::{normalize_angle, polar_to_cartesian};

/// Advance the world by one frame
pub fn tick(world: &mut World, t: f32, dt: f32) {
    world.events.clear();

    step_player(&mut world.player, &world.playfield, dt);
    step_enemy(&mut world.enemy, &world.playfield, t, dt);

    if let Some(rot) = fire_volley(&mut world.enemy, &mut world.bullets, dt) {
        world.events.push(GameEvent::VolleyFired { rot });
    }
    step_bullets(&mut world.bullets, &world.bullet_bounds, dt);

    step_food(world, dt);
}

/// Steer, limit speed, integrate and keep the player inside the playfield
///
/// The stop threshold only applies while no direction is held, so a small
/// `dt` cannot keep a steering player pinned at rest.
pub fn step_player(player: &mut Player, playfield: &Rect, dt: f32) {
    let steering = player.steering();
    player.vel += steering * dt;

    let speed = player.vel.length();
    if speed > player.max_speed {
        player.vel *= player.max_speed / speed;
    } else if steering == Vec2::ZERO && speed < player.stop_threshold {
        player.vel = Vec2::ZERO;
    } else {
        player.vel *= 1.0 - player.drag;
    }

    player.pos += player.vel;
    clamp_to_playfield(player, playfield);
}

/// Push the player's rect back inside, killing velocity on the axis that hit
fn clamp_to_playfield(player: &mut Player, playfield: &Rect) {
    let (min, max) = (playfield.min(), playfield.max());
    let rect = player.rect();

    if rect.min().x < min.x {
        player.pos.x = min.x - player.bounds.origin.x;
        player.vel.x = 0.0;
    } else if rect.max().x > max.x {
        player.pos.x = max.x - player.bounds.max().x;
        player.vel.x = 0.0;
    }

    if rect.min().y < min.y {
        player.pos.y = min.y - player.bounds.origin.y;
        player.vel.y = 0.0;
    } else if rect.max().y > max.y {
        player.pos.y = max.y - player.bounds.max().y;
        player.vel.y = 0.0;
    }
}

/// Move the enemy along its path and spin the volley direction
pub fn step_enemy(enemy: &mut Enemy, playfield: &Rect, t: f32, dt: f32) {
    enemy.pos = enemy.path_position(t, playfield);
    enemy.rot = normalize_angle(enemy.rot + enemy.rot_speed * dt);
}

/// Fire a volley once the cooldown reaches the bullet rate
///
/// Returns the volley rotation when bullets were spawned.
pub fn fire_volley(enemy: &mut Enemy, bullets: &mut Vec<Bullet>, dt: f32) -> Option<f32> {
    enemy.bullet_cooldown += dt;
    if enemy.bullet_cooldown < enemy.bullet_rate {
        return None;
    }

    let origin = enemy.center();
    let step = std::f32::consts::TAU / VOLLEY_SIZE as f32;
    for i in 0..VOLLEY_SIZE {
        let theta = i as f32 * step + enemy.rot;
        bullets.push(Bullet {
            pos: origin,
            vel: polar_to_cartesian(enemy.bullet_speed, theta),
        });
    }
    enemy.bullet_cooldown = dt;
    Some(enemy.rot)
}

/// Move bullets and drop the ones that left `bounds`
pub fn step_bullets(bullets: &mut Vec<Bullet>, bounds: &Rect, dt: f32) {
    let mut i = 0;
    while i < bullets.len() {
        let bullet = &mut bullets[i];
        bullet.pos += bullet.vel * dt;
        if bounds.contains_point(bullet.pos) {
            i += 1;
        } else {
            // Order is irrelevant; the swapped-in bullet is processed at `i` next
            bullets.swap_remove(i);
        }
    }
}

/// Count down to the next spawn, or check whether the player ate the food
fn step_food(world: &mut World, dt: f32) {
    if !world.food.spawned {
        world.food.grace_timer += dt;
        if world.food.grace_timer >= world.food.grace {
            let event = if spawn_food(world) {
                GameEvent::FoodSpawned {
                    pos: world.food.pos,
                    sprite: world.food.sprite,
                }
            } else {
                GameEvent::FoodSpawnSkipped
            };
            world.events.push(event);
        }
        return;
    }

    if !world.player.rect().contains_rect(&world.food.rect()) {
        return;
    }

    world.player.score += 1;
    world.events.push(GameEvent::FoodEaten {
        score: world.player.score,
    });

    let difficulty = &world.difficulty;
    let enemy = &mut world.enemy;
    if world.player.score >= difficulty.score_threshold && enemy.bullet_rate > difficulty.min_rate
    {
        enemy.bullet_rate = (enemy.bullet_rate - difficulty.rate_step).max(difficulty.min_rate);
        world.events.push(GameEvent::DifficultyRaised {
            bullet_rate: enemy.bullet_rate,
        });
    }

    world.food.spawned = false;
    world.food.grace_timer = 0.0;
}

/// Try to place the food away from the player and enemy
///
/// Gives up after `spawn_attempts` candidates; the grace timer stays
/// expired so the next frame tries again.
fn spawn_food(world: &mut World) -> bool {
    let food = &mut world.food;
    let player_rect = world.player.rect();
    let enemy_rect = world.enemy.rect();

    let min = world.playfield.min() - food.bounds.min();
    let max = world.playfield.max() - food.bounds.max();

    for _ in 0..food.spawn_attempts {
        let candidate = Vec2::new(
            world.rng.random_range(min.x..=max.x),
            world.rng.random_range(min.y..=max.y),
        );
        let rect = food.bounds.translated(candidate);
        if rect.overlaps(&player_rect) || rect.overlaps(&enemy_rect) {
            continue;
        }

        food.pos = candidate;
        food.sprite = food.sprite_first + world.rng.random_range(0..food.sprite_count);
        food.spawned = true;
        return true;
    }
    false
}
