//! Draw calls for the playing screen
//!
//! Reads the world and issues sprite, border and text calls on a canvas.
//! Positions are truncated to whole pixels.

use glam::Vec2;

use crate::consts::{BULLET_SPRITE, ENEMY_SPRITE, PLAYER_SPRITE, SCORE_TEXT_Y};
use crate::engine::{Canvas, color};
use crate::math::Rect;
use crate::sim::World;

#[inline]
fn pixel(pos: Vec2) -> (i32, i32) {
    (pos.x as i32, pos.y as i32)
}

/// Draw one frame of the world
pub fn draw_world(canvas: &mut dyn Canvas, world: &World) {
    canvas.clear(color::BLACK);

    if world.food.spawned {
        let (x, y) = pixel(world.food.pos);
        canvas.sprite(world.food.sprite, x, y, color::pico8::GREEN);
    }

    for bullet in &world.bullets {
        let (x, y) = pixel(bullet.pos);
        canvas.sprite(BULLET_SPRITE, x, y, color::pico8::RED);
    }

    let (x, y) = pixel(world.player.pos);
    canvas.sprite(PLAYER_SPRITE, x, y, color::pico8::PEACH);

    let (x, y) = pixel(world.enemy.pos);
    canvas.sprite(ENEMY_SPRITE, x, y, color::pico8::PINK);

    draw_ui(canvas, &world.playfield, world.player.score);
}

/// Playfield border and the score bar above it
fn draw_ui(canvas: &mut dyn Canvas, playfield: &Rect, score: u32) {
    let (x0, y0) = pixel(playfield.min());
    let (x1, y1) = pixel(playfield.max());
    canvas.rect(x0 - 1, y0 - 1, x1, y1, color::pico8::DARK_GRAY);
    canvas.text(&format!("SCORE {score}"), x0, SCORE_TEXT_Y, color::pico8::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::headless::{DrawCommand, RecordingCanvas};
    use crate::sim::Bullet;

    #[test]
    fn test_draw_world_order_and_content() {
        let mut world = World::new(&GameConfig::default(), 1);
        world.player.score = 3;
        world.player.pos = Vec2::new(10.7, 20.2);
        world.bullets.push(Bullet {
            pos: Vec2::new(50.9, 60.1),
            vel: Vec2::ZERO,
        });
        world.food.spawned = true;
        world.food.pos = Vec2::new(30.0, 40.0);

        let mut canvas = RecordingCanvas::new(256, 192);
        draw_world(&mut canvas, &world);
        let cmds = canvas.commands();
        let food = world.food.sprite;

        assert!(matches!(cmds[0], DrawCommand::Clear(_)));
        assert!(matches!(
            cmds[1],
            DrawCommand::Sprite { index, x: 30, y: 40, .. } if index == food
        ));
        assert!(matches!(cmds[2], DrawCommand::Sprite { index: BULLET_SPRITE, x: 50, y: 60, .. }));
        assert!(matches!(cmds[3], DrawCommand::Sprite { index: PLAYER_SPRITE, x: 10, y: 20, .. }));
        assert!(matches!(cmds[4], DrawCommand::Sprite { index: ENEMY_SPRITE, .. }));
        assert!(matches!(cmds[5], DrawCommand::Rect { .. }));
        assert!(matches!(&cmds[6], DrawCommand::Text { text, .. } if text == "SCORE 3"));
    }

    #[test]
    fn test_unspawned_food_not_drawn() {
        let world = World::new(&GameConfig::default(), 1);
        let mut canvas = RecordingCanvas::new(256, 192);
        draw_world(&mut canvas, &world);
        let sprites = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { .. }))
            .count();
        assert_eq!(sprites, 2);
    }
}
