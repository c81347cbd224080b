use orbit_feast::engine::{Engine, InputCommand};
use orbit_feast::headless::{DrawCommand, HeadlessEngine, RecordingCanvas};
use orbit_feast::{Bind, Game, GameConfig, GameState};

const DT: f32 = 1.0 / 60.0;

fn shipped_config_path() -> String {
    format!("{}/assets/config.toml", env!("CARGO_MANIFEST_DIR"))
}

fn new_game() -> Game<RecordingCanvas> {
    Game::from_file(shipped_config_path(), RecordingCanvas::default()).unwrap()
}

#[test]
fn shipped_config_loads() {
    let config = GameConfig::load_from_file(shipped_config_path()).unwrap();
    assert_eq!(config.canvas.width, 256);
    assert_eq!(config.binds.len(), 12);

    let game = new_game();
    assert_eq!(game.state(), GameState::None);
    assert_eq!(game.action_binds().len(), 12);
}

#[test]
fn holding_right_reaches_max_speed_and_holds_it() {
    let mut game = new_game();
    let mut engine = HeadlessEngine::new();

    engine.step(&mut game, &[], DT);
    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.world().player.vel.x, 0.0);

    let max = game.world().player.max_speed;
    let right = InputCommand::key_pressed(Bind::Right.keycode());
    engine.step(&mut game, &[right], DT);

    let mut last = game.world().player.vel.x.abs();
    let mut at_max = false;
    for _ in 1..60 {
        engine.step(&mut game, &[], DT);
        let vx = game.world().player.vel.x.abs();
        assert!(vx + 1e-6 >= last);
        if at_max {
            assert!((vx - max).abs() < 1e-4);
        }
        at_max |= (vx - max).abs() < 1e-4;
        last = vx;
    }
    assert!(at_max);
    assert!(game.world().player.pos.x > game.world().playfield.center().x);
}

#[test]
fn quit_runs_through_quitting_to_terminate() {
    let mut game = new_game();
    let mut engine = HeadlessEngine::new();
    let quit = Bind::Escape.keycode();

    let frames = engine.run(&mut game, DT, 1_000, |frame| {
        if frame == 10 {
            vec![InputCommand::key_pressed(quit)]
        } else {
            Vec::new()
        }
    });

    // Frame 10 sees QUIT during input and Terminate during its own update
    assert_eq!(frames, 11);
    assert_eq!(game.state(), GameState::Terminate);
    assert!(!engine.is_running());
    assert_eq!(engine.presented(), 10);
}

#[test]
fn food_appears_and_is_eaten() {
    let mut game = new_game();
    let mut engine = HeadlessEngine::new();

    // Past the grace period food must be on screen
    for _ in 0..120 {
        engine.step(&mut game, &[], DT);
    }
    let world = game.world();
    assert!(world.food.spawned);
    let food_sprite = world.food.sprite;
    assert!(game.canvas().commands().iter().any(
        |c| matches!(c, DrawCommand::Sprite { index, .. } if *index == food_sprite)
    ));

    // Drop the player on top of it
    let world = game.world_mut();
    world.player.pos = world.food.rect().center() - world.player.bounds.center();
    engine.step(&mut game, &[], DT);

    assert_eq!(game.world().player.score, 1);
    assert!(!game.world().food.spawned);
    assert!(game.canvas().commands().iter().any(
        |c| matches!(c, DrawCommand::Text { text, .. } if text == "SCORE 1")
    ));
}

#[test]
fn bullets_stay_inside_bounds_over_a_long_run() {
    let mut game = new_game();
    let mut engine = HeadlessEngine::new();
    let mut seen_bullets = false;
    for _ in 0..900 {
        engine.step(&mut game, &[], DT);
        let world = game.world();
        seen_bullets |= !world.bullets.is_empty();
        assert!(world.bullets.iter().all(|b| world.bullet_bounds.contains_point(b.pos)));
    }
    assert!(seen_bullets);
}

#[test]
fn missing_config_is_an_error() {
    let result = Game::from_file("no/such/config.toml", RecordingCanvas::default());
    assert!(result.is_err());
}
