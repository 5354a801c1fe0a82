use std::collections::VecDeque;

use game_core::headless::{DrawOp, HeldKeys, MonoText, RecordingSurface};
use game_core::render::ball_redraw_box;
use game_core::*;
use glam::Vec2;

fn headless() -> (Match, RecordingSurface, MonoText, VecDeque<HostEvent>) {
    let game = Match::new(Config::new()).unwrap();
    (game, RecordingSurface::new(1280, 720), MonoText, VecDeque::new())
}

#[test]
fn test_unreturned_serve_scores_for_left_player() {
    let (mut game, mut surface, mut text, mut events) = headless();
    let keys = HeldKeys::new();

    while game.score() == Score::new() && game.tick() < 1_000 {
        game.run_frame(&mut surface, &mut text, &keys, &mut events);
    }

    // 1273 - 640 = 633px at 1.3px per tick, plus the reset tick
    assert!(
        (485..=490).contains(&game.tick()),
        "round ended after {} ticks",
        game.tick()
    );
    assert_eq!(game.score(), Score { left: 1, right: 0 });
    assert!(game.events().left_scored);

    let ball = game.ball().unwrap();
    assert_eq!(ball.pos, Vec2::new(640.0, 360.0));
    assert_eq!(ball.vel, Vec2::new(1.3, 1.3));
    for paddle in game.paddles() {
        assert_eq!(paddle.y, 285.0);
    }
}

#[test]
fn test_score_text_follows_score() {
    let (mut game, mut surface, mut text, mut events) = headless();
    let keys = HeldKeys::new();

    while game.score().left == 0 {
        game.run_frame(&mut surface, &mut text, &keys, &mut events);
    }
    // Scene is drawn before the tick, so the next frame shows the point
    game.run_frame(&mut surface, &mut text, &keys, &mut events);

    let texts: Vec<&str> = surface.texts().collect();
    assert_eq!(texts, vec![" Score ", "1", "0"]);
}

#[test]
fn test_returned_ball_does_not_score() {
    let (mut game, mut surface, mut text, mut events) = headless();
    let mut keys = HeldKeys::new();

    // Right player tracks the ball with their paddle
    for _ in 0..3_000 {
        keys.release(Key::Up);
        keys.release(Key::Down);
        let ball = game.ball().unwrap();
        let paddle = game.paddle(Side::Right).unwrap();
        let middle = paddle.y + paddle.height / 2.0;
        if ball.pos.y < middle - 10.0 {
            keys.press(Key::Up);
        } else if ball.pos.y > middle + 10.0 {
            keys.press(Key::Down);
        }
        game.run_frame(&mut surface, &mut text, &keys, &mut events);
        if game.events().ball_hit_paddle {
            break;
        }
    }

    assert!(game.events().ball_hit_paddle, "right paddle should return the serve");
    assert_eq!(game.score(), Score::new());
    assert!(game.ball().unwrap().vel.x < 0.0);
}

#[test]
fn test_paddles_stay_inside_arena() {
    let (mut game, _, _, _) = headless();
    let up = HeldKeys::from([Key::Char('w'), Key::Up]);
    let down = HeldKeys::from([Key::Char('s'), Key::Down]);

    for _ in 0..400 {
        game.update(&up);
        for paddle in game.paddles() {
            assert!(paddle.y >= 0.0);
        }
    }
    for _ in 0..800 {
        game.update(&down);
        for paddle in game.paddles() {
            assert!(paddle.y + paddle.height <= 720.0);
        }
    }
}

#[test]
fn test_ball_region_tracks_ball() {
    let (mut game, mut surface, mut text, mut events) = headless();
    let keys = HeldKeys::new();

    for _ in 0..100 {
        game.run_frame(&mut surface, &mut text, &keys, &mut events);
        let ball = game.ball().unwrap();
        let regions = surface.last_present().unwrap();
        assert!(regions.contains(&ball_redraw_box(&ball)));
    }
}

#[test]
fn test_escape_stops_run() {
    let (mut game, mut surface, mut text, _) = headless();
    let keys = HeldKeys::new();
    let mut events: VecDeque<HostEvent> = [HostEvent::KeyDown(Key::Escape)].into();

    let ticks = game.run(&mut surface, &mut text, &keys, &mut events);

    assert_eq!(ticks, 0);
    assert!(surface.ops.iter().all(|op| !matches!(op, DrawOp::Circle(..))));
}

#[test]
fn test_config_file_round_trip_into_match() {
    let json = r#"{
        "arena_width": 640.0,
        "arena_height": 480.0,
        "paddle_height": 80.0,
        "ball_speed_x": 2.0,
        "right_keys": { "up": { "char": "i" }, "down": { "char": "k" } }
    }"#;
    let config = Config::from_json(json).unwrap();
    let mut game = Match::new(config).unwrap();

    assert_eq!(game.ball().unwrap().pos, Vec2::new(320.0, 240.0));
    assert_eq!(game.paddle(Side::Right).unwrap().x, 640.0 - 15.0 - 20.0);

    game.update(&HeldKeys::from([Key::Char('i')]));
    assert!(game.paddle(Side::Right).unwrap().y < 200.0);
}
