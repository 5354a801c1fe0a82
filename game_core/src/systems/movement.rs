use hecs::World;

use super::collision::{resolve_bounces, Contact};
use crate::{Arena, Ball, Config, Paddle, PaddleIntent};

/// Apply paddle movement based on intents
pub fn move_paddles(world: &mut World, arena: &Arena) {
    for (_entity, (paddle, intent)) in world.query_mut::<(&mut Paddle, &PaddleIntent)>() {
        paddle.advance(arena.height, *intent);
    }
}

/// Euler step: one velocity per tick
pub fn integrate(ball: &mut Ball) {
    ball.pos += ball.vel;
}

/// Move ball based on velocity
pub fn move_ball(world: &mut World) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        integrate(ball);
    }
}

/// Full ball tick against both paddles: bounce tests, then integration
pub fn advance_ball(
    ball: &mut Ball,
    arena: &Arena,
    left: &Paddle,
    right: &Paddle,
    config: &Config,
) -> Contact {
    let contact = resolve_bounces(ball, arena, &[*left, *right], config);
    integrate(ball);
    contact
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, create_paddle, Side};
    use glam::Vec2;

    #[test]
    fn test_integrate_moves_by_velocity() {
        let config = Config::new();
        let mut ball = Ball::serve(&config);
        integrate(&mut ball);
        assert!((ball.pos - Vec2::new(641.3, 361.3)).length() < 1e-3);
    }

    #[test]
    fn test_move_paddles_follows_intent() {
        let config = Config::new();
        let arena = Arena::from_config(&config);
        let mut world = World::new();
        let entity = create_paddle(&mut world, Side::Left, &config);
        world.insert_one(entity, PaddleIntent::Down).unwrap();

        move_paddles(&mut world, &arena);

        let paddle = world.get::<&Paddle>(entity).unwrap();
        assert!((paddle.y - (config.paddle_rest_y() + config.paddle_speed)).abs() < 1e-4);
    }

    #[test]
    fn test_move_ball_integrates_every_ball() {
        let config = Config::new();
        let mut world = World::new();
        let entity = create_ball(&mut world, Ball::serve(&config));

        move_ball(&mut world);
        move_ball(&mut world);

        let ball = world.get::<&Ball>(entity).unwrap();
        assert!((ball.pos.x - 642.6).abs() < 1e-3);
        assert!((ball.pos.y - 362.6).abs() < 1e-3);
    }

    #[test]
    fn test_advance_ball_moves_even_after_flip() {
        let config = Config::new();
        let arena = Arena::from_config(&config);
        let left = Paddle::new(Side::Left, &config);
        let right = Paddle::new(Side::Right, &config);
        let mut ball = Ball::new(
            Vec2::new(400.0, config.ball_radius),
            Vec2::new(1.3, -1.3),
            config.ball_radius,
            config.ball_color,
        );

        let contact = advance_ball(&mut ball, &arena, &left, &right, &config);

        assert!(contact.wall);
        assert_eq!(ball.vel, Vec2::new(1.3, 1.3));
        assert!((ball.pos.y - (config.ball_radius + 1.3)).abs() < 1e-4);
        assert!((ball.pos.x - 401.3).abs() < 1e-4);
    }
}
