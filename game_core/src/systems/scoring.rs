use crate::{Arena, Ball, Config, Events, Paddle, Score, Side};
use hecs::World;

/// Award a point if the ball has reached the left or right bound.
///
/// Returns the side that scored. The left bound is checked first, so at
/// most one player scores per call.
pub fn check_round_end(arena: &Arena, ball: &Ball, score: &mut Score) -> Option<Side> {
    let conceded = if ball.left() <= 0.0 {
        Some(Side::Left)
    } else if ball.right() >= arena.width {
        Some(Side::Right)
    } else {
        None
    };
    let scorer = conceded.map(Side::opponent);

    if let Some(side) = scorer {
        score.increment(side);
    }
    scorer
}

/// Check if ball left the arena (scoring)
pub fn check_scoring(world: &mut World, arena: &Arena, score: &mut Score, events: &mut Events) -> bool {
    let mut scored = false;
    for (_entity, ball) in world.query_mut::<&Ball>() {
        match check_round_end(arena, ball, score) {
            Some(Side::Left) => events.left_scored = true,
            Some(Side::Right) => events.right_scored = true,
            None => continue,
        }
        scored = true;
    }

    if let Some(side) = events.scored() {
        log::info!(
            "{:?} player scores ({} - {})",
            side,
            score.left,
            score.right
        );
    }
    scored
}

/// Reset every paddle and ball in the world for the next point
pub fn reset_positions(world: &mut World, config: &Config) {
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        paddle.y = config.paddle_rest_y();
    }
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.reset(config);
    }
}
