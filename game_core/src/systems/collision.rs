use crate::{Arena, Ball, Config, Events, Paddle, Side};
use hecs::World;

/// What the bounce pass found this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contact {
    /// Paddle whose face reversed the ball
    pub face: Option<Side>,
    /// Face contact ignored because the ball was already in the band
    pub flip_suppressed: bool,
    pub wall: bool,
    /// Paddle whose top or bottom cap reversed the ball
    pub cap: Option<Side>,
}

impl Contact {
    pub fn record(&self, events: &mut Events) {
        events.ball_hit_paddle |= self.face.is_some();
        events.flip_suppressed |= self.flip_suppressed;
        events.ball_hit_wall |= self.wall;
        events.ball_hit_cap |= self.cap.is_some();
    }
}

/// Ball edge that meets the paddle on `side` when the centre is at `x`
fn leading_edge(side: Side, x: f32, radius: f32) -> f32 {
    match side {
        Side::Left => x - radius,
        Side::Right => x + radius,
    }
}

/// Whether `edge` lies in the strip between the paddle's face and the
/// inset near its far side
pub fn in_face_band(paddle: &Paddle, edge: f32, inset: f32) -> bool {
    match paddle.side {
        Side::Left => edge <= paddle.right() && edge >= paddle.x + inset,
        Side::Right => edge >= paddle.x && edge <= paddle.right() - inset,
    }
}

/// Ball touching the striking face of `paddle`
pub fn face_contact(ball: &Ball, paddle: &Paddle, inset: f32) -> bool {
    let edge = leading_edge(paddle.side, ball.pos.x, ball.radius);
    in_face_band(paddle, edge, inset) && paddle.spans(ball.pos.y)
}

/// Whether the ball one step back along its velocity was already in the band
pub fn was_in_face_band(ball: &Ball, paddle: &Paddle, inset: f32) -> bool {
    let prev_x = ball.pos.x - ball.vel.x;
    in_face_band(paddle, leading_edge(paddle.side, prev_x, ball.radius), inset)
}

/// Ball touching the top or bottom cap band of `paddle`
pub fn cap_contact(ball: &Ball, paddle: &Paddle, band: f32) -> bool {
    let in_columns = match paddle.side {
        Side::Left => ball.left() >= paddle.x && ball.left() <= paddle.right() - band,
        Side::Right => ball.right() >= paddle.x + band && ball.right() <= paddle.right(),
    };
    let on_top = ball.bottom() >= paddle.top() && ball.bottom() <= paddle.top() + band;
    let on_bottom = ball.top() <= paddle.bottom() && ball.top() >= paddle.bottom() - band;
    in_columns && (on_top || on_bottom)
}

/// Reflect the ball off paddle faces, paddle caps and the arena walls.
///
/// Horizontal and vertical flips are decided independently, so a ball on a
/// corner can reverse both components in one tick. Position is untouched.
pub fn resolve_bounces(ball: &mut Ball, arena: &Arena, paddles: &[Paddle], config: &Config) -> Contact {
    let mut contact = Contact::default();
    let inset = config.paddle_face_inset;

    if let Some(paddle) = paddles.iter().find(|p| face_contact(ball, p, inset)) {
        if was_in_face_band(ball, paddle, inset) {
            contact.flip_suppressed = true;
        } else {
            contact.face = Some(paddle.side);
        }
    }

    contact.wall = arena.hits_horizontal_wall(ball.pos, ball.radius);
    contact.cap = paddles
        .iter()
        .find(|p| cap_contact(ball, p, config.paddle_cap_band))
        .map(|p| p.side);

    if contact.face.is_some() {
        ball.vel.x = -ball.vel.x;
    }
    if contact.wall || contact.cap.is_some() {
        ball.vel.y = -ball.vel.y;
    }

    contact
}

/// Check ball collisions with walls and paddles
pub fn check_collisions(world: &mut World, arena: &Arena, config: &Config, events: &mut Events) {
    let mut paddles: Vec<Paddle> = world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, paddle)| *paddle)
        .collect();
    paddles.sort_by_key(|p| p.side);

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let contact = resolve_bounces(ball, arena, &paddles, config);
        if let Some(side) = contact.face {
            log::debug!("Ball hit {:?} paddle face at {:?}", side, ball.pos);
        }
        if let Some(side) = contact.cap {
            log::debug!("Ball hit {:?} paddle cap at {:?}", side, ball.pos);
        }
        contact.record(events);
    }
}
