//! Draw requests and dirty-region geometry for one frame

use glam::IVec2;

use crate::{Ball, Config, Paddle, Rect, Score, Side, Surface, TextExtent, TextProvider};

/// Extra pixels around the ball box, trailing and leading
const BALL_BOX_LEAD: f32 = 4.0;
const BALL_BOX_TAIL: f32 = 2.0;

/// Full-height strip behind a paddle, including its wall-side padding
pub fn paddle_redraw_box(paddle: &Paddle, arena_height: f32, padding: f32) -> Rect {
    let x = match paddle.side {
        Side::Left => 0.0,
        Side::Right => paddle.x,
    };
    Rect::covering(x, 0.0, x + paddle.width + padding, arena_height)
}

/// Half-extent of the ball box along one axis.
///
/// Scaled by the speed on that axis so the box still spans last frame's
/// ball when it moves further than its own diameter per tick.
pub fn effective_radius(radius: f32, velocity: f32) -> f32 {
    let scaled = (radius * velocity).abs().trunc();
    if scaled >= radius {
        scaled
    } else {
        radius
    }
}

pub fn ball_redraw_box(ball: &Ball) -> Rect {
    let ex = effective_radius(ball.radius, ball.vel.x);
    let ey = effective_radius(ball.radius, ball.vel.y);
    Rect::covering(
        ball.pos.x - ex - BALL_BOX_LEAD,
        ball.pos.y - ey - BALL_BOX_LEAD,
        ball.pos.x + ex + BALL_BOX_TAIL,
        ball.pos.y + ey + BALL_BOX_TAIL,
    )
}

/// Placement of the " Score " label and the two numbers around it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreLayout {
    pub label_at: IVec2,
    pub left_at: IVec2,
    pub right_at: IVec2,
    pub bounds: Rect,
}

impl ScoreLayout {
    pub fn new<T: TextExtent>(arena_width: f32, padding: f32, label: &T, left: &T, right: &T) -> Self {
        let center = arena_width as i32 / 2;
        let top = padding as i32;
        let label_w = label.width() as i32;
        let left_w = left.width() as i32;

        let label_x = center - label_w / 2;
        let left_x = label_x - left_w;
        let right_x = center + label_w / 2;

        Self {
            label_at: IVec2::new(label_x, top),
            left_at: IVec2::new(left_x, top),
            right_at: IVec2::new(right_x, top),
            bounds: Rect::new(
                left_x,
                top,
                left_w + label_w + right.width() as i32,
                label.height() as i32,
            ),
        }
    }
}

pub fn paddle_rect(paddle: &Paddle) -> Rect {
    Rect::new(
        paddle.x as i32,
        paddle.y as i32,
        paddle.width as i32,
        paddle.height as i32,
    )
}

/// Clear the surface and draw paddles, ball and score.
///
/// Returns the score layout so the caller can mark its bounds dirty.
pub fn draw_scene<S, T>(
    surface: &mut S,
    text: &mut T,
    config: &Config,
    paddles: &[Paddle],
    ball: Option<&Ball>,
    score: &Score,
) -> ScoreLayout
where
    S: Surface,
    T: TextProvider<Text = S::Text>,
{
    surface.clear(config.background);

    for paddle in paddles {
        surface.fill_rect(paddle_rect(paddle), paddle.color);
    }
    if let Some(ball) = ball {
        let center = IVec2::new(ball.pos.x as i32, ball.pos.y as i32);
        surface.fill_circle(center, ball.radius as u32, ball.color);
    }

    let label = text.render(&config.score_label, &config.score_font);
    let left = text.render(&score.left.to_string(), &config.score_font);
    let right = text.render(&score.right.to_string(), &config.score_font);
    let layout = ScoreLayout::new(config.arena_width, config.score_padding, &label, &left, &right);

    surface.blit(&label, layout.label_at);
    surface.blit(&left, layout.left_at);
    surface.blit(&right, layout.right_at);

    layout
}
