use crate::config::{Color, Key};

/// Default tuning for the classic 1280x720 table
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Arena
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;
    pub const BACKGROUND: Color = Color::BLACK;
    /// Largest arena side accepted from a config file
    pub const MAX_ARENA: f32 = 65_536.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 20.0;
    pub const PADDLE_HEIGHT: f32 = 150.0;
    pub const PADDLE_PADDING: f32 = 15.0;
    pub const PADDLE_SPEED: f32 = 1.4;
    pub const PADDLE_COLOR: Color = Color::WHITE;
    /// Gap between the far edge of a paddle and the end of its face band
    pub const PADDLE_FACE_INSET: f32 = 2.0;
    /// Height of the top/bottom cap bands on each paddle
    pub const PADDLE_CAP_BAND: f32 = 5.0;

    // Ball
    pub const BALL_RADIUS: f32 = 7.0;
    pub const BALL_SPEED_X: f32 = 1.3;
    pub const BALL_SPEED_Y: f32 = 1.3;
    pub const BALL_COLOR: Color = Color::WHITE;

    // Score
    pub const SCORE_PADDING: f32 = 20.0;
    pub const SCORE_FONT: &'static str = "Consolas";
    pub const SCORE_SIZE: u16 = 36;
    pub const SCORE_COLOR: Color = Color::WHITE;
    pub const SCORE_LABEL: &'static str = " Score ";

    // Keys
    pub const LEFT_UP: Key = Key::Char('w');
    pub const LEFT_DOWN: Key = Key::Char('s');
    pub const RIGHT_UP: Key = Key::Up;
    pub const RIGHT_DOWN: Key = Key::Down;
    pub const QUIT: Key = Key::Escape;
}
