use glam::Vec2;

use crate::config::{Color, Config, KeyBindings};

/// Which end of the table a player defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Paddle component - a player's bat
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub side: Side,
    pub x: f32, // Left edge, fixed after creation
    pub y: f32, // Top edge
    pub width: f32,
    pub height: f32,
    pub speed: f32, // Pixels per tick
    pub color: Color,
}

impl Paddle {
    pub fn new(side: Side, config: &Config) -> Self {
        Self {
            side,
            x: config.paddle_x(side),
            y: config.paddle_rest_y(),
            width: config.paddle_width,
            height: config.paddle_height,
            speed: config.paddle_speed,
            color: config.paddle_color,
        }
    }

    /// Move one tick in the direction of `intent`.
    ///
    /// The up/down guards look at the position before the step, so a single
    /// step may overshoot an edge; the final clamp pulls it back inside
    /// `[0, window_height - height]`.
    pub fn advance(&mut self, window_height: f32, intent: PaddleIntent) {
        match intent {
            PaddleIntent::Up if self.y >= 0.0 => self.y -= self.speed,
            PaddleIntent::Down if self.y + self.height <= window_height => self.y += self.speed,
            _ => {}
        }
        self.y = self.y.clamp(0.0, (window_height - self.height).max(0.0));
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Whether `y` lies within the paddle's vertical span
    pub fn spans(&self, y: f32) -> bool {
        y >= self.top() && y <= self.bottom()
    }
}

/// Ball component - the pong ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, color: Color) -> Self {
        Self {
            pos,
            vel,
            radius,
            color,
        }
    }

    /// Ball at the arena centre with the canonical serve velocity
    pub fn serve(config: &Config) -> Self {
        Self::new(
            config.ball_spawn(),
            config.ball_start_velocity(),
            config.ball_radius,
            config.ball_color,
        )
    }

    /// Reset ball to the centre with the starting velocity
    pub fn reset(&mut self, config: &Config) {
        self.pos = config.ball_spawn();
        self.vel = config.ball_start_velocity();
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// Movement intent for a paddle, decided once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaddleIntent {
    Up,
    Down,
    #[default]
    Idle,
}

impl PaddleIntent {
    /// Collapse a raw key pair; up wins when both are held
    pub fn from_keys(up: bool, down: bool) -> Self {
        if up {
            PaddleIntent::Up
        } else if down {
            PaddleIntent::Down
        } else {
            PaddleIntent::Idle
        }
    }
}

/// Player component - binds a side to its keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub side: Side,
    pub keys: KeyBindings,
}

impl Player {
    pub fn new(side: Side, config: &Config) -> Self {
        Self {
            side,
            keys: config.keys(side),
        }
    }
}
