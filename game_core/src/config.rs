use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::Side;
use crate::params::Params;

/// RGB color, cosmetic only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Host-independent key identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Escape,
    Space,
    /// Printable key, always stored lowercase
    Char(char),
}

/// Up/down key pair for one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub up: Key,
    pub down: Key,
}

impl KeyBindings {
    pub fn new(up: Key, down: Key) -> Self {
        Self { up, down }
    }
}

/// Font request handed to the text provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec {
    pub name: String,
    pub size: u16,
    pub color: Color,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            name: Params::SCORE_FONT.to_string(),
            size: Params::SCORE_SIZE,
            color: Params::SCORE_COLOR,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Game configuration, built once at startup and shared by reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub arena_width: f32,
    pub arena_height: f32,
    pub background: Color,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_padding: f32,
    pub paddle_speed: f32,
    pub paddle_color: Color,
    pub paddle_face_inset: f32,
    pub paddle_cap_band: f32,
    pub ball_radius: f32,
    pub ball_speed_x: f32,
    pub ball_speed_y: f32,
    pub ball_color: Color,
    pub score_padding: f32,
    pub score_label: String,
    pub score_font: FontSpec,
    pub left_keys: KeyBindings,
    pub right_keys: KeyBindings,
    pub quit_key: Key,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_width: Params::ARENA_WIDTH,
            arena_height: Params::ARENA_HEIGHT,
            background: Params::BACKGROUND,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_padding: Params::PADDLE_PADDING,
            paddle_speed: Params::PADDLE_SPEED,
            paddle_color: Params::PADDLE_COLOR,
            paddle_face_inset: Params::PADDLE_FACE_INSET,
            paddle_cap_band: Params::PADDLE_CAP_BAND,
            ball_radius: Params::BALL_RADIUS,
            ball_speed_x: Params::BALL_SPEED_X,
            ball_speed_y: Params::BALL_SPEED_Y,
            ball_color: Params::BALL_COLOR,
            score_padding: Params::SCORE_PADDING,
            score_label: Params::SCORE_LABEL.to_string(),
            score_font: FontSpec::default(),
            left_keys: KeyBindings::new(Params::LEFT_UP, Params::LEFT_DOWN),
            right_keys: KeyBindings::new(Params::RIGHT_UP, Params::RIGHT_DOWN),
            quit_key: Params::QUIT,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON config; missing fields fall back to [`Params`]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject geometry the physics core cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_padding", self.paddle_padding),
            ("paddle_speed", self.paddle_speed),
            ("paddle_face_inset", self.paddle_face_inset),
            ("paddle_cap_band", self.paddle_cap_band),
            ("ball_radius", self.ball_radius),
            ("ball_speed_x", self.ball_speed_x),
            ("ball_speed_y", self.ball_speed_y),
            ("score_padding", self.score_padding),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(invalid(format!("{name} must be finite, got {value}")));
            }
        }

        if self.arena_width <= 0.0 || self.arena_height <= 0.0 {
            return Err(invalid(format!(
                "arena must be positive, got {}x{}",
                self.arena_width, self.arena_height
            )));
        }
        if self.arena_width > Params::MAX_ARENA || self.arena_height > Params::MAX_ARENA {
            return Err(invalid(format!(
                "arena sides must be at most {}, got {}x{}",
                Params::MAX_ARENA,
                self.arena_width,
                self.arena_height
            )));
        }
        if self.paddle_width <= 0.0 || self.paddle_height <= 0.0 {
            return Err(invalid("paddle dimensions must be positive".to_string()));
        }
        if self.paddle_height > self.arena_height {
            return Err(invalid(format!(
                "paddle height {} exceeds arena height {}",
                self.paddle_height, self.arena_height
            )));
        }
        if self.paddle_padding < 0.0 {
            return Err(invalid("paddle_padding must not be negative".to_string()));
        }
        if 2.0 * (self.paddle_padding + self.paddle_width) > self.arena_width {
            return Err(invalid(format!(
                "paddles ({} wide, {} padding) do not fit an arena {} wide",
                self.paddle_width, self.paddle_padding, self.arena_width
            )));
        }
        if self.paddle_face_inset < 0.0 || self.paddle_face_inset >= self.paddle_width {
            return Err(invalid(format!(
                "paddle_face_inset must be in [0, {}), got {}",
                self.paddle_width, self.paddle_face_inset
            )));
        }
        if self.paddle_cap_band < 0.0 || self.paddle_cap_band > self.paddle_height / 2.0 {
            return Err(invalid(format!(
                "paddle_cap_band must be in [0, {}], got {}",
                self.paddle_height / 2.0,
                self.paddle_cap_band
            )));
        }
        if self.paddle_speed < 0.0 || self.ball_speed_x < 0.0 || self.ball_speed_y < 0.0 {
            return Err(invalid("speeds must not be negative".to_string()));
        }
        if self.ball_speed_x >= self.arena_width || self.ball_speed_y >= self.arena_height {
            return Err(invalid(format!(
                "ball speed ({}, {}) must be below the arena size",
                self.ball_speed_x, self.ball_speed_y
            )));
        }
        if self.paddle_speed >= self.arena_height {
            return Err(invalid(format!(
                "paddle speed {} must be below the arena height",
                self.paddle_speed
            )));
        }
        if self.ball_radius < 1.0 {
            return Err(invalid(format!(
                "ball radius must be at least 1, got {}",
                self.ball_radius
            )));
        }
        if 2.0 * self.ball_radius >= self.arena_height {
            return Err(invalid(format!(
                "ball diameter {} does not fit arena height {}",
                2.0 * self.ball_radius,
                self.arena_height
            )));
        }

        if self.left_keys.up == self.left_keys.down {
            return Err(invalid("left player binds up and down to the same key".to_string()));
        }
        if self.right_keys.up == self.right_keys.down {
            return Err(invalid("right player binds up and down to the same key".to_string()));
        }
        let left = [self.left_keys.up, self.left_keys.down];
        let right = [self.right_keys.up, self.right_keys.down];
        if left.iter().any(|k| right.contains(k)) {
            return Err(invalid("players share a key binding".to_string()));
        }
        if left.contains(&self.quit_key) || right.contains(&self.quit_key) {
            return Err(invalid("quit key is also a paddle key".to_string()));
        }

        Ok(())
    }

    /// Get X position (left edge) for a paddle
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.paddle_padding,
            Side::Right => self.arena_width - self.paddle_padding - self.paddle_width,
        }
    }

    /// Paddle Y that vertically centres it in the arena
    pub fn paddle_rest_y(&self) -> f32 {
        self.arena_height / 2.0 - self.paddle_height / 2.0
    }

    pub fn ball_spawn(&self) -> Vec2 {
        Vec2::new(self.arena_width / 2.0, self.arena_height / 2.0)
    }

    pub fn ball_start_velocity(&self) -> Vec2 {
        Vec2::new(self.ball_speed_x, self.ball_speed_y)
    }

    pub fn keys(&self, side: Side) -> KeyBindings {
        match side {
            Side::Left => self.left_keys,
            Side::Right => self.right_keys,
        }
    }
}

fn invalid(msg: String) -> ConfigError {
    ConfigError::Invalid(msg)
}
