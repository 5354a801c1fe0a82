use glam::Vec2;

use crate::config::Config;

/// Logical playfield: origin top-left, y grows downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.arena_width, config.arena_height)
    }

    /// Whether a circle touches or crosses the top or bottom bound
    pub fn hits_horizontal_wall(&self, center: Vec2, radius: f32) -> bool {
        center.y - radius <= 0.0 || center.y + radius >= self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_contact_is_inclusive() {
        let arena = Arena::new(100.0, 50.0);
        assert!(arena.hits_horizontal_wall(Vec2::new(10.0, 2.0), 2.0));
        assert!(arena.hits_horizontal_wall(Vec2::new(10.0, 48.0), 2.0));
        assert!(!arena.hits_horizontal_wall(Vec2::new(10.0, 25.0), 2.0));
    }
}
