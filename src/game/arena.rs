//! Screen geometry: bounds, centre, spawn points and the forbidden region.

use glam::Vec2;

use super::apple::Edge;
use crate::config::GameConfig;

/// Axis-aligned rectangle with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Fixed playfield geometry derived from [`GameConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub apple_size: f32,
    pub center: Vec2,
    /// Apples inside this rectangle cannot be sliced.
    pub forbidden: Rect,
}

impl Arena {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            width: f32::from(config.screen_width),
            height: f32::from(config.screen_height),
            apple_size: f32::from(config.apple_size),
            center: Vec2::new(config.center_x, config.center_y),
            forbidden: Rect {
                min: Vec2::new(config.forbidden_min_x, config.forbidden_min_y),
                max: Vec2::new(config.forbidden_max_x, config.forbidden_max_y),
            },
        }
    }

    /// Where an apple entering from `edge` appears.
    ///
    /// Top and bottom spawn on the centre column; left and right spawn on
    /// the screen's middle row.
    pub fn spawn_point(&self, edge: Edge) -> Vec2 {
        let mid_row = self.height / 2.0 - 1.0;
        match edge {
            Edge::Top => Vec2::new(self.center.x, 0.0),
            Edge::Bottom => Vec2::new(self.center.x, self.height - 1.0),
            Edge::Left => Vec2::new(0.0, mid_row),
            Edge::Right => Vec2::new(self.width - 1.0, mid_row),
        }
    }

    pub fn in_forbidden(&self, p: Vec2) -> bool {
        self.forbidden.contains(p)
    }

    /// True once `p` has left the screen by more than one apple size.
    pub fn is_off_screen(&self, p: Vec2) -> bool {
        let pad = self.apple_size;
        p.x < -pad || p.x > self.width + pad || p.y < -pad || p.y > self.height + pad
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}
