//! Apple entity: straight-line motion toward the centre, zone entry,
//! cut window and expiry.
//!
//! ```text
//!  spawn ──▶ Alive ──[matching gesture in window]──▶ Sliced
//!              │
//!              ├──[cut window elapsed]──▶ Expired
//!              └──[left screen]─────────▶ Expired
//! ```
//!
//! Sliced and Expired are terminal: `update` is a no-op from then on.

use glam::Vec2;

use super::arena::Arena;

/// Screen edge an apple enters from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// The gesture that slices an apple from this edge.
    pub const fn expected_action(self) -> SliceAction {
        match self {
            Self::Top => SliceAction::Forward,
            Self::Bottom => SliceAction::Backward,
            Self::Left => SliceAction::RotateLeft,
            Self::Right => SliceAction::RotateRight,
        }
    }
}

/// A player gesture, after debouncing and edge detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceAction {
    Forward,
    Backward,
    RotateLeft,
    RotateRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppleStatus {
    Alive,
    Sliced,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Apple {
    edge: Edge,
    /// Pixels per second.
    speed: f32,
    /// Session-clock instant the apple was scheduled to appear.
    spawn_time: f64,
    origin: Vec2,
    /// Unit vector from `origin` toward the arena centre.
    direction: Vec2,
    position: Vec2,
    status: AppleStatus,
    /// First session-clock instant the apple was seen outside the
    /// forbidden region.  Set at most once.
    zone_entry: Option<f64>,
}

impl Apple {
    pub fn new(edge: Edge, speed: f32, spawn_time: f64, arena: &Arena) -> Self {
        let origin = arena.spawn_point(edge);
        Self {
            edge,
            speed,
            spawn_time,
            origin,
            direction: (arena.center - origin).normalize_or_zero(),
            position: origin,
            status: AppleStatus::Alive,
            zone_entry: None,
        }
    }

    /// Advance to `now` on the pause-adjusted session clock.
    pub fn update(&mut self, now: f64, arena: &Arena, cut_time_limit: f64) {
        if self.status != AppleStatus::Alive {
            return;
        }

        let elapsed = (now - self.spawn_time) as f32;
        self.position = self.origin + self.direction * (self.speed * elapsed);

        if self.zone_entry.is_none() && !arena.in_forbidden(self.position) {
            self.zone_entry = Some(now);
        }

        if let Some(entry) = self.zone_entry {
            if now - entry > cut_time_limit {
                self.status = AppleStatus::Expired;
            }
        }

        if arena.is_off_screen(self.position) {
            self.status = AppleStatus::Expired;
        }
    }

    /// Mark the apple sliced.  Returns `false` if it was not alive.
    pub fn slice(&mut self) -> bool {
        if self.status == AppleStatus::Alive {
            self.status = AppleStatus::Sliced;
            true
        } else {
            false
        }
    }

    /// True when the current position is outside the forbidden region.
    pub fn is_in_valid_zone(&self, arena: &Arena) -> bool {
        !arena.in_forbidden(self.position)
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn expected_action(&self) -> SliceAction {
        self.edge.expected_action()
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn spawn_time(&self) -> f64 {
        self.spawn_time
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Integer pixel position, truncated toward zero.
    pub fn pixel(&self) -> (i32, i32) {
        (self.position.x as i32, self.position.y as i32)
    }

    pub fn status(&self) -> AppleStatus {
        self.status
    }

    pub fn is_alive(&self) -> bool {
        self.status == AppleStatus::Alive
    }

    pub fn is_sliced(&self) -> bool {
        self.status == AppleStatus::Sliced
    }

    pub fn is_expired(&self) -> bool {
        self.status == AppleStatus::Expired
    }

    pub fn entered_valid_zone(&self) -> bool {
        self.zone_entry.is_some()
    }

    pub fn valid_zone_entry_time(&self) -> Option<f64> {
        self.zone_entry
    }
}
