//! Fixed level table and difficulty selection.
//!
//! | Difficulty | First level | Levels   |
//! |------------|-------------|----------|
//! | EASY       | 0           | E1 – E4  |
//! | MEDIUM     | 4           | M1 – M3  |
//! | HARD       | 7           | H1 – H3  |

/// Named travel-speed bucket.  Pixel speeds live in
/// [`SpeedTable`](crate::config::SpeedTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedClass {
    Slow,
    Medium,
    Fast,
    VeryFast,
    Ultra,
}

/// One playable level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Level {
    /// Display name, e.g. `"E1:EZ 10A 60S"`.
    pub name: &'static str,
    pub speed: SpeedClass,
    /// Apples spawned over the level.
    pub apples: u16,
    /// Level length on the pause-adjusted clock.
    pub duration_secs: f64,
}

impl Level {
    /// Seconds between scheduled spawns.
    pub fn cadence_secs(&self) -> f64 {
        if self.apples == 0 {
            f64::INFINITY
        } else {
            self.duration_secs / f64::from(self.apples)
        }
    }

    /// First six characters of the name, for the status bar.
    pub fn short_name(&self) -> &'static str {
        let end = self
            .name
            .char_indices()
            .nth(6)
            .map_or(self.name.len(), |(i, _)| i);
        &self.name[..end]
    }
}

const fn level(name: &'static str, speed: SpeedClass, apples: u16, duration_secs: f64) -> Level {
    Level {
        name,
        speed,
        apples,
        duration_secs,
    }
}

pub static LEVELS: [Level; 10] = [
    level("E1:EZ 10A 60S", SpeedClass::Slow, 10, 60.0),
    level("E2:EZ 15A 55S", SpeedClass::Slow, 15, 55.0),
    level("E3:EZ 20A 50S", SpeedClass::Medium, 20, 50.0),
    level("E4:EZ 25A 45S", SpeedClass::Fast, 25, 45.0),
    level("M1:MD 20A 45S", SpeedClass::Medium, 20, 45.0),
    level("M2:MD 25A 40S", SpeedClass::Fast, 25, 40.0),
    level("M3:MD 30A 35S", SpeedClass::VeryFast, 30, 35.0),
    level("H1:HD 25A 30S", SpeedClass::Fast, 25, 30.0),
    level("H2:HD 30A 25S", SpeedClass::VeryFast, 30, 25.0),
    level("H3:HD 35A 20S", SpeedClass::Ultra, 35, 20.0),
];

/// Menu difficulty selection.  Cycles circularly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }

    /// Index into [`LEVELS`] that this difficulty starts.
    pub const fn first_level(self) -> usize {
        match self {
            Self::Easy => 0,
            Self::Medium => 4,
            Self::Hard => 7,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }

    pub const fn prev(self) -> Self {
        match self {
            Self::Easy => Self::Hard,
            Self::Medium => Self::Easy,
            Self::Hard => Self::Medium,
        }
    }

    /// Step once in the direction of a rotary delta.
    pub const fn step(self, delta: i32) -> Self {
        if delta > 0 {
            self.next()
        } else if delta < 0 {
            self.prev()
        } else {
            self
        }
    }
}
