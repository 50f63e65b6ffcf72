//! Game configuration parameters
//!
//! All tunable parameters for the Apple Slice game.
//! Values can be overridden by a JSON file (see `adapters::config_file`).
//! The level table itself is fixed data in [`crate::game::levels`].

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::game::levels::SpeedClass;

/// Apple travel speed (pixels per second) for each speed class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedTable {
    pub slow: f32,
    pub medium: f32,
    pub fast: f32,
    pub very_fast: f32,
    pub ultra: f32,
}

impl SpeedTable {
    pub fn speed(&self, class: SpeedClass) -> f32 {
        match class {
            SpeedClass::Slow => self.slow,
            SpeedClass::Medium => self.medium,
            SpeedClass::Fast => self.fast,
            SpeedClass::VeryFast => self.very_fast,
            SpeedClass::Ultra => self.ultra,
        }
    }
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            slow: 20.0,
            medium: 35.0,
            fast: 50.0,
            very_fast: 70.0,
            ultra: 90.0,
        }
    }
}

/// Core game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // --- Arena ---
    /// Display width in pixels
    pub screen_width: u16,
    /// Display height in pixels
    pub screen_height: u16,
    /// Apple sprite edge length in pixels
    pub apple_size: u8,
    /// Point every apple travels toward
    pub center_x: f32,
    pub center_y: f32,
    /// Inclusive bounds of the central region where slicing is not allowed
    pub forbidden_min_x: f32,
    pub forbidden_max_x: f32,
    pub forbidden_min_y: f32,
    pub forbidden_max_y: f32,

    // --- Gameplay timing ---
    /// Window after zone entry during which a slice counts (seconds)
    pub cut_time_limit_secs: f64,
    /// Delay between gesture detection and its effect (seconds)
    pub response_delay_secs: f64,
    /// Travel speed per speed class
    pub speeds: SpeedTable,

    // --- Input ---
    /// Largest rotary delta per tick accepted as a real rotation
    pub encoder_sanity_bound: i32,
    /// Filtered Y acceleration (m/s²) that counts as a tilt
    pub tilt_threshold: f32,
    /// Minimum gap between accelerometer samples (seconds)
    pub tilt_sample_interval_secs: f64,
    /// Hold time on the menu screen that starts a level (seconds)
    pub start_hold_secs: f64,
    /// Hold time on the game-over screen that returns to the menu (seconds)
    pub confirm_hold_secs: f64,
    /// Samples taken per debounced read
    pub debounce_samples: u8,
    /// Gap between debounce samples (microseconds)
    pub debounce_gap_us: u32,

    // --- Motion calibration ---
    /// Stationary samples averaged at boot
    pub calibration_samples: u16,
    /// Gap between calibration samples (milliseconds)
    pub calibration_gap_ms: u32,
    /// Low-pass smoothing factor (0 < α ≤ 1)
    pub filter_alpha: f32,
    /// Symmetric clamp applied to each filtered axis (m/s²)
    pub accel_clamp: f32,

    // --- Feedback ---
    /// Remaining time at which the warning pattern starts (seconds)
    pub warning_threshold_secs: f64,
    /// Warning blink rate (colour swaps per second)
    pub warning_blink_hz: f64,
    /// Success/miss flash length (seconds)
    pub flash_secs: f64,
    /// Time after a flash before the indicator returns to normal (seconds)
    pub flash_hold_secs: f64,
    /// Length of the start / game-over / menu chirps (seconds)
    pub chirp_secs: f64,
    /// Full period of the idle breathing pattern (seconds)
    pub idle_pulse_period_secs: f64,

    // --- Display ---
    /// Apples drawn per frame at most
    pub max_apples_drawn: u8,
    /// Welcome screen duration at boot (seconds)
    pub welcome_secs: f64,

    // --- Timing ---
    /// Main loop sleep per tick (milliseconds)
    pub loop_interval_ms: u32,
    /// Minimum gap between redraws (milliseconds)
    pub draw_interval_ms: u32,
    /// Status log interval (seconds)
    pub status_interval_secs: u32,

    /// Fixed RNG seed for spawn edges; `None` seeds from the boot clock
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Arena (128×64 OLED)
            screen_width: 128,
            screen_height: 64,
            apple_size: 8,
            center_x: 63.0,
            center_y: 35.0,
            forbidden_min_x: 45.0,
            forbidden_max_x: 81.0,
            forbidden_min_y: 27.0,
            forbidden_max_y: 45.0,

            // Gameplay timing
            cut_time_limit_secs: 4.0,
            response_delay_secs: 0.2,
            speeds: SpeedTable::default(),

            // Input
            encoder_sanity_bound: 100,
            tilt_threshold: 2.0,
            tilt_sample_interval_secs: 0.1, // 10 Hz
            start_hold_secs: 1.0,
            confirm_hold_secs: 0.2,
            debounce_samples: 5,
            debounce_gap_us: 5_000,

            // Motion calibration
            calibration_samples: 100,
            calibration_gap_ms: 10, // 1 s total
            filter_alpha: 0.2,
            accel_clamp: 20.0,

            // Feedback
            warning_threshold_secs: 10.0,
            warning_blink_hz: 3.0,
            flash_secs: 0.2,
            flash_hold_secs: 0.3,
            chirp_secs: 0.1,
            idle_pulse_period_secs: 8.0,

            // Display
            max_apples_drawn: 10,
            welcome_secs: 2.0,

            // Timing
            loop_interval_ms: 50,  // 20 Hz
            draw_interval_ms: 200, // 5 fps
            status_interval_secs: 5,

            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// Reject values that would make the game unplayable or the core
    /// misbehave.  Values are never clamped silently.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(ConfigError::ValidationFailed("screen dimensions must be non-zero"));
        }
        if self.forbidden_min_x > self.forbidden_max_x || self.forbidden_min_y > self.forbidden_max_y {
            return Err(ConfigError::ValidationFailed("forbidden region bounds are inverted"));
        }
        if self.cut_time_limit_secs <= 0.0 {
            return Err(ConfigError::ValidationFailed("cut_time_limit_secs must be positive"));
        }
        if self.response_delay_secs < 0.0 {
            return Err(ConfigError::ValidationFailed("response_delay_secs must not be negative"));
        }
        if self.encoder_sanity_bound <= 0 {
            return Err(ConfigError::ValidationFailed("encoder_sanity_bound must be positive"));
        }
        if self.tilt_threshold <= 0.0 || self.tilt_threshold >= self.accel_clamp {
            return Err(ConfigError::ValidationFailed(
                "tilt_threshold must be positive and below accel_clamp",
            ));
        }
        if self.debounce_samples == 0 || self.debounce_samples > 15 {
            return Err(ConfigError::ValidationFailed("debounce_samples must be 1..=15"));
        }
        if !(self.filter_alpha > 0.0 && self.filter_alpha <= 1.0) {
            return Err(ConfigError::ValidationFailed("filter_alpha must be in (0, 1]"));
        }
        if self.start_hold_secs <= 0.0 || self.confirm_hold_secs < 0.0 {
            return Err(ConfigError::ValidationFailed("hold thresholds must be positive"));
        }
        if self.flash_secs > self.flash_hold_secs {
            return Err(ConfigError::ValidationFailed("flash_secs must not exceed flash_hold_secs"));
        }
        if self.idle_pulse_period_secs <= 0.0 || self.warning_blink_hz <= 0.0 {
            return Err(ConfigError::ValidationFailed("indicator rates must be positive"));
        }
        if self.loop_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("loop_interval_ms must be non-zero"));
        }
        let speeds = [
            self.speeds.slow,
            self.speeds.medium,
            self.speeds.fast,
            self.speeds.very_fast,
            self.speeds.ultra,
        ];
        if speeds.iter().any(|s| *s <= 0.0) {
            return Err(ConfigError::ValidationFailed("apple speeds must be positive"));
        }
        Ok(())
    }
}
