//! Port traits — the hexagonal boundary between game logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (controls, indicator/buzzer, display, event sinks,
//! config files) implement these traits.  The
//! [`AppService`](super::service::AppService) consumes them via generics,
//! so the game core never touches hardware directly.
//!
//! Every fallible call returns a typed error.  The service decides per
//! [`Fault`](crate::error::Fault) whether to substitute a default, discard
//! or surface; nothing here is allowed to halt the tick loop.

use core::convert::Infallible;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::pixelcolor::BinaryColor;
use glam::Vec3;

use crate::config::GameConfig;
use crate::drivers::led_patterns::Indicator;
use crate::error::{ActuatorError, SensorError};

use super::events::AppEvent;
use super::feedback::ToneKind;

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the player's controls.
pub trait InputPort {
    /// Debounced select button.  `true` while pressed.
    fn select_pressed(&mut self) -> Result<bool, SensorError>;

    /// Debounced power switch.  `true` when switched OFF.
    fn power_switch_off(&mut self) -> Result<bool, SensorError>;

    /// Cumulative rotary position.  May wrap; the domain bounds deltas.
    fn encoder_position(&mut self) -> Result<i32, SensorError>;

    /// Calibrated, filtered, clamped acceleration in m/s².
    /// Implementations return zero on a failed read.
    fn acceleration(&mut self) -> Vec3;
}

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → indicator LED and buzzer)
// ───────────────────────────────────────────────────────────────

/// Write-side port: indicator and audio sinks.
pub trait OutputPort {
    /// Set the indicator colour scaled by brightness.
    fn set_indicator(&mut self, indicator: Indicator) -> Result<(), ActuatorError>;

    /// Start sounding `tone` until [`stop_tone`](Self::stop_tone).
    fn start_tone(&mut self, tone: ToneKind) -> Result<(), ActuatorError>;

    fn stop_tone(&mut self) -> Result<(), ActuatorError>;

    /// Drive the indicator and buzzer inert.  Best effort.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Framebuffer port (driven adapter: domain → display)
// ───────────────────────────────────────────────────────────────

/// Monochrome drawing surface.
///
/// Drawing goes through [`embedded_graphics`]; implementations clip
/// out-of-bounds pixels.  The sink owns pixel format and transport;
/// nothing reaches the panel before [`present`](Self::present).
pub trait FramebufferPort: DrawTarget<Color = BinaryColor, Error = Infallible> {
    /// Push the buffer to the panel.
    fn present(&mut self) -> Result<(), ActuatorError>;

    /// Switch the panel on or off.
    fn set_power(&mut self, on: bool) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
/// Adapters decide where they go (serial log, test recorder, ...).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: config file → domain)
// ───────────────────────────────────────────────────────────────

/// Loads game configuration.
///
/// Implementations MUST validate before returning.
/// Invalid ranges are rejected with [`ConfigError::ValidationFailed`],
/// never silently clamped.
pub trait ConfigPort {
    /// Load configuration.  Returns [`GameConfig::default()`] if nothing
    /// is stored.
    fn load(&self) -> Result<GameConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A config source was named but does not exist.
    NotFound,
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::error::Error for ConfigError {}
