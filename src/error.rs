//! Unified error types for the Apple Slice firmware.
//!
//! Collaborator calls (GPIO, I²C, PWM) return the small `Copy` enums below.
//! The game core never propagates them: each failure is classified as a
//! [`Fault`] and the service applies the [`Recovery`] that fault maps to,
//! so the tick loop keeps running on a flaky sensor.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level bring-up error
// ---------------------------------------------------------------------------

/// Device bring-up touches both directions of a bus; this joins them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read or did not identify itself.
    Sensor(SensorError),
    /// An output (indicator, buzzer, display, register write) failed.
    Actuator(ActuatorError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// GPIO read returned an error.
    GpioReadFailed,
    /// I²C transaction with the sensor failed or timed out.
    I2cReadFailed,
    /// The sensor was not detected at boot.
    NotPresent,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioReadFailed => write!(f, "GPIO read failed"),
            Self::I2cReadFailed => write!(f, "I2C read failed"),
            Self::NotPresent => write!(f, "sensor not present"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// PWM duty-cycle write failed.
    PwmWriteFailed,
    /// GPIO set failed.
    GpioWriteFailed,
    /// I²C write to the display failed.
    I2cWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
            Self::I2cWriteFailed => write!(f, "I2C write failed"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Runtime fault taxonomy
// ---------------------------------------------------------------------------

/// Everything that can go wrong while the tick loop is running.
///
/// None of these are fatal.  [`Fault::recovery`] is the single place that
/// decides how the core reacts to each one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// A collaborator read failed.
    SensorUnavailable,
    /// A rotary delta exceeded the per-tick sanity bound.
    InputOutOfRange,
    /// A gesture fired but no apple qualified for it.
    NoMatchFound,
    /// The spawner reached the level's apple target.
    LevelExhausted,
}

/// What the core does in response to a [`Fault`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Use a neutral value in place of the failed reading.
    SubstituteDefault,
    /// Drop the input as noise.
    Discard,
    /// Show the player a miss signal.
    Surface,
    /// Stop the producing activity for the rest of the level.
    Stop,
}

impl Fault {
    pub const fn recovery(self) -> Recovery {
        match self {
            Self::SensorUnavailable => Recovery::SubstituteDefault,
            Self::InputOutOfRange => Recovery::Discard,
            Self::NoMatchFound => Recovery::Surface,
            Self::LevelExhausted => Recovery::Stop,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SensorUnavailable => write!(f, "sensor unavailable"),
            Self::InputOutOfRange => write!(f, "input out of range"),
            Self::NoMatchFound => write!(f, "no match found"),
            Self::LevelExhausted => write!(f, "level exhausted"),
        }
    }
}

impl From<SensorError> for Fault {
    fn from(_: SensorError) -> Self {
        Self::SensorUnavailable
    }
}
