//! Sensor subsystem — the motion sensor and its calibration adapter.
//!
//! [`RawAccelerometer`] is the seam between the register-level driver
//! ([`adxl345::Adxl345`]) and the calibration math
//! ([`accel::CalibratedAccel`]), so the math is tested against scripted
//! readings.

pub mod accel;
pub mod adxl345;

use glam::Vec3;

use crate::error::SensorError;

/// Standard gravity (m/s²).
pub const STANDARD_GRAVITY: f32 = 9.80665;

/// A three-axis accelerometer returning m/s².
pub trait RawAccelerometer {
    fn read_raw(&mut self) -> Result<Vec3, SensorError>;
}
