//! Motion-calibration adapter.
//!
//! ```text
//!  raw ──[− offset]──▶ EMA(α) ──▶ clamp(±limit) ──▶ reading
//! ```
//!
//! The offset is learned once at boot as the mean of stationary samples,
//! with standard gravity removed from the Z axis.  A failed read yields
//! the neutral (0, 0, 0), so consumers never see an error or a value
//! outside the clamp.

use embedded_hal::delay::DelayNs;
use glam::Vec3;
use log::{info, warn};

use super::RawAccelerometer;
use crate::config::GameConfig;

/// Calibration gravity constant used for the Z offset.
const CALIBRATION_G: f32 = 9.81;

pub struct CalibratedAccel<A> {
    sensor: A,
    offset: Vec3,
    filtered: Vec3,
    alpha: f32,
    clamp: f32,
}

impl<A: RawAccelerometer> CalibratedAccel<A> {
    /// Wrap `sensor` with zero offset.  Call [`calibrate`](Self::calibrate)
    /// before the game loop.
    pub fn new(sensor: A, config: &GameConfig) -> Self {
        Self {
            sensor,
            offset: Vec3::ZERO,
            filtered: Vec3::ZERO,
            alpha: config.filter_alpha,
            clamp: config.accel_clamp,
        }
    }

    /// Average `samples` stationary readings, `gap_ms` apart, into the
    /// offset.  Failed reads are skipped; if none succeed the offset
    /// stays zero.
    pub fn calibrate(&mut self, samples: u16, gap_ms: u32, delay: &mut impl DelayNs) -> Vec3 {
        let mut sum = Vec3::ZERO;
        let mut good = 0u16;
        for i in 0..samples {
            if i > 0 {
                delay.delay_ms(gap_ms);
            }
            if let Ok(v) = self.sensor.read_raw() {
                sum += v;
                good += 1;
            }
        }

        if good == 0 {
            warn!("accel: calibration got no samples, offset left at zero");
            self.offset = Vec3::ZERO;
        } else {
            let mean = sum / f32::from(good);
            self.offset = Vec3::new(mean.x, mean.y, mean.z - CALIBRATION_G);
            info!(
                "accel: calibrated from {good}/{samples} samples, offset=({:.2}, {:.2}, {:.2})",
                self.offset.x, self.offset.y, self.offset.z
            );
        }
        self.filtered = Vec3::ZERO;
        self.offset
    }

    /// Offset-corrected, low-pass filtered, clamped reading (m/s²).
    pub fn reading(&mut self) -> Vec3 {
        let Ok(raw) = self.sensor.read_raw() else {
            return Vec3::ZERO;
        };
        let corrected = raw - self.offset;
        self.filtered = corrected * self.alpha + self.filtered * (1.0 - self.alpha);
        // Filter state stays unclamped; only the output is limited.
        self.filtered.clamp(Vec3::splat(-self.clamp), Vec3::splat(self.clamp))
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }
}
