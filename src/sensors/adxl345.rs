//! ADXL345 three-axis accelerometer on I²C.
//!
//! Full-resolution mode, ±16 g: every axis is a little-endian `i16` at
//! 4 mg/LSB starting at register `DATAX0` (0x32).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: register reads over the shared I²C bus (hw_init).
//! On host/test: reads from static atomics for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicI16, AtomicBool, Ordering};

use glam::Vec3;
use log::info;

use super::{RawAccelerometer, STANDARD_GRAVITY};
use crate::drivers::hw_init;
use crate::error::{Error, SensorError};

const REG_DEVID: u8 = 0x00;
const REG_POWER_CTL: u8 = 0x2D;
const REG_DATA_FORMAT: u8 = 0x31;
const REG_DATAX0: u8 = 0x32;

const DEVICE_ID: u8 = 0xE5;
/// POWER_CTL: measure bit.
const MEASURE: u8 = 0x08;
/// DATA_FORMAT: full resolution, ±2 g range bits cleared.
const FULL_RES: u8 = 0x08;
/// g per LSB in full-resolution mode.
const SCALE_G_PER_LSB: f32 = 0.004;

#[cfg(not(target_os = "espidf"))]
static SIM_COUNTS: [AtomicI16; 3] = [AtomicI16::new(0), AtomicI16::new(0), AtomicI16::new(250)];
#[cfg(not(target_os = "espidf"))]
static SIM_FAIL: AtomicBool = AtomicBool::new(false);

/// Inject raw counts (4 mg/LSB) for the next reads.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_counts(x: i16, y: i16, z: i16) {
    SIM_COUNTS[0].store(x, Ordering::Relaxed);
    SIM_COUNTS[1].store(y, Ordering::Relaxed);
    SIM_COUNTS[2].store(z, Ordering::Relaxed);
}

/// Make subsequent simulated reads fail.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_failing(failing: bool) {
    SIM_FAIL.store(failing, Ordering::Relaxed);
}

/// Convert three raw counts to m/s².
pub fn counts_to_ms2(x: i16, y: i16, z: i16) -> Vec3 {
    let k = SCALE_G_PER_LSB * STANDARD_GRAVITY;
    Vec3::new(f32::from(x) * k, f32::from(y) * k, f32::from(z) * k)
}

pub struct Adxl345 {
    addr: u8,
}

impl Adxl345 {
    /// Probe the device and switch it to measurement mode.
    pub fn init(addr: u8) -> Result<Self, Error> {
        let mut id = [0u8; 1];
        Self::read_regs(addr, REG_DEVID, &mut id)?;
        if id[0] != DEVICE_ID {
            return Err(Error::Sensor(SensorError::NotPresent));
        }
        hw_init::i2c_write(addr, &[REG_DATA_FORMAT, FULL_RES])?;
        hw_init::i2c_write(addr, &[REG_POWER_CTL, MEASURE])?;
        info!("adxl345: measuring at 0x{addr:02X}");
        Ok(Self { addr })
    }

    #[cfg(target_os = "espidf")]
    fn read_regs(addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), SensorError> {
        hw_init::i2c_write_read(addr, &[reg], buf)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_regs(_addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), SensorError> {
        if SIM_FAIL.load(Ordering::Relaxed) {
            return Err(SensorError::I2cReadFailed);
        }
        match reg {
            REG_DEVID => buf.fill(DEVICE_ID),
            REG_DATAX0 => {
                for (axis, chunk) in SIM_COUNTS.iter().zip(buf.chunks_mut(2)) {
                    let bytes = axis.load(Ordering::Relaxed).to_le_bytes();
                    chunk.copy_from_slice(&bytes[..chunk.len()]);
                }
            }
            _ => buf.fill(0),
        }
        Ok(())
    }
}

impl RawAccelerometer for Adxl345 {
    fn read_raw(&mut self) -> Result<Vec3, SensorError> {
        let mut buf = [0u8; 6];
        Self::read_regs(self.addr, REG_DATAX0, &mut buf)?;
        let x = i16::from_le_bytes([buf[0], buf[1]]);
        let y = i16::from_le_bytes([buf[2], buf[3]]);
        let z = i16::from_le_bytes([buf[4], buf[5]]);
        Ok(counts_to_ms2(x, y, z))
    }
}
