//! `embedded-hal` views of the raw GPIO helpers.
//!
//! [`GpioInput`] is an [`InputPin`] over one configured input; [`BusyDelay`]
//! provides the microsecond gaps the debounce filter sleeps between
//! samples.  Both are backed by `hw_init` so host builds read the
//! simulated pin levels.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin};

use super::hw_init;

/// A configured GPIO input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioInput {
    pin: i32,
}

impl GpioInput {
    pub const fn new(pin: i32) -> Self {
        Self { pin }
    }

    pub const fn pin(&self) -> i32 {
        self.pin
    }
}

impl ErrorType for GpioInput {
    type Error = Infallible;
}

impl InputPin for GpioInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(hw_init::gpio_read(self.pin))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!hw_init::gpio_read(self.pin))
    }
}

/// Blocking delay on the calling task.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusyDelay;

impl DelayNs for BusyDelay {
    #[cfg(target_os = "espidf")]
    fn delay_ns(&mut self, ns: u32) {
        // SAFETY: ROM busy-wait; no shared state.
        unsafe { esp_idf_svc::sys::esp_rom_delay_us(ns.div_ceil(1_000)) };
    }

    #[cfg(not(target_os = "espidf"))]
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}
