//! RGB status LED driver.
//!
//! Three LEDC PWM channels (CH0-2) drive discrete R/G/B LEDs; brightness
//! scales the duty of every channel.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives three LEDC PWM channels via hw_init.
//! On host/test: hw_init records the duties in atomics.

use crate::drivers::hw_init;
use crate::drivers::led_patterns::{Indicator, Rgb};
use crate::error::ActuatorError;

pub struct StatusLed {
    current: Rgb,
}

impl Default for StatusLed {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusLed {
    pub fn new() -> Self {
        Self { current: (0, 0, 0) }
    }

    /// Show `indicator`.  Skips the PWM writes when the duties are unchanged.
    pub fn set(&mut self, indicator: Indicator) -> Result<(), ActuatorError> {
        let duties = indicator.duties();
        if duties == self.current {
            return Ok(());
        }
        let (r, g, b) = duties;
        hw_init::ledc_set(hw_init::LEDC_CH_LED_R, r)?;
        hw_init::ledc_set(hw_init::LEDC_CH_LED_G, g)?;
        hw_init::ledc_set(hw_init::LEDC_CH_LED_B, b)?;
        self.current = duties;
        Ok(())
    }

    pub fn off(&mut self) -> Result<(), ActuatorError> {
        self.set(Indicator::OFF)
    }
}
