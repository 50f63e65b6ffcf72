//! Active buzzer on a single GPIO.
//!
//! The buzzer sounds while its pin is LOW (inverted drive), so `on`
//! writes low and `off` writes high.  It has one pitch; the tone kind is
//! expressed only through how long the app keeps it on.

use crate::drivers::hw_init;
use crate::error::ActuatorError;

pub struct Buzzer {
    gpio: i32,
    sounding: bool,
}

impl Buzzer {
    pub fn new(gpio: i32) -> Self {
        Self {
            gpio,
            sounding: false,
        }
    }

    pub fn on(&mut self) -> Result<(), ActuatorError> {
        hw_init::gpio_write(self.gpio, false)?;
        self.sounding = true;
        Ok(())
    }

    pub fn off(&mut self) -> Result<(), ActuatorError> {
        hw_init::gpio_write(self.gpio, true)?;
        self.sounding = false;
        Ok(())
    }

    pub fn is_sounding(&self) -> bool {
        self.sounding
    }
}
