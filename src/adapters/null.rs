//! No-op adapter.
//!
//! Stands in for absent hardware: the controls read idle (button up,
//! switch ON, encoder still, level), outputs and the display accept
//! everything and do nothing.  Used for headless runs and as a test
//! double with the same interface as [`HardwareAdapter`](super::hardware::HardwareAdapter).

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use glam::Vec3;

use crate::app::feedback::ToneKind;
use crate::app::ports::{EventSink, FramebufferPort, InputPort, OutputPort};
use crate::app::events::AppEvent;
use crate::drivers::led_patterns::Indicator;
use crate::error::{ActuatorError, SensorError};

#[derive(Debug, Default, Clone, Copy)]
pub struct NullHardware;

impl InputPort for NullHardware {
    fn select_pressed(&mut self) -> Result<bool, SensorError> {
        Ok(false)
    }

    fn power_switch_off(&mut self) -> Result<bool, SensorError> {
        Ok(false)
    }

    fn encoder_position(&mut self) -> Result<i32, SensorError> {
        Ok(0)
    }

    fn acceleration(&mut self) -> Vec3 {
        Vec3::ZERO
    }
}

impl OutputPort for NullHardware {
    fn set_indicator(&mut self, _indicator: Indicator) -> Result<(), ActuatorError> {
        Ok(())
    }

    fn start_tone(&mut self, _tone: ToneKind) -> Result<(), ActuatorError> {
        Ok(())
    }

    fn stop_tone(&mut self) -> Result<(), ActuatorError> {
        Ok(())
    }

    fn all_off(&mut self) {}
}

/// 128×64 display that discards every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFramebuffer;

impl OriginDimensions for NullFramebuffer {
    fn size(&self) -> Size {
        Size::new(128, 64)
    }
}

impl DrawTarget for NullFramebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        Ok(())
    }
}

impl FramebufferPort for NullFramebuffer {
    fn present(&mut self) -> Result<(), ActuatorError> {
        Ok(())
    }

    fn set_power(&mut self, _on: bool) -> Result<(), ActuatorError> {
        Ok(())
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &AppEvent) {}
}
