//! Display adapter: the OLED when it answered at boot, otherwise a
//! headless sink.  Either way the game core sees one
//! [`FramebufferPort`].

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::app::ports::FramebufferPort;
use crate::drivers::ssd1306::Ssd1306;
use crate::error::ActuatorError;

use super::null::NullFramebuffer;

pub enum Display {
    Oled(Ssd1306),
    Headless(NullFramebuffer),
}

impl Display {
    pub fn is_headless(&self) -> bool {
        matches!(self, Self::Headless(_))
    }
}

impl From<Option<Ssd1306>> for Display {
    fn from(oled: Option<Ssd1306>) -> Self {
        oled.map_or(Self::Headless(NullFramebuffer), Self::Oled)
    }
}

impl OriginDimensions for Display {
    fn size(&self) -> Size {
        match self {
            Self::Oled(d) => d.size(),
            Self::Headless(d) => d.size(),
        }
    }
}

impl DrawTarget for Display {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        match self {
            Self::Oled(d) => d.draw_iter(pixels),
            Self::Headless(d) => d.draw_iter(pixels),
        }
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        match self {
            Self::Oled(d) => d.clear(color),
            Self::Headless(d) => d.clear(color),
        }
    }
}

impl FramebufferPort for Display {
    fn present(&mut self) -> Result<(), ActuatorError> {
        match self {
            Self::Oled(d) => d.present(),
            Self::Headless(d) => d.present(),
        }
    }

    fn set_power(&mut self, on: bool) -> Result<(), ActuatorError> {
        match self {
            Self::Oled(d) => d.set_power(on),
            Self::Headless(d) => d.set_power(on),
        }
    }
}
