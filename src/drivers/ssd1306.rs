//! SSD1306 128×64 monochrome OLED over I²C.
//!
//! The framebuffer uses the panel's native page layout: byte
//! `(y / 8) * WIDTH + x`, bit `y % 8`.  Drawing goes through
//! `embedded_graphics` and only touches RAM;
//! [`present`](FramebufferPort::present) streams the whole buffer.
//!
//! ## Wire format
//!
//! | Prefix | Meaning                    |
//! |--------|----------------------------|
//! | `0x00` | one command byte follows   |
//! | `0x40` | display data follows       |

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use log::{info, warn};

use crate::app::ports::FramebufferPort;
use crate::drivers::hw_init;
use crate::error::ActuatorError;

pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;
const BUFFER_LEN: usize = WIDTH * PAGES;

/// Data bytes per I²C transfer.
pub const CHUNK: usize = 16;

const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

const CMD_DISPLAY_OFF: u8 = 0xAE;
const CMD_DISPLAY_ON: u8 = 0xAF;
const CMD_COLUMN_ADDR: u8 = 0x21;
const CMD_PAGE_ADDR: u8 = 0x22;

/// Power-up sequence: (command, argument bytes).
const INIT_SEQUENCE: &[&[u8]] = &[
    &[CMD_DISPLAY_OFF],
    &[0xD5, 0x80], // clock divide
    &[0xA8, 0x3F], // multiplex 64
    &[0xD3, 0x00], // display offset
    &[0x40],       // start line 0
    &[0x8D, 0x14], // charge pump on
    &[0x20, 0x00], // horizontal addressing
    &[0xA1],       // segment remap
    &[0xC8],       // COM scan descending
    &[0xDA, 0x12], // COM pins
    &[0x81, 0xCF], // contrast
    &[0xD9, 0xF1], // pre-charge
    &[0xDB, 0x40], // VCOMH deselect
    &[0xA4],       // resume from RAM
    &[0xA6],       // normal (not inverted)
    &[CMD_DISPLAY_ON],
];

pub struct Ssd1306 {
    addr: u8,
    buffer: [u8; BUFFER_LEN],
    powered: bool,
}

impl Ssd1306 {
    /// Run the power-up sequence and blank the panel.
    pub fn init(addr: u8) -> Result<Self, ActuatorError> {
        let mut oled = Self::detached(addr);
        for cmd in INIT_SEQUENCE {
            oled.command(cmd)?;
        }
        oled.powered = true;
        oled.present()?;
        info!("ssd1306: {}x{} at 0x{:02X}", WIDTH, HEIGHT, addr);
        Ok(oled)
    }

    /// A framebuffer that has not talked to the panel yet.
    pub fn detached(addr: u8) -> Self {
        Self {
            addr,
            buffer: [0; BUFFER_LEN],
            powered: false,
        }
    }

    pub fn is_powered(&self) -> bool {
        self.powered
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn is_lit(&self, x: i32, y: i32) -> bool {
        Self::locate(x, y).is_some_and(|(i, bit)| self.buffer[i] & bit != 0)
    }

    fn locate(x: i32, y: i32) -> Option<(usize, u8)> {
        if !(0..WIDTH as i32).contains(&x) || !(0..HEIGHT as i32).contains(&y) {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some(((y / 8) * WIDTH + x, 1 << (y % 8)))
    }

    fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((i, bit)) = Self::locate(x, y) {
            if on {
                self.buffer[i] |= bit;
            } else {
                self.buffer[i] &= !bit;
            }
        }
    }

    fn command(&self, bytes: &[u8]) -> Result<(), ActuatorError> {
        for &b in bytes {
            hw_init::i2c_write(self.addr, &[CONTROL_COMMAND, b])?;
        }
        Ok(())
    }

    /// Data transfers for the whole buffer, in order.
    pub fn data_packets(&self) -> impl Iterator<Item = [u8; CHUNK + 1]> + '_ {
        self.buffer.chunks(CHUNK).map(|chunk| {
            let mut packet = [0u8; CHUNK + 1];
            packet[0] = CONTROL_DATA;
            packet[1..=chunk.len()].copy_from_slice(chunk);
            packet
        })
    }
}

impl OriginDimensions for Ssd1306 {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for Ssd1306 {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buffer.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}

impl FramebufferPort for Ssd1306 {
    fn present(&mut self) -> Result<(), ActuatorError> {
        self.command(&[CMD_COLUMN_ADDR, 0, (WIDTH - 1) as u8])?;
        self.command(&[CMD_PAGE_ADDR, 0, (PAGES - 1) as u8])?;
        for packet in self.data_packets() {
            hw_init::i2c_write(self.addr, &packet)?;
        }
        Ok(())
    }

    /// Off blanks the panel; on wakes it and clears the screen.
    fn set_power(&mut self, on: bool) -> Result<(), ActuatorError> {
        if on {
            self.command(&[CMD_DISPLAY_ON])?;
            self.powered = true;
            let _ = self.clear(BinaryColor::Off);
            if let Err(e) = self.present() {
                warn!("ssd1306: clear after power-on failed: {e}");
                return Err(e);
            }
        } else {
            self.command(&[CMD_DISPLAY_OFF])?;
            self.powered = false;
        }
        Ok(())
    }
}
