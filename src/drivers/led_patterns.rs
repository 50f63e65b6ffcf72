//! Indicator pattern generator.
//!
//! Turns a [`Pattern`] and a time offset into the colour and brightness
//! fed to the status LED.  Stateless: the caller supplies the time, so
//! the same request always yields the same output.
//!
//! ## Pattern types
//!
//! | Pattern    | Description                              |
//! |------------|------------------------------------------|
//! | Off        | Dark                                     |
//! | Solid      | Constant colour and brightness           |
//! | Breathing  | Triangular ramp between two brightnesses |
//! | Alternate  | Swap between two colours at a fixed rate |

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

/// What the status LED shows right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicator {
    pub colour: Rgb,
    /// 0.0 – 1.0
    pub brightness: f32,
}

impl Indicator {
    pub const OFF: Self = Self {
        colour: COLOUR_OFF,
        brightness: 0.0,
    };

    /// Colour scaled by brightness, as PWM duties.
    pub fn duties(&self) -> Rgb {
        scale(self.colour, self.brightness)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pattern {
    Off,
    Solid {
        colour: Rgb,
        brightness: f32,
    },
    Breathing {
        colour: Rgb,
        period_secs: f64,
        min: f32,
        max: f32,
    },
    Alternate {
        first: Rgb,
        second: Rgb,
        hz: f64,
        brightness: f32,
    },
}

impl Pattern {
    /// Sample the pattern `t` seconds into its phase.
    pub fn sample(&self, t: f64) -> Indicator {
        match *self {
            Self::Off => Indicator::OFF,
            Self::Solid { colour, brightness } => Indicator { colour, brightness },
            Self::Breathing {
                colour,
                period_secs,
                min,
                max,
            } => Indicator {
                colour,
                brightness: min + (max - min) * triangle(t, period_secs),
            },
            Self::Alternate {
                first,
                second,
                hz,
                brightness,
            } => {
                let phase = (t.max(0.0) * hz) as u64;
                let colour = if phase % 2 == 0 { first } else { second };
                Indicator { colour, brightness }
            }
        }
    }
}

/// Triangular ramp 0 → 1 → 0 over `period` seconds.
fn triangle(t: f64, period: f64) -> f32 {
    if period <= 0.0 {
        return 1.0;
    }
    let pos = t.rem_euclid(period) / period;
    let v = if pos < 0.5 { pos * 2.0 } else { (1.0 - pos) * 2.0 };
    v as f32
}

fn scale((r, g, b): Rgb, brightness: f32) -> Rgb {
    let br = brightness.clamp(0.0, 1.0);
    let ch = |c: u8| (f32::from(c) * br).round() as u8;
    (ch(r), ch(g), ch(b))
}

// ── Well-known colour constants ───────────────────────────────

pub const COLOUR_OFF: Rgb = (0, 0, 0);
pub const COLOUR_IDLE: Rgb = (0, 0, 255); // Blue
pub const COLOUR_PLAYING: Rgb = (0, 255, 0); // Green
pub const COLOUR_SUCCESS: Rgb = (0, 0, 255); // Blue
pub const COLOUR_ERROR: Rgb = (255, 0, 0); // Red
pub const COLOUR_WARNING: Rgb = (255, 165, 0); // Orange
pub const COLOUR_WARNING_ALT: Rgb = (255, 255, 0); // Yellow
