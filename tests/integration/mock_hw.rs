//! Mock hardware adapter for integration tests.
//!
//! Inputs are plain fields the test scripts between ticks.  Every output
//! call is recorded so tests can assert on the full command history
//! without touching real GPIO/PWM/I²C.

use std::convert::Infallible;

use appleslice::app::events::AppEvent;
use appleslice::app::feedback::ToneKind;
use appleslice::app::ports::{EventSink, FramebufferPort, InputPort, OutputPort};
use appleslice::app::service::AppService;
use appleslice::config::GameConfig;
use appleslice::drivers::led_patterns::Indicator;
use appleslice::error::{ActuatorError, SensorError};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use glam::Vec3;

// ── Output call record ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum OutputCall {
    Indicator(Indicator),
    ToneStart(ToneKind),
    ToneStop,
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockHardware {
    pub pressed: bool,
    pub switch_off: bool,
    pub position: i32,
    pub accel: Vec3,
    pub select_fails: bool,
    pub accel_reads: u32,
    pub calls: Vec<OutputCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_indicator(&self) -> Option<Indicator> {
        self.calls.iter().rev().find_map(|c| match c {
            OutputCall::Indicator(i) => Some(*i),
            _ => None,
        })
    }

    pub fn tones(&self) -> Vec<ToneKind> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                OutputCall::ToneStart(t) => Some(*t),
                _ => None,
            })
            .collect()
    }
}

impl InputPort for MockHardware {
    fn select_pressed(&mut self) -> Result<bool, SensorError> {
        if self.select_fails {
            Err(SensorError::GpioReadFailed)
        } else {
            Ok(self.pressed)
        }
    }

    fn power_switch_off(&mut self) -> Result<bool, SensorError> {
        Ok(self.switch_off)
    }

    fn encoder_position(&mut self) -> Result<i32, SensorError> {
        Ok(self.position)
    }

    fn acceleration(&mut self) -> Vec3 {
        self.accel_reads += 1;
        self.accel
    }
}

impl OutputPort for MockHardware {
    fn set_indicator(&mut self, indicator: Indicator) -> Result<(), ActuatorError> {
        self.calls.push(OutputCall::Indicator(indicator));
        Ok(())
    }

    fn start_tone(&mut self, tone: ToneKind) -> Result<(), ActuatorError> {
        self.calls.push(OutputCall::ToneStart(tone));
        Ok(())
    }

    fn stop_tone(&mut self) -> Result<(), ActuatorError> {
        self.calls.push(OutputCall::ToneStop);
        Ok(())
    }

    fn all_off(&mut self) {
        self.calls.push(OutputCall::AllOff);
    }
}

// ── MockFramebuffer ───────────────────────────────────────────

pub struct MockFramebuffer {
    pixels: Vec<bool>,
    pub presents: u32,
    pub power_calls: Vec<bool>,
}

pub const FB_WIDTH: i32 = 128;
pub const FB_HEIGHT: i32 = 64;

#[allow(dead_code)]
impl MockFramebuffer {
    pub fn new() -> Self {
        Self {
            pixels: vec![false; (FB_WIDTH * FB_HEIGHT) as usize],
            presents: 0,
            power_calls: Vec::new(),
        }
    }

    pub fn is_lit(&self, x: i32, y: i32) -> bool {
        (0..FB_WIDTH).contains(&x)
            && (0..FB_HEIGHT).contains(&y)
            && self.pixels[(y * FB_WIDTH + x) as usize]
    }

    /// Lit pixels inside the rectangle.
    pub fn lit_in(&self, x: i32, y: i32, w: i32, h: i32) -> usize {
        (y..y + h)
            .flat_map(|py| (x..x + w).map(move |px| (px, py)))
            .filter(|&(px, py)| self.is_lit(px, py))
            .count()
    }

    pub fn lit_total(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }
}

impl Default for MockFramebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for MockFramebuffer {
    fn size(&self) -> Size {
        Size::new(FB_WIDTH as u32, FB_HEIGHT as u32)
    }
}

impl DrawTarget for MockFramebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if (0..FB_WIDTH).contains(&x) && (0..FB_HEIGHT).contains(&y) {
                self.pixels[(y * FB_WIDTH + x) as usize] = color.is_on();
            }
        }
        Ok(())
    }
}

impl FramebufferPort for MockFramebuffer {
    fn present(&mut self) -> Result<(), ActuatorError> {
        self.presents += 1;
        Ok(())
    }

    fn set_power(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.power_calls.push(on);
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, pred: impl Fn(&AppEvent) -> bool) -> bool {
        self.events.iter().any(pred)
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Helpers ───────────────────────────────────────────────────

/// Default-configured service, started at t = 0 with idle controls.
pub fn make_app() -> (AppService, MockHardware, RecordingSink) {
    make_app_with(GameConfig::default())
}

pub fn make_app_with(config: GameConfig) -> (AppService, MockHardware, RecordingSink) {
    let mut app = AppService::new(config, 7);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink, 0.0);
    (app, hw, sink)
}

/// Tick every 50 ms from `from` up to and including `to`.
pub fn run(
    app: &mut AppService,
    hw: &mut MockHardware,
    sink: &mut RecordingSink,
    from: f64,
    to: f64,
) {
    let mut i = 0u32;
    loop {
        let t = from + f64::from(i) * 0.05;
        if t > to + 1e-9 {
            break;
        }
        app.tick(t, hw, sink);
        i += 1;
    }
}

/// Hold select from t = 0.1 until the level starts, then release.
/// Returns the time of the first tick in Playing.
#[allow(dead_code)]
pub fn start_level(app: &mut AppService, hw: &mut MockHardware, sink: &mut RecordingSink) -> f64 {
    hw.pressed = true;
    run(app, hw, sink, 0.1, 1.2);
    hw.pressed = false;
    app.tick(1.25, hw, sink);
    1.25
}
