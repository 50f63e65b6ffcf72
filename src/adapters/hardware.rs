//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the debounced inputs, quadrature decoder, calibrated
//! accelerometer, status LED and buzzer, exposing them through
//! [`InputPort`] and [`OutputPort`].  This is the only module in the
//! system that touches actual hardware.  On non-espidf targets, the
//! underlying drivers use cfg-gated simulation stubs.

use core::convert::Infallible;

use glam::Vec3;
use log::warn;

use crate::app::feedback::ToneKind;
use crate::app::ports::{InputPort, OutputPort};
use crate::config::GameConfig;
use crate::drivers::buzzer::Buzzer;
use crate::drivers::debounce::Debounced;
use crate::drivers::encoder::QuadratureDecoder;
use crate::drivers::gpio::{BusyDelay, GpioInput};
use crate::drivers::led_patterns::Indicator;
use crate::drivers::status_led::StatusLed;
use crate::error::{ActuatorError, SensorError};
use crate::pins;
use crate::sensors::accel::CalibratedAccel;
use crate::sensors::adxl345::Adxl345;

/// Encoder lines are sampled every tick; keep their debounce short.
const ENCODER_DEBOUNCE_SAMPLES: u8 = 3;
const ENCODER_DEBOUNCE_GAP_US: u32 = 200;

type Line = Debounced<GpioInput, BusyDelay>;

fn level(read: Result<bool, Infallible>) -> bool {
    match read {
        Ok(v) => v,
        Err(never) => match never {},
    }
}

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    select: Line,
    power: Line,
    clk: Line,
    dt: Line,
    decoder: QuadratureDecoder,
    /// `None` when the accelerometer did not answer at boot.
    accel: Option<CalibratedAccel<Adxl345>>,
    led: StatusLed,
    buzzer: Buzzer,
}

impl HardwareAdapter {
    pub fn new(config: &GameConfig, accel: Option<Adxl345>) -> Self {
        let (samples, gap) = (config.debounce_samples, config.debounce_gap_us);
        let line = |pin, samples, gap| Debounced::new(GpioInput::new(pin), BusyDelay, samples, gap);
        if accel.is_none() {
            warn!("hardware: no accelerometer, tilt disabled");
        }
        Self {
            select: line(pins::BUTTON_GPIO, samples, gap),
            power: line(pins::POWER_SWITCH_GPIO, samples, gap),
            clk: line(pins::ENCODER_CLK_GPIO, ENCODER_DEBOUNCE_SAMPLES, ENCODER_DEBOUNCE_GAP_US),
            dt: line(pins::ENCODER_DT_GPIO, ENCODER_DEBOUNCE_SAMPLES, ENCODER_DEBOUNCE_GAP_US),
            decoder: QuadratureDecoder::new(),
            accel: accel.map(|a| CalibratedAccel::new(a, config)),
            led: StatusLed::new(),
            buzzer: Buzzer::new(pins::BUZZER_GPIO),
        }
    }

    /// Learn the accelerometer rest offset.  Blocks for roughly
    /// `calibration_samples × calibration_gap_ms`.
    pub fn calibrate(&mut self, config: &GameConfig) -> Option<Vec3> {
        let accel = self.accel.as_mut()?;
        Some(accel.calibrate(
            config.calibration_samples,
            config.calibration_gap_ms,
            &mut BusyDelay,
        ))
    }
}

// ── InputPort implementation ──────────────────────────────────

impl InputPort for HardwareAdapter {
    fn select_pressed(&mut self) -> Result<bool, SensorError> {
        Ok(level(self.select.read()))
    }

    fn power_switch_off(&mut self) -> Result<bool, SensorError> {
        // Pulled up; HIGH = switch OFF.
        Ok(level(self.power.read()))
    }

    fn encoder_position(&mut self) -> Result<i32, SensorError> {
        let clk = level(self.clk.read());
        let dt = level(self.dt.read());
        self.decoder.step(clk, dt);
        Ok(self.decoder.position())
    }

    fn acceleration(&mut self) -> Vec3 {
        self.accel.as_mut().map_or(Vec3::ZERO, CalibratedAccel::reading)
    }
}

// ── OutputPort implementation ─────────────────────────────────

impl OutputPort for HardwareAdapter {
    fn set_indicator(&mut self, indicator: Indicator) -> Result<(), ActuatorError> {
        self.led.set(indicator)
    }

    fn start_tone(&mut self, _tone: ToneKind) -> Result<(), ActuatorError> {
        self.buzzer.on()
    }

    fn stop_tone(&mut self) -> Result<(), ActuatorError> {
        self.buzzer.off()
    }

    fn all_off(&mut self) {
        if let Err(e) = self.buzzer.off() {
            warn!("all_off: buzzer: {e}");
        }
        if let Err(e) = self.led.off() {
            warn!("all_off: led: {e}");
        }
    }
}
