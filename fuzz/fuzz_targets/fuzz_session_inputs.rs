//! Fuzz target: `AppService::tick` / `handle_command` / `render`
//!
//! Each 4-byte record becomes one step: a time increment, the button and
//! power switch levels, a rotary delta, a tilt reading and an optional
//! pause/resume command.  The service must never panic and the session
//! bookkeeping must stay consistent.
//!
//! cargo fuzz run fuzz_session_inputs

#![no_main]

use appleslice::adapters::null::{NullFramebuffer, NullSink};
use appleslice::app::commands::AppCommand;
use appleslice::app::feedback::ToneKind;
use appleslice::app::ports::{InputPort, OutputPort};
use appleslice::app::service::AppService;
use appleslice::config::GameConfig;
use appleslice::drivers::led_patterns::Indicator;
use appleslice::error::{ActuatorError, SensorError};
use glam::Vec3;
use libfuzzer_sys::fuzz_target;

#[derive(Default)]
struct Controls {
    pressed: bool,
    switch_off: bool,
    position: i32,
    tilt: f32,
}

impl InputPort for Controls {
    fn select_pressed(&mut self) -> Result<bool, SensorError> {
        Ok(self.pressed)
    }

    fn power_switch_off(&mut self) -> Result<bool, SensorError> {
        Ok(self.switch_off)
    }

    fn encoder_position(&mut self) -> Result<i32, SensorError> {
        Ok(self.position)
    }

    fn acceleration(&mut self) -> Vec3 {
        Vec3::new(0.0, self.tilt, 0.0)
    }
}

impl OutputPort for Controls {
    fn set_indicator(&mut self, _: Indicator) -> Result<(), ActuatorError> {
        Ok(())
    }

    fn start_tone(&mut self, _: ToneKind) -> Result<(), ActuatorError> {
        Ok(())
    }

    fn stop_tone(&mut self) -> Result<(), ActuatorError> {
        Ok(())
    }

    fn all_off(&mut self) {}
}

fuzz_target!(|data: &[u8]| {
    let mut app = AppService::new(GameConfig::default(), 0xA991E);
    let mut hw = Controls::default();
    let mut fb = NullFramebuffer;
    let mut sink = NullSink;
    app.start(&mut hw, &mut sink, 0.0);

    let mut now = 0.0;
    for step in data.chunks_exact(4) {
        // Up to ~1.3 s per step so a level can run to completion.
        now += f64::from(step[0]) * 0.005;
        hw.pressed = step[1] & 0x01 != 0;
        hw.switch_off = step[1] & 0x02 != 0;
        hw.position = hw.position.wrapping_add(i32::from(step[2] as i8));
        hw.tilt = f32::from(step[3] as i8) / 16.0;

        match step[1] >> 6 {
            1 => app.handle_command(AppCommand::Pause, now, &mut sink),
            2 => app.handle_command(AppCommand::Resume, now, &mut sink),
            _ => {}
        }
        app.tick(now, &mut hw, &mut sink);
        if step[1] & 0x04 != 0 {
            app.render(&mut fb);
        }

        let ctx = app.context();
        let sliced = ctx.apples.iter().filter(|a| a.is_sliced()).count();
        assert_eq!(usize::from(ctx.sliced_count), sliced);
        assert!(ctx.remaining() >= 0.0);
    }
});
