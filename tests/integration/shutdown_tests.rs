//! Integration tests: outputs go inert on every way out of the tick loop.

use std::panic::{AssertUnwindSafe, catch_unwind};

use appleslice::app::feedback::ToneKind;
use appleslice::app::guard::ShutdownGuard;
use appleslice::drivers::hw_init;
use appleslice::pins;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::pixelcolor::BinaryColor;

use crate::mock_hw::{MockFramebuffer, OutputCall, make_app, start_level};

fn reload_config() -> Result<(), &'static str> {
    Err("config reload failed")
}

fn assert_inert(calls: &[OutputCall], fb: &MockFramebuffer) {
    assert_eq!(calls.last(), Some(&OutputCall::AllOff));
    assert_eq!(fb.lit_total(), 0);
    assert_eq!(fb.power_calls.last(), Some(&false));
}

#[test]
fn panic_in_the_loop_leaves_outputs_inert() {
    let (mut app, mut hw, mut sink) = make_app();
    let mut fb = MockFramebuffer::new();
    let t0 = start_level(&mut app, &mut hw, &mut sink);
    assert_eq!(hw.tones().last(), Some(&ToneKind::Start));
    let _ = fb.clear(BinaryColor::On);

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let mut running = ShutdownGuard::new(&mut app, &mut hw, &mut fb);
        running.app.tick(t0 + 0.05, &mut *running.hw, &mut sink);
        panic!("sensor bus lost");
    }));

    assert!(outcome.is_err());
    assert_inert(&hw.calls, &fb);
}

#[test]
fn early_error_return_leaves_outputs_inert() {
    let (mut app, mut hw, mut sink) = make_app();
    let mut fb = MockFramebuffer::new();
    let t0 = start_level(&mut app, &mut hw, &mut sink);

    let result = (|| -> Result<(), &'static str> {
        let mut running = ShutdownGuard::new(&mut app, &mut hw, &mut fb);
        running.app.tick(t0 + 0.05, &mut *running.hw, &mut sink);
        running.app.render(&mut *running.fb);
        reload_config()?;
        Ok(())
    })();

    assert_eq!(result, Err("config reload failed"));
    assert!(fb.presents >= 1);
    assert_inert(&hw.calls, &fb);
}

#[test]
fn register_level_fallback_silences_buzzer_and_led() {
    hw_init::gpio_write(pins::BUZZER_GPIO, false).unwrap();
    hw_init::ledc_set(hw_init::LEDC_CH_LED_G, 200).unwrap();

    hw_init::outputs_inert();

    assert!(hw_init::gpio_read(pins::BUZZER_GPIO), "buzzer drive is inverted");
    for ch in [hw_init::LEDC_CH_LED_R, hw_init::LEDC_CH_LED_G, hw_init::LEDC_CH_LED_B] {
        assert_eq!(hw_init::sim_ledc_duty(ch), 0);
    }
}
