//! Integration tests: AppService → session FSM → events and cues.

use appleslice::app::commands::AppCommand;
use appleslice::app::events::AppEvent;
use appleslice::app::feedback::{FeedbackState, ToneKind};
use appleslice::error::Fault;
use appleslice::fsm::StateId;
use appleslice::game::{Difficulty, LEVELS};
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::pixelcolor::BinaryColor;

use crate::mock_hw::{MockFramebuffer, OutputCall, make_app, run, start_level};

// ── Menu ──────────────────────────────────────────────────────

#[test]
fn start_enters_menu_with_idle_indicator() {
    let (mut app, mut hw, mut sink) = make_app();
    assert_eq!(sink.events.first(), Some(&AppEvent::Started(StateId::Menu)));

    app.tick(0.05, &mut hw, &mut sink);
    assert_eq!(app.state(), StateId::Menu);
    assert_eq!(app.feedback_state(), FeedbackState::Idle);
    let led = hw.last_indicator().unwrap();
    assert_eq!(led.colour, (0, 0, 255));
    assert!(hw.tones().is_empty());
}

#[test]
fn rotation_in_menu_cycles_difficulty() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.position = 2;
    app.tick(0.05, &mut hw, &mut sink);
    assert_eq!(app.context().difficulty, Difficulty::Medium);
    assert_eq!(app.context().level_index, 4);

    hw.position = 1;
    app.tick(0.10, &mut hw, &mut sink);
    hw.position = 0;
    app.tick(0.15, &mut hw, &mut sink);
    assert_eq!(app.context().difficulty, Difficulty::Hard);

    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::DifficultyChanged(_))),
        3
    );
    assert!(hw.tones().is_empty(), "menu moves are silent");
}

#[test]
fn short_press_does_not_start() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.pressed = true;
    run(&mut app, &mut hw, &mut sink, 0.1, 0.8);
    hw.pressed = false;
    run(&mut app, &mut hw, &mut sink, 0.85, 3.0);
    assert_eq!(app.state(), StateId::Menu);
}

#[test]
fn long_press_starts_selected_level() {
    let (mut app, mut hw, mut sink) = make_app();
    start_level(&mut app, &mut hw, &mut sink);

    assert_eq!(app.state(), StateId::Playing);
    assert!(sink.contains(|e| matches!(
        e,
        AppEvent::LevelStarted { name, apples: 10, .. } if *name == LEVELS[0].name
    )));
    assert!(sink.contains(|e| *e
        == AppEvent::StateChanged {
            from: StateId::Menu,
            to: StateId::Playing
        }));
    assert_eq!(hw.tones(), vec![ToneKind::Start]);
    assert_eq!(app.context().apples.len(), 1, "first apple at t = 0");
}

// ── Level lifecycle ───────────────────────────────────────────

#[test]
fn level_times_out_into_game_over() {
    let (mut app, mut hw, mut sink) = make_app();
    let t0 = start_level(&mut app, &mut hw, &mut sink);
    let start = app.context().session_start;

    run(&mut app, &mut hw, &mut sink, t0, start + 50.5);
    assert_eq!(app.feedback_state(), FeedbackState::Warning);

    run(&mut app, &mut hw, &mut sink, start + 50.5, start + 61.0);
    assert_eq!(app.state(), StateId::GameOver);
    assert_eq!(app.context().apples.len(), 10);
    assert!(sink.contains(|e| *e
        == AppEvent::LevelFinished {
            sliced: 0,
            target: 10
        }));
    assert_eq!(
        sink.count(|e| *e == AppEvent::FaultAbsorbed(Fault::LevelExhausted)),
        1
    );
    assert_eq!(app.faults().level_exhausted, 1);
    assert_eq!(hw.tones(), vec![ToneKind::Start, ToneKind::GameOver]);
    assert_eq!(app.feedback_state(), FeedbackState::GameOver);
}

#[test]
fn confirm_returns_to_menu_and_restart_is_fresh() {
    let (mut app, mut hw, mut sink) = make_app();
    let t0 = start_level(&mut app, &mut hw, &mut sink);
    let end = app.context().session_start + 60.5;
    run(&mut app, &mut hw, &mut sink, t0, end);
    assert_eq!(app.state(), StateId::GameOver);

    hw.pressed = true;
    run(&mut app, &mut hw, &mut sink, end + 0.05, end + 0.4);
    hw.pressed = false;
    app.tick(end + 0.45, &mut hw, &mut sink);
    assert_eq!(app.state(), StateId::Menu);
    assert_eq!(app.context().difficulty, Difficulty::Easy);
    assert!(app.context().active_level.is_none());
    assert_eq!(hw.tones().last(), Some(&ToneKind::MenuSelect));

    let t1 = end + 0.5;
    hw.pressed = true;
    run(&mut app, &mut hw, &mut sink, t1, t1 + 1.1);
    assert_eq!(app.state(), StateId::Playing);
    assert_eq!(app.context().sliced_count, 0);
    assert!(app.context().apples.len() <= 1);
    assert!(app.context().apples.iter().all(|a| a.is_alive()));
}

#[test]
fn button_held_into_game_over_must_be_released() {
    let (mut app, mut hw, mut sink) = make_app();
    let t0 = start_level(&mut app, &mut hw, &mut sink);
    let end = app.context().session_start + 60.0;
    run(&mut app, &mut hw, &mut sink, t0, end - 1.0);
    hw.pressed = true;
    run(&mut app, &mut hw, &mut sink, end - 0.95, end + 2.0);
    assert_eq!(app.state(), StateId::GameOver);
}

// ── Pause / resume ────────────────────────────────────────────

#[test]
fn pause_freezes_the_session_clock() {
    let (mut app, mut hw, mut sink) = make_app();
    let t0 = start_level(&mut app, &mut hw, &mut sink);
    run(&mut app, &mut hw, &mut sink, t0, 5.0);
    let before = app.context().remaining();

    app.handle_command(AppCommand::Pause, 5.0, &mut sink);
    assert_eq!(app.state(), StateId::Paused);
    run(&mut app, &mut hw, &mut sink, 5.05, 15.0);
    assert_eq!(app.state(), StateId::Paused);
    assert!((app.context().remaining() - before).abs() < 1e-9);

    app.handle_command(AppCommand::Resume, 15.0, &mut sink);
    app.tick(15.0, &mut hw, &mut sink);
    assert_eq!(app.state(), StateId::Playing);
    assert!((app.context().paused_total - 10.0).abs() < 1e-9);
    assert!((app.context().remaining() - before).abs() < 1e-9);

    assert!(sink.contains(|e| *e
        == AppEvent::StateChanged {
            from: StateId::Playing,
            to: StateId::Paused
        }));
    assert!(sink.contains(|e| *e
        == AppEvent::StateChanged {
            from: StateId::Paused,
            to: StateId::Playing
        }));
}

#[test]
fn paused_level_does_not_spawn_or_move() {
    let (mut app, mut hw, mut sink) = make_app();
    let t0 = start_level(&mut app, &mut hw, &mut sink);
    run(&mut app, &mut hw, &mut sink, t0, 2.0);
    let apples = app.context().apples.clone();

    app.handle_command(AppCommand::Pause, 2.0, &mut sink);
    run(&mut app, &mut hw, &mut sink, 2.05, 30.0);
    assert_eq!(app.context().apples, apples);
}

#[test]
fn commands_outside_their_state_are_ignored() {
    let (mut app, mut hw, mut sink) = make_app();
    app.handle_command(AppCommand::Resume, 0.0, &mut sink);
    assert_eq!(app.state(), StateId::Menu);

    let t0 = start_level(&mut app, &mut hw, &mut sink);
    app.handle_command(AppCommand::Resume, t0, &mut sink);
    assert_eq!(app.state(), StateId::Playing);
    assert_eq!(app.context().paused_total, 0.0);
}

// ── Power and faults ──────────────────────────────────────────

#[test]
fn power_switch_gates_display_and_tilt() {
    let (mut app, mut hw, mut sink) = make_app();
    let mut fb = MockFramebuffer::new();
    app.tick(0.05, &mut hw, &mut sink);
    assert!(app.render(&mut fb));
    let reads = hw.accel_reads;

    hw.switch_off = true;
    run(&mut app, &mut hw, &mut sink, 0.1, 1.0);
    assert!(!app.power_on());
    assert!(sink.contains(|e| *e == AppEvent::PowerChanged { on: false }));
    assert!(!app.render(&mut fb));
    assert_eq!(fb.power_calls, vec![false]);
    assert_eq!(hw.accel_reads, reads, "no tilt sampling while off");

    let presents = fb.presents;
    hw.switch_off = false;
    app.tick(1.05, &mut hw, &mut sink);
    assert!(app.render(&mut fb));
    assert_eq!(fb.power_calls, vec![false, true]);
    assert_eq!(fb.presents, presents + 1);
}

#[test]
fn failed_select_read_counts_as_released() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.pressed = true;
    hw.select_fails = true;
    run(&mut app, &mut hw, &mut sink, 0.1, 2.0);
    assert_eq!(app.state(), StateId::Menu);
    assert!(app.faults().sensor_unavailable > 0);
    assert!(sink.contains(|e| *e == AppEvent::FaultAbsorbed(Fault::SensorUnavailable)));
}

#[test]
fn oversized_encoder_jump_is_discarded() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.position = 500;
    app.tick(0.05, &mut hw, &mut sink);
    assert_eq!(app.context().difficulty, Difficulty::Easy);
    assert_eq!(app.faults().input_out_of_range, 1);

    hw.position = 501;
    app.tick(0.10, &mut hw, &mut sink);
    assert_eq!(app.context().difficulty, Difficulty::Medium, "tracker resynced");
}

#[test]
fn status_reflects_the_session() {
    let (mut app, mut hw, mut sink) = make_app();
    start_level(&mut app, &mut hw, &mut sink);
    let status = app.status();
    assert_eq!(status.state, StateId::Playing);
    assert_eq!(status.level, Some(LEVELS[0].name));
    assert_eq!(status.target, 10);
    assert_eq!(status.live_apples, 1);
    assert!(status.power_on);
}

#[test]
fn shutdown_turns_everything_off() {
    let (mut app, mut hw, _sink) = make_app();
    let mut fb = MockFramebuffer::new();
    fb.clear(BinaryColor::On).unwrap();
    app.shutdown(&mut hw, &mut fb);
    assert_eq!(hw.calls.last(), Some(&OutputCall::AllOff));
    assert_eq!(fb.lit_total(), 0);
    assert_eq!(fb.power_calls, vec![false]);
}
