//! Integration tests: controls → gesture pipeline → apple matching.

use appleslice::app::commands::AppCommand;
use appleslice::app::events::AppEvent;
use appleslice::app::feedback::{FeedbackState, ToneKind};
use appleslice::control::gesture::GestureSource;
use appleslice::game::{Edge, SliceAction};
use glam::Vec3;

use crate::mock_hw::{MockHardware, make_app, run, start_level};

/// Drive the controls so that `action` is detected.
fn perform(hw: &mut MockHardware, action: SliceAction) {
    match action {
        SliceAction::RotateRight => hw.position += 1,
        SliceAction::RotateLeft => hw.position -= 1,
        SliceAction::Forward => hw.accel = Vec3::new(0.0, 3.0, 0.0),
        SliceAction::Backward => hw.accel = Vec3::new(0.0, -3.0, 0.0),
    }
}

fn source_of(action: SliceAction) -> GestureSource {
    match action {
        SliceAction::RotateLeft | SliceAction::RotateRight => GestureSource::Encoder,
        SliceAction::Forward | SliceAction::Backward => GestureSource::Tilt,
    }
}

fn slices(events: &[AppEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, AppEvent::Slice { .. }))
        .count()
}

fn misses(events: &[AppEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, AppEvent::Miss { .. }))
        .count()
}

// ── Matching ──────────────────────────────────────────────────

#[test]
fn matching_gesture_slices_first_apple() {
    let (mut app, mut hw, mut sink) = make_app();
    let t0 = start_level(&mut app, &mut hw, &mut sink);
    let edge = app.context().apples[0].edge();
    let action = edge.expected_action();

    perform(&mut hw, action);
    run(&mut app, &mut hw, &mut sink, t0 + 0.05, t0 + 0.6);

    assert!(app.context().apples[0].is_sliced());
    assert_eq!(app.context().sliced_count, 1);
    assert!(sink.contains(|e| *e
        == AppEvent::Slice {
            source: source_of(action),
            action,
            edge,
            sliced: 1,
            target: 10,
        }));
    assert_eq!(hw.tones().last(), Some(&ToneKind::Success));
    assert_eq!(app.faults().no_match, 0);
}

#[test]
fn mismatched_rotation_is_a_miss() {
    let (mut app, mut hw, mut sink) = make_app();
    let t0 = start_level(&mut app, &mut hw, &mut sink);
    let wrong = if app.context().apples[0].edge() == Edge::Right {
        SliceAction::RotateLeft
    } else {
        SliceAction::RotateRight
    };

    perform(&mut hw, wrong);
    run(&mut app, &mut hw, &mut sink, t0 + 0.05, t0 + 0.4);

    assert!(app.context().apples[0].is_alive());
    assert_eq!(app.context().sliced_count, 0);
    assert!(sink.contains(|e| *e
        == AppEvent::Miss {
            source: GestureSource::Encoder,
            action: wrong
        }));
    assert_eq!(app.faults().no_match, 1);
    assert_eq!(app.feedback_state(), FeedbackState::Error);
    assert_eq!(hw.tones().last(), Some(&ToneKind::Error));
    assert_eq!(hw.last_indicator().unwrap().colour, (255, 0, 0));
}

#[test]
fn gesture_takes_effect_after_response_delay() {
    let (mut app, mut hw, mut sink) = make_app();
    let t0 = start_level(&mut app, &mut hw, &mut sink);

    hw.position += 1;
    app.tick(t0 + 0.05, &mut hw, &mut sink);
    let pending = app.pending(GestureSource::Encoder).unwrap();
    assert_eq!(pending.action, SliceAction::RotateRight);
    assert!((pending.fire_at - (t0 + 0.25)).abs() < 1e-9);

    app.tick(t0 + 0.15, &mut hw, &mut sink);
    assert_eq!(slices(&sink.events) + misses(&sink.events), 0);

    app.tick(t0 + 0.3, &mut hw, &mut sink);
    assert!(app.pending(GestureSource::Encoder).is_none());
    assert_eq!(slices(&sink.events) + misses(&sink.events), 1);
}

#[test]
fn pending_gesture_waits_while_power_is_off() {
    let (mut app, mut hw, mut sink) = make_app();
    let t0 = start_level(&mut app, &mut hw, &mut sink);

    hw.position += 1;
    app.tick(t0 + 0.05, &mut hw, &mut sink);
    assert!(app.pending(GestureSource::Encoder).is_some());

    hw.switch_off = true;
    hw.position += 1;
    run(&mut app, &mut hw, &mut sink, t0 + 0.1, t0 + 0.5);
    assert_eq!(slices(&sink.events) + misses(&sink.events), 0);
    let pending = app.pending(GestureSource::Encoder).unwrap();
    assert_eq!(pending.action, SliceAction::RotateRight, "no arming while off");

    hw.switch_off = false;
    app.tick(t0 + 0.55, &mut hw, &mut sink);
    assert!(app.pending(GestureSource::Encoder).is_none());
    assert_eq!(slices(&sink.events) + misses(&sink.events), 1);
}

#[test]
fn newer_rotation_replaces_pending_one() {
    let (mut app, mut hw, mut sink) = make_app();
    let t0 = start_level(&mut app, &mut hw, &mut sink);

    hw.position += 1;
    app.tick(t0 + 0.05, &mut hw, &mut sink);
    hw.position -= 2;
    app.tick(t0 + 0.10, &mut hw, &mut sink);
    let pending = app.pending(GestureSource::Encoder).unwrap();
    assert_eq!(pending.action, SliceAction::RotateLeft);

    run(&mut app, &mut hw, &mut sink, t0 + 0.15, t0 + 0.5);
    assert_eq!(slices(&sink.events) + misses(&sink.events), 1);
}

#[test]
fn held_tilt_fires_once() {
    let (mut app, mut hw, mut sink) = make_app();
    let t0 = start_level(&mut app, &mut hw, &mut sink);

    perform(&mut hw, SliceAction::Forward);
    run(&mut app, &mut hw, &mut sink, t0 + 0.05, t0 + 1.5);
    let tilt_events = sink.count(|e| {
        matches!(
            e,
            AppEvent::Slice {
                source: GestureSource::Tilt,
                ..
            } | AppEvent::Miss {
                source: GestureSource::Tilt,
                ..
            }
        )
    });
    assert_eq!(tilt_events, 1);
}

#[test]
fn expired_apple_cannot_be_sliced() {
    let (mut app, mut hw, mut sink) = make_app();
    let t0 = start_level(&mut app, &mut hw, &mut sink);
    let start = app.context().session_start;
    run(&mut app, &mut hw, &mut sink, t0, start + 5.5);
    assert_eq!(app.context().apples.len(), 1);
    assert!(!app.context().apples[0].is_alive());

    perform(&mut hw, app.context().apples[0].expected_action());
    run(&mut app, &mut hw, &mut sink, start + 5.55, start + 5.95);
    assert_eq!(slices(&sink.events), 0);
    assert_eq!(misses(&sink.events), 1);
}

// ── State gating ──────────────────────────────────────────────

#[test]
fn rotation_in_menu_never_arms_a_slice() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.position = 1;
    app.tick(0.05, &mut hw, &mut sink);
    assert!(app.pending(GestureSource::Encoder).is_none());
    run(&mut app, &mut hw, &mut sink, 0.1, 1.0);
    assert_eq!(slices(&sink.events) + misses(&sink.events), 0);
}

#[test]
fn pause_drops_pending_gestures() {
    let (mut app, mut hw, mut sink) = make_app();
    let t0 = start_level(&mut app, &mut hw, &mut sink);

    hw.position += 1;
    app.tick(t0 + 0.05, &mut hw, &mut sink);
    assert!(app.pending(GestureSource::Encoder).is_some());

    app.handle_command(AppCommand::Pause, t0 + 0.1, &mut sink);
    assert!(app.pending(GestureSource::Encoder).is_none());

    hw.position += 1;
    run(&mut app, &mut hw, &mut sink, t0 + 0.15, t0 + 1.0);
    app.handle_command(AppCommand::Resume, t0 + 1.0, &mut sink);
    run(&mut app, &mut hw, &mut sink, t0 + 1.05, t0 + 1.5);
    assert_eq!(slices(&sink.events) + misses(&sink.events), 0);
}
