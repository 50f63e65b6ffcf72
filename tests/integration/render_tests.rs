//! Integration tests: AppService::render → framebuffer contents.

use appleslice::app::commands::AppCommand;

use crate::mock_hw::{MockFramebuffer, make_app, run, start_level};

const BAR_AREA: usize = 25 * 8;
const BAR_OUTLINE: usize = 2 * 25 + 2 * 8 - 4;

#[test]
fn menu_highlights_selected_difficulty() {
    let (mut app, mut hw, mut sink) = make_app();
    let mut fb = MockFramebuffer::new();
    app.tick(0.05, &mut hw, &mut sink);
    assert!(app.render(&mut fb));

    assert_eq!(fb.presents, 1);
    assert_eq!(fb.lit_in(20, 25, 25, 8), BAR_AREA);
    assert_eq!(fb.lit_in(55, 25, 25, 8), BAR_OUTLINE);
    assert_eq!(fb.lit_in(90, 25, 25, 8), BAR_OUTLINE);
    assert!(fb.lit_in(20, 55, 100, 5) > 0, "start prompt");

    hw.position = 1;
    app.tick(0.10, &mut hw, &mut sink);
    app.render(&mut fb);
    assert_eq!(fb.lit_in(20, 25, 25, 8), BAR_OUTLINE);
    assert_eq!(fb.lit_in(55, 25, 25, 8), BAR_AREA);
}

#[test]
fn playing_draws_status_bar_and_apples() {
    let (mut app, mut hw, mut sink) = make_app();
    let mut fb = MockFramebuffer::new();
    start_level(&mut app, &mut hw, &mut sink);
    app.render(&mut fb);

    assert!(fb.lit_in(0, 0, 40, 12) > 0, "level name");
    assert!(fb.lit_in(45, 0, 30, 12) > 0, "score");
    // ~59 s left: eleven time dots right-aligned on row 5.
    assert!(fb.is_lit(123, 5));
    assert!(fb.is_lit(113, 5));
    assert!(!fb.is_lit(112, 5));

    let (x, y) = app.context().apples[0].pixel();
    assert!(fb.lit_in(x, y, 8, 8) > 0, "apple at ({x}, {y})");
}

#[test]
fn paused_overlay_is_drawn() {
    let (mut app, mut hw, mut sink) = make_app();
    let mut fb = MockFramebuffer::new();
    let t0 = start_level(&mut app, &mut hw, &mut sink);
    app.handle_command(AppCommand::Pause, t0, &mut sink);
    app.tick(t0 + 0.05, &mut hw, &mut sink);
    app.render(&mut fb);

    assert_eq!(fb.lit_in(40, 26, 44, 3), 0, "overlay margin is cleared");
    assert!(fb.lit_in(47, 29, 30, 5) > 0, "PAUSED text");
}

#[test]
fn game_over_shows_score() {
    let (mut app, mut hw, mut sink) = make_app();
    let mut fb = MockFramebuffer::new();
    let t0 = start_level(&mut app, &mut hw, &mut sink);
    let end = app.context().session_start + 60.5;
    run(&mut app, &mut hw, &mut sink, t0, end);
    app.render(&mut fb);

    assert!(fb.lit_in(25, 20, 80, 5) > 0, "GAME OVER");
    assert!(fb.lit_in(40, 35, 40, 5) > 0, "score");
    assert_eq!(fb.lit_in(0, 0, 128, 12), 0, "no status bar");
}

#[test]
fn render_is_skipped_while_powered_off() {
    let (mut app, mut hw, mut sink) = make_app();
    let mut fb = MockFramebuffer::new();
    hw.switch_off = true;
    app.tick(0.05, &mut hw, &mut sink);
    assert!(!app.render(&mut fb));
    assert!(!app.render(&mut fb));
    assert_eq!(fb.presents, 0);
    assert_eq!(fb.power_calls, vec![false], "power change applied once");
}
