//! Screen composition.
//!
//! Pure draw calls against a [`FramebufferPort`].  Every frame is cleared,
//! drawn and presented in full; the sink owns pixel format and transport.
//!
//! ```text
//!  ┌──────────────────────────────┐   Playing
//!  │E1:EZ  3/10      0:42 ·······│   status bar (12 px)
//!  │                              │
//!  │   ■            ■             │   live apples, 8×8
//!  └──────────────────────────────┘
//! ```

use core::fmt::Write;

use embedded_graphics::mono_font::ascii::{FONT_4X6, FONT_5X7, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    ContainsPoint, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment,
};
use embedded_graphics::text::{Baseline, Text};

use crate::app::ports::FramebufferPort;
use crate::error::ActuatorError;
use crate::game::{Apple, Difficulty, Level};

const STATUS_BAR_HEIGHT: u32 = 12;
const SECONDS_PER_DOT: f64 = 5.0;
const MAX_DOTS: usize = 20;

const BAR_X: i32 = 20;
const BAR_Y: i32 = 25;
const BAR_SIZE: Size = Size::new(25, 8);
const BAR_PITCH: i32 = 35;

const FILL_ON: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_fill(BinaryColor::On);
const FILL_OFF: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_fill(BinaryColor::Off);

/// What to draw this frame.
#[derive(Debug, Clone, Copy)]
pub enum Screen<'a> {
    Welcome,
    Menu {
        difficulty: Difficulty,
        level: &'static Level,
    },
    Playing {
        level: &'static Level,
        sliced: u16,
        /// Seconds left on the adjusted clock.
        remaining: f64,
        apples: &'a [Apple],
        apple_size: u32,
        max_apples: usize,
        paused: bool,
    },
    GameOver {
        level: Option<&'static Level>,
        sliced: u16,
    },
}

/// Clear, draw `screen`, and present.
pub fn draw_frame<D: FramebufferPort>(fb: &mut D, screen: &Screen<'_>) -> Result<(), ActuatorError> {
    let _ = fb.clear(BinaryColor::Off);
    match *screen {
        Screen::Welcome => text(fb, "WELCOME", Point::new(25, 25), &FONT_6X10),
        Screen::Menu { difficulty, level } => draw_menu(fb, difficulty, level),
        Screen::Playing {
            level,
            sliced,
            remaining,
            apples,
            apple_size,
            max_apples,
            paused,
        } => {
            draw_status_bar(fb, level, sliced, remaining);
            draw_apples(fb, apples, apple_size, max_apples);
            if paused {
                fill(fb, Point::new(40, 26), Size::new(44, 11), FILL_OFF);
                text(fb, "PAUSED", Point::new(47, 29), &FONT_5X7);
            }
        }
        Screen::GameOver { level, sliced } => draw_game_over(fb, level, sliced),
    }
    fb.present()
}

fn text<D: FramebufferPort>(fb: &mut D, s: &str, at: Point, font: &MonoFont<'_>) {
    let style = MonoTextStyle::new(font, BinaryColor::On);
    let _ = Text::with_baseline(s, at, style, Baseline::Top).draw(fb);
}

fn fill<D: FramebufferPort>(fb: &mut D, at: Point, size: Size, style: PrimitiveStyle<BinaryColor>) {
    let _ = Rectangle::new(at, size).into_styled(style).draw(fb);
}

fn draw_menu<D: FramebufferPort>(fb: &mut D, difficulty: Difficulty, level: &Level) {
    text(fb, difficulty.name(), Point::new(40, 10), &FONT_6X10);
    let outline = PrimitiveStyleBuilder::new()
        .stroke_color(BinaryColor::On)
        .stroke_width(1)
        .stroke_alignment(StrokeAlignment::Inside)
        .build();
    for d in Difficulty::ALL {
        let at = Point::new(BAR_X + d.index() as i32 * BAR_PITCH, BAR_Y);
        let style = if d == difficulty { FILL_ON } else { outline };
        fill(fb, at, BAR_SIZE, style);
    }
    text(fb, level.name, Point::new(10, 40), &FONT_6X10);
    text(fb, "PRESS START", Point::new(20, 55), &FONT_6X10);
}

fn draw_status_bar<D: FramebufferPort>(fb: &mut D, level: &Level, sliced: u16, remaining: f64) {
    let width = fb.bounding_box().size.width;
    fill(fb, Point::zero(), Size::new(width, STATUS_BAR_HEIGHT), FILL_OFF);
    text(fb, level.short_name(), Point::new(2, 2), &FONT_4X6);
    text(fb, &score_text(sliced, level.apples), Point::new(45, 2), &FONT_4X6);
    text(fb, &countdown_text(remaining), Point::new(85, 2), &FONT_4X6);
    let dots = (0..time_dots(remaining))
        .map(|i| Pixel(Point::new(width as i32 - 5 - i as i32, 5), BinaryColor::On));
    let _ = fb.draw_iter(dots);
}

fn draw_apples<D: FramebufferPort>(fb: &mut D, apples: &[Apple], size: u32, max: usize) {
    let screen = fb.bounding_box();
    let visible = apples.iter().filter(|a| {
        let p = a.position();
        a.is_alive() && screen.contains(Point::new(p.x.floor() as i32, p.y.floor() as i32))
    });
    for apple in visible.take(max) {
        let (x, y) = apple.pixel();
        fill(fb, Point::new(x, y), Size::new(size, size), FILL_ON);
    }
}

fn draw_game_over<D: FramebufferPort>(fb: &mut D, level: Option<&Level>, sliced: u16) {
    text(fb, "GAME OVER", Point::new(25, 20), &FONT_6X10);
    if let Some(level) = level {
        text(fb, &score_text(sliced, level.apples), Point::new(40, 35), &FONT_6X10);
    }
    text(fb, "PRESS RESTART", Point::new(15, 50), &FONT_6X10);
}

pub fn score_text(sliced: u16, target: u16) -> heapless::String<12> {
    let mut out = heapless::String::new();
    let _ = write!(out, "{sliced}/{target}");
    out
}

/// `m:ss`, truncated to whole seconds.
pub fn countdown_text(remaining: f64) -> heapless::String<12> {
    let secs = remaining.max(0.0) as u32;
    let mut out = heapless::String::new();
    let _ = write!(out, "{}:{:02}", secs / 60, secs % 60);
    out
}

/// One dot per five seconds left, capped.
pub fn time_dots(remaining: f64) -> usize {
    ((remaining.max(0.0) / SECONDS_PER_DOT) as usize).min(MAX_DOTS)
}
