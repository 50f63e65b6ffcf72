//! Feedback signaling: indicator LED and buzzer.
//!
//! A closed set of [`FeedbackState`]s with one transition table keyed by
//! (current state, session view, seconds since entry).  Nothing here makes
//! gameplay decisions; it only renders outcomes the session and matcher
//! already decided.
//!
//! ```text
//!  Idle ◀──[Menu]──────────────── any
//!  GameOver ◀──[GameOver]───────── any
//!  Playing ──[remaining ≤ warn]──▶ Warning
//!  Success/Error ──[flash_hold elapsed]──▶ Playing | Warning
//! ```
//!
//! | State    | Indicator                             |
//! |----------|---------------------------------------|
//! | Idle     | blue, breathing 0.1 – 0.5             |
//! | GameOver | blue, breathing 0.1 – 0.5             |
//! | Playing  | green 0.3                             |
//! | Success  | blue 0.5 for `flash_secs`, then green |
//! | Error    | red 0.5 for `flash_secs`, then green  |
//! | Warning  | orange ⇄ yellow 0.4 at `blink_hz`     |

use crate::config::GameConfig;
use crate::drivers::led_patterns::{
    COLOUR_ERROR, COLOUR_IDLE, COLOUR_PLAYING, COLOUR_SUCCESS, COLOUR_WARNING,
    COLOUR_WARNING_ALT, Indicator, Pattern,
};
use crate::fsm::StateId;

const IDLE_MIN: f32 = 0.1;
const IDLE_MAX: f32 = 0.5;
const PLAYING_LEVEL: f32 = 0.3;
const FLASH_LEVEL: f32 = 0.5;
const WARNING_LEVEL: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackState {
    Idle,
    Playing,
    Success,
    Error,
    Warning,
    GameOver,
}

/// Buzzer cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneKind {
    Start,
    Success,
    Error,
    GameOver,
    MenuSelect,
}

/// Match outcome that forces a flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    Success,
    Error,
}

/// Audio sink edge produced by a feedback update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneEdge {
    Start(ToneKind),
    Stop,
}

/// Output of one feedback update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackFrame {
    pub state: FeedbackState,
    pub indicator: Indicator,
    pub tone: Option<ToneEdge>,
}

/// Session facts the table reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionView {
    pub state: StateId,
    /// Seconds left in the level on the adjusted clock.
    pub remaining: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Timing {
    warning_threshold: f64,
    blink_hz: f64,
    flash: f64,
    flash_hold: f64,
    chirp: f64,
    idle_period: f64,
}

/// Transition table.
pub fn next_state(
    current: FeedbackState,
    session: SessionView,
    since_entry: f64,
    flash_hold: f64,
    warning_threshold: f64,
) -> FeedbackState {
    use FeedbackState as F;
    match session.state {
        StateId::Menu => F::Idle,
        StateId::GameOver => F::GameOver,
        StateId::Playing | StateId::Paused => match current {
            F::Success | F::Error if since_entry < flash_hold => current,
            _ if session.remaining <= warning_threshold => F::Warning,
            _ => F::Playing,
        },
    }
}

pub struct Feedback {
    timing: Timing,
    state: FeedbackState,
    entered_at: f64,
    /// Tone sounding and when it stops.
    tone: Option<(ToneKind, f64)>,
    /// Tone requested since the last update.
    pending: Option<ToneKind>,
}

impl Feedback {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            timing: Timing {
                warning_threshold: config.warning_threshold_secs,
                blink_hz: config.warning_blink_hz,
                flash: config.flash_secs,
                flash_hold: config.flash_hold_secs,
                chirp: config.chirp_secs,
                idle_period: config.idle_pulse_period_secs,
            },
            state: FeedbackState::Idle,
            entered_at: 0.0,
            tone: None,
            pending: None,
        }
    }

    pub fn state(&self) -> FeedbackState {
        self.state
    }

    /// Force a success or miss flash measured from `now`, with its tone.
    pub fn flash(&mut self, flash: Flash, now: f64) {
        let (state, tone) = match flash {
            Flash::Success => (FeedbackState::Success, ToneKind::Success),
            Flash::Error => (FeedbackState::Error, ToneKind::Error),
        };
        self.enter(state, now);
        self.play(tone, now);
    }

    /// Queue a tone; it starts on the next update.
    pub fn play(&mut self, tone: ToneKind, now: f64) {
        let length = match tone {
            ToneKind::Success | ToneKind::Error => self.timing.flash,
            ToneKind::Start | ToneKind::GameOver | ToneKind::MenuSelect => self.timing.chirp,
        };
        self.tone = Some((tone, now + length));
        self.pending = Some(tone);
    }

    /// Advance to `now` and produce the outputs to apply.
    pub fn update(&mut self, session: SessionView, now: f64) -> FeedbackFrame {
        let since = now - self.entered_at;
        let next = next_state(
            self.state,
            session,
            since,
            self.timing.flash_hold,
            self.timing.warning_threshold,
        );
        if next != self.state {
            self.enter(next, now);
        }

        let tone = if let Some(kind) = self.pending.take() {
            Some(ToneEdge::Start(kind))
        } else if let Some((_, until)) = self.tone
            && now >= until
        {
            self.tone = None;
            Some(ToneEdge::Stop)
        } else {
            None
        };

        FeedbackFrame {
            state: self.state,
            indicator: self.indicator(now),
            tone,
        }
    }

    /// Indicator for the current state at `now`.
    pub fn indicator(&self, now: f64) -> Indicator {
        let since = now - self.entered_at;
        let t = &self.timing;
        let solid = |colour, brightness| Pattern::Solid { colour, brightness };
        let pattern = match self.state {
            FeedbackState::Idle | FeedbackState::GameOver => Pattern::Breathing {
                colour: COLOUR_IDLE,
                period_secs: t.idle_period,
                min: IDLE_MIN,
                max: IDLE_MAX,
            },
            FeedbackState::Playing => solid(COLOUR_PLAYING, PLAYING_LEVEL),
            FeedbackState::Success if since < t.flash => solid(COLOUR_SUCCESS, FLASH_LEVEL),
            FeedbackState::Error if since < t.flash => solid(COLOUR_ERROR, FLASH_LEVEL),
            FeedbackState::Success | FeedbackState::Error => solid(COLOUR_PLAYING, PLAYING_LEVEL),
            FeedbackState::Warning => Pattern::Alternate {
                first: COLOUR_WARNING,
                second: COLOUR_WARNING_ALT,
                hz: t.blink_hz,
                brightness: WARNING_LEVEL,
            },
        };
        let phase = match self.state {
            FeedbackState::Idle | FeedbackState::GameOver => now,
            _ => since,
        };
        pattern.sample(phase)
    }

    fn enter(&mut self, state: FeedbackState, now: f64) {
        self.state = state;
        self.entered_at = now;
    }
}
