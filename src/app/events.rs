//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to serial, record in a test, etc.

use crate::control::gesture::GestureSource;
use crate::error::Fault;
use crate::fsm::StateId;
use crate::game::{Difficulty, Edge, SliceAction};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries initial state).
    Started(StateId),

    /// The session FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// The menu selection moved.
    DifficultyChanged(Difficulty),

    /// A level began.
    LevelStarted {
        name: &'static str,
        apples: u16,
        duration_secs: f64,
    },

    /// A fired gesture sliced an apple.
    Slice {
        source: GestureSource,
        action: SliceAction,
        edge: Edge,
        sliced: u16,
        target: u16,
    },

    /// A fired gesture matched nothing.
    Miss {
        source: GestureSource,
        action: SliceAction,
    },

    /// The level clock ran out.
    LevelFinished { sliced: u16, target: u16 },

    /// The power switch changed.  `on == false` blanks the display.
    PowerChanged { on: bool },

    /// A fault was absorbed by its recovery policy.
    FaultAbsorbed(Fault),

    /// Periodic status snapshot.
    Status(StatusSnapshot),
}

/// Fault occurrences since start, by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaultCounters {
    pub sensor_unavailable: u32,
    pub input_out_of_range: u32,
    pub no_match: u32,
    pub level_exhausted: u32,
}

impl FaultCounters {
    pub fn record(&mut self, fault: Fault) {
        let slot = match fault {
            Fault::SensorUnavailable => &mut self.sensor_unavailable,
            Fault::InputOutOfRange => &mut self.input_out_of_range,
            Fault::NoMatchFound => &mut self.no_match,
            Fault::LevelExhausted => &mut self.level_exhausted,
        };
        *slot = slot.saturating_add(1);
    }
}

/// A point-in-time status snapshot suitable for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub state: StateId,
    pub difficulty: Difficulty,
    pub level: Option<&'static str>,
    pub sliced: u16,
    pub target: u16,
    pub remaining_secs: f64,
    pub live_apples: usize,
    pub power_on: bool,
    pub faults: FaultCounters,
}
