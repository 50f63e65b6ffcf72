//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to: the latest input snapshot, the session (level, apples,
//! score, clocks), configuration, and an outbox of notices the service
//! turns into events and feedback after the tick.  It is the
//! "blackboard" of the session.
//!
//! ## Clocks
//!
//! ```text
//!  adjusted_now = now − paused_total − (now − pause_started)   while paused
//!  adjusted_now = now − paused_total                           otherwise
//!  elapsed      = adjusted_now − session_start
//! ```
//!
//! Every Playing-state timing consumer reads `adjusted_now` / `elapsed`.

use log::info;

use crate::config::GameConfig;
use crate::drivers::button::{HoldDetector, HoldRule};
use crate::game::{AppleList, Arena, Difficulty, LEVELS, Level};
use crate::scheduler::SpawnScheduler;

// ---------------------------------------------------------------------------
// Input snapshot (written by the service before each tick)
// ---------------------------------------------------------------------------

/// A point-in-time snapshot of the inputs the state handlers read.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Raw monotonic time (seconds).
    pub now: f64,
    /// Debounced select button.
    pub select_pressed: bool,
    /// Bounded rotary delta observed this tick, if any.
    pub encoder_delta: Option<i32>,
}

// ---------------------------------------------------------------------------
// Outbox (written by state handlers; drained by the service)
// ---------------------------------------------------------------------------

/// Something a state handler decided that the outside world should hear
/// about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notice {
    DifficultyChanged(Difficulty),
    LevelStarted { level_index: usize },
    LevelFinished { sliced: u16, target: u16 },
    /// Every apple of the level has been spawned.
    SpawningStopped,
    ReturnedToMenu,
}

pub type Outbox = heapless::Vec<Notice, 4>;

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

pub struct FsmContext {
    // -- Inputs --
    pub input: InputSnapshot,

    // -- Configuration --
    pub config: GameConfig,
    pub arena: Arena,

    // -- Selection --
    pub difficulty: Difficulty,
    /// Index into [`LEVELS`] that the menu will start.
    pub level_index: usize,
    /// Level being played, or last played until the player confirms on
    /// the game-over screen.
    pub active_level: Option<&'static Level>,

    // -- Session --
    pub apples: AppleList,
    pub sliced_count: u16,
    /// Session start on the adjusted clock.
    pub session_start: f64,
    /// Completed pause intervals, summed.
    pub paused_total: f64,
    /// Raw start of the pause in progress.
    pub pause_started: Option<f64>,

    // -- Collaborators owned by the session --
    pub spawner: SpawnScheduler,
    pub hold: HoldDetector,

    pub outbox: Outbox,
}

impl FsmContext {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let arena = Arena::from_config(&config);
        let hold = HoldDetector::new(HoldRule::AtLeast(config.start_hold_secs));
        let difficulty = Difficulty::default();
        Self {
            input: InputSnapshot::default(),
            config,
            arena,
            difficulty,
            level_index: difficulty.first_level(),
            active_level: None,
            apples: AppleList::new(),
            sliced_count: 0,
            session_start: 0.0,
            paused_total: 0.0,
            pause_started: None,
            spawner: SpawnScheduler::new(seed),
            hold,
            outbox: Outbox::new(),
        }
    }

    /// Raw time minus every paused interval, including the one in progress.
    pub fn adjusted_now(&self) -> f64 {
        let now = self.input.now;
        let in_progress = self.pause_started.map_or(0.0, |p| (now - p).max(0.0));
        now - self.paused_total - in_progress
    }

    /// Seconds into the current level on the adjusted clock.
    pub fn elapsed(&self) -> f64 {
        self.adjusted_now() - self.session_start
    }

    /// Seconds left in the current level, clamped at zero.
    pub fn remaining(&self) -> f64 {
        self.active_level
            .map_or(0.0, |l| (l.duration_secs - self.elapsed()).max(0.0))
    }

    /// Apples the current level will spawn in total.
    pub fn target(&self) -> u16 {
        self.active_level.map_or(0, |l| l.apples)
    }

    /// Begin a fresh session on the selected level.
    pub fn start_level(&mut self) {
        let level = &LEVELS[self.level_index];
        self.active_level = Some(level);
        self.apples.clear();
        self.sliced_count = 0;
        self.paused_total = 0.0;
        self.pause_started = None;
        self.session_start = self.input.now;

        let speed = self.config.speeds.speed(level.speed);
        self.spawner.arm(level, speed, self.session_start);

        info!(
            "level {} started: {} apples over {:.0}s, cadence {:.2}s",
            level.name,
            level.apples,
            level.duration_secs,
            level.cadence_secs()
        );
        self.notify(Notice::LevelStarted {
            level_index: self.level_index,
        });
    }

    /// Clear the selection after the game-over confirmation.
    pub fn reset_to_menu(&mut self) {
        self.difficulty = Difficulty::default();
        self.level_index = self.difficulty.first_level();
        self.active_level = None;
        self.spawner.disarm();
        self.notify(Notice::ReturnedToMenu);
    }

    /// Step the difficulty selection by a rotary delta.
    pub fn select_difficulty(&mut self, delta: i32) {
        let next = self.difficulty.step(delta);
        if next != self.difficulty {
            self.difficulty = next;
            self.level_index = next.first_level();
            self.notify(Notice::DifficultyChanged(next));
        }
    }

    /// Freeze the adjusted clock.  No-op if already paused.
    pub fn begin_pause(&mut self, now: f64) {
        if self.pause_started.is_none() {
            self.pause_started = Some(now);
        }
    }

    /// Fold the pause in progress into `paused_total`.
    pub fn end_pause(&mut self, now: f64) {
        if let Some(p) = self.pause_started.take() {
            self.paused_total += (now - p).max(0.0);
        }
    }

    pub fn notify(&mut self, notice: Notice) {
        if self.outbox.push(notice).is_err() {
            log::warn!("outbox full, dropped {notice:?}");
        }
    }

    pub fn take_outbox(&mut self) -> Outbox {
        core::mem::take(&mut self.outbox)
    }
}
