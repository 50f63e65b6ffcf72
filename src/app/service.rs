//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the session FSM, gesture pipeline, feedback state
//! machine and power monitor.  It exposes a clean, hardware-agnostic API.
//! All I/O flows through port traits injected at call sites, making the
//! entire service testable with mock adapters.
//!
//! ```text
//!     InputPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                   │          AppService          │
//!    OutputPort ◀── │ Power · FSM · Feedback ·     │
//!                   │ Gestures · Matcher           │
//! FramebufferPort ◀─└──────────────────────────────┘
//! ```
//!
//! ## Tick order
//!
//! 1. power switch
//! 2. session FSM (menu / spawning / apple motion / countdown)
//! 3. feedback (indicator, buzzer)
//! 4. gestures (arm, fire, match)
//!
//! Rendering is a separate call made after `tick`.  Later steps read what
//! earlier steps produced in the same tick.

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::pixelcolor::BinaryColor;
use log::{debug, info, warn};

use crate::config::GameConfig;
use crate::control::gesture::{GesturePipeline, GestureSource, PendingAction};
use crate::control::matcher::{self, MatchOutcome};
use crate::error::{Fault, Recovery};
use crate::fsm::context::{FsmContext, InputSnapshot, Notice};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::game::{LEVELS, SliceAction};
use crate::power::{PowerEdge, PowerSwitchMonitor};
use crate::render::{self, Screen};

use super::commands::AppCommand;
use super::events::{AppEvent, FaultCounters, StatusSnapshot};
use super::feedback::{Feedback, FeedbackState, Flash, SessionView, ToneEdge, ToneKind};
use super::ports::{EventSink, FramebufferPort, InputPort, OutputPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all game logic.
pub struct AppService {
    fsm: Fsm,
    ctx: FsmContext,
    gestures: GesturePipeline,
    feedback: Feedback,
    power: PowerSwitchMonitor,
    faults: FaultCounters,
    tick_count: u64,
    /// Display power change not yet applied by [`render`](Self::render).
    display_power: Option<bool>,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let gestures = GesturePipeline::new(&config, 0);
        let feedback = Feedback::new(&config);
        let ctx = FsmContext::new(config, seed);
        let fsm = Fsm::new(build_state_table(), StateId::Menu);

        Self {
            fsm,
            ctx,
            gestures,
            feedback,
            power: PowerSwitchMonitor::new(false),
            faults: FaultCounters::default(),
            tick_count: 0,
            display_power: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Take input baselines and enter the menu.
    pub fn start(&mut self, hw: &mut impl InputPort, sink: &mut impl EventSink, now: f64) {
        let switch_off = self.absorb(hw.power_switch_off(), false, sink);
        self.power = PowerSwitchMonitor::new(switch_off);

        let origin = self.absorb(hw.encoder_position(), 0, sink);
        self.gestures = GesturePipeline::new(&self.ctx.config, origin);

        self.ctx.input = InputSnapshot {
            now,
            select_pressed: self.absorb(hw.select_pressed(), false, sink),
            encoder_delta: None,
        };
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("AppService started in {:?}", self.fsm.current_state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full cycle at raw monotonic time `now` (seconds).
    ///
    /// The `hw` parameter satisfies **both** [`InputPort`] and
    /// [`OutputPort`], which avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        now: f64,
        hw: &mut (impl InputPort + OutputPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        // 1. Power switch
        let switch_off = self.absorb(hw.power_switch_off(), !self.power.is_on(), sink);
        if let Some(edge) = self.power.observe(switch_off) {
            let on = edge == PowerEdge::SwitchedOn;
            info!("power switch {}", if on { "ON" } else { "OFF" });
            self.display_power = Some(on);
            sink.emit(&AppEvent::PowerChanged { on });
        }

        // 2. Session
        let prev_state = self.fsm.current_state();
        self.ctx.input = self.snapshot(now, hw, sink);
        self.fsm.tick(&mut self.ctx);
        let state = self.fsm.current_state();
        if state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: state,
            });
        }
        self.drain_outbox(now, sink);
        if prev_state == StateId::Playing && state != StateId::Playing {
            self.gestures.clear_pending();
        }

        // 3. Feedback
        self.apply_feedback(now, hw);

        // 4. Gestures.  Suspended while the switch is off; pending
        //    actions wait for power to return.
        if !self.power.is_on() {
            return;
        }
        if let Some(delta) = self.ctx.input.encoder_delta
            && prev_state == StateId::Playing
            && state == StateId::Playing
        {
            let action = self.gestures.arm_rotation(delta, now);
            debug!("rotation {delta:+} -> {action:?} pending");
        }
        if self.gestures.tilt_sample_due(now) {
            let y = hw.acceleration().y;
            if let Some(action) = self.gestures.observe_tilt(y, now) {
                debug!("tilt y={y:.2} -> {action:?} pending");
            }
        }
        for (source, action) in self.gestures.take_due(now) {
            if self.fsm.current_state() == StateId::Playing {
                self.resolve(source, action, now, sink);
            } else {
                debug!("{source:?} {action:?} dropped outside Playing");
            }
        }
    }

    /// Apply any pending display power change, then draw the current
    /// screen.  Returns `false` when the display is off and nothing was
    /// drawn.
    pub fn render(&mut self, fb: &mut impl FramebufferPort) -> bool {
        if let Some(on) = self.display_power.take()
            && let Err(e) = fb.set_power(on)
        {
            warn!("display power {}: {e}", if on { "on" } else { "off" });
        }
        if !self.power.is_on() {
            return false;
        }

        let ctx = &self.ctx;
        let screen = match (self.fsm.current_state(), ctx.active_level) {
            (StateId::Playing | StateId::Paused, Some(level)) => Screen::Playing {
                level,
                sliced: ctx.sliced_count,
                remaining: ctx.remaining(),
                apples: &ctx.apples,
                apple_size: u32::from(ctx.config.apple_size),
                max_apples: usize::from(ctx.config.max_apples_drawn),
                paused: self.fsm.current_state() == StateId::Paused,
            },
            (StateId::GameOver, level) => Screen::GameOver {
                level,
                sliced: ctx.sliced_count,
            },
            _ => Screen::Menu {
                difficulty: ctx.difficulty,
                level: &LEVELS[ctx.level_index],
            },
        };
        if let Err(e) = render::draw_frame(fb, &screen) {
            warn!("frame dropped: {e}");
        }
        true
    }

    // ── Command handling ──────────────────────────────────────

    /// Process a programmatic command.  Commands that do not apply to the
    /// current state are ignored.
    pub fn handle_command(&mut self, cmd: AppCommand, now: f64, sink: &mut impl EventSink) {
        let prev = self.fsm.current_state();
        let target = match (cmd, prev) {
            (AppCommand::Pause, StateId::Playing) => {
                self.ctx.begin_pause(now);
                self.gestures.clear_pending();
                StateId::Paused
            }
            (AppCommand::Resume, StateId::Paused) => {
                self.ctx.end_pause(now);
                StateId::Playing
            }
            _ => {
                debug!("{cmd:?} ignored in {prev:?}");
                return;
            }
        };
        self.ctx.input.now = now;
        self.fsm.force_transition(target, &mut self.ctx);
        info!("{cmd:?}: paused total {:.2}s", self.ctx.paused_total);
        sink.emit(&AppEvent::StateChanged {
            from: prev,
            to: target,
        });
    }

    /// Drive the indicator, buzzer and display inert.  Best effort.
    pub fn shutdown(&mut self, hw: &mut impl OutputPort, fb: &mut impl FramebufferPort) {
        hw.all_off();
        let _ = fb.clear(BinaryColor::Off);
        if let Err(e) = fb.present() {
            warn!("shutdown: display clear failed: {e}");
        }
        if let Err(e) = fb.set_power(false) {
            warn!("shutdown: display off failed: {e}");
        }
        info!("AppService shut down after {} ticks", self.tick_count);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            state: self.fsm.current_state(),
            difficulty: self.ctx.difficulty,
            level: self.ctx.active_level.map(|l| l.name),
            sliced: self.ctx.sliced_count,
            target: self.ctx.target(),
            remaining_secs: self.ctx.remaining(),
            live_apples: self.ctx.apples.iter().filter(|a| a.is_alive()).count(),
            power_on: self.power.is_on(),
            faults: self.faults,
        }
    }

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Total ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn context(&self) -> &FsmContext {
        &self.ctx
    }

    pub fn feedback_state(&self) -> FeedbackState {
        self.feedback.state()
    }

    pub fn pending(&self, source: GestureSource) -> Option<PendingAction> {
        self.gestures.pending(source)
    }

    pub fn faults(&self) -> FaultCounters {
        self.faults
    }

    pub fn power_on(&self) -> bool {
        self.power.is_on()
    }

    // ── Internal ──────────────────────────────────────────────

    fn snapshot(
        &mut self,
        now: f64,
        hw: &mut impl InputPort,
        sink: &mut impl EventSink,
    ) -> InputSnapshot {
        let select_pressed = self.absorb(hw.select_pressed(), false, sink);
        let encoder_delta = match hw.encoder_position() {
            Ok(position) => match self.gestures.observe_encoder(position) {
                Ok(delta) => delta,
                Err(fault) => {
                    self.record(fault, sink);
                    None
                }
            },
            Err(e) => {
                debug!("encoder read failed: {e}");
                self.record(e.into(), sink);
                None
            }
        };
        InputSnapshot {
            now,
            select_pressed,
            encoder_delta,
        }
    }

    /// Unwrap a collaborator read, substituting `default` on failure.
    fn absorb<T, E: core::fmt::Display>(
        &mut self,
        read: Result<T, E>,
        default: T,
        sink: &mut impl EventSink,
    ) -> T {
        match read {
            Ok(v) => v,
            Err(e) => {
                debug!("read failed: {e}");
                self.record(Fault::SensorUnavailable, sink);
                default
            }
        }
    }

    fn record(&mut self, fault: Fault, sink: &mut impl EventSink) {
        self.faults.record(fault);
        match fault.recovery() {
            Recovery::SubstituteDefault | Recovery::Discard | Recovery::Stop => {
                sink.emit(&AppEvent::FaultAbsorbed(fault));
            }
            Recovery::Surface => {}
        }
    }

    /// Turn FSM notices into events and cues.
    fn drain_outbox(&mut self, now: f64, sink: &mut impl EventSink) {
        for notice in self.ctx.take_outbox() {
            match notice {
                Notice::DifficultyChanged(d) => sink.emit(&AppEvent::DifficultyChanged(d)),
                Notice::LevelStarted { level_index } => {
                    let level = &LEVELS[level_index];
                    self.feedback.play(ToneKind::Start, now);
                    sink.emit(&AppEvent::LevelStarted {
                        name: level.name,
                        apples: level.apples,
                        duration_secs: level.duration_secs,
                    });
                }
                Notice::LevelFinished { sliced, target } => {
                    self.feedback.play(ToneKind::GameOver, now);
                    sink.emit(&AppEvent::LevelFinished { sliced, target });
                }
                Notice::SpawningStopped => self.record(Fault::LevelExhausted, sink),
                Notice::ReturnedToMenu => self.feedback.play(ToneKind::MenuSelect, now),
            }
        }
    }

    fn apply_feedback(&mut self, now: f64, hw: &mut impl OutputPort) {
        let view = SessionView {
            state: self.fsm.current_state(),
            remaining: self.ctx.remaining(),
        };
        let frame = self.feedback.update(view, now);
        if let Err(e) = hw.set_indicator(frame.indicator) {
            debug!("indicator: {e}");
        }
        let result = match frame.tone {
            Some(ToneEdge::Start(kind)) => hw.start_tone(kind),
            Some(ToneEdge::Stop) => hw.stop_tone(),
            None => Ok(()),
        };
        if let Err(e) = result {
            debug!("buzzer: {e}");
        }
    }

    fn resolve(
        &mut self,
        source: GestureSource,
        action: SliceAction,
        now: f64,
        sink: &mut impl EventSink,
    ) {
        let ctx = &mut self.ctx;
        let adjusted = ctx.adjusted_now();
        let limit = ctx.config.cut_time_limit_secs;
        match matcher::resolve(&mut ctx.apples, action, adjusted, &ctx.arena, limit) {
            MatchOutcome::Sliced { edge, .. } => {
                ctx.sliced_count = ctx.sliced_count.saturating_add(1);
                let (sliced, target) = (ctx.sliced_count, ctx.target());
                self.feedback.flash(Flash::Success, now);
                sink.emit(&AppEvent::Slice {
                    source,
                    action,
                    edge,
                    sliced,
                    target,
                });
            }
            MatchOutcome::Miss => {
                self.faults.record(Fault::NoMatchFound);
                self.feedback.flash(Flash::Error, now);
                sink.emit(&AppEvent::Miss { source, action });
            }
        }
    }
}
