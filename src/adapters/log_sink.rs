//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC on the board, stderr on the host).

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] as a single line.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={}", state.name());
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {} -> {}", from.name(), to.name());
            }
            AppEvent::DifficultyChanged(d) => {
                info!("MENU  | difficulty={}", d.name());
            }
            AppEvent::LevelStarted {
                name,
                apples,
                duration_secs,
            } => {
                info!("LEVEL | {} | apples={} time={:.0}s", name, apples, duration_secs);
            }
            AppEvent::Slice {
                source,
                action,
                edge,
                sliced,
                target,
            } => {
                info!(
                    "SLICE | {:?} {:?} from {:?} | {}/{}",
                    source, action, edge, sliced, target
                );
            }
            AppEvent::Miss { source, action } => {
                info!("MISS  | {:?} {:?}", source, action);
            }
            AppEvent::LevelFinished { sliced, target } => {
                info!("FINAL | {}/{} sliced", sliced, target);
            }
            AppEvent::PowerChanged { on } => {
                info!("POWER | {}", if *on { "ON" } else { "OFF" });
            }
            AppEvent::FaultAbsorbed(fault) => {
                debug!("FAULT | {} ({:?})", fault, fault.recovery());
            }
            AppEvent::Status(s) => {
                info!(
                    "STATUS | state={} | difficulty={} | level={} | {}/{} | \
                     remaining={:.1}s | apples={} | power={} | \
                     faults sensor={} range={} miss={} exhausted={}",
                    s.state.name(),
                    s.difficulty.name(),
                    s.level.unwrap_or("-"),
                    s.sliced,
                    s.target,
                    s.remaining_secs,
                    s.live_apples,
                    if s.power_on { "ON" } else { "OFF" },
                    s.faults.sensor_unavailable,
                    s.faults.input_out_of_range,
                    s.faults.no_match,
                    s.faults.level_exhausted,
                );
            }
        }
    }
}
