//! Power switch monitoring.
//!
//! The debounced switch is read first in every tick.  Only changes are
//! reported; the level seen at start-up is the baseline, not an edge.
//!
//! ```text
//!  On ──[switch OFF]──▶ Off      display off, render skipped, no tilt
//!  Off ──[switch ON]──▶ On       display on and cleared
//! ```

use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerEdge {
    SwitchedOff,
    SwitchedOn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerSwitchMonitor {
    on: bool,
}

impl PowerSwitchMonitor {
    /// Baseline from the first debounced reading.
    pub fn new(switch_off: bool) -> Self {
        info!("power switch initially {}", if switch_off { "OFF" } else { "ON" });
        Self { on: !switch_off }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Feed one debounced reading; returns the edge if the level changed.
    pub fn observe(&mut self, switch_off: bool) -> Option<PowerEdge> {
        let on = !switch_off;
        if on == self.on {
            return None;
        }
        self.on = on;
        Some(if on {
            PowerEdge::SwitchedOn
        } else {
            PowerEdge::SwitchedOff
        })
    }
}
