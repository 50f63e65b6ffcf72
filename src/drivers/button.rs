//! Select-button hold detection.
//!
//! The debounced select input is sampled once per tick.  `HoldDetector`
//! measures how long it has been continuously pressed since its rising
//! edge and fires once per press when the hold satisfies its [`HoldRule`].
//!
//! ```text
//!  Released ──[press]──▶ Armed{since} ──[rule met]──▶ Fired
//!     ▲                      │                          │
//!     └─────[release]────────┴──────────[release]───────┘
//!
//!  Blocked ──[release]──▶ Released      (pressed when the screen opened)
//! ```

/// When a hold counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoldRule {
    /// Held for at least this many seconds.
    AtLeast(f64),
    /// Held for strictly longer than this many seconds.
    Exceeds(f64),
}

impl HoldRule {
    fn satisfied(self, held: f64) -> bool {
        match self {
            Self::AtLeast(t) => held >= t,
            Self::Exceeds(t) => held > t,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum HoldState {
    Released,
    Armed { since: f64 },
    Fired,
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldDetector {
    rule: HoldRule,
    state: HoldState,
}

impl HoldDetector {
    pub fn new(rule: HoldRule) -> Self {
        Self {
            rule,
            state: HoldState::Released,
        }
    }

    /// Start over with `rule`.  If the button is already down it must be
    /// released before it can count as a new press.
    pub fn rearm(&mut self, rule: HoldRule, pressed: bool) {
        self.rule = rule;
        self.state = if pressed {
            HoldState::Blocked
        } else {
            HoldState::Released
        };
    }

    /// Feed one debounced sample.  Returns `true` on the tick the hold
    /// first satisfies the rule.
    pub fn tick(&mut self, pressed: bool, now: f64) -> bool {
        if !pressed {
            self.state = HoldState::Released;
            return false;
        }

        if self.state == HoldState::Released {
            self.state = HoldState::Armed { since: now };
        }

        match self.state {
            HoldState::Armed { since } if self.rule.satisfied(now - since) => {
                self.state = HoldState::Fired;
                true
            }
            _ => false,
        }
    }
}
