//! Gesture detection with deferred firing.
//!
//! Each source (rotary encoder, accelerometer tilt) owns one
//! [`PendingSlot`].  A detection arms the slot with
//! `fire_at = now + response_delay`; a newer detection from the same source
//! overwrites it, so the latest gesture always wins and restarts the delay.
//! The slot is released to the matcher once `now >= fire_at`.

use crate::config::GameConfig;
use crate::error::Fault;
use crate::game::SliceAction;

/// Which input produced a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureSource {
    Encoder,
    Tilt,
}

/// A detected gesture waiting for its fire time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingAction {
    pub action: SliceAction,
    pub fire_at: f64,
}

/// Holds at most one pending gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PendingSlot(Option<PendingAction>);

impl PendingSlot {
    /// Arm (or re-arm) the slot.  Any earlier pending gesture is dropped.
    pub fn arm(&mut self, action: SliceAction, fire_at: f64) {
        self.0 = Some(PendingAction { action, fire_at });
    }

    /// Take the pending gesture if its fire time has come.
    pub fn take_due(&mut self, now: f64) -> Option<SliceAction> {
        match self.0 {
            Some(p) if now >= p.fire_at => {
                self.0 = None;
                Some(p.action)
            }
            _ => None,
        }
    }

    pub fn peek(&self) -> Option<PendingAction> {
        self.0
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

// ── Encoder ───────────────────────────────────────────────────

/// Turns a cumulative rotary position into bounded per-tick deltas.
#[derive(Debug, Clone, Copy)]
pub struct EncoderTracker {
    last: i32,
    bound: i32,
}

impl EncoderTracker {
    pub fn new(bound: i32, origin: i32) -> Self {
        Self {
            last: origin,
            bound,
        }
    }

    /// Compare `position` with the last observation.
    ///
    /// Returns `Ok(None)` for no movement and `Ok(Some(delta))` for a
    /// plausible rotation.  A jump beyond the sanity bound is reported as
    /// [`Fault::InputOutOfRange`].  Either way the tracker resyncs to
    /// `position`, so one glitch cannot poison later ticks.
    pub fn observe(&mut self, position: i32) -> Result<Option<i32>, Fault> {
        let delta = position.wrapping_sub(self.last);
        self.last = position;
        if delta == 0 {
            Ok(None)
        } else if delta.unsigned_abs() > self.bound.unsigned_abs() {
            Err(Fault::InputOutOfRange)
        } else {
            Ok(Some(delta))
        }
    }

    pub fn last(&self) -> i32 {
        self.last
    }
}

/// Rotation direction for a nonzero delta.
pub fn rotation_action(delta: i32) -> SliceAction {
    if delta > 0 {
        SliceAction::RotateRight
    } else {
        SliceAction::RotateLeft
    }
}

// ── Tilt ──────────────────────────────────────────────────────

/// Edge-triggered tilt detection on the filtered Y axis.
#[derive(Debug, Clone, Copy)]
pub struct TiltDetector {
    threshold: f32,
    interval: f64,
    last_y: f32,
    last_sample: Option<f64>,
}

impl TiltDetector {
    pub fn new(threshold: f32, interval: f64) -> Self {
        Self {
            threshold,
            interval,
            last_y: 0.0,
            last_sample: None,
        }
    }

    /// Whether enough time has passed to take another sample.
    pub fn sample_due(&self, now: f64) -> bool {
        self.last_sample.is_none_or(|t| now - t > self.interval)
    }

    /// Feed one Y sample.  Fires only on the crossing, never while held.
    pub fn observe(&mut self, y: f32, now: f64) -> Option<SliceAction> {
        let th = self.threshold;
        let action = if y > th && self.last_y <= th {
            Some(SliceAction::Forward)
        } else if y < -th && self.last_y >= -th {
            Some(SliceAction::Backward)
        } else {
            None
        };
        self.last_y = y;
        self.last_sample = Some(now);
        action
    }
}

// ── Pipeline ──────────────────────────────────────────────────

/// Both sources plus their pending slots.
pub struct GesturePipeline {
    encoder: EncoderTracker,
    tilt: TiltDetector,
    encoder_slot: PendingSlot,
    tilt_slot: PendingSlot,
    response_delay: f64,
}

impl GesturePipeline {
    pub fn new(config: &GameConfig, encoder_origin: i32) -> Self {
        Self {
            encoder: EncoderTracker::new(config.encoder_sanity_bound, encoder_origin),
            tilt: TiltDetector::new(config.tilt_threshold, config.tilt_sample_interval_secs),
            encoder_slot: PendingSlot::default(),
            tilt_slot: PendingSlot::default(),
            response_delay: config.response_delay_secs,
        }
    }

    /// Track the encoder position.  See [`EncoderTracker::observe`].
    pub fn observe_encoder(&mut self, position: i32) -> Result<Option<i32>, Fault> {
        self.encoder.observe(position)
    }

    /// Arm the encoder slot for a rotation seen at `now`.
    pub fn arm_rotation(&mut self, delta: i32, now: f64) -> SliceAction {
        let action = rotation_action(delta);
        self.encoder_slot.arm(action, now + self.response_delay);
        action
    }

    pub fn tilt_sample_due(&self, now: f64) -> bool {
        self.tilt.sample_due(now)
    }

    /// Feed a filtered Y sample and arm the tilt slot on a crossing.
    pub fn observe_tilt(&mut self, y: f32, now: f64) -> Option<SliceAction> {
        let action = self.tilt.observe(y, now)?;
        self.tilt_slot.arm(action, now + self.response_delay);
        Some(action)
    }

    /// Gestures whose fire time has come, encoder first.
    pub fn take_due(&mut self, now: f64) -> heapless::Vec<(GestureSource, SliceAction), 2> {
        let mut due = heapless::Vec::new();
        if let Some(a) = self.encoder_slot.take_due(now) {
            let _ = due.push((GestureSource::Encoder, a));
        }
        if let Some(a) = self.tilt_slot.take_due(now) {
            let _ = due.push((GestureSource::Tilt, a));
        }
        due
    }

    pub fn pending(&self, source: GestureSource) -> Option<PendingAction> {
        match source {
            GestureSource::Encoder => self.encoder_slot.peek(),
            GestureSource::Tilt => self.tilt_slot.peek(),
        }
    }

    /// Drop both pending gestures.
    pub fn clear_pending(&mut self) {
        self.encoder_slot.clear();
        self.tilt_slot.clear();
    }
}
