//! Gesture input pipeline.
//!
//! ```text
//!  encoder position ──▶ EncoderTracker ──▶ ┐
//!                                          ├─▶ PendingSlot ──[fire_at]──▶ matcher::resolve
//!  filtered Y accel ──▶ TiltDetector ────▶ ┘
//! ```

pub mod gesture;
pub mod matcher;
