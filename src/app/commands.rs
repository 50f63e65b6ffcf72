//! Inbound commands to the application service.
//!
//! These represent actions requested programmatically (a host harness, a
//! future remote control) that the
//! [`AppService`](super::service::AppService) interprets and acts upon.
//! No physical input maps to them.

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Freeze the level clock.  Only honoured while Playing.
    Pause,

    /// Resume a paused level.  Only honoured while Paused.
    Resume,
}
