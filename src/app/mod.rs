//! Application core — pure game logic, zero I/O.
//!
//! This module contains the rules that sit above the session FSM:
//! tick orchestration, gesture resolution, feedback signaling and
//! commands.  All interaction with hardware happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod commands;
pub mod events;
pub mod feedback;
pub mod guard;
pub mod ports;
pub mod service;
