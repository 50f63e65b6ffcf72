//! Apple Slice game firmware library.
//!
//! Exposes the game core, drivers and adapters for integration testing
//! and the binary.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module; host builds run on
//! simulation stubs.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod fsm;
pub mod game;
pub mod power;
pub mod render;
pub mod scheduler;

pub mod error;
pub mod pins;

pub mod adapters;
pub mod drivers;
pub mod sensors;
