//! Gas and over-temperature alarm controller library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod alarm;
pub mod app;
pub mod config;
pub mod console;
pub mod diagnostics;
pub mod error;
pub mod event_log;
pub mod keypad;
pub mod scheduler;

// Hardware-facing modules; the real implementations are guarded by cfg
// attributes inside and fall back to simulation stubs on the host.
pub mod adapters;
pub mod drivers;
pub mod pins;
pub mod sensors;
