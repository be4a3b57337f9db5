//! Application core: pure domain logic, zero I/O.
//!
//! Business rules for the alarm controller: activation, keypad and console
//! disarm, the event log and console command execution. All interaction
//! with hardware happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
