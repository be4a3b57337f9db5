//! Unified error types for the alarm firmware.
//!
//! A single `Error` enum that every subsystem converts into. Wrong disarm
//! codes and lockout are *not* errors: they are alarm state, reported through
//! indicator LEDs and the event log.

use core::fmt;

use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration failed validation.
    Config(&'static str),
    /// Console input could not be interpreted.
    Console(ConsoleError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Console(e) => write!(f, "console: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Console errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// A digit group contained something other than ASCII digits.
    NotADigit,
    /// The digits parsed but do not form a calendar date/time.
    InvalidDateTime,
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotADigit => write!(f, "expected ASCII digits"),
            Self::InvalidDateTime => write!(f, "not a valid date and time"),
        }
    }
}

impl From<ConsoleError> for Error {
    fn from(e: ConsoleError) -> Self {
        Self::Console(e)
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(match e {
            HwInitError::AdcInitFailed(_) => "ADC1",
            HwInitError::GpioConfigFailed(_) => "GPIO",
            HwInitError::UartInitFailed(_) => "UART",
        })
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
