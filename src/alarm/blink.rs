//! Alarm LED blink cadence.
//!
//! The blink period depends on which sub-alarms are latched:
//!
//! | Pattern          | Default period |
//! |------------------|----------------|
//! | GasAndOverTemp   | 100 ms         |
//! | Gas              | 1000 ms        |
//! | OverTemp         | 500 ms         |
//!
//! Over-temperature alone blinks faster than gas alone. The accumulator is
//! shared by all patterns and is never cleared when the alarm goes off, so
//! the first toggle after re-arming may come early.

use crate::config::SystemConfig;

/// Pattern identifier, derived from the latched sub-alarm flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkPattern {
    GasAndOverTemp,
    Gas,
    OverTemp,
    /// No sub-alarm latched: the LED holds its level.
    Steady,
}

impl BlinkPattern {
    pub fn select(gas: bool, over_temp: bool) -> Self {
        match (gas, over_temp) {
            (true, true) => Self::GasAndOverTemp,
            (true, false) => Self::Gas,
            (false, true) => Self::OverTemp,
            (false, false) => Self::Steady,
        }
    }
}

/// Accumulates alarm-on time and reports when the LED must toggle.
#[derive(Debug, Clone)]
pub struct BlinkTimer {
    accumulated_ms: u32,
    gas_ms: u32,
    over_temp_ms: u32,
    gas_and_over_temp_ms: u32,
}

impl BlinkTimer {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            accumulated_ms: 0,
            gas_ms: config.blink_gas_ms,
            over_temp_ms: config.blink_over_temp_ms,
            gas_and_over_temp_ms: config.blink_gas_and_over_temp_ms,
        }
    }

    pub fn period_ms(&self, pattern: BlinkPattern) -> Option<u32> {
        match pattern {
            BlinkPattern::GasAndOverTemp => Some(self.gas_and_over_temp_ms),
            BlinkPattern::Gas => Some(self.gas_ms),
            BlinkPattern::OverTemp => Some(self.over_temp_ms),
            BlinkPattern::Steady => None,
        }
    }

    /// Add `delta_ms` of alarm time. Returns `true` when the period has been
    /// reached, in which case the accumulator restarts from zero.
    pub fn advance(&mut self, delta_ms: u32, pattern: BlinkPattern) -> bool {
        self.accumulated_ms = self.accumulated_ms.saturating_add(delta_ms);
        match self.period_ms(pattern) {
            Some(period) if self.accumulated_ms >= period => {
                self.accumulated_ms = 0;
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
    }

    pub fn accumulated_ms(&self) -> u32 {
        self.accumulated_ms
    }
}
