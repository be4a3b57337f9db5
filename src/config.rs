//! System configuration parameters
//!
//! All tunable parameters for the alarm controller. Values are compiled in;
//! the controller keeps no configuration across power loss.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::keypad::{CODE_LEN, KEYMAP};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Timing ---
    /// Scheduler tick period (milliseconds). Every accumulator advances by
    /// exactly this amount per executed tick.
    pub tick_interval_ms: u32,
    /// Time a key must stay detected before the keypad confirms it (ms)
    pub debounce_key_ms: u32,

    // --- Temperature ---
    /// Rolling-average temperature (Celsius) above which over-temperature is flagged
    pub over_temp_level_c: f32,
    /// ADC full-scale voltage for the LM35 input
    pub lm35_full_scale_v: f32,
    /// LM35 output slope (volts per degree Celsius)
    pub lm35_volts_per_degree: f32,

    // --- Alarm LED blink periods ---
    /// Blink half-period with only gas detected (ms)
    pub blink_gas_ms: u32,
    /// Blink half-period with only over-temperature detected (ms)
    pub blink_over_temp_ms: u32,
    /// Blink half-period with gas and over-temperature detected (ms)
    pub blink_gas_and_over_temp_ms: u32,

    // --- Disarm ---
    /// Consecutive incorrect codes before the keypad is locked out
    pub max_incorrect_codes: u8,
    /// Code that disarms the alarm, from keypad or console
    pub secret_code: [char; CODE_LEN],

    // --- Console ---
    /// UART baud rate for the serial console
    pub console_baud: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Timing
            tick_interval_ms: 10, // 100 Hz
            debounce_key_ms: 40,

            // Temperature
            over_temp_level_c: 50.0,
            lm35_full_scale_v: 3.3,
            lm35_volts_per_degree: 0.01,

            // Blink periods. Over-temperature alone blinks faster than gas
            // alone; the panel has always shipped this way.
            blink_gas_ms: 1000,
            blink_over_temp_ms: 500,
            blink_gas_and_over_temp_ms: 100,

            // Disarm
            max_incorrect_codes: 5,
            secret_code: ['1', '8', '0', '5'],

            // Console
            console_baud: 115_200,
        }
    }
}

impl SystemConfig {
    /// Range-check every field. Rejects, never clamps.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(Error::Config("tick_interval_ms must be non-zero"));
        }
        if self.debounce_key_ms < self.tick_interval_ms {
            return Err(Error::Config("debounce_key_ms shorter than one tick"));
        }
        if self.blink_gas_ms == 0
            || self.blink_over_temp_ms == 0
            || self.blink_gas_and_over_temp_ms == 0
        {
            return Err(Error::Config("blink periods must be non-zero"));
        }
        if self.max_incorrect_codes == 0 {
            return Err(Error::Config("max_incorrect_codes must be non-zero"));
        }
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.lm35_volts_per_degree) || !positive(self.lm35_full_scale_v) {
            return Err(Error::Config("LM35 scale must be positive"));
        }
        // `#` submits the code on the keypad, so it can never be part of it.
        let typeable = |c: &char| *c != '#' && KEYMAP.iter().flatten().any(|k| k == c);
        if !self.secret_code.iter().all(typeable) {
            return Err(Error::Config("secret_code must use keypad characters other than '#'"));
        }
        if self.console_baud == 0 {
            return Err(Error::Config("console_baud must be non-zero"));
        }
        Ok(())
    }
}
