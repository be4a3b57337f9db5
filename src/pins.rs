//! GPIO / peripheral pin assignments for the alarm controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

use crate::keypad::{KEYPAD_COLS, KEYPAD_ROWS};

// ---------------------------------------------------------------------------
// 4×4 matrix keypad
// ---------------------------------------------------------------------------

/// Row lines, driven as outputs. The scanned row is pulled LOW.
pub const KEYPAD_ROW_GPIOS: [i32; KEYPAD_ROWS] = [10, 11, 12, 13];
/// Column lines, inputs with internal pull-up. LOW = key on the scanned row.
pub const KEYPAD_COL_GPIOS: [i32; KEYPAD_COLS] = [14, 15, 16, 17];

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// LM35 temperature sensor, 10 mV/°C.
/// ADC1 channel 3 (GPIO 4 on ESP32-S3).
pub const LM35_ADC_GPIO: i32 = 4;

/// MQ-2 gas module digital output. LOW = gas above the trimmer threshold.
pub const GAS_DETECTOR_GPIO: i32 = 5;

/// Alarm test push-button, active HIGH with internal pull-down.
pub const ALARM_TEST_BUTTON_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Indicators
// ---------------------------------------------------------------------------

pub const ALARM_LED_GPIO: i32 = 7;
pub const INCORRECT_CODE_LED_GPIO: i32 = 8;
pub const SYSTEM_BLOCKED_LED_GPIO: i32 = 9;

/// Open-drain siren driver. Driven LOW = sounding; released = silent.
pub const SIREN_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// UART console (UART0, USB bridge)
// ---------------------------------------------------------------------------

pub const UART_CONSOLE_PORT: i32 = 0;
pub const UART_TX_GPIO: i32 = 43;
pub const UART_RX_GPIO: i32 = 44;
/// Driver RX ring buffer (bytes).
pub const UART_RX_BUFFER_LEN: i32 = 256;
