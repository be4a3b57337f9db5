//! Single-byte serial command console.
//!
//! Each byte read from the console selects a [`ConsoleCommand`]; unknown
//! bytes print the help menu. This module holds the command decoding and
//! the fixed reply texts. Execution lives in
//! [`AlarmSystem`](crate::app::service::AlarmSystem), which owns the state
//! the commands read and modify.

pub mod datetime;

use core::fmt::Write;

use heapless::String;

use crate::sensors::temperature::TemperatureUnit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    AlarmState,
    GasState,
    OverTempState,
    EnterCode,
    NewCode,
    Temperature(TemperatureUnit),
    SetDateTime,
    ShowDateTime,
    DumpEvents,
    KeypadDiagnostics,
    Help,
}

impl ConsoleCommand {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            b'1' => Self::AlarmState,
            b'2' => Self::GasState,
            b'3' => Self::OverTempState,
            b'4' => Self::EnterCode,
            b'5' => Self::NewCode,
            b'c' | b'C' => Self::Temperature(TemperatureUnit::Celsius),
            b'f' | b'F' => Self::Temperature(TemperatureUnit::Fahrenheit),
            b's' | b'S' => Self::SetDateTime,
            b't' | b'T' => Self::ShowDateTime,
            b'e' | b'E' => Self::DumpEvents,
            b'q' | b'Q' => Self::KeypadDiagnostics,
            _ => Self::Help,
        }
    }

    /// Commands that block the tick while reading further input.
    pub fn is_interactive(self) -> bool {
        matches!(self, Self::EnterCode | Self::NewCode | Self::SetDateTime)
    }
}

pub const HELP_MENU: &str = "Available commands:\r\n\
    Press '1' to get the alarm state\r\n\
    Press '2' to get the gas detector state\r\n\
    Press '3' to get the over temperature detector state\r\n\
    Press '4' to enter the code sequence\r\n\
    Press '5' to enter a new code\r\n\
    Press 'f' or 'F' to get lm35 reading in Fahrenheit\r\n\
    Press 'c' or 'C' to get lm35 reading in Celsius\r\n\
    Press 's' or 'S' to set the date and time\r\n\
    Press 't' or 'T' to get the date and time\r\n\
    Press 'e' or 'E' to get the stored events\r\n\r\n\
    Press 'q' or 'Q' to get the FSM state\r\n\r\n";

pub const ENTER_CODE_PROMPT: &str =
    "Please enter the four digits numeric code to deactivate the alarm: ";
pub const NEW_CODE_PROMPT: &str =
    "Please enter the new four digits numeric code to deactivate the alarm: ";
pub const CODE_CORRECT: &str = "\r\nThe code is correct\r\n\r\n";
pub const CODE_INCORRECT: &str = "\r\nThe code is incorrect\r\n\r\n";
pub const NEW_CODE_GENERATED: &str = "\r\nNew code generated\r\n\r\n";
pub const DATE_TIME_SET: &str = "Date and time has been set\r\n";
pub const DATE_TIME_INVALID: &str = "Invalid date and time\r\n";
/// Echoed for each hidden code character.
pub const MASK: &str = "*";

pub fn alarm_state_reply(active: bool) -> &'static str {
    if active {
        "The alarm is activated\r\n"
    } else {
        "The alarm is not activated\r\n"
    }
}

pub fn gas_state_reply(gas_present: bool) -> &'static str {
    if gas_present {
        "Gas is being detected\r\n"
    } else {
        "Gas is not being detected\r\n"
    }
}

pub fn over_temp_reply(over_temp: bool) -> &'static str {
    if over_temp {
        "Temperature is above the maximum level\r\n"
    } else {
        "Temperature is below the maximum level\r\n"
    }
}

pub fn temperature_reply(value: f32, unit: TemperatureUnit) -> String<48> {
    let mut out = String::new();
    let _ = write!(out, "Temperature: {:.2} \u{00b0} {}\r\n", value, unit.symbol());
    out
}

pub fn date_time_reply(ctime: &str) -> String<64> {
    let mut out = String::new();
    let _ = write!(out, "Date and Time = {}\r\n", ctime);
    out
}

/// One record of the `e` dump: label line, timestamp line, blank line.
pub fn event_reply(label: &str, ctime: &str) -> String<80> {
    let mut out = String::new();
    let _ = write!(out, "Event = {}\r\nDate and Time = {}\r\n\r\n", label, ctime);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_every_command() {
        assert_eq!(ConsoleCommand::from_byte(b'1'), ConsoleCommand::AlarmState);
        assert_eq!(ConsoleCommand::from_byte(b'2'), ConsoleCommand::GasState);
        assert_eq!(ConsoleCommand::from_byte(b'3'), ConsoleCommand::OverTempState);
        assert_eq!(ConsoleCommand::from_byte(b'4'), ConsoleCommand::EnterCode);
        assert_eq!(ConsoleCommand::from_byte(b'5'), ConsoleCommand::NewCode);
        for (lower, upper) in [(b'c', b'C'), (b'f', b'F'), (b's', b'S'), (b't', b'T'), (b'e', b'E'), (b'q', b'Q')] {
            assert_eq!(
                ConsoleCommand::from_byte(lower),
                ConsoleCommand::from_byte(upper)
            );
            assert_ne!(ConsoleCommand::from_byte(lower), ConsoleCommand::Help);
        }
        assert_eq!(
            ConsoleCommand::from_byte(b'f'),
            ConsoleCommand::Temperature(TemperatureUnit::Fahrenheit)
        );
    }

    #[test]
    fn anything_else_is_help() {
        for b in [b'0', b'6', b'x', b'\r', b'\n', 0xFF] {
            assert_eq!(ConsoleCommand::from_byte(b), ConsoleCommand::Help);
        }
    }

    #[test]
    fn only_code_and_clock_commands_block() {
        assert!(ConsoleCommand::EnterCode.is_interactive());
        assert!(ConsoleCommand::NewCode.is_interactive());
        assert!(ConsoleCommand::SetDateTime.is_interactive());
        assert!(!ConsoleCommand::DumpEvents.is_interactive());
    }

    #[test]
    fn temperature_has_two_decimals() {
        assert_eq!(
            temperature_reply(21.456, TemperatureUnit::Celsius).as_str(),
            "Temperature: 21.46 \u{00b0} C\r\n"
        );
        assert_eq!(
            temperature_reply(-3.0, TemperatureUnit::Fahrenheit).as_str(),
            "Temperature: -3.00 \u{00b0} F\r\n"
        );
    }

    #[test]
    fn help_lists_every_command() {
        for key in ["'1'", "'2'", "'3'", "'4'", "'5'", "'c'", "'f'", "'s'", "'t'", "'e'", "'q'"] {
            assert!(HELP_MENU.contains(key), "{key} missing");
        }
    }
}
