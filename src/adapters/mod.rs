//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements        | Connects to                  |
//! |------------|-------------------|------------------------------|
//! | `hardware` | SensorPort        | LM35 (ADC1), MQ-2, test key  |
//! |            | AlarmOutputPort   | LEDs, open-drain siren       |
//! |            | KeyMatrix         | 4×4 keypad GPIO matrix       |
//! | `log_sink` | EventSink         | Serial log output            |
//! | `time`     | ClockPort         | libc wall clock              |
//! | `uart`     | ConsolePort       | UART0 console                |

pub mod hardware;
pub mod log_sink;
pub mod time;
pub mod uart;
