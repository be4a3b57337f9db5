//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | alarm system running");
            }
            AppEvent::AlarmRaised { gas, over_temp } => {
                warn!("ALARM | raised | gas={} over_temp={}", gas, over_temp);
            }
            AppEvent::AlarmCleared(source) => {
                info!("ALARM | cleared via {:?}", source);
            }
            AppEvent::IncorrectCode { source, attempts } => {
                warn!("CODE  | incorrect via {:?} | attempts={}", source, attempts);
            }
            AppEvent::LockedOut { attempts } => {
                warn!("CODE  | keypad locked after {} attempts", attempts);
            }
            AppEvent::Logged(record) => {
                info!("EVENT | {} @ {}", record.label, record.timestamp);
            }
            AppEvent::ClockSet(epoch) => {
                info!("CLOCK | set to {}", epoch);
            }
            AppEvent::CodeChangeDiscarded => {
                info!("CODE  | new code entered, not stored");
            }
            AppEvent::ClockEntryRejected => {
                warn!("CLOCK | invalid date entry rejected");
            }
        }
    }
}
