//! Edge-triggered event log.
//!
//! Five boolean signals are watched once per tick. Each change produces a
//! [`EventRecord`] labelled `<SIGNAL>_ON` / `<SIGNAL>_OFF`, stamped with the
//! wall clock and appended to a fixed ring of [`EVENT_LOG_CAPACITY`] slots.
//! When the ring is full the oldest record is overwritten silently.
//!
//! Stack-allocated; no heap.

use core::fmt::Write;

use heapless::{String, Vec};
use serde::Serialize;

pub const EVENT_LOG_CAPACITY: usize = 100;
/// Longest label, `OVER_TEMP_OFF`, plus headroom.
pub const EVENT_NAME_MAX_LEN: usize = 14;
pub const SIGNAL_COUNT: usize = 5;

/// Signals whose edges are recorded, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Alarm,
    GasDetector,
    OverTemp,
    IncorrectCodeLed,
    SystemBlockedLed,
}

impl Signal {
    pub const ALL: [Signal; SIGNAL_COUNT] = [
        Signal::Alarm,
        Signal::GasDetector,
        Signal::OverTemp,
        Signal::IncorrectCodeLed,
        Signal::SystemBlockedLed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Alarm => "ALARM",
            Self::GasDetector => "GAS_DET",
            Self::OverTemp => "OVER_TEMP",
            Self::IncorrectCodeLed => "LED_IC",
            Self::SystemBlockedLed => "LED_SB",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Current value of every watched signal.
///
/// Gas and over-temperature are the raw per-tick detector values, not the
/// alarm's latched sub-flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitoredSignals {
    pub alarm: bool,
    pub gas_detected: bool,
    pub over_temp: bool,
    pub incorrect_code_led: bool,
    pub system_blocked_led: bool,
}

impl MonitoredSignals {
    pub fn get(&self, signal: Signal) -> bool {
        match signal {
            Signal::Alarm => self.alarm,
            Signal::GasDetector => self.gas_detected,
            Signal::OverTemp => self.over_temp,
            Signal::IncorrectCodeLed => self.incorrect_code_led,
            Signal::SystemBlockedLed => self.system_blocked_led,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    pub label: String<EVENT_NAME_MAX_LEN>,
}

impl EventRecord {
    pub fn new(signal: Signal, on: bool, timestamp: i64) -> Self {
        let mut label = String::new();
        // Every signal name fits with either suffix.
        let _ = write!(label, "{}_{}", signal.name(), if on { "ON" } else { "OFF" });
        Self { timestamp, label }
    }
}

pub struct EventLog {
    records: Vec<EventRecord, EVENT_LOG_CAPACITY>,
    /// Slot the next record goes to.
    cursor: usize,
    last: [bool; SIGNAL_COUNT],
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            cursor: 0,
            last: [false; SIGNAL_COUNT],
        }
    }

    /// Append a record if `current` differs from the value seen last time,
    /// then remember `current` either way.
    pub fn record_if_changed(
        &mut self,
        signal: Signal,
        current: bool,
        now: i64,
    ) -> Option<EventRecord> {
        let last = core::mem::replace(&mut self.last[signal.index()], current);
        if last == current {
            return None;
        }
        let record = EventRecord::new(signal, current, now);
        self.push(record.clone());
        Some(record)
    }

    /// Check all five signals in order. Returns the records added this call.
    pub fn update(
        &mut self,
        signals: &MonitoredSignals,
        now: i64,
    ) -> Vec<EventRecord, SIGNAL_COUNT> {
        let mut added = Vec::new();
        for signal in Signal::ALL {
            if let Some(record) = self.record_if_changed(signal, signals.get(signal), now) {
                // At most one record per signal.
                let _ = added.push(record);
            }
        }
        added
    }

    fn push(&mut self, record: EventRecord) {
        if self.records.is_full() {
            self.records[self.cursor] = record;
        } else {
            let _ = self.records.push(record);
        }
        self.cursor = (self.cursor + 1) % EVENT_LOG_CAPACITY;
    }

    /// Stored records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &EventRecord> {
        let split = if self.records.is_full() { self.cursor } else { 0 };
        let (newer, older) = self.records.split_at(split);
        older.iter().chain(newer.iter())
    }

    /// Raw slot access, in storage order.
    pub fn slot(&self, index: usize) -> Option<&EventRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(log: &EventLog) -> std::vec::Vec<&str> {
        log.iter().map(|r| r.label.as_str()).collect()
    }

    #[test]
    fn labels_fit() {
        for signal in Signal::ALL {
            for on in [true, false] {
                let r = EventRecord::new(signal, on, 0);
                assert!(r.label.starts_with(signal.name()));
                assert!(r.label.ends_with(if on { "_ON" } else { "_OFF" }));
            }
        }
        assert_eq!(EventRecord::new(Signal::OverTemp, false, 0).label, "OVER_TEMP_OFF");
    }

    #[test]
    fn steady_signals_record_nothing() {
        let mut log = EventLog::new();
        for t in 0..10 {
            assert!(log.update(&MonitoredSignals::default(), t).is_empty());
        }
        assert!(log.is_empty());
    }

    #[test]
    fn records_follow_signal_order() {
        let mut log = EventLog::new();
        let all_on = MonitoredSignals {
            alarm: true,
            gas_detected: true,
            over_temp: true,
            incorrect_code_led: true,
            system_blocked_led: true,
        };
        let added = log.update(&all_on, 42);
        let got: std::vec::Vec<&str> = added.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            got,
            ["ALARM_ON", "GAS_DET_ON", "OVER_TEMP_ON", "LED_IC_ON", "LED_SB_ON"]
        );
        assert!(added.iter().all(|r| r.timestamp == 42));
    }

    #[test]
    fn on_then_off_gives_two_ordered_records() {
        let mut log = EventLog::new();
        log.record_if_changed(Signal::GasDetector, true, 100);
        log.record_if_changed(Signal::GasDetector, false, 100);
        assert_eq!(labels(&log), ["GAS_DET_ON", "GAS_DET_OFF"]);
        let stamps: std::vec::Vec<i64> = log.iter().map(|r| r.timestamp).collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn hundred_and_first_record_overwrites_slot_zero() {
        let mut log = EventLog::new();
        for i in 0..=EVENT_LOG_CAPACITY as i64 {
            log.record_if_changed(Signal::Alarm, i % 2 == 0, i);
        }
        assert_eq!(log.len(), EVENT_LOG_CAPACITY);
        assert_eq!(log.cursor(), 1);
        assert_eq!(log.slot(0).map(|r| r.timestamp), Some(100));
        assert_eq!(log.iter().next().map(|r| r.timestamp), Some(1));
        assert_eq!(log.iter().last().map(|r| r.timestamp), Some(100));
    }
}
