//! Mock adapters for integration tests.
//!
//! Records every output call so tests can assert on the full history
//! without touching real GPIO registers.

use std::collections::VecDeque;

use gasalarm::alarm::SirenMode;
use gasalarm::app::events::AppEvent;
use gasalarm::app::ports::{AlarmOutputPort, Board, ClockPort, ConsolePort, EventSink, SensorPort};
use gasalarm::app::service::AlarmSystem;
use gasalarm::config::SystemConfig;
use gasalarm::keypad::KeyMatrix;
use gasalarm::sensors::SensorSnapshot;

// ── MockHardware ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockHardware {
    /// Returned by every `read_all`.
    pub inputs: SensorSnapshot,
    /// Key the matrix reports as held.
    pub held_key: Option<char>,
    pub scans: u32,
    /// Alarm LED level, one entry per tick.
    pub alarm_led_history: Vec<bool>,
    pub incorrect_code_led: bool,
    pub system_blocked_led: bool,
    pub siren: Option<SirenMode>,
}

impl SensorPort for MockHardware {
    fn read_all(&mut self) -> SensorSnapshot {
        self.inputs
    }
}

impl AlarmOutputPort for MockHardware {
    fn set_alarm_led(&mut self, on: bool) {
        self.alarm_led_history.push(on);
    }

    fn set_incorrect_code_led(&mut self, on: bool) {
        self.incorrect_code_led = on;
    }

    fn set_system_blocked_led(&mut self, on: bool) {
        self.system_blocked_led = on;
    }

    fn set_siren(&mut self, mode: SirenMode) {
        self.siren = Some(mode);
    }
}

impl KeyMatrix for MockHardware {
    fn scan(&mut self) -> Option<char> {
        self.scans += 1;
        self.held_key
    }
}

#[allow(dead_code)]
impl MockHardware {
    pub fn alarm_led(&self) -> bool {
        self.alarm_led_history.last().copied().unwrap_or(false)
    }

    /// Tick numbers (1-based) on which the alarm LED changed level.
    pub fn alarm_led_toggles(&self) -> Vec<usize> {
        let mut previous = false;
        let mut toggles = Vec::new();
        for (i, &level) in self.alarm_led_history.iter().enumerate() {
            if level != previous {
                toggles.push(i + 1);
            }
            previous = level;
        }
        toggles
    }
}

// ── MockConsole ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockConsole {
    pub input: VecDeque<u8>,
    pub output: String,
}

#[allow(dead_code)]
impl MockConsole {
    pub fn type_bytes(&mut self, bytes: &[u8]) {
        self.input.extend(bytes);
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

impl ConsolePort for MockConsole {
    fn poll_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    fn read_exact(&mut self, buf: &mut [u8]) {
        for slot in buf {
            *slot = self.input.pop_front().expect("test console ran out of input");
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        self.output.push_str(&String::from_utf8_lossy(bytes));
    }
}

// ── MockClock ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockClock {
    pub now: i64,
}

impl ClockPort for MockClock {
    fn now(&self) -> i64 {
        self.now
    }

    fn set(&mut self, epoch_secs: i64) {
        self.now = epoch_secs;
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    /// Labels of every `Logged` event, in order.
    pub fn logged(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Logged(r) => Some(r.label.to_string()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, label: &str) -> usize {
        self.logged().iter().filter(|l| *l == label).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Harness ───────────────────────────────────────────────────

pub type TestBoard = Board<MockHardware, MockConsole, MockClock, RecordingSink>;

pub fn make_system() -> (AlarmSystem, TestBoard) {
    let mut system = AlarmSystem::new(SystemConfig::default());
    let mut board = Board {
        hw: MockHardware::default(),
        console: MockConsole::default(),
        clock: MockClock::default(),
        sink: RecordingSink::default(),
    };
    system.start(&mut board.console, &mut board.sink);
    board.console.take_output();
    (system, board)
}

pub fn run_ticks(system: &mut AlarmSystem, board: &mut TestBoard, n: usize) {
    for _ in 0..n {
        system.tick(board);
    }
}

/// Hold `key` long enough to be confirmed, then release it.
#[allow(dead_code)]
pub fn press_key(system: &mut AlarmSystem, board: &mut TestBoard, key: char) {
    board.hw.held_key = Some(key);
    run_ticks(system, board, 6);
    board.hw.held_key = None;
    system.tick(board);
}

#[allow(dead_code)]
pub fn press_keys(system: &mut AlarmSystem, board: &mut TestBoard, keys: &str) {
    for key in keys.chars() {
        press_key(system, board, key);
    }
}
