//! Fuzz target: `AlarmSystem::tick` under arbitrary inputs
//!
//! Input is consumed as 3-byte ticks: sensor flags, held key, console
//! byte. Interactive console commands read their extra input from the
//! same stream. Asserts that the tick never panics and that the outputs
//! stay consistent with the alarm state.
//!
//! cargo fuzz run fuzz_alarm_session

#![no_main]

use std::collections::VecDeque;

use gasalarm::alarm::SirenMode;
use gasalarm::app::events::AppEvent;
use gasalarm::app::ports::{AlarmOutputPort, Board, ClockPort, ConsolePort, EventSink, SensorPort};
use gasalarm::app::service::AlarmSystem;
use gasalarm::config::SystemConfig;
use gasalarm::event_log::EVENT_LOG_CAPACITY;
use gasalarm::keypad::{KeyMatrix, position_of};
use gasalarm::sensors::SensorSnapshot;
use libfuzzer_sys::fuzz_target;

#[derive(Default)]
struct Hw {
    inputs: SensorSnapshot,
    key: Option<char>,
    siren: Option<SirenMode>,
}

impl SensorPort for Hw {
    fn read_all(&mut self) -> SensorSnapshot {
        self.inputs
    }
}

impl AlarmOutputPort for Hw {
    fn set_alarm_led(&mut self, _on: bool) {}
    fn set_incorrect_code_led(&mut self, _on: bool) {}
    fn set_system_blocked_led(&mut self, _on: bool) {}
    fn set_siren(&mut self, mode: SirenMode) {
        self.siren = Some(mode);
    }
}

impl KeyMatrix for Hw {
    fn scan(&mut self) -> Option<char> {
        self.key
    }
}

#[derive(Default)]
struct Console {
    input: VecDeque<u8>,
}

impl ConsolePort for Console {
    fn poll_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    fn read_exact(&mut self, buf: &mut [u8]) {
        for slot in buf {
            *slot = self.input.pop_front().unwrap_or(b'0');
        }
    }

    fn write(&mut self, _bytes: &[u8]) {}
}

#[derive(Default)]
struct Clock(i64);

impl ClockPort for Clock {
    fn now(&self) -> i64 {
        self.0
    }

    fn set(&mut self, epoch_secs: i64) {
        self.0 = epoch_secs;
    }
}

struct Sink;

impl EventSink for Sink {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let mut system = AlarmSystem::new(SystemConfig::default());
    let mut board = Board {
        hw: Hw::default(),
        console: Console::default(),
        clock: Clock::default(),
        sink: Sink,
    };

    let mut was_locked = false;

    for chunk in data.chunks(3) {
        let flags = chunk[0];
        board.hw.inputs = SensorSnapshot {
            lm35_reading: f32::from(flags >> 3) / 31.0,
            gas_present: flags & 0x01 != 0,
            test_button_pressed: flags & 0x02 != 0,
        };
        board.hw.key = chunk
            .get(1)
            .map(|&b| char::from(b))
            .filter(|&c| position_of(c).is_some());
        if let Some(&byte) = chunk.get(2) {
            board.console.input.push_back(byte);
        }

        system.tick(&mut board);

        if system.alarm().is_active() {
            assert!(
                system.alarm().gas_detected() || system.alarm().over_temp_detected(),
                "active alarm without a cause"
            );
            assert_eq!(board.hw.siren, Some(SirenMode::Sounding));
        }
        // Only a reset lifts the lockout.
        let locked = system.alarm().guard().is_locked_out();
        assert!(!was_locked || locked, "lockout released without reset");
        was_locked = locked;
        assert!(system.event_log().len() <= EVENT_LOG_CAPACITY);
    }
});
