//! Application service: the hexagonal core.
//!
//! [`AlarmSystem`] owns the temperature filter, keypad FSM, alarm state
//! machine and event log. All I/O flows through port traits bundled in a
//! [`Board`], making the whole system testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────────┐ ──▶ AlarmOutputPort
//!   KeyMatrix ──▶ │         AlarmSystem           │ ──▶ EventSink
//! ConsolePort ◀──▶│ filter · keypad · alarm · log │ ◀── ClockPort
//!                 └──────────────────────────────┘
//! ```
//!
//! One [`tick`](AlarmSystem::tick) runs, in order: alarm activation, keypad
//! disarm, console service, output application, event-log update. Console
//! commands that need more input block inside the tick; nothing else is
//! serviced while they wait.

use log::{debug, info, warn};

use crate::alarm::{AlarmController, AlarmOutputs, DisarmOutcome, DisarmSource};
use crate::config::SystemConfig;
use crate::console::datetime::{DateField, DateTimeEntry, format_ctime};
use crate::console::{self, ConsoleCommand};
use crate::diagnostics::KeypadDiagnostics;
use crate::event_log::{EventLog, MonitoredSignals};
use crate::keypad::{CODE_LEN, KeyMatrix, KeypadFsm};
use crate::sensors::SensorSnapshot;
use crate::sensors::temperature::{TemperatureFilter, TemperatureReading};

use super::events::AppEvent;
use super::ports::{AlarmOutputPort, Board, ClockPort, ConsolePort, EventSink, SensorPort};

/// Digits in a full `YYYYMMDDhhmmss` date entry.
const DATE_ENTRY_LEN: usize = 14;

// ───────────────────────────────────────────────────────────────
// AlarmSystem
// ───────────────────────────────────────────────────────────────

pub struct AlarmSystem {
    config: SystemConfig,
    filter: TemperatureFilter,
    keypad: KeypadFsm,
    alarm: AlarmController,
    event_log: EventLog,
    /// Inputs sampled at the start of the current tick.
    sensors: SensorSnapshot,
    temperature: TemperatureReading,
    tick_count: u64,
}

impl AlarmSystem {
    /// Construct the system from a validated configuration.
    pub fn new(config: SystemConfig) -> Self {
        let filter = TemperatureFilter::new(&config);
        Self {
            temperature: filter.reading(),
            filter,
            keypad: KeypadFsm::new(&config),
            alarm: AlarmController::new(&config),
            event_log: EventLog::new(),
            sensors: SensorSnapshot::default(),
            tick_count: 0,
            config,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Print the command menu and announce start-up.
    pub fn start(&mut self, console: &mut impl ConsolePort, sink: &mut impl EventSink) {
        console.write_str(console::HELP_MENU);
        sink.emit(&AppEvent::Started);
        info!(
            "AlarmSystem started (tick={}ms, debounce={}ms)",
            self.config.tick_interval_ms, self.config.debounce_key_ms
        );
    }

    /// Back to power-on state. The only way to lift a keypad lockout.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
        info!("AlarmSystem reset");
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle.
    pub fn tick<H, C, T, S>(&mut self, board: &mut Board<H, C, T, S>)
    where
        H: SensorPort + AlarmOutputPort + KeyMatrix,
        C: ConsolePort,
        T: ClockPort,
        S: EventSink,
    {
        self.tick_count += 1;

        // 1. Activation: sample, filter, raise
        self.sensors = board.hw.read_all();
        self.temperature = self.filter.record_sample(self.sensors.lm35_reading);
        let raised = self.alarm.update_activation(
            self.sensors.gas_present,
            self.temperature.over_temp,
            self.sensors.test_button_pressed,
        );
        if raised {
            let event = AppEvent::AlarmRaised {
                gas: self.alarm.gas_detected(),
                over_temp: self.alarm.over_temp_detected(),
            };
            board.sink.emit(&event);
        }

        // 2. Deactivation via keypad
        let hw = &mut board.hw;
        if let Some(outcome) = self.alarm.update_deactivation(&mut self.keypad, || hw.scan()) {
            Self::report_disarm(outcome, DisarmSource::Keypad, &mut board.sink);
        }

        // 3. Console
        if let Some(byte) = board.console.poll_byte() {
            let cmd = ConsoleCommand::from_byte(byte);
            if cmd.is_interactive() {
                debug!("tick {}: {:?} blocks until its input is complete", self.tick_count, cmd);
            }
            self.handle_console(cmd, &mut board.console, &mut board.clock, &mut board.sink);
        }

        // 4. Outputs
        Self::apply_outputs(&self.alarm.outputs(), &mut board.hw);

        // 5. Event log
        self.update_event_log(&mut board.console, &board.clock, &mut board.sink);
    }

    // ── Command handling ──────────────────────────────────────

    /// Execute one console command. Interactive commands block on
    /// [`ConsolePort::read_exact`] until their input is complete.
    pub fn handle_console(
        &mut self,
        cmd: ConsoleCommand,
        console: &mut impl ConsolePort,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        debug!("console command {:?}", cmd);
        match cmd {
            ConsoleCommand::AlarmState => {
                console.write_str(console::alarm_state_reply(self.alarm.is_active()));
            }
            ConsoleCommand::GasState => {
                console.write_str(console::gas_state_reply(self.sensors.gas_present));
            }
            ConsoleCommand::OverTempState => {
                console.write_str(console::over_temp_reply(self.temperature.over_temp));
            }
            ConsoleCommand::EnterCode => {
                console.write_str(console::ENTER_CODE_PROMPT);
                let entered = Self::read_masked_code(console);
                let outcome = self.alarm.disarm_with_code(&entered);
                console.write_str(match outcome {
                    DisarmOutcome::Disarmed => console::CODE_CORRECT,
                    DisarmOutcome::Rejected { .. } => console::CODE_INCORRECT,
                });
                Self::report_disarm(outcome, DisarmSource::Console, sink);
            }
            ConsoleCommand::NewCode => {
                console.write_str(console::NEW_CODE_PROMPT);
                let _discarded = Self::read_masked_code(console);
                warn!("new disarm code typed on the console was not stored");
                console.write_str(console::NEW_CODE_GENERATED);
                sink.emit(&AppEvent::CodeChangeDiscarded);
            }
            ConsoleCommand::Temperature(unit) => {
                let reply = console::temperature_reply(self.temperature.in_unit(unit), unit);
                console.write_str(&reply);
            }
            ConsoleCommand::SetDateTime => self.set_date_time(console, clock, sink),
            ConsoleCommand::ShowDateTime => {
                console.write_str(&console::date_time_reply(&format_ctime(clock.now())));
            }
            ConsoleCommand::DumpEvents => {
                for record in self.event_log.iter() {
                    let ctime = format_ctime(record.timestamp);
                    console.write_str(&console::event_reply(&record.label, &ctime));
                }
            }
            ConsoleCommand::KeypadDiagnostics => {
                console.write_str(&KeypadDiagnostics::capture(&self.keypad).render());
            }
            ConsoleCommand::Help => console.write_str(console::HELP_MENU),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn alarm(&self) -> &AlarmController {
        &self.alarm
    }

    pub fn keypad(&self) -> &KeypadFsm {
        &self.keypad
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Filter output from the most recent tick.
    pub fn temperature(&self) -> TemperatureReading {
        self.temperature
    }

    /// Inputs sampled on the most recent tick.
    pub fn sensors(&self) -> SensorSnapshot {
        self.sensors
    }

    /// Total ticks executed since start-up.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_outputs(outputs: &AlarmOutputs, hw: &mut impl AlarmOutputPort) {
        hw.set_alarm_led(outputs.alarm_led);
        hw.set_incorrect_code_led(outputs.incorrect_code_led);
        hw.set_system_blocked_led(outputs.system_blocked_led);
        hw.set_siren(outputs.siren);
    }

    fn update_event_log(
        &mut self,
        console: &mut impl ConsolePort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        let outputs = self.alarm.outputs();
        let signals = MonitoredSignals {
            alarm: self.alarm.is_active(),
            gas_detected: self.sensors.gas_present,
            over_temp: self.temperature.over_temp,
            incorrect_code_led: outputs.incorrect_code_led,
            system_blocked_led: outputs.system_blocked_led,
        };
        for record in self.event_log.update(&signals, clock.now()) {
            console.write_str(&record.label);
            console.write_str("\r\n");
            sink.emit(&AppEvent::Logged(record));
        }
    }

    /// Read [`CODE_LEN`] bytes one at a time, echoing a mask for each.
    fn read_masked_code(console: &mut impl ConsolePort) -> [char; CODE_LEN] {
        let mut code = ['\0'; CODE_LEN];
        for slot in &mut code {
            let mut byte = [0u8; 1];
            console.read_exact(&mut byte);
            console.write_str(console::MASK);
            *slot = char::from(byte[0]);
        }
        code
    }

    fn set_date_time(
        &mut self,
        console: &mut impl ConsolePort,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        let mut digits = [0u8; DATE_ENTRY_LEN];
        let mut filled = 0;
        for field in DateField::ALL {
            console.write_str(field.prompt());
            for byte in &mut digits[filled..filled + field.width()] {
                console.read_exact(core::slice::from_mut(byte));
                console.write(core::slice::from_ref(byte));
            }
            filled += field.width();
            console.write_str("\r\n");
        }

        match DateTimeEntry::parse(&digits).and_then(|entry| entry.to_epoch()) {
            Ok(epoch) => {
                clock.set(epoch);
                console.write_str(console::DATE_TIME_SET);
                info!("wall clock set to {}", format_ctime(epoch));
                sink.emit(&AppEvent::ClockSet(epoch));
            }
            Err(e) => {
                console.write_str(console::DATE_TIME_INVALID);
                warn!("date entry rejected: {}", e);
                sink.emit(&AppEvent::ClockEntryRejected);
            }
        }
    }

    fn report_disarm(outcome: DisarmOutcome, source: DisarmSource, sink: &mut impl EventSink) {
        match outcome {
            DisarmOutcome::Disarmed => {
                info!("alarm disarmed from {:?}", source);
                sink.emit(&AppEvent::AlarmCleared(source));
            }
            DisarmOutcome::Rejected {
                attempts,
                locked_out,
            } => {
                sink.emit(&AppEvent::IncorrectCode { source, attempts });
                if locked_out {
                    warn!("keypad locked after {} incorrect codes", attempts);
                    sink.emit(&AppEvent::LockedOut { attempts });
                }
            }
        }
    }
}
