//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AlarmSystem (domain)
//! ```
//!
//! Driven adapters (sensors, outputs, console, clock, event sinks) implement
//! these traits. The [`AlarmSystem`](super::service::AlarmSystem) consumes
//! them via generics, so the domain core never touches hardware directly.
//! The keypad scanner port, [`KeyMatrix`](crate::keypad::KeyMatrix), lives
//! next to the debounce FSM.

use crate::alarm::SirenMode;
use crate::sensors::SensorSnapshot;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per tick.
pub trait SensorPort {
    /// Read every alarm input and return a unified snapshot.
    fn read_all(&mut self) -> SensorSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Alarm output port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the siren and the three indicator LEDs.
pub trait AlarmOutputPort {
    fn set_alarm_led(&mut self, on: bool);

    fn set_incorrect_code_led(&mut self, on: bool);

    fn set_system_blocked_led(&mut self, on: bool);

    /// Drive the siren line low (`Sounding`) or release it to high impedance.
    fn set_siren(&mut self, mode: SirenMode);
}

// ───────────────────────────────────────────────────────────────
// Console port (driven adapter: domain ↔ serial)
// ───────────────────────────────────────────────────────────────

/// Byte-oriented serial console.
pub trait ConsolePort {
    /// Next received byte, if one is already buffered. Never blocks.
    fn poll_byte(&mut self) -> Option<u8>;

    /// Block until `buf` has been filled.
    fn read_exact(&mut self, buf: &mut [u8]);

    fn write(&mut self, bytes: &[u8]);

    fn write_str(&mut self, s: &str) {
        self.write(s.as_bytes());
    }
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: domain ↔ RTC)
// ───────────────────────────────────────────────────────────────

/// Wall clock in whole seconds since the Unix epoch.
pub trait ClockPort {
    fn now(&self) -> i64;

    fn set(&mut self, epoch_secs: i64);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Tick delegate (decouples the scheduler from the alarm system)
// ───────────────────────────────────────────────────────────────

/// Callback the [`Scheduler`](crate::scheduler::Scheduler) invokes once per
/// period. The scheduler itself knows nothing about sensors or alarms.
pub trait TickDelegate {
    /// `tick` counts from 1.
    fn on_tick(&mut self, tick: u64);
}

impl<F: FnMut(u64)> TickDelegate for F {
    fn on_tick(&mut self, tick: u64) {
        self(tick);
    }
}

// ───────────────────────────────────────────────────────────────
// Port bundle
// ───────────────────────────────────────────────────────────────

/// Everything one tick needs, borrowed together so the service can be
/// driven with a single argument.
///
/// `hw` satisfies the sensor, output and keypad ports at once, which keeps
/// the port boundary explicit without a double mutable borrow.
pub struct Board<H, C, T, S> {
    pub hw: H,
    pub console: C,
    pub clock: T,
    pub sink: S,
}
