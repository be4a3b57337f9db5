//! Alarm state machine.
//!
//! ```text
//!                 gas / over-temp / test button
//!        ┌─────┐ ─────────────────────────────▶ ┌────┐
//!        │ OFF │                                │ ON │  siren driven, LED blinking
//!        └─────┘ ◀───────────────────────────── └────┘
//!                 correct code (keypad '#' or console '4')
//! ```
//!
//! Sub-alarm flags latch while the alarm is ON and are only cleared on the
//! first activation pass that finds the alarm OFF. The keypad disarm path is
//! closed for good once [`DisarmGuard`] has latched the lockout; the console
//! path stays open.

pub mod blink;
pub mod code;

pub use blink::{BlinkPattern, BlinkTimer};
pub use code::{CodeBuffer, DisarmGuard};

use crate::config::SystemConfig;
use crate::keypad::{CODE_LEN, KeypadFsm, SUBMIT_KEY};

/// Electrical mode of the open-drain siren line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SirenMode {
    /// Output driven low (siren on).
    Sounding,
    /// High-impedance input (siren off).
    Released,
}

/// Where a disarm attempt came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisarmSource {
    Keypad,
    Console,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisarmOutcome {
    Disarmed,
    Rejected {
        attempts: u32,
        /// This attempt latched the lockout.
        locked_out: bool,
    },
}

/// Levels for every alarm-owned output, applied once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmOutputs {
    pub alarm_led: bool,
    pub incorrect_code_led: bool,
    pub system_blocked_led: bool,
    pub siren: SirenMode,
}

pub struct AlarmController {
    active: bool,
    gas_detected: bool,
    over_temp_detected: bool,
    alarm_led: bool,
    system_blocked_led: bool,
    siren: SirenMode,
    blink: BlinkTimer,
    code: CodeBuffer,
    guard: DisarmGuard,
    secret: [char; CODE_LEN],
    tick_ms: u32,
}

impl AlarmController {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            active: false,
            gas_detected: false,
            over_temp_detected: false,
            alarm_led: false,
            system_blocked_led: false,
            siren: SirenMode::Released,
            blink: BlinkTimer::new(config),
            code: CodeBuffer::new(),
            guard: DisarmGuard::new(u32::from(config.max_incorrect_codes)),
            secret: config.secret_code,
            tick_ms: config.tick_interval_ms,
        }
    }

    /// Raise the alarm from this tick's inputs and drive the ON/OFF outputs.
    ///
    /// Returns `true` if the alarm went from OFF to ON on this call.
    pub fn update_activation(
        &mut self,
        gas_present: bool,
        over_temp: bool,
        test_button: bool,
    ) -> bool {
        let was_active = self.active;

        if gas_present {
            self.gas_detected = true;
            self.active = true;
        }
        if over_temp {
            self.over_temp_detected = true;
            self.active = true;
        }
        if test_button {
            self.gas_detected = true;
            self.over_temp_detected = true;
            self.active = true;
        }

        if self.active {
            self.siren = SirenMode::Sounding;
            let pattern = BlinkPattern::select(self.gas_detected, self.over_temp_detected);
            if self.blink.advance(self.tick_ms, pattern) {
                self.alarm_led = !self.alarm_led;
            }
        } else {
            self.alarm_led = false;
            self.gas_detected = false;
            self.over_temp_detected = false;
            self.siren = SirenMode::Released;
        }

        self.active && !was_active
    }

    /// Service the keypad disarm path for one tick.
    ///
    /// While locked out the keypad is not advanced at all and `scan` is never
    /// called; the system-blocked indicator is lit instead.
    pub fn update_deactivation(
        &mut self,
        keypad: &mut KeypadFsm,
        scan: impl FnMut() -> Option<char>,
    ) -> Option<DisarmOutcome> {
        if self.guard.is_locked_out() {
            self.system_blocked_led = true;
            return None;
        }

        match keypad.update(scan)? {
            SUBMIT_KEY => {
                self.guard.note_submit_press();
                if !self.active {
                    return None;
                }
                if self.code.matches(&self.secret) {
                    self.active = false;
                    self.guard.record_success(false);
                    self.code.rewind();
                    Some(DisarmOutcome::Disarmed)
                } else {
                    Some(self.reject())
                }
            }
            key => {
                self.code.push(key);
                None
            }
        }
    }

    /// Compare a code typed on the console. Evaluated whatever the alarm
    /// state or lockout.
    pub fn disarm_with_code(&mut self, entered: &[char; CODE_LEN]) -> DisarmOutcome {
        if *entered == self.secret {
            self.active = false;
            self.guard.record_success(true);
            DisarmOutcome::Disarmed
        } else {
            self.reject()
        }
    }

    fn reject(&mut self) -> DisarmOutcome {
        let locked_out = self.guard.record_failure();
        DisarmOutcome::Rejected {
            attempts: self.guard.incorrect_attempts(),
            locked_out,
        }
    }

    pub fn outputs(&self) -> AlarmOutputs {
        AlarmOutputs {
            alarm_led: self.alarm_led,
            incorrect_code_led: self.guard.incorrect_code_led(),
            system_blocked_led: self.system_blocked_led,
            siren: self.siren,
        }
    }

    /// Power-on state. The only way out of a lockout.
    pub fn reset(&mut self) {
        self.active = false;
        self.gas_detected = false;
        self.over_temp_detected = false;
        self.alarm_led = false;
        self.system_blocked_led = false;
        self.siren = SirenMode::Released;
        self.blink.reset();
        self.code = CodeBuffer::new();
        self.guard.reset();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn gas_detected(&self) -> bool {
        self.gas_detected
    }

    pub fn over_temp_detected(&self) -> bool {
        self.over_temp_detected
    }

    /// Whether the keypad is still scanned for disarm codes.
    pub fn keypad_enabled(&self) -> bool {
        !self.guard.is_locked_out()
    }

    pub fn guard(&self) -> &DisarmGuard {
        &self.guard
    }

    pub fn code(&self) -> &CodeBuffer {
        &self.code
    }

    pub fn blink(&self) -> &BlinkTimer {
        &self.blink
    }
}
