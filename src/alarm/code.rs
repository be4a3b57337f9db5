//! Disarm code entry and the incorrect-attempt guard.

use crate::keypad::CODE_LEN;

/// Last [`CODE_LEN`] keys typed on the keypad, written circularly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBuffer {
    keys: [char; CODE_LEN],
    index: usize,
}

impl Default for CodeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeBuffer {
    pub fn new() -> Self {
        Self {
            keys: ['\0'; CODE_LEN],
            index: 0,
        }
    }

    /// Store `key` at the cursor and advance it, wrapping after the last slot.
    pub fn push(&mut self, key: char) {
        self.keys[self.index] = key;
        self.index = (self.index + 1) % CODE_LEN;
    }

    /// Restart entry from the first slot. Stored keys are kept.
    pub fn rewind(&mut self) {
        self.index = 0;
    }

    /// Position-wise comparison over all slots.
    pub fn matches(&self, secret: &[char; CODE_LEN]) -> bool {
        self.keys == *secret
    }

    pub fn keys(&self) -> &[char; CODE_LEN] {
        &self.keys
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// Counts incorrect disarm attempts and latches the lockout.
///
/// Once `max_attempts` failures have accumulated the guard is locked out
/// until [`DisarmGuard::reset`]. A later successful disarm clears the
/// attempt counter but not the lockout.
#[derive(Debug, Clone)]
pub struct DisarmGuard {
    incorrect_attempts: u32,
    max_attempts: u32,
    locked_out: bool,
    incorrect_code_led: bool,
    submit_presses: u32,
}

impl DisarmGuard {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            incorrect_attempts: 0,
            max_attempts,
            locked_out: false,
            incorrect_code_led: false,
            submit_presses: 0,
        }
    }

    /// Register a failed attempt. Returns `true` if this one latched the
    /// lockout.
    pub fn record_failure(&mut self) -> bool {
        self.incorrect_code_led = true;
        self.incorrect_attempts = self.incorrect_attempts.saturating_add(1);
        if !self.locked_out && self.incorrect_attempts >= self.max_attempts {
            self.locked_out = true;
            return true;
        }
        false
    }

    /// Register a successful disarm.
    pub fn record_success(&mut self, clear_indicator: bool) {
        self.incorrect_attempts = 0;
        if clear_indicator {
            self.incorrect_code_led = false;
        }
    }

    pub fn note_submit_press(&mut self) {
        self.submit_presses = self.submit_presses.wrapping_add(1);
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.max_attempts);
    }

    pub fn incorrect_attempts(&self) -> u32 {
        self.incorrect_attempts
    }

    pub fn is_locked_out(&self) -> bool {
        self.locked_out
    }

    pub fn incorrect_code_led(&self) -> bool {
        self.incorrect_code_led
    }

    pub fn submit_presses(&self) -> u32 {
        self.submit_presses
    }
}
