//! Debounce / hold state machine for the matrix keypad.
//!
//! ```text
//!            key seen                  debounce elapsed, same key
//!  SCANNING ──────────▶ DEBOUNCING ─────────────────────────────▶ HOLDING
//!     ▲                     │                                       │
//!     │   different / none  │                                       │
//!     └─────────────────────┘                                       │
//!     ▲                  key gone (emit release) / other key        │
//!     └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Presses are reported at release only. A press that disappears while
//! debouncing yields nothing; a confirmed press yields exactly one release
//! no matter how long it is held.

use crate::config::SystemConfig;

/// Current state of the keypad FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadState {
    Scanning,
    Debouncing { key: char },
    Holding { key: char },
}

impl KeypadState {
    pub fn name(self) -> &'static str {
        match self {
            Self::Scanning => "SCANNING",
            Self::Debouncing { .. } => "DEBOUNCING",
            Self::Holding { .. } => "HOLDING",
        }
    }
}

pub struct KeypadFsm {
    state: KeypadState,
    /// Last key detected from `Scanning`. Kept after release for diagnostics.
    last_key: Option<char>,
    /// Time spent debouncing. Keeps growing past the threshold until the
    /// next press resets it.
    debounce_ms: u32,
    debounce_threshold_ms: u32,
    tick_ms: u32,
}

impl KeypadFsm {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            state: KeypadState::Scanning,
            last_key: None,
            debounce_ms: 0,
            debounce_threshold_ms: config.debounce_key_ms,
            tick_ms: config.tick_interval_ms,
        }
    }

    /// Advance one tick. `scan` is only invoked when the current state
    /// needs a fresh reading.
    ///
    /// Returns the released key, if a confirmed press ended this tick.
    pub fn update(&mut self, mut scan: impl FnMut() -> Option<char>) -> Option<char> {
        match self.state {
            KeypadState::Scanning => {
                if let Some(key) = scan() {
                    self.last_key = Some(key);
                    self.debounce_ms = 0;
                    self.state = KeypadState::Debouncing { key };
                }
                None
            }

            KeypadState::Debouncing { key } => {
                if self.debounce_ms >= self.debounce_threshold_ms {
                    self.state = if scan() == Some(key) {
                        KeypadState::Holding { key }
                    } else {
                        KeypadState::Scanning
                    };
                }
                self.debounce_ms = self.debounce_ms.saturating_add(self.tick_ms);
                None
            }

            KeypadState::Holding { key } => match scan() {
                Some(now) if now == key => None,
                Some(_) => {
                    // Rolled onto another key without letting go: no release.
                    self.state = KeypadState::Scanning;
                    None
                }
                None => {
                    self.state = KeypadState::Scanning;
                    Some(key)
                }
            },
        }
    }

    pub fn state(&self) -> KeypadState {
        self.state
    }

    pub fn last_key(&self) -> Option<char> {
        self.last_key
    }

    pub fn debounce_ms(&self) -> u32 {
        self.debounce_ms
    }
}
