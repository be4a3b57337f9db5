//! Runtime diagnostics.
//!
//! Keypad FSM dump for the `q` console command, and a panic hook that logs
//! the reason and uptime before the default handler resets the chip.

use core::fmt::Write;

use heapless::String;

use crate::keypad::{KeypadFsm, position_of};

/// Point-in-time view of the keypad debounce FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadDiagnostics {
    pub state: &'static str,
    pub debounce_ms: u32,
    pub last_key: Option<char>,
    /// `(row, col)` of the last key detected.
    pub position: Option<(usize, usize)>,
}

impl KeypadDiagnostics {
    pub fn capture(keypad: &KeypadFsm) -> Self {
        let last_key = keypad.last_key();
        Self {
            state: keypad.state().name(),
            debounce_ms: keypad.debounce_ms(),
            last_key,
            position: last_key.and_then(position_of),
        }
    }

    /// Console rendering. Row and column read `-` until a key has been seen.
    pub fn render(&self) -> String<160> {
        let mut out = String::new();
        let _ = writeln!(out, "Keypad state: MATRIX_KEYPAD_{}", self.state);
        let _ = writeln!(out, "Debounce time elapsed (ms): {}", self.debounce_ms);
        match self.position {
            Some((row, col)) => {
                let _ = writeln!(out, "Current row: {}\nCurrent column: {}", row, col);
            }
            None => {
                let _ = out.push_str("Current row: -\nCurrent column: -\n");
            }
        }
        out
    }
}

// ───────────────────────────────────────────────────────────────
// Custom panic handler
// ───────────────────────────────────────────────────────────────

/// Install a panic hook that logs the panic reason.
///
/// Must be called once during init, after the logger.
pub fn install_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        let reason = if let Some(msg) = info.payload().downcast_ref::<&str>() {
            *msg
        } else if let Some(msg) = info.payload().downcast_ref::<std::string::String>() {
            msg.as_str()
        } else {
            "unknown panic"
        };

        #[cfg(target_os = "espidf")]
        {
            // SAFETY: esp_timer_get_time is a plain counter read, safe in
            // panic context.
            let uptime = (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000_000;
            log::error!("PANIC after {}s: {}", uptime, reason);
        }

        #[cfg(not(target_os = "espidf"))]
        {
            log::error!("PANIC (simulation): {}", reason);
        }
    }));
}
