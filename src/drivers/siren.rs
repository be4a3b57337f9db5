//! Open-drain siren driver.
//!
//! The siren module has its own pull-up. Sounding means the line is
//! actively driven LOW; silent means the pin is released to high
//! impedance, never driven HIGH.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: switches the pin direction via hw_init.
//! On host/test: the simulated pin table records the output enable.

use crate::alarm::SirenMode;
use crate::drivers::hw_init;

pub struct SirenDriver {
    gpio: i32,
    mode: SirenMode,
}

impl SirenDriver {
    /// Starts released, matching the boot configuration in `hw_init`.
    pub fn new(gpio: i32) -> Self {
        Self {
            gpio,
            mode: SirenMode::Released,
        }
    }

    pub fn set(&mut self, mode: SirenMode) {
        if mode == self.mode {
            return;
        }
        match mode {
            SirenMode::Sounding => {
                // Level first, so the line never glitches high on enable.
                hw_init::gpio_write(self.gpio, false);
                hw_init::gpio_set_output_enabled(self.gpio, true);
            }
            SirenMode::Released => hw_init::gpio_set_output_enabled(self.gpio, false),
        }
        self.mode = mode;
    }
}
