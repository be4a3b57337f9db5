//! Single-colour indicator LED on a push-pull output.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the GPIO via hw_init.
//! On host/test: the level lands in the simulated pin table.

use crate::drivers::hw_init;

pub struct IndicatorLed {
    gpio: i32,
    on: bool,
}

impl IndicatorLed {
    pub fn new(gpio: i32) -> Self {
        Self { gpio, on: false }
    }

    /// Writes the pin only when the level changes.
    pub fn set(&mut self, on: bool) {
        if on != self.on {
            hw_init::gpio_write(self.gpio, on);
            self.on = on;
        }
    }
}
