//! MQ-2 gas detector module (digital comparator output).
//!
//! The module's DO line is active-low: it is pulled LOW while the gas
//! concentration is above the trimmer threshold.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the GPIO configured by hw_init.
//! On host/test: reads from a static atomic for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Simulated DO line level (idle HIGH = no gas).
#[cfg(not(target_os = "espidf"))]
static SIM_GAS_LINE_HIGH: AtomicBool = AtomicBool::new(true);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_gas_line(high: bool) {
    SIM_GAS_LINE_HIGH.store(high, Ordering::Relaxed);
}

pub struct GasSensor {
    gpio: i32,
}

impl GasSensor {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    /// `true` while gas is being detected.
    pub fn is_gas_present(&self) -> bool {
        !self.read_line()
    }

    #[cfg(target_os = "espidf")]
    fn read_line(&self) -> bool {
        hw_init::gpio_read(self.gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_line(&self) -> bool {
        let _ = self.gpio;
        SIM_GAS_LINE_HIGH.load(Ordering::Relaxed)
    }
}
