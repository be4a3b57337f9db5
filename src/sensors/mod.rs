//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every input the alarm samples and produces a
//! [`SensorSnapshot`] once per tick. Averaging and thresholds live in
//! [`temperature::TemperatureFilter`], owned by the application core.

pub mod gas;
pub mod temperature;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use gas::GasSensor;
use temperature::Lm35Sensor;

/// Simulated test-button level (active HIGH, pulled down).
#[cfg(not(target_os = "espidf"))]
static SIM_TEST_BUTTON: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_test_button(pressed: bool) {
    SIM_TEST_BUTTON.store(pressed, Ordering::Relaxed);
}

/// A point-in-time view of every alarm input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorSnapshot {
    /// Normalised LM35 reading (0.0–1.0), unfiltered.
    pub lm35_reading: f32,
    /// Gas detector asserted (already decoded from the active-low line).
    pub gas_present: bool,
    /// Alarm test button held.
    pub test_button_pressed: bool,
}

/// Aggregates all sensor drivers and produces a unified snapshot.
pub struct SensorHub {
    pub lm35: Lm35Sensor,
    pub gas: GasSensor,
    test_button_gpio: i32,
}

impl SensorHub {
    pub fn new(lm35: Lm35Sensor, gas: GasSensor, test_button_gpio: i32) -> Self {
        Self {
            lm35,
            gas,
            test_button_gpio,
        }
    }

    /// Read every sensor once.
    pub fn read_all(&mut self) -> SensorSnapshot {
        SensorSnapshot {
            lm35_reading: self.lm35.read(),
            gas_present: self.gas.is_gas_present(),
            test_button_pressed: self.read_test_button(),
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_test_button(&self) -> bool {
        hw_init::gpio_read(self.test_button_gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_test_button(&self) -> bool {
        let _ = self.test_button_gpio;
        SIM_TEST_BUTTON.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_test_button() {
        let mut hub = SensorHub::new(Lm35Sensor::new(1), GasSensor::new(2), 3);
        sim_set_test_button(true);
        assert!(hub.read_all().test_button_pressed);
        sim_set_test_button(false);
        assert!(!hub.read_all().test_button_pressed);
    }
}
