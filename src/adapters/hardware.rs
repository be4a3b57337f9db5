//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`], the keypad matrix and all output drivers,
//! exposing them through [`SensorPort`], [`AlarmOutputPort`] and
//! [`KeyMatrix`]. This is the only module in the system that touches
//! actual hardware. On non-espidf targets, the underlying drivers use
//! cfg-gated simulation stubs.

use crate::alarm::SirenMode;
use crate::app::ports::{AlarmOutputPort, SensorPort};
use crate::drivers::gpio::GpioPin;
use crate::drivers::indicator_led::IndicatorLed;
use crate::drivers::siren::SirenDriver;
use crate::keypad::KeyMatrix;
use crate::keypad::matrix::PinMatrix;
use crate::pins;
use crate::sensors::gas::GasSensor;
use crate::sensors::temperature::Lm35Sensor;
use crate::sensors::{SensorHub, SensorSnapshot};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensor_hub: SensorHub,
    keypad: PinMatrix<GpioPin, GpioPin>,
    alarm_led: IndicatorLed,
    incorrect_code_led: IndicatorLed,
    system_blocked_led: IndicatorLed,
    siren: SirenDriver,
}

impl HardwareAdapter {
    pub fn new(
        sensor_hub: SensorHub,
        keypad: PinMatrix<GpioPin, GpioPin>,
        alarm_led: IndicatorLed,
        incorrect_code_led: IndicatorLed,
        system_blocked_led: IndicatorLed,
        siren: SirenDriver,
    ) -> Self {
        Self {
            sensor_hub,
            keypad,
            alarm_led,
            incorrect_code_led,
            system_blocked_led,
            siren,
        }
    }

    /// Everything wired per [`pins`].
    pub fn from_pin_map() -> Self {
        Self::new(
            SensorHub::new(
                Lm35Sensor::new(pins::LM35_ADC_GPIO),
                GasSensor::new(pins::GAS_DETECTOR_GPIO),
                pins::ALARM_TEST_BUTTON_GPIO,
            ),
            PinMatrix::new(
                pins::KEYPAD_ROW_GPIOS.map(GpioPin::new),
                pins::KEYPAD_COL_GPIOS.map(GpioPin::new),
            ),
            IndicatorLed::new(pins::ALARM_LED_GPIO),
            IndicatorLed::new(pins::INCORRECT_CODE_LED_GPIO),
            IndicatorLed::new(pins::SYSTEM_BLOCKED_LED_GPIO),
            SirenDriver::new(pins::SIREN_GPIO),
        )
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_all(&mut self) -> SensorSnapshot {
        self.sensor_hub.read_all()
    }
}

// ── AlarmOutputPort implementation ────────────────────────────

impl AlarmOutputPort for HardwareAdapter {
    fn set_alarm_led(&mut self, on: bool) {
        self.alarm_led.set(on);
    }

    fn set_incorrect_code_led(&mut self, on: bool) {
        self.incorrect_code_led.set(on);
    }

    fn set_system_blocked_led(&mut self, on: bool) {
        self.system_blocked_led.set(on);
    }

    fn set_siren(&mut self, mode: SirenMode) {
        self.siren.set(mode);
    }
}

// ── KeyMatrix implementation ──────────────────────────────────

impl KeyMatrix for HardwareAdapter {
    fn scan(&mut self) -> Option<char> {
        self.keypad.scan()
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;
    use crate::drivers::hw_init;

    // The only lib test touching the board pin map; the simulated pin
    // table is process-global.
    #[test]
    fn board_wiring_in_simulation() {
        let mut hw = HardwareAdapter::from_pin_map();

        assert_eq!(hw.scan(), None);
        hw_init::sim_hold_key(Some('6'));
        assert_eq!(hw.scan(), Some('6'));
        hw_init::sim_hold_key(Some('*'));
        assert_eq!(hw.scan(), Some('*'));
        hw_init::sim_hold_key(None);
        assert_eq!(hw.scan(), None);

        hw.set_alarm_led(true);
        hw.set_system_blocked_led(true);
        hw.set_siren(SirenMode::Sounding);
        assert!(hw_init::gpio_read(pins::ALARM_LED_GPIO));
        assert!(hw_init::gpio_read(pins::SYSTEM_BLOCKED_LED_GPIO));
        assert!(!hw_init::gpio_read(pins::INCORRECT_CODE_LED_GPIO));
        assert!(hw_init::sim_output_enabled(pins::SIREN_GPIO));

        hw.set_alarm_led(false);
        hw.set_system_blocked_led(false);
        hw.set_siren(SirenMode::Released);
        assert!(!hw_init::gpio_read(pins::ALARM_LED_GPIO));
        assert!(!hw_init::gpio_read(pins::SYSTEM_BLOCKED_LED_GPIO));
        assert!(!hw_init::sim_output_enabled(pins::SIREN_GPIO));
    }
}
