//! `embedded-hal` digital pin over a raw GPIO number.
//!
//! Direction is fixed by `hw_init`; this type only reads and writes levels,
//! so the same pin can serve as a keypad row or column.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::drivers::hw_init;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioPin {
    gpio: i32,
}

impl GpioPin {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}

impl ErrorType for GpioPin {
    type Error = Infallible;
}

impl OutputPin for GpioPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        hw_init::gpio_write(self.gpio, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        hw_init::gpio_write(self.gpio, true);
        Ok(())
    }
}

impl InputPin for GpioPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(hw_init::gpio_read(self.gpio))
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!hw_init::gpio_read(self.gpio))
    }
}
