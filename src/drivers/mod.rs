//! Output drivers, hardware initialisation, and pin access.

pub mod gpio;
pub mod hw_init;
pub mod indicator_led;
pub mod siren;
