//! LM35 temperature sensor with a rolling-average filter.
//!
//! The LM35 outputs 10 mV/°C into ADC1. The filter keeps the last
//! [`NUMBER_OF_AVG_SAMPLES`] normalised readings in a circular buffer and
//! recomputes the mean over the whole buffer every tick. The buffer starts
//! zero-filled, so the average is valid (and low) from the first sample.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static atomic for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU32, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::config::SystemConfig;

/// Size of the averaging window.
pub const NUMBER_OF_AVG_SAMPLES: usize = 100;

/// Normalised reading injected by host simulations (f32 bits).
#[cfg(not(target_os = "espidf"))]
static SIM_LM35_READING: AtomicU32 = AtomicU32::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_lm35_reading(reading: f32) {
    SIM_LM35_READING.store(reading.to_bits(), Ordering::Relaxed);
}

/// Display unit for temperatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(self) -> char {
        match self {
            Self::Celsius => 'C',
            Self::Fahrenheit => 'F',
        }
    }
}

pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Output of one filter step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureReading {
    /// Mean of the sample window (normalised, 0.0–1.0).
    pub average: f32,
    pub celsius: f32,
    pub over_temp: bool,
}

impl TemperatureReading {
    pub fn in_unit(&self, unit: TemperatureUnit) -> f32 {
        match unit {
            TemperatureUnit::Celsius => self.celsius,
            TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(self.celsius),
        }
    }
}

/// Rolling-average filter over raw LM35 readings.
pub struct TemperatureFilter {
    samples: [f32; NUMBER_OF_AVG_SAMPLES],
    cursor: usize,
    last: TemperatureReading,
    threshold_c: f32,
    full_scale_v: f32,
    volts_per_degree: f32,
}

impl TemperatureFilter {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            samples: [0.0; NUMBER_OF_AVG_SAMPLES],
            cursor: 0,
            last: TemperatureReading {
                average: 0.0,
                celsius: 0.0,
                over_temp: false,
            },
            threshold_c: config.over_temp_level_c,
            full_scale_v: config.lm35_full_scale_v,
            volts_per_degree: config.lm35_volts_per_degree,
        }
    }

    /// Store `raw`, advance the cursor and recompute the window mean.
    /// Over-temperature is re-evaluated every call, without hysteresis.
    pub fn record_sample(&mut self, raw: f32) -> TemperatureReading {
        self.samples[self.cursor] = raw;
        self.cursor = (self.cursor + 1) % NUMBER_OF_AVG_SAMPLES;

        let average = self.samples.iter().sum::<f32>() / NUMBER_OF_AVG_SAMPLES as f32;
        let celsius = self.scale_to_celsius(average);
        self.last = TemperatureReading {
            average,
            celsius,
            over_temp: celsius > self.threshold_c,
        };
        self.last
    }

    /// Most recent filter output.
    pub fn reading(&self) -> TemperatureReading {
        self.last
    }

    /// Index of the slot the next sample will overwrite.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn scale_to_celsius(&self, reading: f32) -> f32 {
        reading * self.full_scale_v / self.volts_per_degree
    }
}

/// LM35 on ADC1. Produces normalised readings for the filter.
pub struct Lm35Sensor {
    _adc_gpio: i32,
}

impl Lm35Sensor {
    pub fn new(adc_gpio: i32) -> Self {
        Self {
            _adc_gpio: adc_gpio,
        }
    }

    /// Normalised reading in `[0, 1]`.
    #[cfg(target_os = "espidf")]
    pub fn read(&self) -> f32 {
        f32::from(hw_init::adc1_read(hw_init::ADC1_CH_LM35)) / hw_init::ADC_MAX
    }

    /// Normalised reading in `[0, 1]`.
    #[cfg(not(target_os = "espidf"))]
    pub fn read(&self) -> f32 {
        f32::from_bits(SIM_LM35_READING.load(Ordering::Relaxed)).clamp(0.0, 1.0)
    }
}
