//! Fixed-period cooperative scheduler.
//!
//! Runs one [`TickDelegate`] callback, then sleeps for the tick period,
//! forever. There is no drift compensation: the real period is the sleep
//! plus whatever the callback spent, and a callback blocked on console
//! input stretches that tick indefinitely.
//!
//! ```text
//!  ┌──────────────────────────────────────────┐
//!  │ loop {                                   │
//!  │     delegate.on_tick(n)   // AlarmSystem │
//!  │     delay.delay_ms(period)               │
//!  │ }                                        │
//!  └──────────────────────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::info;

use crate::app::ports::TickDelegate;
use crate::config::SystemConfig;

pub struct Scheduler {
    period_ms: u32,
    tick_count: u64,
}

impl Scheduler {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            tick_count: 0,
        }
    }

    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new(config.tick_interval_ms)
    }

    /// One iteration: run the delegate, then sleep one period.
    pub fn run_once(&mut self, delegate: &mut impl TickDelegate, delay: &mut impl DelayNs) {
        self.tick_count += 1;
        delegate.on_tick(self.tick_count);
        delay.delay_ms(self.period_ms);
    }

    /// Run forever.
    pub fn run(&mut self, delegate: &mut impl TickDelegate, delay: &mut impl DelayNs) -> ! {
        info!("Scheduler: running every {}ms", self.period_ms);
        loop {
            self.run_once(delegate, delay);
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }
}
