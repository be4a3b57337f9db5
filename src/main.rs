//! Alarm Controller Firmware: Main Entry Point
//!
//! Hexagonal architecture driven by a fixed-period scheduler.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter          UartConsole   RtcClock  LogEventSink │
//! │  (Sensor+Output+Keypad)   (Console)     (Clock)   (EventSink)  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AlarmSystem (pure logic)                  │    │
//! │  │  Filter · Keypad FSM · Alarm · Event log · Console     │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Scheduler (10 ms tick, delegate-driven)                       │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::info;

use gasalarm::adapters::hardware::HardwareAdapter;
use gasalarm::adapters::log_sink::LogEventSink;
use gasalarm::adapters::time::RtcClock;
use gasalarm::adapters::uart::UartConsole;
use gasalarm::app::ports::Board;
use gasalarm::app::service::AlarmSystem;
use gasalarm::config::SystemConfig;
use gasalarm::diagnostics;
use gasalarm::drivers::hw_init;
use gasalarm::error::Error;
use gasalarm::pins;
use gasalarm::scheduler::Scheduler;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Gas alarm v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    diagnostics::install_panic_handler();

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate()?;

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals(config.console_baud).map_err(Error::from)?;

    // ── 4. Adapters ───────────────────────────────────────────
    let mut board = Board {
        hw: HardwareAdapter::from_pin_map(),
        console: UartConsole::new(pins::UART_CONSOLE_PORT),
        clock: RtcClock::new(),
        sink: LogEventSink::new(),
    };

    // ── 5. Application ────────────────────────────────────────
    let mut system = AlarmSystem::new(config.clone());
    system.start(&mut board.console, &mut board.sink);

    info!("System ready. Entering scheduler loop.");

    // ── 6. Run forever ────────────────────────────────────────
    let mut scheduler = Scheduler::from_config(&config);
    let mut delay = FreeRtos;
    scheduler.run(&mut |_tick: u64| system.tick(&mut board), &mut delay)
}
