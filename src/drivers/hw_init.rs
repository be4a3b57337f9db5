//! One-shot hardware peripheral initialization and raw pin access.
//!
//! Configures ADC1, GPIO directions and the console UART using raw ESP-IDF
//! sys calls. Called once from `main()` before the scheduler starts.
//!
//! On the host every accessor is backed by an in-memory pin table. Keypad
//! columns are wired to the rows through [`sim_hold_key`], so the matrix
//! scanner runs unchanged in simulation.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    UartInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::UartInitFailed(rc) => write!(f, "UART init failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

/// ADC1 channel wired to the LM35 (GPIO 4 on ESP32-S3).
pub const ADC1_CH_LM35: u32 = 3;
/// Full-scale raw value at 12-bit resolution.
pub const ADC_MAX: f32 = 4095.0;

#[cfg(target_os = "espidf")]
pub fn init_peripherals(console_baud: u32) -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the scheduler; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_inputs()?;
        init_gpio_outputs()?;
        init_siren()?;
        init_uart(console_baud)?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals(_console_baud: u32) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path. `init_adc()` completes before the loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    // 0 dB keeps full resolution over the LM35's 0–1.5 V output.
    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_0,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), ADC1_CH_LM35, &chan_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    info!("hw_init: ADC1 configured (CH{}=LM35)", ADC1_CH_LM35);
    Ok(())
}

/// Raw ADC1 sample. A failed conversion reads as 0; the averaging filter
/// absorbs the odd bad sample.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract: single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.max(0) as u16
}

// ── GPIO ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn config_pins(
    gpios: &[i32],
    mode: gpio_mode_t,
    pull_up: bool,
    pull_down: bool,
) -> Result<(), HwInitError> {
    for &pin in gpios {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode,
            pull_up_en: if pull_up {
                gpio_pullup_t_GPIO_PULLUP_ENABLE
            } else {
                gpio_pullup_t_GPIO_PULLUP_DISABLE
            },
            pull_down_en: if pull_down {
                gpio_pulldown_t_GPIO_PULLDOWN_ENABLE
            } else {
                gpio_pulldown_t_GPIO_PULLDOWN_DISABLE
            },
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
    }
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    unsafe {
        config_pins(&pins::KEYPAD_COL_GPIOS, gpio_mode_t_GPIO_MODE_INPUT, true, false)?;
        config_pins(
            &[pins::GAS_DETECTOR_GPIO, pins::ALARM_TEST_BUTTON_GPIO],
            gpio_mode_t_GPIO_MODE_INPUT,
            false,
            true,
        )?;
    }
    info!("hw_init: GPIO inputs configured (keypad cols, MQ-2, test button)");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let leds = [
        pins::ALARM_LED_GPIO,
        pins::INCORRECT_CODE_LED_GPIO,
        pins::SYSTEM_BLOCKED_LED_GPIO,
    ];
    unsafe {
        config_pins(&pins::KEYPAD_ROW_GPIOS, gpio_mode_t_GPIO_MODE_OUTPUT, false, false)?;
        config_pins(&leds, gpio_mode_t_GPIO_MODE_OUTPUT, false, false)?;
    }
    for &pin in &pins::KEYPAD_ROW_GPIOS {
        gpio_write(pin, true);
    }
    for &pin in &leds {
        gpio_write(pin, false);
    }
    info!("hw_init: GPIO outputs configured (keypad rows, LEDs)");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_siren() -> Result<(), HwInitError> {
    // Starts released (input, no pulls): the siren is silent at boot.
    unsafe {
        config_pins(&[pins::SIREN_GPIO], gpio_mode_t_GPIO_MODE_INPUT, false, false)?;
    }
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin.
    // Main-loop only.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

/// Switch an open-drain line between driven (`true`) and high-impedance.
#[cfg(target_os = "espidf")]
pub fn gpio_set_output_enabled(pin: i32, enabled: bool) {
    let mode = if enabled {
        gpio_mode_t_GPIO_MODE_OUTPUT_OD
    } else {
        gpio_mode_t_GPIO_MODE_INPUT
    };
    // SAFETY: direction change on a pin owned by the siren driver.
    unsafe {
        gpio_set_direction(pin, mode);
    }
}

// ── UART console ──────────────────────────────────────────────

/// FreeRTOS "wait forever" tick count.
#[cfg(target_os = "espidf")]
const BLOCK: u32 = u32::MAX;

#[cfg(target_os = "espidf")]
unsafe fn init_uart(baud: u32) -> Result<(), HwInitError> {
    let port = pins::UART_CONSOLE_PORT;
    let cfg = uart_config_t {
        baud_rate: baud as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };
    // SAFETY: one-time driver setup from the init path.
    unsafe {
        let ret = uart_driver_install(
            port,
            pins::UART_RX_BUFFER_LEN,
            0,
            0,
            core::ptr::null_mut(),
            0,
        );
        if ret != ESP_OK as i32 {
            return Err(HwInitError::UartInitFailed(ret));
        }
        let ret = uart_param_config(port, &cfg);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::UartInitFailed(ret));
        }
        let ret = uart_set_pin(port, pins::UART_TX_GPIO, pins::UART_RX_GPIO, -1, -1);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::UartInitFailed(ret));
        }
    }
    info!("hw_init: UART{} console at {} baud", port, baud);
    Ok(())
}

/// One byte if already received, without waiting.
#[cfg(target_os = "espidf")]
pub fn uart_try_read(port: i32) -> Option<u8> {
    let mut byte = 0u8;
    // SAFETY: the UART driver was installed in init_uart(); the buffer is a
    // valid one-byte destination.
    let n = unsafe { uart_read_bytes(port, (&raw mut byte).cast(), 1, 0) };
    (n == 1).then_some(byte)
}

/// Fill `buf`, waiting as long as it takes.
#[cfg(target_os = "espidf")]
pub fn uart_read_blocking(port: i32, buf: &mut [u8]) {
    let mut filled = 0;
    while filled < buf.len() {
        let rest = &mut buf[filled..];
        // SAFETY: `rest` is a valid writable region of `rest.len()` bytes.
        let n = unsafe { uart_read_bytes(port, rest.as_mut_ptr().cast(), rest.len() as u32, BLOCK) };
        if n > 0 {
            filled += n as usize;
        }
    }
}

#[cfg(target_os = "espidf")]
pub fn uart_write(port: i32, bytes: &[u8]) {
    // SAFETY: `bytes` is a valid readable region; the driver copies it into
    // its TX path before returning.
    unsafe {
        uart_write_bytes(port, bytes.as_ptr().cast(), bytes.len());
    }
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
pub use sim::*;

#[cfg(not(target_os = "espidf"))]
mod sim {
    use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    use crate::keypad::position_of;
    use crate::pins;

    const GPIO_COUNT: usize = 49;

    static LEVELS: [AtomicBool; GPIO_COUNT] = [const { AtomicBool::new(false) }; GPIO_COUNT];
    static OUTPUT_ENABLED: [AtomicBool; GPIO_COUNT] =
        [const { AtomicBool::new(false) }; GPIO_COUNT];
    /// Key physically held on the simulated keypad (`0` = none).
    static HELD_KEY: AtomicU32 = AtomicU32::new(0);

    fn slot(pin: i32) -> Option<usize> {
        usize::try_from(pin).ok().filter(|&p| p < GPIO_COUNT)
    }

    /// Keypad columns follow the held key and the row levels; every other
    /// pin reads back its last written level.
    pub fn gpio_read(pin: i32) -> bool {
        if let Some(col) = pins::KEYPAD_COL_GPIOS.iter().position(|&p| p == pin) {
            let held = char::from_u32(HELD_KEY.load(Ordering::Relaxed)).and_then(position_of);
            return match held {
                Some((row, c)) if c == col => gpio_read(pins::KEYPAD_ROW_GPIOS[row]),
                _ => true,
            };
        }
        slot(pin).is_some_and(|p| LEVELS[p].load(Ordering::Relaxed))
    }

    pub fn gpio_write(pin: i32, high: bool) {
        if let Some(p) = slot(pin) {
            LEVELS[p].store(high, Ordering::Relaxed);
        }
    }

    pub fn gpio_set_output_enabled(pin: i32, enabled: bool) {
        if let Some(p) = slot(pin) {
            OUTPUT_ENABLED[p].store(enabled, Ordering::Relaxed);
        }
    }

    pub fn sim_output_enabled(pin: i32) -> bool {
        slot(pin).is_some_and(|p| OUTPUT_ENABLED[p].load(Ordering::Relaxed))
    }

    pub fn sim_hold_key(key: Option<char>) {
        HELD_KEY.store(key.map_or(0, u32::from), Ordering::Relaxed);
    }
}
