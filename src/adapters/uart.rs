//! UART console adapter.
//!
//! - **`target_os = "espidf"`**: the UART driver installed by `hw_init`.
//! - **`not(target_os = "espidf")`**: in-memory queues. Input is fed with
//!   [`UartConsole::push_input`]; output is collected for inspection. An
//!   exhausted input queue reads as NUL bytes instead of blocking.

use crate::app::ports::ConsolePort;

pub struct UartConsole {
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    port: i32,
    #[cfg(not(target_os = "espidf"))]
    rx: std::collections::VecDeque<u8>,
    #[cfg(not(target_os = "espidf"))]
    tx: Vec<u8>,
}

impl UartConsole {
    pub fn new(port: i32) -> Self {
        Self {
            port,
            #[cfg(not(target_os = "espidf"))]
            rx: std::collections::VecDeque::new(),
            #[cfg(not(target_os = "espidf"))]
            tx: Vec::new(),
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn push_input(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }

    /// Drain everything written so far.
    #[cfg(not(target_os = "espidf"))]
    pub fn take_output(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.tx)
    }
}

#[cfg(target_os = "espidf")]
impl ConsolePort for UartConsole {
    fn poll_byte(&mut self) -> Option<u8> {
        crate::drivers::hw_init::uart_try_read(self.port)
    }

    fn read_exact(&mut self, buf: &mut [u8]) {
        crate::drivers::hw_init::uart_read_blocking(self.port, buf);
    }

    fn write(&mut self, bytes: &[u8]) {
        crate::drivers::hw_init::uart_write(self.port, bytes);
    }
}

#[cfg(not(target_os = "espidf"))]
impl ConsolePort for UartConsole {
    fn poll_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    fn read_exact(&mut self, buf: &mut [u8]) {
        for slot in buf.iter_mut() {
            *slot = self.rx.pop_front().unwrap_or(0);
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        self.tx.extend_from_slice(bytes);
    }
}
