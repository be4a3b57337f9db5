//! Wall-clock adapter.
//!
//! - **`target_os = "espidf"`**: wraps libc `gettimeofday`/`settimeofday`.
//!   The clock starts at the epoch on every boot until set from the console.
//! - **`not(target_os = "espidf")`**: the host clock plus an offset, so
//!   setting it never touches the host.

use crate::app::ports::ClockPort;

pub struct RtcClock {
    #[cfg(not(target_os = "espidf"))]
    offset_secs: i64,
}

impl Default for RtcClock {
    fn default() -> Self {
        Self::new()
    }
}

impl RtcClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            offset_secs: 0,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn host_secs() -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_secs() as i64)
    }
}

#[cfg(target_os = "espidf")]
impl ClockPort for RtcClock {
    fn now(&self) -> i64 {
        let mut tv = esp_idf_svc::sys::timeval {
            tv_sec: 0,
            tv_usec: 0,
        };
        // SAFETY: tv is a valid out-pointer; a null timezone is allowed.
        if unsafe { esp_idf_svc::sys::gettimeofday(&mut tv, core::ptr::null_mut()) } != 0 {
            return 0;
        }
        tv.tv_sec as i64
    }

    fn set(&mut self, epoch_secs: i64) {
        let tv = esp_idf_svc::sys::timeval {
            tv_sec: epoch_secs as esp_idf_svc::sys::time_t,
            tv_usec: 0,
        };
        // SAFETY: tv outlives the call; a null timezone is allowed.
        if unsafe { esp_idf_svc::sys::settimeofday(&tv, core::ptr::null()) } != 0 {
            log::warn!("RtcClock: settimeofday failed");
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl ClockPort for RtcClock {
    fn now(&self) -> i64 {
        Self::host_secs() + self.offset_secs
    }

    fn set(&mut self, epoch_secs: i64) {
        self.offset_secs = epoch_secs - Self::host_secs();
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn set_moves_now() {
        let mut clock = RtcClock::new();
        clock.set(1_709_251_198);
        let now = clock.now();
        assert!((1_709_251_198..1_709_251_198 + 5).contains(&now));
    }
}
