//! Monotonic clock adapter.
//!
//! - **`target_os = "espidf"`**: wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic).
//! - **`not(target_os = "espidf")`**: uses `std::time::Instant` for
//!   host-side testing and simulation.
//!
//! Also the blocking [`DelayNs`] used by the boot announce.

use embedded_hal::delay::DelayNs;

pub struct MonotonicClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Microseconds since boot.
    #[cfg(target_os = "espidf")]
    pub fn uptime_us(&self) -> u64 {
        // SAFETY: reads the free-running esp_timer counter.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    /// Microseconds since the clock was created.
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }

    /// Milliseconds since boot; the `now_ms` of every loop tick.
    pub fn uptime_ms(&self) -> u64 {
        self.uptime_us() / 1_000
    }

    /// Yield the CPU for `ms` so lower-priority tasks (idle, logger) run.
    #[cfg(target_os = "espidf")]
    pub fn pause(&self, ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn pause(&self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}

impl DelayNs for MonotonicClock {
    fn delay_ns(&mut self, ns: u32) {
        let end = self.uptime_us() + u64::from(ns).div_ceil(1_000);
        while self.uptime_us() < end {
            core::hint::spin_loop();
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        self.pause(ms);
    }
}
