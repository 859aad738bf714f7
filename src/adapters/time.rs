//! Monotonic time adapter.
//!
//! - **`target_os = "espidf"`** — wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic);
//!   busy-waits use `esp_rom_delay_us`.
//! - **`not(target_os = "espidf")`** — uses `std::time::Instant` for
//!   host-side testing and simulation.
//!
//! Implements the decoder's [`MicrosClock`] so the same driver runs against
//! hardware and the simulated loop.

use crate::sensors::MicrosClock;

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

    /// Microseconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    pub fn uptime_us(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    /// Microseconds since boot (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }

    /// Milliseconds since boot, truncated to u32 (wraps after ~49 days —
    /// the touch debounce arithmetic uses wrapping subtraction).
    pub fn uptime_ms(&self) -> u32 {
        (self.uptime_us() / 1000) as u32
    }
}

impl MicrosClock for MonotonicClock {
    fn now_us(&self) -> u64 {
        self.uptime_us()
    }

    #[cfg(target_os = "espidf")]
    fn delay_us(&mut self, us: u32) {
        // Busy-wait: the decoder's poll cadence is 1 µs, far below the
        // FreeRTOS tick, so a blocking ROM delay is the only option.
        unsafe { esp_idf_svc::sys::esp_rom_delay_us(us) };
    }

    #[cfg(not(target_os = "espidf"))]
    fn delay_us(&mut self, us: u32) {
        let deadline = self.uptime_us() + u64::from(us);
        while self.uptime_us() < deadline {
            std::hint::spin_loop();
        }
    }
}
