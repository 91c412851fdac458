//! ESP32 clock and delay implementations using ESP-IDF services.

use esp_idf_hal::delay::FreeRtos;

use crate::traits::{Clock, Delay, TimeOfDay};

/// ESP32 clock using the hardware timer and the system wall time.
///
/// Millisecond timing comes from the ESP-IDF `esp_timer_get_time()`
/// function, which returns microseconds since boot. Wall time comes from
/// the newlib `time`/`localtime_r` pair and honors the TZ variable set
/// during SNTP bring-up.
///
/// # Example
///
/// ```ignore
/// use rs_matrixclock::hal::esp32::Esp32Clock;
/// use rs_matrixclock::traits::Clock;
///
/// let clock = Esp32Clock::new();
/// let start = clock.now_ms();
/// // ... do work ...
/// let elapsed = clock.now_ms() - start;
/// ```
pub struct Esp32Clock;

impl Esp32Clock {
    /// Creates a new ESP32 clock instance.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Esp32Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for Esp32Clock {
    #[inline]
    fn now_ms(&self) -> u64 {
        // esp_timer_get_time returns microseconds since boot
        // Safe: this is a simple read of the hardware timer, no side effects
        let micros = unsafe { esp_idf_hal::sys::esp_timer_get_time() };
        (micros / 1000) as u64
    }

    fn time_of_day(&self) -> TimeOfDay {
        // Safe: plain newlib time conversion; localtime_r writes only into
        // the tm we hand it.
        unsafe {
            let now = esp_idf_hal::sys::time(core::ptr::null_mut());
            let mut tm: esp_idf_hal::sys::tm = core::mem::zeroed();
            esp_idf_hal::sys::localtime_r(&now, &mut tm);
            TimeOfDay::new(tm.tm_hour as u8, tm.tm_min as u8, tm.tm_sec as u8)
        }
    }
}

/// Blocking delay backed by the FreeRTOS tick sleep.
///
/// Used both for scroll pacing inside the render engine and for the
/// readout holds in the scheduler.
pub struct Esp32Delay;

impl Esp32Delay {
    /// Creates a new delay instance.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Esp32Delay {
    fn default() -> Self {
        Self::new()
    }
}

impl Delay for Esp32Delay {
    #[inline]
    fn delay_ms(&mut self, ms: u32) {
        FreeRtos::delay_ms(ms);
    }
}
