//! Shared configuration system for desktop and ESP32.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! # Example
//!
//! ```rust
//! use rs_matrixclock::config::{ClockConfig, Config, SensorConfig};
//!
//! // Use defaults
//! let config = Config::default();
//!
//! // Or customize
//! let config = Config::default()
//!     .with_clock(ClockConfig::default().with_window(7, 22))
//!     .with_sensor(SensorConfig::default().with_url("http://192.168.10.31/"));
//! ```

use heapless::String as HString;

/// Maximum length for short config strings (SSIDs, addresses, time zones)
pub const MAX_SHORT_STRING: usize = 64;

/// Maximum length for longer config strings (URLs)
pub const MAX_LONG_STRING: usize = 128;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Type alias for longer config strings
pub type LongString = HString<MAX_LONG_STRING>;

// ============================================================================
// Helper for creating heapless strings
// ============================================================================

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    // Take only what fits
    let take = s.len().min(MAX_SHORT_STRING);
    // Find valid UTF-8 boundary
    let valid_end = s
        .char_indices()
        .take_while(|(i, _)| *i < take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

/// Create a LongString from a &str, truncating if too long
pub fn long_string(s: &str) -> LongString {
    let mut hs = LongString::new();
    let take = s.len().min(MAX_LONG_STRING);
    let valid_end = s
        .char_indices()
        .take_while(|(i, _)| *i < take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// WiFi connection configuration
    pub wifi: WifiConfig,
    /// Clock face and display window configuration
    pub clock: ClockConfig,
    /// Sensor gateway polling configuration
    pub sensor: SensorConfig,
    /// Render timing configuration
    pub display: DisplayConfig,
}

impl Config {
    /// Set WiFi configuration
    pub fn with_wifi(mut self, wifi: WifiConfig) -> Self {
        self.wifi = wifi;
        self
    }

    /// Set clock configuration
    pub fn with_clock(mut self, clock: ClockConfig) -> Self {
        self.clock = clock;
        self
    }

    /// Set sensor configuration
    pub fn with_sensor(mut self, sensor: SensorConfig) -> Self {
        self.sensor = sensor;
        self
    }

    /// Set display configuration
    pub fn with_display(mut self, display: DisplayConfig) -> Self {
        self.display = display;
        self
    }
}

// ============================================================================
// Clock Config
// ============================================================================

/// Clock face and display window configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockConfig {
    /// Hour the display window opens (inclusive)
    pub start_hour: u8,
    /// Hour the display window closes (exclusive)
    pub end_hour: u8,
    /// Clock face refresh period in milliseconds
    pub tick_ms: u32,
    /// Display window re-check period in seconds
    pub check_secs: u32,
    /// POSIX TZ string used when syncing wall time
    pub timezone: ShortString,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            start_hour: 6,
            end_hour: 23,
            tick_ms: 500,
            check_secs: 60,
            timezone: short_string("JST-9"),
        }
    }
}

impl ClockConfig {
    /// Set the display window hours (half-open, `start..end`)
    pub fn with_window(mut self, start_hour: u8, end_hour: u8) -> Self {
        self.start_hour = start_hour.min(23);
        self.end_hour = end_hour.min(24);
        self
    }

    /// Set the clock refresh period
    pub fn with_tick_ms(mut self, ms: u32) -> Self {
        self.tick_ms = ms;
        self
    }

    /// Set the window re-check period
    pub fn with_check_secs(mut self, secs: u32) -> Self {
        self.check_secs = secs;
        self
    }

    /// Set the POSIX TZ string
    pub fn with_timezone(mut self, tz: &str) -> Self {
        self.timezone = short_string(tz);
        self
    }
}

// ============================================================================
// Sensor Config
// ============================================================================

/// Sensor gateway polling configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorConfig {
    /// Gateway URL returning the sensor JSON
    pub url: LongString,
    /// Poll period in seconds
    pub poll_secs: u32,
    /// Fetch attempts per poll before giving up (including the first)
    pub max_attempts: u8,
    /// Delay between fetch attempts in milliseconds
    pub retry_backoff_ms: u32,
    /// How long each readout stays on the glass, in milliseconds
    pub hold_ms: u32,
    /// Whether sensor polling is enabled
    pub enabled: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            url: LongString::new(),
            poll_secs: 60,
            max_attempts: 2,
            retry_backoff_ms: 500,
            hold_ms: 3000,
            enabled: true,
        }
    }
}

impl SensorConfig {
    /// Set the gateway URL
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = long_string(url);
        self
    }

    /// Set the poll period
    pub fn with_poll_secs(mut self, secs: u32) -> Self {
        self.poll_secs = secs;
        self
    }

    /// Set the attempt limit per poll
    pub fn with_max_attempts(mut self, attempts: u8) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Set the delay between attempts
    pub fn with_retry_backoff_ms(mut self, ms: u32) -> Self {
        self.retry_backoff_ms = ms;
        self
    }

    /// Set the readout hold duration
    pub fn with_hold_ms(mut self, ms: u32) -> Self {
        self.hold_ms = ms;
        self
    }

    /// Enable or disable sensor polling
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Check if a gateway URL is configured
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty()
    }
}

// ============================================================================
// Display Config
// ============================================================================

/// Render timing configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayConfig {
    /// Delay between scroll steps in milliseconds
    pub scroll_interval_ms: u32,
    /// Startup banner blink period in milliseconds
    pub blink_ms: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            scroll_interval_ms: 30,
            blink_ms: 500,
        }
    }
}

impl DisplayConfig {
    /// Set the scroll step delay
    pub fn with_scroll_interval_ms(mut self, ms: u32) -> Self {
        self.scroll_interval_ms = ms;
        self
    }

    /// Set the blink period
    pub fn with_blink_ms(mut self, ms: u32) -> Self {
        self.blink_ms = ms;
        self
    }
}

// ============================================================================
// WiFi Config
// ============================================================================

/// WiFi connection configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WifiConfig {
    /// WiFi network SSID
    pub ssid: ShortString,
    /// WiFi password
    pub password: ShortString,
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u32,
    /// Whether WiFi is enabled
    pub enabled: bool,
    /// Maximum connection retry attempts (0 = unlimited)
    pub max_retries: u8,
}

impl Default for WifiConfig {
    fn default() -> Self {
        Self {
            ssid: ShortString::new(),
            password: ShortString::new(),
            connect_timeout_ms: 30_000,
            enabled: true,
            max_retries: 5,
        }
    }
}

impl WifiConfig {
    /// Set the SSID
    pub fn with_ssid(mut self, ssid: &str) -> Self {
        self.ssid = short_string(ssid);
        self
    }

    /// Set the password
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = short_string(password);
        self
    }

    /// Set the connection timeout
    pub fn with_connect_timeout_ms(mut self, ms: u32) -> Self {
        self.connect_timeout_ms = ms;
        self
    }

    /// Enable or disable WiFi
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the maximum retry count
    pub fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Check if WiFi credentials are configured
    pub fn is_configured(&self) -> bool {
        !self.ssid.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
