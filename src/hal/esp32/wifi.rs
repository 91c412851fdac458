//! WiFi connection management for the panel firmware.
//!
//! Provides station mode connection using esp-idf-svc. Unlike a blocking
//! bring-up, association runs in the background: the scheduler keeps
//! blinking the init banner and polls [`Connectivity::is_connected`]
//! until both the interface and wall time are ready.
//!
//! # Example
//!
//! ```ignore
//! use rs_matrixclock::hal::esp32::Esp32Wifi;
//! use rs_matrixclock::config::{ClockConfig, WifiConfig};
//!
//! let config = WifiConfig::default()
//!     .with_ssid("MyNetwork")
//!     .with_password("secret123");
//!
//! let wifi = Esp32Wifi::new(modem, sysloop, nvs, &config, &ClockConfig::default())?;
//! // Association is now in progress; poll until connected
//! while !wifi.is_connected() { /* keep blinking */ }
//! println!("IP: {:?}", wifi.ip_addr());
//! ```

use core::fmt::Write;
use std::net::Ipv4Addr;

use esp_idf_hal::modem::Modem;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::sntp::{EspSntp, SyncStatus};
use esp_idf_svc::wifi::{ClientConfiguration, Configuration, EspWifi};

use super::sntp;
use crate::config::{ClockConfig, ShortString, WifiConfig};
use crate::traits::Connectivity;

/// WiFi connection manager for ESP32.
///
/// Owns the station driver and the SNTP service together: the panel only
/// counts as connected once it has an address and synced wall time, since
/// the first thing shown after the banner is the clock face.
pub struct Esp32Wifi<'a> {
    wifi: EspWifi<'a>,
    sntp: EspSntp<'static>,
}

impl<'a> Esp32Wifi<'a> {
    /// Starts the station and kicks off association and time sync.
    ///
    /// This will:
    /// 1. Initialize the WiFi driver
    /// 2. Configure station mode with the provided credentials
    /// 3. Begin connecting to the access point (without waiting)
    /// 4. Start the SNTP service with the configured timezone
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - WiFi initialization fails
    /// - The credentials cannot be applied
    /// - The SNTP service cannot start
    pub fn new(
        modem: Modem,
        sysloop: EspSystemEventLoop,
        nvs: Option<EspDefaultNvsPartition>,
        config: &WifiConfig,
        clock_config: &ClockConfig,
    ) -> anyhow::Result<Self> {
        let mut wifi = EspWifi::new(modem, sysloop, nvs)?;

        // Configure station mode
        let ssid = config.ssid.as_str();
        let password = config.password.as_str();

        // Create heapless strings for esp-idf
        let mut ssid_buf: heapless::String<32> = heapless::String::new();
        let _ = ssid_buf.push_str(ssid);

        let mut pass_buf: heapless::String<64> = heapless::String::new();
        let _ = pass_buf.push_str(password);

        wifi.set_configuration(&Configuration::Client(ClientConfiguration {
            ssid: ssid_buf,
            password: pass_buf,
            ..Default::default()
        }))?;

        println!("[WiFi] Starting...");
        wifi.start()?;

        println!("[WiFi] Connecting to '{}'...", ssid);
        wifi.connect()?;

        let sntp = sntp::start(clock_config)?;

        Ok(Self { wifi, sntp })
    }

    /// Get the current IP address, if the interface is up.
    pub fn ip_addr(&self) -> Option<Ipv4Addr> {
        self.wifi
            .sta_netif()
            .get_ip_info()
            .ok()
            .map(|info| info.ip)
            .filter(|ip| !ip.is_unspecified())
    }

    /// Check if wall time has been synced.
    pub fn is_time_synced(&self) -> bool {
        self.sntp.get_sync_status() == SyncStatus::Completed
    }

    /// Disconnect from the current network.
    pub fn disconnect(&mut self) -> anyhow::Result<()> {
        self.wifi.disconnect()?;
        Ok(())
    }

    /// Get the underlying WiFi driver for advanced operations.
    pub fn driver(&self) -> &EspWifi<'a> {
        &self.wifi
    }

    /// Get mutable access to the underlying WiFi driver.
    pub fn driver_mut(&mut self) -> &mut EspWifi<'a> {
        &mut self.wifi
    }
}

impl Connectivity for Esp32Wifi<'_> {
    /// Up means an address is assigned and wall time is synced.
    fn is_connected(&self) -> bool {
        self.wifi.is_up().unwrap_or(false) && self.is_time_synced()
    }

    fn address(&self) -> Option<ShortString> {
        self.ip_addr().map(|ip| {
            let mut text = ShortString::new();
            let _ = write!(text, "{}", ip);
            text
        })
    }
}
