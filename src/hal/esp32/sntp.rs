//! SNTP wall-time synchronization.
//!
//! The clock face is only worth lighting once wall time is known, so the
//! wifi bring-up treats a completed SNTP sync as part of "connected".
//! Time servers default to the JST pool the panel originally shipped
//! against; the timezone string comes from [`ClockConfig`].

use anyhow::Result;
use esp_idf_svc::sntp::{EspSntp, SntpConf};

use crate::config::ClockConfig;

/// Time servers queried for wall time, in preference order.
pub const NTP_SERVERS: [&str; 2] = ["ntp.nict.jp", "ntp.jst.mfeed.ad.jp"];

/// Applies the configured timezone and starts the SNTP service.
///
/// Returns the service handle; dropping it stops synchronization, so the
/// caller keeps it alive for the life of the firmware. The sync itself
/// completes in the background once the network interface is up - poll
/// [`EspSntp::get_sync_status`] to find out when.
pub fn start(config: &ClockConfig) -> Result<EspSntp<'static>> {
    set_timezone(config.timezone.as_str())?;

    let mut conf = SntpConf::default();
    for (slot, server) in conf.servers.iter_mut().zip(NTP_SERVERS.iter()) {
        *slot = server;
    }

    let sntp = EspSntp::new(&conf)?;
    println!("[SNTP] Started, timezone '{}'", config.timezone);
    Ok(sntp)
}

/// Sets the TZ environment variable and re-reads it into newlib.
fn set_timezone(tz: &str) -> Result<()> {
    let value = std::ffi::CString::new(tz)?;
    // Safe: setenv copies the string and tzset only re-reads the
    // environment we just wrote.
    unsafe {
        esp_idf_hal::sys::setenv(b"TZ\0".as_ptr().cast(), value.as_ptr(), 1);
        esp_idf_hal::sys::tzset();
    }
    Ok(())
}
