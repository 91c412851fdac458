//! Connectivity trait for the link-state banner flow.
//!
//! The scheduler blinks an init banner while the network comes up, then
//! scrolls the station address once and never looks at the link again. That
//! narrow view is all this trait exposes; credentials, reconnection, and
//! provisioning stay inside the implementation.

use crate::config::ShortString;

/// Connectivity trait - reports link state and the station address.
///
/// Implemented by the ESP32 WiFi wrapper (feature `wifi`) and by
/// [`MockConnectivity`](crate::hal::MockConnectivity) for tests.
pub trait Connectivity {
    /// Returns true once the link is up.
    fn is_connected(&self) -> bool;

    /// Returns the station address as text, if the link is up.
    ///
    /// Shown once in the connected banner. `None` while disconnected.
    fn address(&self) -> Option<ShortString>;
}

/// Absent connectivity reports offline.
///
/// Lets builds without a radio hand the scheduler `None` instead of a
/// dedicated stub type.
impl<T: Connectivity> Connectivity for Option<T> {
    fn is_connected(&self) -> bool {
        self.as_ref().map(T::is_connected).unwrap_or(false)
    }

    fn address(&self) -> Option<ShortString> {
        self.as_ref().and_then(T::address)
    }
}

/// Connectivity that never comes up.
///
/// Stands in on builds with no network so the clock can still run from
/// the local timer.
pub struct Offline;

impl Connectivity for Offline {
    fn is_connected(&self) -> bool {
        false
    }

    fn address(&self) -> Option<ShortString> {
        None
    }
}
