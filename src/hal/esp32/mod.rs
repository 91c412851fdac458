//! ESP32 hardware abstraction layer for the bicolor matrix panel.
//!
//! This module provides hardware implementations for an ESP32 DevKit board
//! driving a chain of bicolor LED dot-matrix units over an eleven-line
//! parallel bus.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32 DevKit (Xtensa dual-core 240MHz, 4MB Flash)
//! - **Panel**: cascaded 16-row bicolor dot-matrix units, shift-register input
//! - **Lamp**: cabinet backlight relay, switched with the display window
//! - **Sensor**: BME280 behind a small HTTP gateway (feature `sensor-http`)
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for the GPIO wiring this firmware assumes.

mod bus;
mod clock;

pub use bus::{panel_bus, Esp32Bus};
pub use clock::{Esp32Clock, Esp32Delay};

#[cfg(feature = "wifi")]
pub mod sntp;

#[cfg(feature = "wifi")]
mod wifi;
#[cfg(feature = "wifi")]
pub use wifi::Esp32Wifi;

#[cfg(feature = "sensor-http")]
mod sensor;
#[cfg(feature = "sensor-http")]
pub use sensor::HttpSensor;

/// Pin assignments for the ESP32 DevKit wiring.
///
/// These constants match the panel harness:
/// - Row address and strobes on GPIO16-19, 21-23, 25
/// - Color data on GPIO26-27
/// - Mode and lamp on GPIO32-33
pub mod pins {
    // =========================================================================
    // Row Address
    // =========================================================================

    /// Row address bit 0
    pub const ROW_A0: i32 = 16;

    /// Row address bit 1
    pub const ROW_A1: i32 = 17;

    /// Row address bit 2
    pub const ROW_A2: i32 = 18;

    /// Row address bit 3
    pub const ROW_A3: i32 = 19;

    // =========================================================================
    // Strobes
    // =========================================================================

    /// Bank select - which of the two framebuffers the glass shows
    pub const BANK: i32 = 21;

    /// Shift register clock, rising edge advances the column chain
    pub const DATA_CLOCK: i32 = 22;

    /// Row write strobe, pulsed after the address is latched
    pub const WRITE_ENABLE: i32 = 23;

    /// Address latch, held high around the write strobe
    pub const ADDRESS_LATCH: i32 = 25;

    // =========================================================================
    // Color Data
    // =========================================================================

    /// Red plane serial data
    pub const RED_DATA: i32 = 26;

    /// Green plane serial data
    pub const GREEN_DATA: i32 = 27;

    // =========================================================================
    // Mode and Lamp
    // =========================================================================

    /// Panel mode select, held high for serial input
    pub const MODE: i32 = 32;

    /// Cabinet backlight relay, on while the display window is open
    pub const LAMP: i32 = 33;
}
