//! Panel bus wiring over ESP-IDF GPIO pin drivers.

use anyhow::Result;
use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};

use crate::hal::gpio::GpioPanelBus;

/// Panel bus driving the eleven control lines through ESP32 GPIOs.
///
/// The pin drivers implement the `embedded-hal` output pin trait, so the
/// generic [`GpioPanelBus`] does all the actual line work.
pub type Esp32Bus<'d> = GpioPanelBus<PinDriver<'d, AnyOutputPin, Output>>;

/// Claims the eleven panel GPIOs and builds the bus.
///
/// Pins are taken in line order: row address bits first, then bank
/// select, the three strobes, the two color data lines and finally the
/// mode line. See [`super::pins`] for the wiring this firmware assumes.
#[allow(clippy::too_many_arguments)]
pub fn panel_bus(
    a0: AnyOutputPin,
    a1: AnyOutputPin,
    a2: AnyOutputPin,
    a3: AnyOutputPin,
    bank: AnyOutputPin,
    data_clock: AnyOutputPin,
    write_enable: AnyOutputPin,
    address_latch: AnyOutputPin,
    red: AnyOutputPin,
    green: AnyOutputPin,
    mode: AnyOutputPin,
) -> Result<Esp32Bus<'static>> {
    Ok(GpioPanelBus::new(
        PinDriver::output(a0)?,
        PinDriver::output(a1)?,
        PinDriver::output(a2)?,
        PinDriver::output(a3)?,
        PinDriver::output(bank)?,
        PinDriver::output(data_clock)?,
        PinDriver::output(write_enable)?,
        PinDriver::output(address_latch)?,
        PinDriver::output(red)?,
        PinDriver::output(green)?,
        PinDriver::output(mode)?,
    ))
}
