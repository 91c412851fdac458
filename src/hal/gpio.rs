//! Panel bus over generic `embedded-hal` output pins.
//!
//! [`GpioPanelBus`] adapts eleven digital output pins to the [`PanelBus`]
//! line interface. Pin errors are discarded: the panel lines are plain
//! push-pull outputs with no readback, and the bus contract has no failure
//! channel.

use embedded_hal::digital::{OutputPin, PinState};

use crate::traits::{Level, Line, PanelBus};

/// A [`PanelBus`] wired to eleven output pins of one GPIO flavor.
///
/// The type parameter is typically a platform pin driver (for example an
/// `esp-idf-hal` `PinDriver` over `AnyOutputPin`), but anything
/// implementing [`OutputPin`] works, which keeps the render engine portable
/// across chips.
pub struct GpioPanelBus<P: OutputPin> {
    a0: P,
    a1: P,
    a2: P,
    a3: P,
    bank: P,
    data_clock: P,
    write_enable: P,
    address_latch: P,
    red: P,
    green: P,
    mode: P,
}

impl<P: OutputPin> GpioPanelBus<P> {
    /// Bundle eleven pins into a panel bus.
    ///
    /// Arguments follow [`Line::ALL`] order.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        a0: P,
        a1: P,
        a2: P,
        a3: P,
        bank: P,
        data_clock: P,
        write_enable: P,
        address_latch: P,
        red: P,
        green: P,
        mode: P,
    ) -> Self {
        Self {
            a0,
            a1,
            a2,
            a3,
            bank,
            data_clock,
            write_enable,
            address_latch,
            red,
            green,
            mode,
        }
    }

    fn pin_mut(&mut self, line: Line) -> &mut P {
        match line {
            Line::A0 => &mut self.a0,
            Line::A1 => &mut self.a1,
            Line::A2 => &mut self.a2,
            Line::A3 => &mut self.a3,
            Line::Bank => &mut self.bank,
            Line::DataClock => &mut self.data_clock,
            Line::WriteEnable => &mut self.write_enable,
            Line::AddressLatch => &mut self.address_latch,
            Line::Red => &mut self.red,
            Line::Green => &mut self.green,
            Line::Mode => &mut self.mode,
        }
    }
}

impl<P: OutputPin> PanelBus for GpioPanelBus<P> {
    fn set_line(&mut self, line: Line, level: Level) {
        let state = if level.is_high() {
            PinState::High
        } else {
            PinState::Low
        };
        let _ = self.pin_mut(line).set_state(state);
    }
}
