//! Hardware abstraction traits for the panel bus, time, and delays.
//!
//! This module defines the core hardware interfaces that allow the display
//! engine to work across different platforms (ESP32, desktop mocks, etc.).
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`PanelBus`] | The 11 logical control lines of the panel chain |
//! | [`Clock`] | Monotonic milliseconds plus local wall time |
//! | [`Delay`] | Blocking delay for scroll pacing and readout holds |
//!
//! # Panel lines
//!
//! The cascaded panels are driven entirely through level changes on eleven
//! lines:
//!
//! | Line | Role |
//! |------|------|
//! | [`A0`]..[`A3`] | 4-bit row address (16 rows) |
//! | [`Bank`] | Selects which of the two row buffers is displayed |
//! | [`DataClock`] | Shifts one column bit into the row register |
//! | [`WriteEnable`] | Commits the shifted row to the addressed row memory |
//! | [`AddressLatch`] | Frames the row-address write |
//! | [`Red`], [`Green`] | Color plane data for the bit being clocked |
//! | [`Mode`] | High selects manual row addressing |
//!
//! [`A0`]: Line::A0
//! [`A3`]: Line::A3
//! [`Bank`]: Line::Bank
//! [`DataClock`]: Line::DataClock
//! [`WriteEnable`]: Line::WriteEnable
//! [`AddressLatch`]: Line::AddressLatch
//! [`Red`]: Line::Red
//! [`Green`]: Line::Green
//! [`Mode`]: Line::Mode
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations from
//! [`crate::hal::mock`]. For ESP32 hardware, use the implementations from
//! `hal::esp32` (requires `esp32` feature).

/// A logical control line of the panel chain.
///
/// The panels expose no other interface; every frame, scroll step, and blank
/// is expressed as a sequence of level changes on these lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Line {
    /// Row address bit 0 (least significant).
    A0,
    /// Row address bit 1.
    A1,
    /// Row address bit 2.
    A2,
    /// Row address bit 3 (most significant).
    A3,
    /// Display buffer select. The engine writes into the hidden buffer and
    /// toggles this once per completed frame.
    Bank,
    /// Shift clock for column data. One rising edge per column bit.
    DataClock,
    /// Write strobe that commits the shifted row into row memory.
    WriteEnable,
    /// Latch framing the row-address write. Raised before the write strobe,
    /// dropped after.
    AddressLatch,
    /// Red color plane data line.
    Red,
    /// Green color plane data line.
    Green,
    /// Addressing mode. Held high for manual row addressing.
    Mode,
}

impl Line {
    /// The row-address lines in bit order, least significant first.
    pub const ADDRESS: [Line; 4] = [Line::A0, Line::A1, Line::A2, Line::A3];

    /// All eleven lines, in no particular order. Useful for bus init.
    pub const ALL: [Line; 11] = [
        Line::A0,
        Line::A1,
        Line::A2,
        Line::A3,
        Line::Bank,
        Line::DataClock,
        Line::WriteEnable,
        Line::AddressLatch,
        Line::Red,
        Line::Green,
        Line::Mode,
    ];
}

/// Voltage level of a panel line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Level {
    /// Logic low.
    #[default]
    Low,
    /// Logic high.
    High,
}

impl Level {
    /// Returns true for [`High`](Self::High).
    #[inline]
    pub const fn is_high(&self) -> bool {
        matches!(self, Level::High)
    }
}

impl From<bool> for Level {
    #[inline]
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Panel bus trait - abstracts the bit-banged control lines.
///
/// Implement this trait for your GPIO layer. The render engine owns the bus
/// exclusively and drives the full write protocol through it; implementations
/// only need to translate [`Line`] to a concrete pin.
///
/// # No error channel
///
/// Line writes are fire-and-forget. A failed GPIO write mid-frame leaves
/// nothing for the engine to recover; misconfigured pins show up as garbage
/// on the glass, not as a `Result`. Implementations over fallible pin types
/// discard the error.
///
/// # Example Implementation
///
/// ```rust
/// use rs_matrixclock::traits::{Level, Line, PanelBus};
///
/// struct TraceBus;
///
/// impl PanelBus for TraceBus {
///     fn set_line(&mut self, line: Line, level: Level) {
///         println!("{:?} <- {:?}", line, level);
///     }
/// }
/// ```
pub trait PanelBus {
    /// Drive a line to the given level.
    fn set_line(&mut self, line: Line, level: Level);

    /// Strobe a line high then low.
    ///
    /// Hardware implementations may insert a settle delay between the two
    /// edges if the GPIO layer outruns the panel's minimum pulse width.
    fn pulse(&mut self, line: Line) {
        self.set_line(line, Level::High);
        self.set_line(line, Level::Low);
    }
}

/// Local wall-clock time of day.
///
/// Produced by [`Clock::time_of_day`] and consumed by the clock face and the
/// display window check. No date component; the panels only ever show time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeOfDay {
    /// Hour, 0-23.
    pub hour: u8,
    /// Minute, 0-59.
    pub minute: u8,
    /// Second, 0-59.
    pub second: u8,
}

impl TimeOfDay {
    /// Creates a time of day. Values are taken as-is; callers are expected
    /// to pass calendar-valid components.
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }
}

/// Time source trait.
///
/// Provides monotonic milliseconds for the scheduler's tickers and local
/// wall time for the clock face. On desktop the mock is settable; on ESP32
/// this wraps the high-resolution timer and the libc local time.
///
/// # Example
///
/// ```rust
/// use rs_matrixclock::traits::Clock;
/// use rs_matrixclock::hal::MockClock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance(100);
/// assert_eq!(clock.now_ms(), 100);
/// ```
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_ms(&self) -> u64;

    /// Returns the current local time of day.
    fn time_of_day(&self) -> TimeOfDay;
}

/// Blocking delay trait.
///
/// The display deliberately blocks while scrolling (the delay between scroll
/// steps is the scroll speed) and while holding a sensor readout on the
/// glass. On ESP32 this wraps the FreeRTOS delay; the mock records requested
/// durations instead of sleeping.
pub trait Delay {
    /// Delay for the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Line Tests
    // =========================================================================

    #[test]
    fn address_lines_in_bit_order() {
        assert_eq!(
            Line::ADDRESS,
            [Line::A0, Line::A1, Line::A2, Line::A3]
        );
    }

    #[test]
    fn all_lines_distinct() {
        for (i, a) in Line::ALL.iter().enumerate() {
            for b in Line::ALL.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
        assert_eq!(Line::ALL.len(), 11);
    }

    // =========================================================================
    // Level Tests
    // =========================================================================

    #[test]
    fn level_default_low() {
        assert_eq!(Level::default(), Level::Low);
    }

    #[test]
    fn level_from_bool() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
        assert!(Level::High.is_high());
        assert!(!Level::Low.is_high());
    }

    // =========================================================================
    // PanelBus Default Methods Tests
    // =========================================================================

    struct TestBus {
        events: Vec<(Line, Level)>,
    }

    impl TestBus {
        fn new() -> Self {
            Self { events: Vec::new() }
        }
    }

    impl PanelBus for TestBus {
        fn set_line(&mut self, line: Line, level: Level) {
            self.events.push((line, level));
        }
    }

    #[test]
    fn pulse_default_impl_strobes_high_then_low() {
        let mut bus = TestBus::new();
        bus.pulse(Line::DataClock);

        assert_eq!(
            bus.events,
            vec![
                (Line::DataClock, Level::High),
                (Line::DataClock, Level::Low),
            ]
        );
    }

    // =========================================================================
    // TimeOfDay Tests
    // =========================================================================

    #[test]
    fn time_of_day_new() {
        let tod = TimeOfDay::new(12, 34, 56);
        assert_eq!(tod.hour, 12);
        assert_eq!(tod.minute, 34);
        assert_eq!(tod.second, 56);
    }

    #[test]
    fn time_of_day_default_midnight() {
        assert_eq!(TimeOfDay::default(), TimeOfDay::new(0, 0, 0));
    }
}
