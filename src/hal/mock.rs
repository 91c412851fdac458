//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for all hardware and collaborator
//! traits, enabling development and testing on desktop without panels, a
//! sensor gateway, or a network.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockBus`] | [`PanelBus`] | Records line events and decodes row writes |
//! | [`MockDelay`] | [`Delay`] | Records requested delays |
//! | [`MockClock`] | [`Clock`] | Controllable time source |
//! | [`MockSensor`] | [`SensorSource`] | Scripted fetch outcomes |
//! | [`MockConnectivity`] | [`Connectivity`] | Controllable link state |
//!
//! # Protocol decoding
//!
//! [`MockBus`] does more than record levels: it follows the panel write
//! protocol. Every data clock rising edge samples the color plane lines into
//! a pending bit string; every write enable rising edge commits the pending
//! bits as a [`RowWrite`] against the row address on `A0..A3`. Tests assert
//! on decoded rows instead of raw edges.
//!
//! # Example
//!
//! ```rust
//! use rs_matrixclock::hal::{MockBus, MockDelay};
//! use rs_matrixclock::render::RenderEngine;
//! use rs_matrixclock::frame::Cell;
//! use rs_matrixclock::CellColor;
//!
//! let mut engine = RenderEngine::new(MockBus::new(), MockDelay::new());
//! let cells = [Cell::new([0xF0; 16], CellColor::Amber)];
//! engine.render_static(&cells).unwrap();
//!
//! let writes = &engine.bus().row_writes;
//! assert_eq!(writes.len(), 16);
//! // Amber asserts both planes for every lit pixel.
//! assert_eq!(writes[0].cells[0].red, 0xF0);
//! assert_eq!(writes[0].cells[0].green, 0xF0);
//! ```
//!
//! [`PanelBus`]: crate::traits::PanelBus
//! [`Delay`]: crate::traits::Delay
//! [`Clock`]: crate::traits::Clock
//! [`SensorSource`]: crate::traits::SensorSource
//! [`Connectivity`]: crate::traits::Connectivity

use crate::config::{short_string, ShortString};
use crate::messages::SensorReading;
use crate::traits::{Clock, Connectivity, Delay, Level, Line, PanelBus, SensorSource, TimeOfDay};

use alloc::vec::Vec;

// ============================================================================
// Panel Bus Mock
// ============================================================================

/// One cell's worth of decoded color plane data.
///
/// Bit 7 is the first bit clocked out, i.e. the leftmost pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellWrite {
    /// Red plane bits for the row, MSB leftmost.
    pub red: u8,
    /// Green plane bits for the row, MSB leftmost.
    pub green: u8,
}

/// One committed row write, decoded from the bus protocol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowWrite {
    /// Row index decoded from `A0..A3` at the write strobe.
    pub row: u8,
    /// Whether the address latch was high when the write strobed.
    pub latched: bool,
    /// The cells clocked out since the previous commit, left to right.
    pub cells: Vec<CellWrite>,
}

/// Mock panel bus for testing.
///
/// Records every line event verbatim in [`events`](Self::events) and decodes
/// the write protocol into [`row_writes`](Self::row_writes) and
/// [`bank_toggles`](Self::bank_toggles).
#[derive(Debug, Default)]
pub struct MockBus {
    /// Every `set_line` call in order.
    pub events: Vec<(Line, Level)>,
    /// Committed row writes, in commit order.
    pub row_writes: Vec<RowWrite>,
    /// Number of level changes observed on the bank line.
    pub bank_toggles: usize,
    levels: [Level; 11],
    pending_bits: Vec<(bool, bool)>,
}

impl MockBus {
    /// Creates a mock bus with every line low.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level of a line.
    pub fn level(&self, line: Line) -> Level {
        self.levels[line_index(line)]
    }

    /// Forgets recorded events and decoded writes, keeping line levels.
    ///
    /// Useful for asserting on one render at a time.
    pub fn reset_capture(&mut self) {
        self.events.clear();
        self.row_writes.clear();
        self.bank_toggles = 0;
        self.pending_bits.clear();
    }

    /// The decoded row writes grouped into sixteen-row frames.
    ///
    /// Each published frame is sixteen consecutive row writes, so scroll
    /// tests iterate this to walk the frames step by step.
    pub fn frames(&self) -> impl Iterator<Item = &[RowWrite]> {
        self.row_writes.chunks(16)
    }
}

impl PanelBus for MockBus {
    fn set_line(&mut self, line: Line, level: Level) {
        let slot = line_index(line);
        let rising = !self.levels[slot].is_high() && level.is_high();
        let changed = self.levels[slot] != level;
        self.levels[slot] = level;
        self.events.push((line, level));

        match line {
            Line::DataClock if rising => {
                let red = self.level(Line::Red).is_high();
                let green = self.level(Line::Green).is_high();
                self.pending_bits.push((red, green));
            }
            Line::WriteEnable if rising => {
                let row = Line::ADDRESS
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, addr)| {
                        acc | ((self.level(*addr).is_high() as u8) << i)
                    });
                let latched = self.level(Line::AddressLatch).is_high();
                let cells = self
                    .pending_bits
                    .chunks_exact(8)
                    .map(|chunk| {
                        let mut cell = CellWrite::default();
                        for (i, (red, green)) in chunk.iter().enumerate() {
                            cell.red |= (*red as u8) << (7 - i);
                            cell.green |= (*green as u8) << (7 - i);
                        }
                        cell
                    })
                    .collect();
                self.pending_bits.clear();
                self.row_writes.push(RowWrite { row, latched, cells });
            }
            Line::Bank if changed => {
                self.bank_toggles += 1;
            }
            _ => {}
        }
    }
}

fn line_index(line: Line) -> usize {
    match line {
        Line::A0 => 0,
        Line::A1 => 1,
        Line::A2 => 2,
        Line::A3 => 3,
        Line::Bank => 4,
        Line::DataClock => 5,
        Line::WriteEnable => 6,
        Line::AddressLatch => 7,
        Line::Red => 8,
        Line::Green => 9,
        Line::Mode => 10,
    }
}

// ============================================================================
// Time Mocks
// ============================================================================

/// Mock delay that records instead of sleeping.
///
/// # Example
///
/// ```rust
/// use rs_matrixclock::hal::MockDelay;
/// use rs_matrixclock::traits::Delay;
///
/// let mut delay = MockDelay::new();
/// delay.delay_ms(30);
/// delay.delay_ms(30);
///
/// assert_eq!(delay.delays, vec![30, 30]);
/// assert_eq!(delay.total_ms(), 60);
/// ```
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Every requested delay, in call order.
    pub delays: Vec<u32>,
}

impl MockDelay {
    /// Creates a mock delay with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all requested delays in milliseconds.
    pub fn total_ms(&self) -> u64 {
        self.delays.iter().map(|ms| *ms as u64).sum()
    }
}

impl Delay for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
    }
}

/// Mock clock for testing.
///
/// Provides a controllable monotonic time and wall time.
///
/// # Example
///
/// ```rust
/// use rs_matrixclock::hal::MockClock;
/// use rs_matrixclock::traits::{Clock, TimeOfDay};
///
/// let mut clock = MockClock::new();
/// clock.advance(500);
/// clock.set_time_of_day(TimeOfDay::new(12, 0, 0));
///
/// assert_eq!(clock.now_ms(), 500);
/// assert_eq!(clock.time_of_day().hour, 12);
/// ```
#[derive(Debug, Default)]
pub struct MockClock {
    current_ms: u64,
    tod: TimeOfDay,
}

impl MockClock {
    /// Creates a mock clock at 0 ms, midnight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the monotonic time in milliseconds.
    pub fn set(&mut self, ms: u64) {
        self.current_ms = ms;
    }

    /// Advances the monotonic time by the given duration.
    pub fn advance(&mut self, ms: u64) {
        self.current_ms += ms;
    }

    /// Sets the wall time returned by `time_of_day`.
    pub fn set_time_of_day(&mut self, tod: TimeOfDay) {
        self.tod = tod;
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.current_ms
    }

    fn time_of_day(&self) -> TimeOfDay {
        self.tod
    }
}

// ============================================================================
// Collaborator Mocks
// ============================================================================

/// Mock sensor with scripted fetch outcomes.
///
/// Outcomes queue front to back; an exhausted script fails. Every call
/// increments [`fetch_count`](Self::fetch_count), which is how retry-bound
/// tests count attempts.
#[derive(Debug, Default)]
pub struct MockSensor {
    /// Scripted outcomes, consumed front to back.
    pub script: Vec<Result<SensorReading, ()>>,
    /// Number of `fetch` calls observed.
    pub fetch_count: usize,
}

impl MockSensor {
    /// Creates a mock sensor with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful fetch returning `reading`.
    pub fn queue_ok(&mut self, reading: SensorReading) {
        self.script.push(Ok(reading));
    }

    /// Queues a failed fetch.
    pub fn queue_err(&mut self) {
        self.script.push(Err(()));
    }

    /// Queues `count` failed fetches.
    pub fn queue_errs(&mut self, count: usize) {
        for _ in 0..count {
            self.queue_err();
        }
    }
}

impl SensorSource for MockSensor {
    type Error = ();

    fn fetch(&mut self) -> Result<SensorReading, ()> {
        self.fetch_count += 1;
        if self.script.is_empty() {
            Err(())
        } else {
            self.script.remove(0)
        }
    }
}

/// Mock connectivity with a controllable link state.
#[derive(Debug, Default)]
pub struct MockConnectivity {
    /// Whether the link currently reports up.
    pub connected: bool,
    /// Address reported once connected.
    pub station_address: ShortString,
}

impl MockConnectivity {
    /// Creates a disconnected mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the link up with the given address.
    pub fn connect(&mut self, address: &str) {
        self.connected = true;
        self.station_address = short_string(address);
    }

    /// Marks the link down.
    pub fn disconnect(&mut self) {
        self.connected = false;
    }
}

impl Connectivity for MockConnectivity {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn address(&self) -> Option<ShortString> {
        if self.connected {
            Some(self.station_address.clone())
        } else {
            None
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // MockBus Tests
    // =========================================================================

    #[test]
    fn mock_bus_default() {
        let bus = MockBus::new();
        assert!(bus.events.is_empty());
        assert!(bus.row_writes.is_empty());
        assert_eq!(bus.bank_toggles, 0);
        for line in Line::ALL {
            assert_eq!(bus.level(line), Level::Low);
        }
    }

    #[test]
    fn mock_bus_records_events() {
        let mut bus = MockBus::new();
        bus.set_line(Line::Mode, Level::High);
        bus.set_line(Line::Mode, Level::Low);

        assert_eq!(
            bus.events,
            vec![(Line::Mode, Level::High), (Line::Mode, Level::Low)]
        );
    }

    #[test]
    fn mock_bus_decodes_row_write() {
        let mut bus = MockBus::new();

        // Clock out one cell: red plane 0b1010_0000, green dark.
        for bit in [true, false, true, false, false, false, false, false] {
            bus.set_line(Line::Red, Level::from(bit));
            bus.set_line(Line::Green, Level::Low);
            bus.pulse(Line::DataClock);
        }
        // Address row 5 and commit.
        bus.set_line(Line::A0, Level::High);
        bus.set_line(Line::A2, Level::High);
        bus.set_line(Line::AddressLatch, Level::High);
        bus.pulse(Line::WriteEnable);
        bus.set_line(Line::AddressLatch, Level::Low);

        assert_eq!(bus.row_writes.len(), 1);
        let write = &bus.row_writes[0];
        assert_eq!(write.row, 5);
        assert!(write.latched);
        assert_eq!(write.cells, vec![CellWrite { red: 0xA0, green: 0x00 }]);
    }

    #[test]
    fn mock_bus_counts_bank_changes_not_rewrites() {
        let mut bus = MockBus::new();
        bus.set_line(Line::Bank, Level::Low);
        assert_eq!(bus.bank_toggles, 0);

        bus.set_line(Line::Bank, Level::High);
        bus.set_line(Line::Bank, Level::High);
        bus.set_line(Line::Bank, Level::Low);
        assert_eq!(bus.bank_toggles, 2);
    }

    #[test]
    fn mock_bus_reset_capture_keeps_levels() {
        let mut bus = MockBus::new();
        bus.set_line(Line::Mode, Level::High);
        bus.reset_capture();

        assert!(bus.events.is_empty());
        assert_eq!(bus.level(Line::Mode), Level::High);
    }

    // =========================================================================
    // MockDelay Tests
    // =========================================================================

    #[test]
    fn mock_delay_records() {
        let mut delay = MockDelay::new();
        delay.delay_ms(10);
        delay.delay_ms(20);

        assert_eq!(delay.delays, vec![10, 20]);
        assert_eq!(delay.total_ms(), 30);
    }

    // =========================================================================
    // MockClock Tests
    // =========================================================================

    #[test]
    fn mock_clock_monotonic() {
        let mut clock = MockClock::new();
        assert_eq!(clock.now_ms(), 0);
        clock.advance(500);
        assert_eq!(clock.now_ms(), 500);
        clock.set(10_000);
        assert_eq!(clock.now_ms(), 10_000);
    }

    #[test]
    fn mock_clock_time_of_day() {
        let mut clock = MockClock::new();
        assert_eq!(clock.time_of_day(), TimeOfDay::default());
        clock.set_time_of_day(TimeOfDay::new(23, 59, 59));
        assert_eq!(clock.time_of_day().hour, 23);
    }

    // =========================================================================
    // MockSensor Tests
    // =========================================================================

    #[test]
    fn mock_sensor_scripted_outcomes() {
        let mut sensor = MockSensor::new();
        sensor.queue_ok(SensorReading {
            temperature: 20.0,
            humidity: 50.0,
            pressure: 1000.0,
        });
        sensor.queue_err();

        assert!(sensor.fetch().is_ok());
        assert!(sensor.fetch().is_err());
        // Exhausted script keeps failing.
        assert!(sensor.fetch().is_err());
        assert_eq!(sensor.fetch_count, 3);
    }

    #[test]
    fn mock_sensor_queue_errs() {
        let mut sensor = MockSensor::new();
        sensor.queue_errs(2);
        assert_eq!(sensor.script.len(), 2);
        assert!(sensor.script.iter().all(|r| r.is_err()));
    }

    // =========================================================================
    // MockConnectivity Tests
    // =========================================================================

    #[test]
    fn mock_connectivity_lifecycle() {
        let mut conn = MockConnectivity::new();
        assert!(!conn.is_connected());
        assert!(conn.address().is_none());

        conn.connect("192.168.10.22");
        assert!(conn.is_connected());
        assert_eq!(conn.address().unwrap().as_str(), "192.168.10.22");

        conn.disconnect();
        assert!(!conn.is_connected());
        assert!(conn.address().is_none());
    }
}
