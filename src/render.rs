//! Render engine: drives frames onto the panels over the bit-banged bus.
//!
//! The engine owns the [`PanelBus`] exclusively and speaks the panels' write
//! protocol. One row write clocks out every cell's bits for that row, MSB
//! (leftmost pixel) first, asserting the red and green plane lines per the
//! cell's color while pulsing the data clock, then commits the row: the
//! 4-bit row address goes onto `A0..A3`, the address latch rises, write
//! enable pulses, the latch drops. Sixteen row writes make a frame.
//!
//! The panels double-buffer. The engine always writes into the hidden bank
//! and flips the bank line exactly once per completed frame, so a partially
//! written frame is never visible.

use log::debug;

use crate::color::CellColor;
use crate::frame::{Cell, ScrollBuffer, PANEL_CELLS, PANEL_ROWS, VISIBLE_CELLS};
use crate::traits::{Delay, Level, Line, PanelBus};

/// Error raised when a frame fails the engine's input contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderError {
    /// More cells than the panels' row memory can hold.
    TooManyCells {
        /// Number of cells in the rejected frame.
        count: usize,
    },
    /// An empty frame. A deliberately dark display goes through
    /// [`RenderEngine::blank`] instead.
    EmptyFrame,
}

impl core::fmt::Display for RenderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RenderError::TooManyCells { count } => {
                write!(f, "frame of {} cells exceeds the {} cell limit", count, PANEL_CELLS)
            }
            RenderError::EmptyFrame => write!(f, "cannot render an empty frame"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RenderError {}

/// Drives the panel chain through a [`PanelBus`].
///
/// Rendering never truncates: a frame over the cell limit is rejected whole,
/// before any line changes, so callers either see their text exactly as
/// resolved or get an error. Scroll renders block until the text has fully
/// left the glass; the [`Delay`] between steps is the scroll speed.
///
/// # Example
///
/// ```
/// use rs_matrixclock::hal::{MockBus, MockDelay};
/// use rs_matrixclock::render::RenderEngine;
/// use rs_matrixclock::frame::Cell;
/// use rs_matrixclock::CellColor;
///
/// let mut engine = RenderEngine::new(MockBus::new(), MockDelay::new());
/// engine.init();
///
/// let cells = [Cell::new([0xFF; 16], CellColor::Green)];
/// engine.render_static(&cells).unwrap();
/// ```
#[derive(Debug)]
pub struct RenderEngine<B: PanelBus, D: Delay> {
    bus: B,
    delay: D,
    /// Level currently driven on the bank line. Flips once per frame.
    bank_high: bool,
}

impl<B: PanelBus, D: Delay> RenderEngine<B, D> {
    /// Creates an engine over a bus and a delay provider.
    ///
    /// Call [`init`](Self::init) before the first render.
    pub fn new(bus: B, delay: D) -> Self {
        Self {
            bus,
            delay,
            bank_high: false,
        }
    }

    /// Brings the panels to a known state.
    ///
    /// Drives every line low, raises the mode line for manual row
    /// addressing, then blanks both banks.
    pub fn init(&mut self) {
        for line in Line::ALL {
            self.bus.set_line(line, Level::Low);
        }
        self.bus.set_line(Line::Mode, Level::High);
        self.bank_high = false;
        self.clear();
        debug!("panel bus initialized");
    }

    /// Renders a frame and leaves it on the glass.
    ///
    /// Writes all sixteen rows into the hidden bank, then flips the bank
    /// line to publish. Rendering the same cells twice produces identical
    /// row writes; only the bank level differs between the two frames.
    pub fn render_static(&mut self, cells: &[Cell]) -> Result<(), RenderError> {
        let buffer = validate(cells)?;
        self.write_frame(buffer.bitmaps(), buffer.colors());
        self.publish();
        Ok(())
    }

    /// Scrolls a frame out to the left, blocking until done.
    ///
    /// Runs exactly `8 * cells.len() + 2` steps. Each step publishes the
    /// current window, waits `interval_ms`, then shifts every row one bit
    /// left, carrying bits across cell boundaries; after every eighth shift
    /// the cell colors rotate left so they follow their glyphs. The last two
    /// steps publish fully blank frames, leaving the glass dark.
    ///
    /// Not abortable; callers that need responsiveness render shorter text.
    pub fn render_scroll(&mut self, cells: &[Cell], interval_ms: u32) -> Result<(), RenderError> {
        let mut buffer = validate(cells)?;
        let steps = 8 * cells.len() + 2;
        debug!("scroll render: {} cells, {} steps", cells.len(), steps);

        for step in 0..steps {
            self.write_frame(buffer.bitmaps(), buffer.colors());
            self.publish();
            self.delay.delay_ms(interval_ms);
            buffer.shift_left();
            if (step + 1) % 8 == 0 {
                buffer.rotate_colors();
            }
        }
        Ok(())
    }

    /// Renders a dark frame across the visible width.
    pub fn blank(&mut self) {
        let bitmaps = [[0u8; PANEL_ROWS]; VISIBLE_CELLS];
        let colors = [CellColor::Off; VISIBLE_CELLS];
        self.write_frame(&bitmaps, &colors);
        self.publish();
    }

    /// Darkens both banks.
    pub fn clear(&mut self) {
        self.blank();
        self.blank();
    }

    /// Shared access to the bus, for inspection in tests.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutable access to the bus.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Writes all sixteen rows of a frame into the hidden bank.
    fn write_frame(&mut self, bitmaps: &[[u8; PANEL_ROWS]], colors: &[CellColor]) {
        for row in 0..PANEL_ROWS {
            self.write_row(row, bitmaps, colors);
        }
    }

    /// Clocks one row out and commits it to the addressed row memory.
    fn write_row(&mut self, row: usize, bitmaps: &[[u8; PANEL_ROWS]], colors: &[CellColor]) {
        for (bitmap, color) in bitmaps.iter().zip(colors) {
            let byte = bitmap[row];
            let (red, green) = color.planes();
            for bit in (0..8).rev() {
                let lit = byte & (1 << bit) != 0;
                self.bus.set_line(Line::Red, Level::from(lit && red));
                self.bus.set_line(Line::Green, Level::from(lit && green));
                self.bus.pulse(Line::DataClock);
            }
        }
        for (i, line) in Line::ADDRESS.iter().enumerate() {
            self.bus.set_line(*line, Level::from(row & (1 << i) != 0));
        }
        self.bus.set_line(Line::AddressLatch, Level::High);
        self.bus.pulse(Line::WriteEnable);
        self.bus.set_line(Line::AddressLatch, Level::Low);
    }

    /// Flips the bank line, making the just-written bank visible.
    fn publish(&mut self) {
        self.bank_high = !self.bank_high;
        self.bus.set_line(Line::Bank, Level::from(self.bank_high));
    }
}

/// Checks the frame contract and copies the cells into row layout.
fn validate(cells: &[Cell]) -> Result<ScrollBuffer, RenderError> {
    if cells.is_empty() {
        return Err(RenderError::EmptyFrame);
    }
    ScrollBuffer::from_cells(cells).map_err(|_| RenderError::TooManyCells { count: cells.len() })
}
