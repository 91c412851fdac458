//! Display cells and bounded frame buffers.
//!
//! A frame is at most [`PANEL_CELLS`] half-width cells. The limit is the
//! physical capacity of the two cascaded panels' row memory; it is enforced
//! here, at the buffer boundary, so the render loops never re-check it.
//!
//! [`ScrollBuffer`] is the working copy a scroll render mutates: it supports
//! the one-bit left shift with carry across cell boundaries and the
//! cell-wise color rotation that keeps colors tracking their glyphs.

use heapless::Vec as HVec;

use crate::color::CellColor;

/// Maximum cells a frame can hold: two cascaded panels of row memory.
pub const PANEL_CELLS: usize = 32;

/// Cells visible at once across the two cascaded panels.
pub const VISIBLE_CELLS: usize = 8;

/// Number of rows per panel.
pub const PANEL_ROWS: usize = 16;

/// Columns per half-width cell.
pub const CELL_COLUMNS: usize = 8;

/// Error returned when a frame exceeds [`PANEL_CELLS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameFull;

impl core::fmt::Display for FrameFull {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "frame capacity of {} cells exceeded", PANEL_CELLS)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FrameFull {}

/// One half-width display cell: a 16-row, 8-column bitmap in a single color.
///
/// Bit 7 of each bitmap byte is the leftmost pixel of the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Row bitmaps, top to bottom. MSB is the leftmost pixel.
    pub bitmap: [u8; PANEL_ROWS],
    /// Color applied to every lit pixel of the cell.
    pub color: CellColor,
}

impl Cell {
    /// Creates a cell from a bitmap and color.
    pub const fn new(bitmap: [u8; PANEL_ROWS], color: CellColor) -> Self {
        Self { bitmap, color }
    }

    /// A dark cell: empty bitmap, color off.
    pub const fn blank() -> Self {
        Self {
            bitmap: [0; PANEL_ROWS],
            color: CellColor::Off,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

/// A bounded buffer of display cells, at most [`PANEL_CELLS`] long.
///
/// Built by glyph resolution ([`GlyphSource::resolve`]) or by hand, then
/// handed to the render engine as a slice via [`cells`](Self::cells).
///
/// [`GlyphSource::resolve`]: crate::traits::GlyphSource::resolve
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    cells: HVec<Cell, PANEL_CELLS>,
}

impl Frame {
    /// Creates an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frame of `count` blank cells.
    ///
    /// `count` is capped at [`PANEL_CELLS`].
    pub fn blank(count: usize) -> Self {
        let mut frame = Self::new();
        for _ in 0..count.min(PANEL_CELLS) {
            let _ = frame.cells.push(Cell::blank());
        }
        frame
    }

    /// Creates a frame from a slice of cells.
    ///
    /// Fails if the slice exceeds [`PANEL_CELLS`].
    pub fn from_cells(cells: &[Cell]) -> Result<Self, FrameFull> {
        let mut frame = Self::new();
        for cell in cells {
            frame.push(*cell)?;
        }
        Ok(frame)
    }

    /// Appends a cell. Fails once the frame holds [`PANEL_CELLS`] cells.
    pub fn push(&mut self, cell: Cell) -> Result<(), FrameFull> {
        self.cells.push(cell).map_err(|_| FrameFull)
    }

    /// Number of cells in the frame.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if the frame holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cells as a slice, left to right.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// Working buffer for a scroll render.
///
/// Holds a mutable copy of a frame's bitmaps and colors. Each scroll step
/// shifts every row left by one bit, carrying the leftmost bit of each cell
/// into its left neighbor; after every eight shifts the colors rotate left
/// by one cell so they stay aligned with the glyphs that moved a full cell
/// width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrollBuffer {
    bitmaps: HVec<[u8; PANEL_ROWS], PANEL_CELLS>,
    colors: HVec<CellColor, PANEL_CELLS>,
}

impl ScrollBuffer {
    /// Copies a cell slice into a fresh working buffer.
    ///
    /// Fails if the slice exceeds [`PANEL_CELLS`].
    pub fn from_cells(cells: &[Cell]) -> Result<Self, FrameFull> {
        let mut bitmaps = HVec::new();
        let mut colors = HVec::new();
        for cell in cells {
            bitmaps.push(cell.bitmap).map_err(|_| FrameFull)?;
            colors.push(cell.color).map_err(|_| FrameFull)?;
        }
        Ok(Self { bitmaps, colors })
    }

    /// Number of cells in the buffer.
    pub fn len(&self) -> usize {
        self.bitmaps.len()
    }

    /// True if the buffer holds no cells.
    pub fn is_empty(&self) -> bool {
        self.bitmaps.is_empty()
    }

    /// The cell bitmaps, left to right.
    pub fn bitmaps(&self) -> &[[u8; PANEL_ROWS]] {
        &self.bitmaps
    }

    /// The cell colors, left to right.
    pub fn colors(&self) -> &[CellColor] {
        &self.colors
    }

    /// Shifts every row left by one bit.
    ///
    /// The leftmost bit of each cell carries into the cell to its left; the
    /// rightmost cell backfills with zero. After `8 * len()` shifts the
    /// buffer is fully dark.
    pub fn shift_left(&mut self) {
        let n = self.bitmaps.len();
        if n == 0 {
            return;
        }
        for row in 0..PANEL_ROWS {
            for i in 0..n - 1 {
                let carry = self.bitmaps[i + 1][row] >> 7;
                self.bitmaps[i][row] = (self.bitmaps[i][row] << 1) | carry;
            }
            self.bitmaps[n - 1][row] <<= 1;
        }
    }

    /// Rotates the colors left by one cell.
    ///
    /// Called once per eight shifts, when the glyphs have moved a full cell
    /// width, so each cell keeps showing the color of the glyph now in it.
    pub fn rotate_colors(&mut self) {
        if self.colors.len() > 1 {
            self.colors.rotate_left(1);
        }
    }

    /// True when no bit is set anywhere in the buffer.
    pub fn is_blank(&self) -> bool {
        self.bitmaps
            .iter()
            .all(|bitmap| bitmap.iter().all(|row| *row == 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Frame Tests
    // =========================================================================

    #[test]
    fn frame_push_to_capacity() {
        let mut frame = Frame::new();
        for _ in 0..PANEL_CELLS {
            frame.push(Cell::blank()).unwrap();
        }
        assert_eq!(frame.len(), PANEL_CELLS);
        assert_eq!(frame.push(Cell::blank()), Err(FrameFull));
    }

    #[test]
    fn frame_from_cells_overflow() {
        let cells = [Cell::blank(); PANEL_CELLS + 1];
        assert_eq!(Frame::from_cells(&cells), Err(FrameFull));
    }

    #[test]
    fn frame_blank_caps_count() {
        let frame = Frame::blank(100);
        assert_eq!(frame.len(), PANEL_CELLS);

        let frame = Frame::blank(8);
        assert_eq!(frame.len(), 8);
        assert!(frame.cells().iter().all(|c| *c == Cell::blank()));
    }

    #[test]
    fn frame_full_display() {
        let msg = format!("{}", FrameFull);
        assert!(msg.contains("32"));
    }

    // =========================================================================
    // ScrollBuffer Shift Tests
    // =========================================================================

    #[test]
    fn shift_left_single_cell() {
        let cells = [Cell::new([0b1000_0001; 16], CellColor::Red)];
        let mut buf = ScrollBuffer::from_cells(&cells).unwrap();

        buf.shift_left();
        assert_eq!(buf.bitmaps()[0][0], 0b0000_0010);
    }

    #[test]
    fn shift_left_carries_between_cells() {
        let cells = [
            Cell::new([0x00; 16], CellColor::Red),
            Cell::new([0x80; 16], CellColor::Green),
        ];
        let mut buf = ScrollBuffer::from_cells(&cells).unwrap();

        buf.shift_left();
        // The MSB of the right cell moved into the LSB of the left cell.
        assert_eq!(buf.bitmaps()[0][0], 0x01);
        assert_eq!(buf.bitmaps()[1][0], 0x00);
    }

    #[test]
    fn eight_shifts_drain_single_cell() {
        let cells = [Cell::new([0xFF; 16], CellColor::Green)];
        let mut buf = ScrollBuffer::from_cells(&cells).unwrap();

        for _ in 0..8 {
            assert!(!buf.is_blank());
            buf.shift_left();
        }
        assert!(buf.is_blank());
    }

    #[test]
    fn shift_left_empty_buffer_is_noop() {
        let mut buf = ScrollBuffer::from_cells(&[]).unwrap();
        buf.shift_left();
        assert!(buf.is_blank());
    }

    // =========================================================================
    // ScrollBuffer Color Tests
    // =========================================================================

    #[test]
    fn rotate_colors_moves_head_to_tail() {
        let cells = [
            Cell::new([0; 16], CellColor::Red),
            Cell::new([0; 16], CellColor::Amber),
            Cell::new([0; 16], CellColor::Green),
        ];
        let mut buf = ScrollBuffer::from_cells(&cells).unwrap();

        buf.rotate_colors();
        assert_eq!(
            buf.colors(),
            &[CellColor::Amber, CellColor::Green, CellColor::Red]
        );
    }

    #[test]
    fn rotate_colors_single_cell_is_noop() {
        let cells = [Cell::new([0; 16], CellColor::Red)];
        let mut buf = ScrollBuffer::from_cells(&cells).unwrap();
        buf.rotate_colors();
        assert_eq!(buf.colors(), &[CellColor::Red]);
    }
}
