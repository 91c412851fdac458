//! Glyph lookup trait for turning text into display cells.
//!
//! The render engine consumes [`Cell`]s; something has to map characters to
//! 16-row bitmaps. [`GlyphSource`] is that seam. The crate ships a built-in
//! ASCII font ([`crate::font::Font8x16`]); alternative sources (external
//! glyph tables, wider character sets) implement the same trait.
//!
//! [`Cell`]: crate::frame::Cell

use crate::color::CellColor;
use crate::frame::{Cell, Frame, FrameFull};

/// Width class of a glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlyphWidth {
    /// 8 columns, occupies one cell.
    Half,
    /// 16 columns, occupies two cells.
    Full,
}

impl GlyphWidth {
    /// Number of display cells this width occupies.
    #[inline]
    pub const fn cells(&self) -> usize {
        match self {
            GlyphWidth::Half => 1,
            GlyphWidth::Full => 2,
        }
    }
}

/// A 16-row glyph bitmap.
///
/// Row bit 15 is the leftmost pixel. Half-width glyphs carry their pixels in
/// the high byte of each row; the low byte is unused and must be zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphBitmap {
    /// One `u16` per row, MSB leftmost.
    pub rows: [u16; 16],
    /// Width class, which decides how many cells the glyph spans.
    pub width: GlyphWidth,
}

impl GlyphBitmap {
    /// Builds a half-width glyph from 8-wide row bytes (MSB leftmost).
    pub const fn half(rows: [u8; 16]) -> Self {
        let mut wide = [0u16; 16];
        let mut i = 0;
        while i < 16 {
            wide[i] = (rows[i] as u16) << 8;
            i += 1;
        }
        Self {
            rows: wide,
            width: GlyphWidth::Half,
        }
    }

    /// Builds a full-width glyph from 16-wide rows (bit 15 leftmost).
    pub const fn full(rows: [u16; 16]) -> Self {
        Self {
            rows,
            width: GlyphWidth::Full,
        }
    }

    /// The left (or only) cell's bitmap: the high byte of each row.
    pub fn left_cell(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        for (i, row) in self.rows.iter().enumerate() {
            out[i] = (row >> 8) as u8;
        }
        out
    }

    /// The right cell's bitmap for full-width glyphs: the low byte of each
    /// row. `None` for half-width glyphs.
    pub fn right_cell(&self) -> Option<[u8; 16]> {
        match self.width {
            GlyphWidth::Half => None,
            GlyphWidth::Full => {
                let mut out = [0u8; 16];
                for (i, row) in self.rows.iter().enumerate() {
                    out[i] = (row & 0xFF) as u8;
                }
                Some(out)
            }
        }
    }
}

/// Glyph source trait - maps characters to bitmaps.
///
/// Implementors supply [`glyph`](Self::glyph); the provided resolve methods
/// handle cell assembly, color assignment, and the unknown-character
/// fallback uniformly for all sources.
pub trait GlyphSource {
    /// Look up the bitmap for a character.
    ///
    /// Returns `None` for characters the source cannot draw. Resolution
    /// substitutes a blank half-width cell for those, so missing glyphs
    /// never abort a render.
    fn glyph(&self, ch: char) -> Option<GlyphBitmap>;

    /// Appends `text` to `frame` as cells, all in one color.
    ///
    /// Fails only if the frame runs out of capacity.
    fn resolve(&self, text: &str, color: CellColor, frame: &mut Frame) -> Result<(), FrameFull> {
        self.resolve_colored(text, &[color], frame)
    }

    /// Appends `text` to `frame` with one color per produced cell.
    ///
    /// `colors[i]` applies to the i-th appended cell; a full-width glyph
    /// consumes two entries. When the text produces more cells than there
    /// are colors, the last color is reused. An empty color slice renders
    /// every cell [`CellColor::Off`].
    fn resolve_colored(
        &self,
        text: &str,
        colors: &[CellColor],
        frame: &mut Frame,
    ) -> Result<(), FrameFull> {
        let mut cell_index = 0usize;
        let color_at = |i: usize| {
            colors
                .get(i)
                .or(colors.last())
                .copied()
                .unwrap_or_default()
        };
        for ch in text.chars() {
            match self.glyph(ch) {
                Some(glyph) => {
                    frame.push(Cell::new(glyph.left_cell(), color_at(cell_index)))?;
                    cell_index += 1;
                    if let Some(right) = glyph.right_cell() {
                        frame.push(Cell::new(right, color_at(cell_index)))?;
                        cell_index += 1;
                    }
                }
                None => {
                    frame.push(Cell::new([0u8; 16], color_at(cell_index)))?;
                    cell_index += 1;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SquareFont;

    // 'x' maps to a full-width hollow box, everything else to a solid
    // half-width block.
    impl GlyphSource for SquareFont {
        fn glyph(&self, ch: char) -> Option<GlyphBitmap> {
            match ch {
                'x' => Some(GlyphBitmap::full([0xFFFF; 16])),
                '?' => None,
                _ => Some(GlyphBitmap::half([0xFF; 16])),
            }
        }
    }

    #[test]
    fn half_glyph_maps_to_high_byte() {
        let glyph = GlyphBitmap::half([0xA5; 16]);
        assert_eq!(glyph.rows[0], 0xA500);
        assert_eq!(glyph.left_cell(), [0xA5; 16]);
        assert!(glyph.right_cell().is_none());
    }

    #[test]
    fn full_glyph_splits_into_two_cells() {
        let glyph = GlyphBitmap::full([0xBEEF; 16]);
        assert_eq!(glyph.left_cell(), [0xBE; 16]);
        assert_eq!(glyph.right_cell(), Some([0xEF; 16]));
    }

    #[test]
    fn width_cell_counts() {
        assert_eq!(GlyphWidth::Half.cells(), 1);
        assert_eq!(GlyphWidth::Full.cells(), 2);
    }

    #[test]
    fn resolve_uniform_color() {
        let mut frame = Frame::new();
        SquareFont
            .resolve("ab", CellColor::Green, &mut frame)
            .unwrap();

        assert_eq!(frame.len(), 2);
        assert!(frame.cells().iter().all(|c| c.color == CellColor::Green));
    }

    #[test]
    fn resolve_full_width_consumes_two_colors() {
        let mut frame = Frame::new();
        let colors = [CellColor::Red, CellColor::Green, CellColor::Amber];
        SquareFont.resolve_colored("xa", &colors, &mut frame).unwrap();

        assert_eq!(frame.len(), 3);
        assert_eq!(frame.cells()[0].color, CellColor::Red);
        assert_eq!(frame.cells()[1].color, CellColor::Green);
        assert_eq!(frame.cells()[2].color, CellColor::Amber);
    }

    #[test]
    fn resolve_reuses_last_color_when_short() {
        let mut frame = Frame::new();
        SquareFont
            .resolve_colored("abc", &[CellColor::Red], &mut frame)
            .unwrap();

        assert!(frame.cells().iter().all(|c| c.color == CellColor::Red));
    }

    #[test]
    fn unknown_char_becomes_blank_cell() {
        let mut frame = Frame::new();
        SquareFont.resolve("?", CellColor::Green, &mut frame).unwrap();

        assert_eq!(frame.len(), 1);
        assert_eq!(frame.cells()[0].bitmap, [0u8; 16]);
    }

    #[test]
    fn resolve_overflowing_frame_fails() {
        let mut frame = Frame::new();
        let long = "a".repeat(33);
        let result = SquareFont.resolve(&long, CellColor::Green, &mut frame);
        assert!(result.is_err());
    }
}
