//! Cell color model for the bicolor panels.
//!
//! Each half-width cell (8 columns by 16 rows) is drawn in a single color.
//! The panels have two LED planes per pixel, red and green; driving both
//! produces amber. Color is applied per cell, not per pixel: the row shifter
//! asserts the plane lines once per bit while clocking a cell's bitmap out.

/// Color of one display cell.
///
/// # Default
///
/// Defaults to [`Off`](Self::Off), which keeps both planes dark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CellColor {
    /// Both planes off. A cell in this color renders as blank even if its
    /// bitmap has bits set.
    #[default]
    Off,
    /// Red plane only.
    Red,
    /// Red and green planes together.
    Amber,
    /// Green plane only.
    Green,
}

impl CellColor {
    /// Returns the plane levels `(red, green)` for a lit pixel of this color.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_matrixclock::CellColor;
    ///
    /// assert_eq!(CellColor::Off.planes(), (false, false));
    /// assert_eq!(CellColor::Red.planes(), (true, false));
    /// assert_eq!(CellColor::Amber.planes(), (true, true));
    /// assert_eq!(CellColor::Green.planes(), (false, true));
    /// ```
    #[inline]
    pub const fn planes(&self) -> (bool, bool) {
        match self {
            CellColor::Off => (false, false),
            CellColor::Red => (true, false),
            CellColor::Amber => (true, true),
            CellColor::Green => (false, true),
        }
    }

    /// Returns the color as a lowercase string for logging and display.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            CellColor::Off => "off",
            CellColor::Red => "red",
            CellColor::Amber => "amber",
            CellColor::Green => "green",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_default() {
        assert_eq!(CellColor::default(), CellColor::Off);
    }

    #[test]
    fn amber_drives_both_planes() {
        let (red, green) = CellColor::Amber.planes();
        assert!(red);
        assert!(green);
    }

    #[test]
    fn single_plane_colors() {
        assert_eq!(CellColor::Red.planes(), (true, false));
        assert_eq!(CellColor::Green.planes(), (false, true));
    }

    #[test]
    fn off_drives_nothing() {
        assert_eq!(CellColor::Off.planes(), (false, false));
    }

    #[test]
    fn color_as_str() {
        assert_eq!(CellColor::Off.as_str(), "off");
        assert_eq!(CellColor::Red.as_str(), "red");
        assert_eq!(CellColor::Amber.as_str(), "amber");
        assert_eq!(CellColor::Green.as_str(), "green");
    }
}
