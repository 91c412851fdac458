//! Fixed-format text builders for the clock face, readouts, and banners.
//!
//! Every string the panels show is eight half-width cells wide in normal
//! operation, so these builders produce exactly eight characters for
//! in-range values. Formatting goes through `core::fmt::Write` into a
//! `heapless::String`; nothing here allocates.

use core::fmt::Write;

use crate::color::CellColor;
use crate::traits::TimeOfDay;

/// Buffer type for one line of panel text.
///
/// Sixteen bytes leaves headroom for out-of-range sensor values; the normal
/// formats use eight.
pub type PanelText = heapless::String<16>;

/// Buffer type for a scrolled banner, capped at the panel cell budget.
pub type BannerText = heapless::String<32>;

/// Eight blank cells. Prefixed to scrolled banners so the text enters from
/// the right edge of the glass instead of popping in fully drawn.
pub const BANNER_INDENT: &str = "        ";

/// Startup banner, blink phase with the activity dot.
pub const INIT_BANNER_DOT: &str = "init   .";

/// Startup banner, blink phase without the dot.
pub const INIT_BANNER_BLANK: &str = "init    ";

/// Banner scrolled once when the network comes up.
pub const WIFI_STARTED_BANNER: &str = "WiFi Started.";

/// Formats a time of day as `HH:MM:SS`, zero padded.
pub fn clock_text(tod: TimeOfDay) -> PanelText {
    let mut text = PanelText::new();
    let _ = write!(text, "{:02}:{:02}:{:02}", tod.hour, tod.minute, tod.second);
    text
}

/// Cell colors for the clock face: green digits, amber colons.
pub const fn clock_colors() -> [CellColor; 8] {
    [
        CellColor::Green,
        CellColor::Green,
        CellColor::Amber,
        CellColor::Green,
        CellColor::Green,
        CellColor::Amber,
        CellColor::Green,
        CellColor::Green,
    ]
}

/// Cell colors for the startup blink banner: green text, amber dot cell.
pub const fn init_banner_colors() -> [CellColor; 8] {
    [
        CellColor::Green,
        CellColor::Green,
        CellColor::Green,
        CellColor::Green,
        CellColor::Green,
        CellColor::Green,
        CellColor::Green,
        CellColor::Amber,
    ]
}

/// Builds a scrolled banner: eight blank cells, then the message.
///
/// Messages longer than the remaining cell budget are cut off at the last
/// character that fits.
pub fn banner_text(message: &str) -> BannerText {
    let mut text = BannerText::new();
    let _ = text.push_str(BANNER_INDENT);
    for ch in message.chars() {
        if text.push(ch).is_err() {
            break;
        }
    }
    text
}

/// Formats a temperature readout: `T:xx.x*C`.
///
/// The value field is four characters wide, one decimal place.
pub fn temperature_text(celsius: f32) -> PanelText {
    let mut text = PanelText::new();
    let _ = write!(text, "T:{:4.1}*C", celsius);
    text
}

/// Formats a humidity readout: `H:xxx.x%`.
///
/// The value field is five characters wide, one decimal place.
pub fn humidity_text(percent: f32) -> PanelText {
    let mut text = PanelText::new();
    let _ = write!(text, "H:{:5.1}%", percent);
    text
}

/// Formats a pressure readout: `P:xxxx.x`.
///
/// The value field is six characters wide, one decimal place.
pub fn pressure_text(hpa: f32) -> PanelText {
    let mut text = PanelText::new();
    let _ = write!(text, "P:{:6.1}", hpa);
    text
}
