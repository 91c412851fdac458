//! # rs-matrixclock
//!
//! A bicolor LED dot-matrix clock and sensor bulletin board for cascaded
//! 16-row panels driven over a bit-banged shift-register bus.
//!
//! ## Features
//!
//! - **Hardware abstraction**: Traits for the panel bus, time sources, and delays
//! - **Double-buffered rendering**: Frames build in the hidden bank and publish atomically
//! - **Pixel scrolling**: Blocking scroll renders with per-glyph color tags that follow their text
//! - **Cooperative scheduling**: A single message token sequences clock, banners, and sensor readouts
//! - **Display window**: The glass goes dark outside configured hours, lamp output included
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Panel bus, clock, glyph, sensor, and connectivity abstractions
//! - `frame` - Cells, frames, and the scroll buffer's bit carry
//! - `render` - The engine speaking the panels' write protocol
//! - `scheduler` - The message token loop tying clock, sensor, and banners together
//! - `hal` - Concrete implementations (mock for testing, esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use rs_matrixclock::hal::{MockBus, MockDelay};
//! use rs_matrixclock::{CellColor, Font8x16, Frame, GlyphSource, RenderEngine};
//!
//! // Resolve text into glyph cells
//! let mut frame = Frame::new();
//! Font8x16.resolve("12:34:56", CellColor::Green, &mut frame).unwrap();
//!
//! // Drive it onto the (mock) panels
//! let mut engine = RenderEngine::new(MockBus::new(), MockDelay::new());
//! engine.init();
//! engine.render_static(frame.cells()).unwrap();
//!
//! // Every published frame is sixteen row writes
//! assert_eq!(engine.bus().row_writes.len() % 16, 0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Cell color tags and their red/green plane mapping.
pub mod color;
/// Glyph bitmaps: the built-in 8x16 font.
pub mod font;
/// Cells, frames, and the scroll buffer.
pub mod frame;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Render engine speaking the panels' write protocol.
pub mod render;
/// Cooperative display scheduler built on a single message token.
pub mod scheduler;
/// Display text builders: clock face, banners, and sensor readouts.
pub mod text;
/// Software tickers and the display window check.
pub mod timer;
/// Core traits for hardware abstraction and collaborators.
pub mod traits;

/// Shared configuration system for desktop and ESP32.
pub mod config;

/// Sensor gateway message types.
pub mod messages;

// Re-exports for convenience
pub use color::CellColor;
pub use font::Font8x16;
pub use frame::{Cell, Frame, PANEL_CELLS, PANEL_ROWS, VISIBLE_CELLS};
pub use messages::SensorReading;
pub use render::{RenderEngine, RenderError};
pub use scheduler::{DisplayScheduler, Message};
pub use timer::{display_window_contains, Ticker};
pub use traits::{
    // Hardware
    Clock,
    // Network
    Connectivity,
    Delay,
    // Glyphs
    GlyphSource,
    Level,
    Line,
    Offline,
    PanelBus,
    // Sensor
    SensorSource,
    TimeOfDay,
};

// Config re-exports
pub use config::{ClockConfig, Config, DisplayConfig, SensorConfig, WifiConfig};

// Parsing function re-exports (serde-json-core based)
#[cfg(feature = "serde-json-core")]
pub use messages::parse_sensor_json;
