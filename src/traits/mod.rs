//! Trait definitions for hardware abstraction, glyph lookup, and collaborators.
//!
//! This module defines the core abstractions that allow rs-matrixclock to:
//! - Run on different hardware (ESP32, desktop mock)
//! - Use different glyph sources and sensor transports
//! - Keep the scheduler testable without a network
//!
//! # Submodules
//!
//! - `hardware`: Panel bus lines, clock, and blocking delay
//! - `glyphs`: Character-to-bitmap lookup and text resolution
//! - `sensor`: Environment reading fetch
//! - `network`: Connectivity state for the banner flow
//!
//! # Hardware Abstraction
//!
//! The key hardware traits are:
//!
//! - [`PanelBus`]: The eleven bit-banged panel control lines
//! - [`Clock`]: Monotonic milliseconds and local wall time
//! - [`Delay`]: Blocking delay for scroll pacing and readout holds

pub mod glyphs;
pub mod hardware;
pub mod network;
pub mod sensor;

pub use glyphs::*;
pub use hardware::*;
pub use network::*;
pub use sensor::*;
