//! Hardware Abstraction Layer implementations.
//!
//! This module contains concrete implementations of the traits
//! defined in [`crate::traits`] for various platforms.
//!
//! # Available Implementations
//!
//! - `mock`: Test implementations for desktop development
//! - `gpio`: Panel bus over generic `embedded-hal` output pins
//! - `esp32`: ESP32 DevKit with two HC-5PA panels (requires `esp32` feature)

pub mod gpio;
pub mod mock;

#[cfg(feature = "esp32")]
pub mod esp32;

pub use gpio::*;
pub use mock::*;

#[cfg(feature = "esp32")]
pub use esp32::*;
