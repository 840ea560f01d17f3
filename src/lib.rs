//! Control logic for a 3x3 media macropad.
//!
//! The device has a key matrix, a rotary encoder driving a volume level,
//! and a 128×32 OLED that shows a clock face, a transient volume overlay,
//! or nothing once the inactivity timeout has passed. Everything runs from
//! one fixed-period polling loop ([`device::Device::tick`]).
//!
//! The pure logic builds and tests on the host:
//!
//! ```text
//! cargo test
//! ```
//!
//! The hardware adapters (nRF52840 GPIO/QDEC, SSD1306, USB HID) and the
//! firmware binary are behind the `embedded` feature.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod clock;
pub mod config;
pub mod device;
pub mod dispatch;
pub mod error;
pub mod hid;
pub mod input;
pub mod keymap;
pub mod power_logic;
pub mod ui;
pub mod volume;

#[cfg(feature = "embedded")]
pub mod usb;

#[cfg(test)]
mod mocks;

pub use error::{Error, Result};
