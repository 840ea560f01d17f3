//! Unified error type for macropad.
//!
//! We avoid `alloc` - all error variants are fieldless so the enum stays
//! `Copy` and cheap to carry through a tick report.
//! Implements `defmt::Format` (feature `defmt`) for on-target logging.

/// Top-level error type used across the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Input
    /// Driving a row or reading a column failed, or the index is out of range.
    Gpio,

    /// The encoder peripheral could not be read.
    Encoder,

    // HID
    /// The HID report could not be queued or written.
    Hid,

    /// All six keyboard slots are already occupied.
    RolloverFull,

    // UI / Display
    /// I²C transaction to the display failed.
    Display,

    /// The wall-clock source could not be read.
    Clock,

    // Generic
    /// A peripheral failed to come up at start-up.
    Init,
}

/// Result alias used by every collaborator trait.
pub type Result<T> = core::result::Result<T, Error>;
