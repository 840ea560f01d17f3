//! Input subsystem - key matrix and rotary encoder.
//!
//! ## Components
//!
//! - **Matrix**: 3×3 keys, rows driven one at a time, columns sensed
//! - **Debounce**: optional N-tick confirmation of the scanned cell
//! - **Encoder**: position counter owned by the peripheral, delta tracked here

pub mod debounce;
pub mod encoder;
pub mod matrix;

#[cfg(feature = "embedded")]
pub mod qdec;

pub use debounce::Debouncer;
pub use encoder::{EncoderCounter, EncoderTracker, SharedPosition};
pub use matrix::{scan, MatrixPins, PinMatrix, Polarity, COLUMN_SENSE, ROW_DRIVE};
