//! Rotary encoder delta tracking.
//!
//! The peripheral owns the running position; we only remember the value
//! seen on the previous poll.

use crate::Result;
use core::sync::atomic::{AtomicI32, Ordering};

/// Source of the encoder's running position.
pub trait EncoderCounter {
    fn position(&mut self) -> Result<i32>;
}

/// Remembers the last position and turns it into per-tick deltas.
#[derive(Clone, Copy, Debug)]
pub struct EncoderTracker {
    last: i32,
}

impl EncoderTracker {
    /// Start tracking from the counter's current position.
    pub fn new<E: EncoderCounter>(encoder: &mut E) -> Result<Self> {
        Ok(Self::with_position(encoder.position()?))
    }

    pub const fn with_position(last: i32) -> Self {
        Self { last }
    }

    pub const fn last_position(&self) -> i32 {
        self.last
    }

    /// Signed movement since the previous poll (0 = no movement).
    ///
    /// A failed read leaves the stored position untouched, so the
    /// movement is picked up on the next successful poll.
    pub fn poll<E: EncoderCounter>(&mut self, encoder: &mut E) -> Result<i32> {
        let current = encoder.position()?;
        let delta = current.wrapping_sub(self.last);
        self.last = current;
        Ok(delta)
    }
}

/// Running position shared between the encoder interrupt/task side and
/// the control loop.
///
/// Only the peripheral side writes; the loop only reads.
#[derive(Debug, Default)]
pub struct SharedPosition {
    value: AtomicI32,
}

impl SharedPosition {
    pub const fn new() -> Self {
        Self {
            value: AtomicI32::new(0),
        }
    }

    /// Add detent steps (wraps like the hardware counter).
    pub fn advance(&self, steps: i32) {
        self.value.fetch_add(steps, Ordering::Relaxed);
    }

    pub fn get(&self) -> i32 {
        self.value.load(Ordering::Relaxed)
    }
}

impl EncoderCounter for &SharedPosition {
    fn position(&mut self) -> Result<i32> {
        Ok(self.get())
    }
}
