//! Scan-result debouncing.
//!
//! A cell is reported once it has been seen on `threshold` consecutive
//! ticks, and on every tick after that while it stays down. A threshold of
//! 1 passes every raw scan through untouched.

use crate::keymap::MatrixCell;

/// Debounce state tracker for the single reported matrix cell.
#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    /// Cell currently being observed (`None` = nothing down).
    candidate: Option<MatrixCell>,
    /// Consecutive ticks the candidate has been seen.
    seen: u8,
    threshold: u8,
}

impl Debouncer {
    /// A threshold of 0 is treated as 1.
    pub const fn new(threshold: u8) -> Self {
        Self {
            candidate: None,
            seen: 0,
            threshold: if threshold == 0 { 1 } else { threshold },
        }
    }

    /// Feed one raw scan result, get the debounced one back.
    pub fn update(&mut self, raw: Option<MatrixCell>) -> Option<MatrixCell> {
        if raw != self.candidate {
            self.candidate = raw;
            self.seen = 0;
        }

        let cell = raw?;
        self.seen = self.seen.saturating_add(1);
        (self.seen >= self.threshold).then_some(cell)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(crate::config::MATRIX_DEBOUNCE_TICKS)
    }
}
