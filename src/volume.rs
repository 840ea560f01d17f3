//! Volume model: encoder deltas integrated into a saturating 0..=100 level.

use crate::config::{VOLUME_INITIAL, VOLUME_MAX, VOLUME_MIN};

/// Volume level, always within `VOLUME_MIN..=VOLUME_MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Volume(u8);

impl Volume {
    pub const MIN: Volume = Volume(VOLUME_MIN);
    pub const MAX: Volume = Volume(VOLUME_MAX);

    /// Create a level, clamping into range.
    pub const fn new(level: u8) -> Self {
        if level > VOLUME_MAX {
            Volume(VOLUME_MAX)
        } else if level > VOLUME_MIN {
            Volume(level)
        } else {
            Volume(VOLUME_MIN)
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Apply a signed encoder delta, saturating at both bounds.
    #[must_use]
    pub fn apply_delta(self, delta: i32) -> Self {
        let level = i32::from(self.0)
            .saturating_add(delta)
            .clamp(i32::from(VOLUME_MIN), i32::from(VOLUME_MAX));
        // In range after the clamp.
        Volume(level as u8)
    }

    /// Filled bar height for a panel `panel_height` pixels tall,
    /// `round(level / 100 * panel_height)` with halves rounded up.
    pub fn bar_height(self, panel_height: u32) -> u32 {
        let max = u32::from(VOLUME_MAX);
        (u32::from(self.0) * panel_height + max / 2) / max
    }
}

impl Default for Volume {
    fn default() -> Self {
        Volume::new(VOLUME_INITIAL)
    }
}
