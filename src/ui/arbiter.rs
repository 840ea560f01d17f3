//! Display arbiter: decides what the panel shows and when it is powered.
//!
//! ```text
//!            encoder                      idle > timeout
//!   Clock ───────────▶ VolumeOverlay ─────────────────▶ Off
//!     ▲  ◀─────────────                                  │
//!     │     key press                                    │
//!     └──────────────────────────────────────────────────┘
//!              activity (idle ≤ timeout again)
//! ```
//!
//! Clock also goes to Off on timeout, and an encoder event goes straight
//! from Off to VolumeOverlay.

use crate::clock::ClockSource;
use crate::config::{SCREEN_AUTO_OFF_ENABLED, SCREEN_AUTO_OFF_TIMEOUT_MS};
use crate::power_logic;
use crate::ui::{render, ActivityKind, DisplayMode, Panel};
use crate::volume::Volume;
use crate::Result;

/// Display mode state machine plus the shared activity clock.
#[derive(Clone, Copy, Debug)]
pub struct DisplayArbiter {
    mode: DisplayMode,
    /// Timestamp (ms) of the last key press or encoder movement.
    last_activity: u64,
    auto_off_enabled: bool,
    timeout_ms: u64,
}

impl DisplayArbiter {
    /// Start in `Clock` with the activity clock at `now`.
    pub const fn new(now: u64) -> Self {
        Self::with_policy(now, SCREEN_AUTO_OFF_ENABLED, SCREEN_AUTO_OFF_TIMEOUT_MS)
    }

    pub const fn with_policy(now: u64, auto_off_enabled: bool, timeout_ms: u64) -> Self {
        Self {
            mode: DisplayMode::Clock,
            last_activity: now,
            auto_off_enabled,
            timeout_ms,
        }
    }

    pub const fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub const fn last_activity(&self) -> u64 {
        self.last_activity
    }

    pub fn idle_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.last_activity)
    }

    /// Record user activity at `now`.
    ///
    /// Encoder movement always brings up the volume overlay; a key press
    /// dismisses it. A key press in any other mode only refreshes the
    /// activity clock (the power policy wakes an `Off` panel).
    ///
    /// The mode changes only after the panel is powered. If power-on fails
    /// an `Off` panel stays `Off` and the power policy retries the wake-up
    /// on the next tick.
    pub fn notify_activity<P: Panel>(
        &mut self,
        panel: &mut P,
        now: u64,
        kind: ActivityKind,
    ) -> Result<()> {
        self.last_activity = now;

        let next = match (kind, self.mode) {
            (ActivityKind::Encoder, _) => DisplayMode::VolumeOverlay,
            (ActivityKind::KeyPress, DisplayMode::VolumeOverlay) => DisplayMode::Clock,
            (ActivityKind::KeyPress, _) => return Ok(()),
        };
        panel.power_on()?;
        self.set_mode(next);
        Ok(())
    }

    /// Draw the screen for the current mode. Nothing is drawn while `Off`.
    pub fn render_if_due<P: Panel, C: ClockSource>(
        &self,
        panel: &mut P,
        volume: Volume,
        clock: &C,
    ) -> Result<()> {
        match self.mode {
            DisplayMode::VolumeOverlay => render::draw_volume_bar(panel, volume),
            DisplayMode::Clock => render::draw_clock(panel, &clock.wall_clock()?),
            DisplayMode::Off => Ok(()),
        }
    }

    /// Enforce the inactivity timeout.
    ///
    /// The mode only changes once the panel operations succeed, so a failed
    /// power-down is retried on the next tick.
    pub fn apply_power_policy<P: Panel>(&mut self, panel: &mut P, now: u64) -> Result<()> {
        let idle = self.idle_ms(now);
        let should_be_on =
            power_logic::screen_should_be_on(self.auto_off_enabled, idle, self.timeout_ms);

        match (should_be_on, self.mode) {
            (false, DisplayMode::Off) | (true, DisplayMode::Clock | DisplayMode::VolumeOverlay) => {
                Ok(())
            }
            (false, _) => {
                panel.clear()?;
                panel.flush()?;
                panel.power_off()?;
                self.set_mode(DisplayMode::Off);
                Ok(())
            }
            (true, DisplayMode::Off) => {
                panel.power_on()?;
                self.set_mode(DisplayMode::Clock);
                Ok(())
            }
        }
    }

    fn set_mode(&mut self, mode: DisplayMode) {
        if mode != self.mode {
            info!("Display: {} -> {}", self.mode, mode);
            self.mode = mode;
        }
    }
}
