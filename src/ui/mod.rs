//! User interface subsystem - what the OLED shows and when it is powered.
//!
//! The arbiter keeps a three-state machine driven by key/encoder activity
//! and the inactivity timeout, and renders the current screen every tick.
//!
//! ## Components
//!
//! - **Arbiter**: mode transitions and panel power
//! - **Render**: clock face and volume overlay layouts
//! - **Display**: SSD1306 128×32 OLED via I²C (`embedded` feature)

pub mod arbiter;
pub mod render;

#[cfg(feature = "embedded")]
pub mod display;

pub use arbiter::DisplayArbiter;

use crate::Result;

/// What the panel is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Date and time.
    #[default]
    Clock,
    /// Volume bar, shown after the encoder moves.
    VolumeOverlay,
    /// Panel cleared and powered down after inactivity.
    Off,
}

/// Kind of user activity reported to the arbiter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActivityKind {
    KeyPress,
    Encoder,
}

/// Monochrome panel drawing and power control.
///
/// Drawing goes to a frame buffer; nothing is visible until `flush`.
pub trait Panel {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn clear(&mut self) -> Result<()>;
    /// Draw `text` with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<()>;
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn power_on(&mut self) -> Result<()>;
    fn power_off(&mut self) -> Result<()>;
}
