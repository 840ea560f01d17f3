//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

// Main loop

/// Period of one scan → dispatch → render → power-policy pass (ms).
pub const TICK_PERIOD_MS: u64 = 100;

// Key matrix

/// Number of driven row lines.
pub const MATRIX_ROWS: usize = 3;

/// Number of sensed column lines.
pub const MATRIX_COLS: usize = 3;

/// Consecutive ticks a cell must be seen before it is reported.
///
/// 1 reports every raw scan result, so a held key re-fires once per tick.
pub const MATRIX_DEBOUNCE_TICKS: u8 = 1;

// Volume

/// Lower bound of the volume level.
pub const VOLUME_MIN: u8 = 0;

/// Upper bound of the volume level.
pub const VOLUME_MAX: u8 = 100;

/// Volume level at power-up.
pub const VOLUME_INITIAL: u8 = 50;

// Display

/// Enable automatic OLED screen power-off after inactivity.
pub const SCREEN_AUTO_OFF_ENABLED: bool = true;

/// Inactivity timeout before OLED is turned off (seconds).
pub const SCREEN_AUTO_OFF_TIMEOUT_SECS: u64 = 120;

/// Same timeout in the millisecond units of the activity clock.
pub const SCREEN_AUTO_OFF_TIMEOUT_MS: u64 = SCREEN_AUTO_OFF_TIMEOUT_SECS * 1000;

/// Panel geometry (SSD1306 128×32).
pub const PANEL_WIDTH: u32 = 128;
pub const PANEL_HEIGHT: u32 = 32;

/// Advance of one glyph in the panel font (FONT_6X10).
pub const FONT_CHAR_WIDTH: i32 = 6;

/// Top of each of the three clock-face text lines.
pub const CLOCK_LINE_Y: [i32; 3] = [0, 12, 24];

/// Volume overlay bar column and label placement.
pub const VOLUME_BAR_X: i32 = 60;
pub const VOLUME_BAR_WIDTH: u32 = 8;
pub const VOLUME_LABEL_X: i32 = 50;
pub const VOLUME_LABEL_Y: i32 = 0;

/// Offset applied to the UTC build time for the clock face (seconds).
pub const UTC_OFFSET_SECS: i64 = 0;

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "macropad";
pub const USB_PRODUCT: &str = "3x3 Media Macropad";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 1;

/// Depth of the loop → USB writer report queue.
///
/// A chord emits four keyboard reports plus one consumer report.
pub const HID_REPORT_QUEUE_DEPTH: usize = 16;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` pins are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Row 0..2       → P0.03, P0.04, P0.28   (push-pull, resting high)
//   Column 0..2    → P0.29, P0.30, P0.31   (input, pull-down)
//   Encoder A / B  → P1.01, P1.02          (QDEC)
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27
