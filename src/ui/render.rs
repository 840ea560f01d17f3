//! Screen layouts. Every draw is a full redraw: clear, draw, flush.

use crate::clock::WallClock;
use crate::config::{
    CLOCK_LINE_Y, FONT_CHAR_WIDTH, VOLUME_BAR_WIDTH, VOLUME_BAR_X, VOLUME_LABEL_X, VOLUME_LABEL_Y,
};
use crate::ui::Panel;
use crate::volume::Volume;
use crate::{Error, Result};
use core::fmt::{self, Write};
use heapless::String;

/// Render the volume overlay: a bottom-aligned bar plus a "VOL" label.
pub fn draw_volume_bar<P: Panel>(panel: &mut P, volume: Volume) -> Result<()> {
    let panel_height = panel.height();
    let bar_height = volume.bar_height(panel_height);

    panel.clear()?;
    if bar_height > 0 {
        let top = i32::try_from(panel_height - bar_height).map_err(|_| Error::Display)?;
        panel.fill_rect(VOLUME_BAR_X, top, VOLUME_BAR_WIDTH, bar_height)?;
    }
    panel.draw_text(VOLUME_LABEL_X, VOLUME_LABEL_Y, "VOL")?;
    panel.flush()
}

/// Render the clock face:
///
/// ```text
/// Sun 18
///               Oct 2026
/// 16:05
/// ```
pub fn draw_clock<P: Panel>(panel: &mut P, time: &WallClock) -> Result<()> {
    let date: String<8> = format_line(format_args!("{} {}", time.weekday_name(), time.day))?;
    let month_year: String<10> =
        format_line(format_args!("{} {}", time.month_name(), time.year))?;
    let hhmm: String<8> = format_line(format_args!("{:02}:{:02}", time.hour, time.minute))?;

    panel.clear()?;
    panel.draw_text(0, CLOCK_LINE_Y[0], &date)?;
    panel.draw_text(right_aligned_x(panel.width(), &month_year), CLOCK_LINE_Y[1], &month_year)?;
    panel.draw_text(0, CLOCK_LINE_Y[2], &hhmm)?;
    panel.flush()
}

/// Format one text line, failing with [`Error::Display`] if it does not fit.
fn format_line<const N: usize>(args: fmt::Arguments<'_>) -> Result<String<N>> {
    let mut line = String::new();
    line.write_fmt(args).map_err(|_| Error::Display)?;
    Ok(line)
}

fn right_aligned_x(panel_width: u32, text: &str) -> i32 {
    let width = i32::try_from(panel_width).unwrap_or(i32::MAX);
    let text_width = i32::try_from(text.len())
        .unwrap_or(0)
        .saturating_mul(FONT_CHAR_WIDTH);
    width.saturating_sub(text_width).max(0)
}
