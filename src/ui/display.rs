//! SSD1306 OLED panel wrapper.

use crate::config::{PANEL_HEIGHT, PANEL_WIDTH};
use crate::ui::Panel;
use crate::{Error, Result};
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x32, BufferedGraphicsMode<DisplaySize128x32>>;

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

/// [`Panel`] backed by a buffered SSD1306 on I²C.
pub struct Ssd1306Panel<I2C> {
    display: Display<I2C>,
}

impl<I2C> Ssd1306Panel<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Initialise the controller. The panel is left blank; the caller
    /// powers it on.
    pub fn init(i2c: I2C) -> Result<Self> {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x32, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        display.init().map_err(|_| Error::Init)?;
        display.clear_buffer();
        display.flush().map_err(|_| Error::Init)?;
        Ok(Self { display })
    }
}

impl<I2C> Panel for Ssd1306Panel<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn width(&self) -> u32 {
        PANEL_WIDTH
    }

    fn height(&self) -> u32 {
        PANEL_HEIGHT
    }

    fn clear(&mut self) -> Result<()> {
        self.display.clear_buffer();
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<()> {
        Text::with_baseline(text, Point::new(x, y), text_style(), Baseline::Top)
            .draw(&mut self.display)
            .map(|_| ())
            .map_err(|_| Error::Display)
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32) -> Result<()> {
        Rectangle::new(Point::new(x, y), Size::new(width, height))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut self.display)
            .map_err(|_| Error::Display)
    }

    fn flush(&mut self) -> Result<()> {
        self.display.flush().map_err(|_| Error::Display)
    }

    fn power_on(&mut self) -> Result<()> {
        self.display.set_display_on(true).map_err(|_| Error::Display)
    }

    fn power_off(&mut self) -> Result<()> {
        self.display.set_display_on(false).map_err(|_| Error::Display)
    }
}
