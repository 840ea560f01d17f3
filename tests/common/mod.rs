//! Host-side collaborators shared by the integration tests.

#![allow(dead_code)]

use macropad::clock::{ClockSource, SoftClock, WallClock};
use macropad::hid::{HidOutput, HidReport, Keycode, ReportSink};
use macropad::input::{EncoderCounter, MatrixPins};
use macropad::ui::Panel;
use macropad::Result;

/// 3×3 matrix with at most one closed switch.
#[derive(Default)]
pub struct Keys {
    pub down: Option<(usize, usize)>,
    active_row: Option<usize>,
}

impl MatrixPins for Keys {
    fn rows(&self) -> usize {
        3
    }

    fn columns(&self) -> usize {
        3
    }

    fn set_row_active(&mut self, row: usize) -> Result<()> {
        self.active_row = Some(row);
        Ok(())
    }

    fn set_row_inactive(&mut self, _row: usize) -> Result<()> {
        self.active_row = None;
        Ok(())
    }

    fn read_column(&mut self, col: usize) -> Result<bool> {
        Ok(matches!((self.down, self.active_row), (Some((r, c)), Some(a)) if r == a && c == col))
    }
}

#[derive(Default)]
pub struct Knob {
    pub position: i32,
}

impl EncoderCounter for Knob {
    fn position(&mut self) -> Result<i32> {
        Ok(self.position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emitted {
    Send(Keycode),
    Press(Keycode),
    ReleaseAll,
}

#[derive(Default)]
pub struct Host {
    pub emitted: Vec<Emitted>,
}

impl HidOutput for Host {
    fn send_key(&mut self, code: Keycode) -> Result<()> {
        self.emitted.push(Emitted::Send(code));
        Ok(())
    }

    fn press(&mut self, code: Keycode) -> Result<()> {
        self.emitted.push(Emitted::Press(code));
        Ok(())
    }

    fn release_all(&mut self) -> Result<()> {
        self.emitted.push(Emitted::ReleaseAll);
        Ok(())
    }
}

#[derive(Default)]
pub struct Reports {
    pub sent: Vec<HidReport>,
}

impl ReportSink for Reports {
    fn write(&mut self, report: &HidReport) -> Result<()> {
        self.sent.push(*report);
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Draw {
    Clear,
    Text(i32, i32, String),
    Rect(i32, i32, u32, u32),
    Flush,
    On,
    Off,
}

/// 128×32 panel recording draws since the last `take`.
pub struct Oled {
    pub draws: Vec<Draw>,
    pub powered: bool,
}

impl Default for Oled {
    fn default() -> Self {
        Self {
            draws: Vec::new(),
            powered: false,
        }
    }
}

impl Oled {
    pub fn take(&mut self) -> Vec<Draw> {
        std::mem::take(&mut self.draws)
    }
}

impl Panel for Oled {
    fn width(&self) -> u32 {
        128
    }

    fn height(&self) -> u32 {
        32
    }

    fn clear(&mut self) -> Result<()> {
        self.draws.push(Draw::Clear);
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<()> {
        self.draws.push(Draw::Text(x, y, text.to_owned()));
        Ok(())
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32) -> Result<()> {
        self.draws.push(Draw::Rect(x, y, width, height));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.draws.push(Draw::Flush);
        Ok(())
    }

    fn power_on(&mut self) -> Result<()> {
        self.draws.push(Draw::On);
        self.powered = true;
        Ok(())
    }

    fn power_off(&mut self) -> Result<()> {
        self.draws.push(Draw::Off);
        self.powered = false;
        Ok(())
    }
}

/// Clock whose monotonic time is set by the test (ms).
pub struct Clock {
    pub now: u64,
    pub wall: WallClock,
    /// When set, the calendar is derived from it instead of `wall`.
    pub calendar: Option<SoftClock>,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            now: 0,
            // Sunday 2026-10-18 16:00
            wall: WallClock::from_unix_secs(1_792_339_200),
            calendar: None,
        }
    }
}

impl ClockSource for Clock {
    fn now(&self) -> u64 {
        self.now
    }

    fn wall_clock(&self) -> Result<WallClock> {
        match self.calendar {
            Some(calendar) => calendar.at(self.now),
            None => Ok(self.wall),
        }
    }
}
