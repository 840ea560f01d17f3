//! Recording collaborators for unit tests.

use crate::clock::{ClockSource, WallClock};
use crate::config::{MATRIX_COLS, MATRIX_ROWS, PANEL_HEIGHT, PANEL_WIDTH};
use crate::hid::{HidOutput, Keycode};
use crate::input::{EncoderCounter, MatrixPins};
use crate::ui::Panel;
use crate::{Error, Result};

/// Key matrix with a grid of closed switches.
pub struct MockMatrix {
    closed: [[bool; MATRIX_COLS]; MATRIX_ROWS],
    active: [bool; MATRIX_ROWS],
    failing_column: Option<usize>,
}

impl MockMatrix {
    pub fn new() -> Self {
        Self {
            closed: [[false; MATRIX_COLS]; MATRIX_ROWS],
            active: [false; MATRIX_ROWS],
            failing_column: None,
        }
    }

    pub fn press(&mut self, row: usize, col: usize) {
        self.closed[row][col] = true;
    }

    pub fn fail_column(&mut self, col: usize) {
        self.failing_column = Some(col);
    }

    pub fn all_rows_inactive(&self) -> bool {
        self.active.iter().all(|a| !a)
    }
}

impl MatrixPins for MockMatrix {
    fn rows(&self) -> usize {
        MATRIX_ROWS
    }

    fn columns(&self) -> usize {
        MATRIX_COLS
    }

    fn set_row_active(&mut self, row: usize) -> Result<()> {
        assert!(self.all_rows_inactive(), "two rows driven at once");
        self.active[row] = true;
        Ok(())
    }

    fn set_row_inactive(&mut self, row: usize) -> Result<()> {
        self.active[row] = false;
        Ok(())
    }

    fn read_column(&mut self, col: usize) -> Result<bool> {
        if self.failing_column == Some(col) {
            return Err(Error::Gpio);
        }
        Ok((0..MATRIX_ROWS).any(|row| self.active[row] && self.closed[row][col]))
    }
}

pub struct MockEncoder {
    pub position: i32,
    pub fail: bool,
}

impl MockEncoder {
    pub fn at(position: i32) -> Self {
        Self {
            position,
            fail: false,
        }
    }
}

impl EncoderCounter for MockEncoder {
    fn position(&mut self) -> Result<i32> {
        if self.fail {
            return Err(Error::Encoder);
        }
        Ok(self.position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HidCall {
    Send(Keycode),
    Press(Keycode),
    ReleaseAll,
}

#[derive(Default)]
pub struct MockHid {
    pub calls: Vec<HidCall>,
    pub fail_press: bool,
}

impl HidOutput for MockHid {
    fn send_key(&mut self, code: Keycode) -> Result<()> {
        self.calls.push(HidCall::Send(code));
        Ok(())
    }

    fn press(&mut self, code: Keycode) -> Result<()> {
        if self.fail_press {
            return Err(Error::Hid);
        }
        self.calls.push(HidCall::Press(code));
        Ok(())
    }

    fn release_all(&mut self) -> Result<()> {
        self.calls.push(HidCall::ReleaseAll);
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelOp {
    Clear,
    Text(i32, i32, String),
    Rect(i32, i32, u32, u32),
    Flush,
    PowerOn,
    PowerOff,
}

/// 128×32 panel that records every call.
pub struct MockPanel {
    pub ops: Vec<PanelOp>,
    pub powered: bool,
    pub fail: bool,
}

impl MockPanel {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            powered: true,
            fail: false,
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                PanelOp::Text(_, _, s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, op: PanelOp) -> Result<()> {
        if self.fail {
            return Err(Error::Display);
        }
        self.ops.push(op);
        Ok(())
    }
}

impl Panel for MockPanel {
    fn width(&self) -> u32 {
        PANEL_WIDTH
    }

    fn height(&self) -> u32 {
        PANEL_HEIGHT
    }

    fn clear(&mut self) -> Result<()> {
        self.record(PanelOp::Clear)
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<()> {
        self.record(PanelOp::Text(x, y, text.into()))
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32) -> Result<()> {
        self.record(PanelOp::Rect(x, y, width, height))
    }

    fn flush(&mut self) -> Result<()> {
        self.record(PanelOp::Flush)
    }

    fn power_on(&mut self) -> Result<()> {
        self.record(PanelOp::PowerOn)?;
        self.powered = true;
        Ok(())
    }

    fn power_off(&mut self) -> Result<()> {
        self.record(PanelOp::PowerOff)?;
        self.powered = false;
        Ok(())
    }
}

pub struct MockClock {
    pub now: u64,
    pub wall: WallClock,
}

impl Default for MockClock {
    fn default() -> Self {
        Self {
            now: 0,
            wall: WallClock::from_unix_secs(1_792_339_200),
        }
    }
}

impl ClockSource for MockClock {
    fn now(&self) -> u64 {
        self.now
    }

    fn wall_clock(&self) -> Result<WallClock> {
        Ok(self.wall)
    }
}
