//! HID output: keycodes, the output trait the dispatcher drives, and the
//! report encoder that turns press/send/release into USB HID reports.

pub mod consumer;
pub mod keyboard;

use crate::Result;
use consumer::{ConsumerReport, ConsumerUsage};
use keyboard::{KeyboardReport, KeyboardUsage};

/// A key the HID layer can emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Keycode {
    Keyboard(KeyboardUsage),
    Consumer(ConsumerUsage),
}

/// Keyboard/media output used by the action dispatcher.
pub trait HidOutput {
    /// Press and release `code`, leaving other held keys alone.
    fn send_key(&mut self, code: Keycode) -> Result<()>;
    /// Hold `code` until released.
    fn press(&mut self, code: Keycode) -> Result<()>;
    /// Release every held key.
    fn release_all(&mut self) -> Result<()>;
}

/// One report ready for the USB endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidReport {
    Keyboard(KeyboardReport),
    Consumer(ConsumerReport),
}

impl HidReport {
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        match self {
            HidReport::Keyboard(k) => k.serialize(buf),
            HidReport::Consumer(c) => c.serialize(buf),
        }
    }
}

/// Destination of encoded reports (USB writer queue on hardware).
pub trait ReportSink {
    fn write(&mut self, report: &HidReport) -> Result<()>;
}

/// [`HidOutput`] that tracks held keys and writes a report per change.
pub struct HidKeyboard<S> {
    sink: S,
    keyboard: KeyboardReport,
    consumer: ConsumerReport,
    /// A release-all did not reach the host, which may still hold keys.
    stale: bool,
}

impl<S: ReportSink> HidKeyboard<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            keyboard: KeyboardReport::empty(),
            consumer: ConsumerReport::empty(),
            stale: false,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Re-send the empty reports if the last release-all failed.
    fn resync(&mut self) -> Result<()> {
        if self.stale {
            self.write_empty()?;
            warn!("HID: host state resynchronised");
        }
        Ok(())
    }

    fn write_empty(&mut self) -> Result<()> {
        let keyboard = self.sink.write(&HidReport::Keyboard(KeyboardReport::empty()));
        let consumer = self.sink.write(&HidReport::Consumer(ConsumerReport::empty()));
        let written = keyboard.and(consumer);
        self.stale = written.is_err();
        written
    }

    fn release(&mut self, code: Keycode) -> Result<()> {
        match code {
            Keycode::Keyboard(usage) => {
                self.keyboard.release(usage);
                self.sink.write(&HidReport::Keyboard(self.keyboard))
            }
            Keycode::Consumer(_) => {
                self.consumer = ConsumerReport::empty();
                self.sink.write(&HidReport::Consumer(self.consumer))
            }
        }
    }
}

impl<S: ReportSink> HidOutput for HidKeyboard<S> {
    fn send_key(&mut self, code: Keycode) -> Result<()> {
        self.press(code)?;
        self.release(code)
    }

    fn press(&mut self, code: Keycode) -> Result<()> {
        self.resync()?;
        match code {
            Keycode::Keyboard(usage) => {
                self.keyboard.press(usage)?;
                self.sink.write(&HidReport::Keyboard(self.keyboard))
            }
            Keycode::Consumer(usage) => {
                self.consumer = ConsumerReport::new(usage);
                self.sink.write(&HidReport::Consumer(self.consumer))
            }
        }
    }

    fn release_all(&mut self) -> Result<()> {
        self.keyboard = KeyboardReport::empty();
        self.consumer = ConsumerReport::empty();
        self.write_empty()
    }
}
