//! The control loop body.
//!
//! One [`Device::tick`] runs the whole fixed sequence:
//!
//! ```text
//! scan → dispatch → encoder poll → volume → arbitration → render → power policy
//! ```
//!
//! The caller sleeps `TICK_PERIOD_MS` between ticks. All mutable state
//! lives in [`DeviceState`] and is touched only from `tick`, so nothing
//! here needs locking. A collaborator failure skips that step for the
//! current tick; the rest of the tick still runs.

use crate::clock::ClockSource;
use crate::dispatch;
use crate::hid::HidOutput;
use crate::input::{self, Debouncer, EncoderCounter, EncoderTracker, MatrixPins};
use crate::keymap::{LogicalAction, MatrixCell};
use crate::ui::{ActivityKind, DisplayArbiter, DisplayMode, Panel};
use crate::volume::Volume;
use crate::{Error, Result};

/// Everything that changes at runtime.
#[derive(Clone, Copy, Debug)]
pub struct DeviceState {
    pub volume: Volume,
    pub arbiter: DisplayArbiter,
    pub encoder: EncoderTracker,
    pub debouncer: Debouncer,
}

/// What one tick observed and did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Debounced key seen this tick.
    pub key: Option<MatrixCell>,
    /// Action dispatched for it (`None` for unmapped cells or a failed send).
    pub action: Option<LogicalAction>,
    /// Encoder movement applied to the volume.
    pub encoder_delta: i32,
    /// Display mode at the end of the tick.
    pub mode: DisplayMode,
    /// First failure of the tick, if any.
    pub error: Option<Error>,
}

impl TickReport {
    fn record<T>(&mut self, step: &'static str, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Tick: {} failed: {}", step, e);
                self.error.get_or_insert(e);
                None
            }
        }
    }
}

/// The macropad: collaborators plus runtime state.
pub struct Device<M, E, H, P, C> {
    matrix: M,
    encoder: E,
    hid: H,
    panel: P,
    clock: C,
    state: DeviceState,
}

impl<M, E, H, P, C> Device<M, E, H, P, C>
where
    M: MatrixPins,
    E: EncoderCounter,
    H: HidOutput,
    P: Panel,
    C: ClockSource,
{
    /// Bring the device up. Any collaborator failure here is fatal
    /// ([`Error::Init`]).
    pub fn new(matrix: M, mut encoder: E, hid: H, mut panel: P, clock: C) -> Result<Self> {
        let now = clock.now();
        let tracker = EncoderTracker::new(&mut encoder).map_err(|_| Error::Init)?;
        panel
            .power_on()
            .and_then(|()| panel.clear())
            .and_then(|()| panel.flush())
            .map_err(|_| Error::Init)?;

        info!("Device: up at {} ms, encoder at {}", now, tracker.last_position());

        Ok(Self {
            matrix,
            encoder,
            hid,
            panel,
            clock,
            state: DeviceState {
                volume: Volume::default(),
                arbiter: DisplayArbiter::new(now),
                encoder: tracker,
                debouncer: Debouncer::default(),
            },
        })
    }

    /// Replace the display policy (mainly for tests and bring-up).
    pub fn with_arbiter(mut self, arbiter: DisplayArbiter) -> Self {
        self.state.arbiter = arbiter;
        self
    }

    pub fn with_volume(mut self, volume: Volume) -> Self {
        self.state.volume = volume;
        self
    }

    pub fn with_debouncer(mut self, debouncer: Debouncer) -> Self {
        self.state.debouncer = debouncer;
        self
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    pub fn hid(&self) -> &H {
        &self.hid
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn matrix_mut(&mut self) -> &mut M {
        &mut self.matrix
    }

    pub fn encoder_mut(&mut self) -> &mut E {
        &mut self.encoder
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Run one pass of the control loop.
    pub fn tick(&mut self) -> TickReport {
        let now = self.clock.now();
        let mut report = TickReport::default();

        // Keys
        let raw = report
            .record("matrix scan", input::scan(&mut self.matrix))
            .flatten();
        report.key = self.state.debouncer.update(raw);

        if let Some(cell) = report.key {
            let woke = self
                .state
                .arbiter
                .notify_activity(&mut self.panel, now, ActivityKind::KeyPress);
            report.record("key activity", woke);
            let dispatched = dispatch::dispatch_cell(&mut self.hid, cell);
            report.action = report.record("dispatch", dispatched).flatten();
        }

        // Encoder
        let polled = self.state.encoder.poll(&mut self.encoder);
        if let Some(delta) = report.record("encoder poll", polled) {
            if delta != 0 {
                self.state.volume = self.state.volume.apply_delta(delta);
                report.encoder_delta = delta;
                debug!("Volume: {} ({})", self.state.volume.get(), delta);
                let woke = self
                    .state
                    .arbiter
                    .notify_activity(&mut self.panel, now, ActivityKind::Encoder);
                report.record("encoder activity", woke);
            }
        }

        // Display
        let rendered =
            self.state
                .arbiter
                .render_if_due(&mut self.panel, self.state.volume, &self.clock);
        report.record("render", rendered);
        let powered = self.state.arbiter.apply_power_policy(&mut self.panel, now);
        report.record("power policy", powered);

        report.mode = self.state.arbiter.mode();
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{HidCall, MockClock, MockEncoder, MockHid, MockMatrix, MockPanel, PanelOp};

    type TestDevice = Device<MockMatrix, MockEncoder, MockHid, MockPanel, MockClock>;

    fn device() -> TestDevice {
        Device::new(
            MockMatrix::new(),
            MockEncoder::at(0),
            MockHid::default(),
            MockPanel::new(),
            MockClock::default(),
        )
        .unwrap()
    }

    #[test]
    fn bring_up_powers_and_clears_panel() {
        let d = device();
        assert_eq!(d.panel().ops, [PanelOp::PowerOn, PanelOp::Clear, PanelOp::Flush]);
        assert_eq!(d.state().volume.get(), 50);
        assert_eq!(d.state().arbiter.mode(), DisplayMode::Clock);
    }

    #[test]
    fn bring_up_failure_is_fatal() {
        let mut panel = MockPanel::new();
        panel.fail = true;
        let d = Device::new(
            MockMatrix::new(),
            MockEncoder::at(0),
            MockHid::default(),
            panel,
            MockClock::default(),
        );
        assert!(matches!(d, Err(Error::Init)));
    }

    #[test]
    fn quiet_tick_renders_clock_only() {
        let mut d = device();
        let report = d.tick();
        assert_eq!(report, TickReport::default());
        assert!(d.hid().calls.is_empty());
    }

    #[test]
    fn key_press_dispatches_in_same_tick() {
        let mut d = device();
        d.matrix_mut().press(0, 1);
        let report = d.tick();
        assert_eq!(report.action, Some(LogicalAction::Mute));
        assert_eq!(d.hid().calls.len(), 1);
        assert!(matches!(d.hid().calls[0], HidCall::Send(_)));
    }

    #[test]
    fn encoder_failure_skips_step_but_keeps_scanning() {
        let mut d = device();
        d.encoder_mut().fail = true;
        d.matrix_mut().press(1, 1);
        let report = d.tick();
        assert_eq!(report.error, Some(Error::Encoder));
        assert_eq!(report.action, Some(LogicalAction::PlayPause));
    }
}
