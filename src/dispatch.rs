//! Action dispatcher: logical action → HID emission.
//!
//! Momentary actions send one consumer (media) usage. Chord actions hold
//! Left Ctrl, send a letter, then release everything, in that order.

use crate::hid::consumer::ConsumerUsage;
use crate::hid::keyboard::KeyboardUsage;
use crate::hid::{HidOutput, Keycode};
use crate::keymap::{self, LogicalAction, MatrixCell};
use crate::Result;

/// How an action is emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emission {
    Momentary(ConsumerUsage),
    Chord {
        modifier: KeyboardUsage,
        key: KeyboardUsage,
    },
}

pub const fn emission(action: LogicalAction) -> Emission {
    match action {
        LogicalAction::VolumeDown => Emission::Momentary(ConsumerUsage::VolumeDown),
        LogicalAction::Mute => Emission::Momentary(ConsumerUsage::Mute),
        LogicalAction::VolumeUp => Emission::Momentary(ConsumerUsage::VolumeUp),
        LogicalAction::PreviousTrack => Emission::Momentary(ConsumerUsage::PrevTrack),
        LogicalAction::PlayPause => Emission::Momentary(ConsumerUsage::PlayPause),
        LogicalAction::NextTrack => Emission::Momentary(ConsumerUsage::NextTrack),
        LogicalAction::CopyChord => ctrl(KeyboardUsage::C),
        LogicalAction::PasteChord => ctrl(KeyboardUsage::V),
        LogicalAction::CutChord => ctrl(KeyboardUsage::X),
    }
}

const fn ctrl(key: KeyboardUsage) -> Emission {
    Emission::Chord {
        modifier: KeyboardUsage::LeftControl,
        key,
    }
}

/// Emit `action` on `hid`.
pub fn dispatch<H: HidOutput>(hid: &mut H, action: LogicalAction) -> Result<()> {
    debug!("Dispatch: {}", action);
    match emission(action) {
        Emission::Momentary(usage) => hid.send_key(Keycode::Consumer(usage)),
        Emission::Chord { modifier, key } => chord(hid, modifier, key),
    }
}

/// Release is attempted even when the press or send failed, so nothing is
/// left held; the first error is returned.
fn chord<H: HidOutput>(hid: &mut H, modifier: KeyboardUsage, key: KeyboardUsage) -> Result<()> {
    let sent = hid
        .press(Keycode::Keyboard(modifier))
        .and_then(|()| hid.send_key(Keycode::Keyboard(key)));
    let released = hid.release_all();
    sent.and(released)
}

/// Look up and dispatch the action for `cell`. Unmapped cells do nothing
/// and return `Ok(None)`.
pub fn dispatch_cell<H: HidOutput>(hid: &mut H, cell: MatrixCell) -> Result<Option<LogicalAction>> {
    let Some(action) = keymap::action_for(cell) else {
        return Ok(None);
    };
    dispatch(hid, action)?;
    Ok(Some(action))
}
