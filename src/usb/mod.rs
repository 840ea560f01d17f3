//! USB Device subsystem - presents a composite HID device to the host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`.  We create a **composite device** with two HID
//! interfaces:
//!
//! - Interface 0: Keyboard (boot protocol), used for the edit chords
//! - Interface 1: Consumer control, used for the media keys
//!
//! The control loop never awaits USB: it queues reports on a channel and
//! the writer task drains them to the correct HID endpoint.

pub mod hid_device;
