//! macropad firmware - nRF52840 entry point.
//!
//! Brings up the key matrix, QDEC encoder, SSD1306 panel and USB HID
//! device, then runs the control loop at a fixed tick period.

#![no_std]
#![no_main]

use defmt::{info, unwrap};
use defmt_rtt as _;
use panic_probe as _;

use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::qdec::{self, Qdec};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::Timer;
use embassy_usb::class::hid::HidWriter;
use embassy_usb::UsbDevice;

use macropad::clock::{SoftClock, UptimeClock};
use macropad::config;
use macropad::device::Device;
use macropad::hid::HidKeyboard;
use macropad::input::{self, PinMatrix, SharedPosition};
use macropad::ui::display::Ssd1306Panel;
use macropad::usb::hid_device::{self, ChannelSink, ReportChannel, ReportReceiver, UsbDriver};

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    QDEC => qdec::InterruptHandler<peripherals::QDEC>;
});

static REPORTS: ReportChannel = ReportChannel::new();
static ENCODER_POSITION: SharedPosition = SharedPosition::new();

#[embassy_executor::task]
async fn usb_task(device: UsbDevice<'static, UsbDriver>) -> ! {
    hid_device::run_usb_device(device).await
}

#[embassy_executor::task]
async fn hid_task(
    keyboard: HidWriter<'static, UsbDriver, 8>,
    consumer: HidWriter<'static, UsbDriver, 8>,
    rx: ReportReceiver,
) -> ! {
    hid_device::hid_writer_task(keyboard, consumer, rx).await
}

#[embassy_executor::task]
async fn encoder_task(qdec: Qdec<'static, peripherals::QDEC>) -> ! {
    input::qdec::encoder_task(qdec, &ENCODER_POSITION).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("macropad v{}", env!("CARGO_PKG_VERSION"));
    let p = embassy_nrf::init(Default::default());

    // USB
    let usb = hid_device::init(p.USBD);
    unwrap!(spawner.spawn(usb_task(usb.device)));
    unwrap!(spawner.spawn(hid_task(
        usb.keyboard_writer,
        usb.consumer_writer,
        REPORTS.receiver(),
    )));

    // Encoder
    let qdec = Qdec::new(p.QDEC, Irqs, p.P1_01, p.P1_02, qdec::Config::default());
    unwrap!(spawner.spawn(encoder_task(qdec)));

    // Key matrix: rows rest high and are pulled low one at a time.
    let rows = [
        Output::new(p.P0_03, Level::High, OutputDrive::Standard),
        Output::new(p.P0_04, Level::High, OutputDrive::Standard),
        Output::new(p.P0_28, Level::High, OutputDrive::Standard),
    ];
    let cols = [
        Input::new(p.P0_29, Pull::Down),
        Input::new(p.P0_30, Pull::Down),
        Input::new(p.P0_31, Pull::Down),
    ];
    let matrix = unwrap!(PinMatrix::<_, _, { config::MATRIX_ROWS }, { config::MATRIX_COLS }>::new(
        rows, cols
    ));

    // Display
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let panel = unwrap!(Ssd1306Panel::init(i2c));

    let clock = UptimeClock::new(SoftClock::from_stamp(
        env!("MACROPAD_BUILD_EPOCH"),
        config::UTC_OFFSET_SECS,
    ));
    let hid = HidKeyboard::new(ChannelSink::new(REPORTS.sender()));

    let mut device = unwrap!(Device::new(matrix, &ENCODER_POSITION, hid, panel, clock));
    info!("macropad ready");

    loop {
        device.tick();
        Timer::after_millis(config::TICK_PERIOD_MS).await;
    }
}
