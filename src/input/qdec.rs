//! nRF QDEC encoder feed.
//!
//! The QDEC peripheral accumulates quadrature steps in hardware; this task
//! drains its accumulator into a [`SharedPosition`] the control loop polls.

use crate::input::SharedPosition;
use embassy_nrf::peripherals::QDEC;
use embassy_nrf::qdec::Qdec;

/// Run the encoder feed loop - must be spawned as a dedicated Embassy task.
pub async fn encoder_task(mut qdec: Qdec<'static, QDEC>, position: &'static SharedPosition) -> ! {
    info!("Encoder task started");

    loop {
        let steps = qdec.read().await;
        if steps != 0 {
            position.advance(i32::from(steps));
            trace!("Encoder: {} steps, position {}", steps, position.get());
        }
    }
}
