//! Unit toggle button task.
//!
//! The GPIO edge interrupt is only enabled while this task awaits
//! `wait_for_falling_edge`. After an accepted edge the task sleeps until the
//! debounce deadline instead, so bounce edges in between never reach it.

use defmt::info;
use embassy_rp::gpio::Input;
use embassy_time::{Instant, Timer};
use thermo_pico2::{Debouncer, SharedState};

#[embassy_executor::task]
pub async fn button_task(
    mut button: Input<'static>,
    shared: &'static SharedState,
) {
    info!("Button task started");

    let mut debouncer = Debouncer::new();

    loop {
        button.wait_for_falling_edge().await;

        if debouncer.on_falling_edge(Instant::now().as_millis()) {
            info!("Button press: toggling unit");
            shared.request_unit_toggle();
        }

        // One-shot re-arm
        if let Some(deadline) = debouncer.rearm_deadline() {
            Timer::at(Instant::from_millis(deadline)).await;
        }
        debouncer.rearm();
    }
}
