//! Periodic acquisition task.
//!
//! Ticks every [`SAMPLE_PERIOD_MS`], reads the diode with a blocking
//! one-shot conversion and runs the acquisition step. The step has no await
//! points, so a tick's measurement is published in one go.

use defmt::{debug, info, warn};
use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Ticker};
use thermo_pico2::config::SAMPLE_PERIOD_MS;
use thermo_pico2::{AcquisitionScheduler, SharedState};

#[embassy_executor::task]
pub async fn sample_task(
    mut adc: Adc<'static, Blocking>,
    mut sensor: Channel<'static>,
    mut led: Output<'static>,
    shared: &'static SharedState,
) {
    info!("Sample task started");

    let mut scheduler: AcquisitionScheduler = AcquisitionScheduler::new();
    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_PERIOD_MS));

    loop {
        ticker.next().await;

        let raw = match adc.blocking_read(&mut sensor) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("ADC read failed: {}", e);
                continue;
            }
        };

        // GPIO output cannot fail
        let Ok(measurement) = scheduler.tick(raw, &mut led, shared);

        debug!(
            "raw={} V={} T={}C filtered={}C",
            raw,
            measurement.voltage,
            measurement.raw_temperature_celsius,
            measurement.filtered_temperature_celsius
        );
    }
}
