//! Host preview of the thermometer.
//!
//! Runs the library pipeline on virtual time: a synthetic diode ramp goes
//! through the real [`AcquisitionScheduler`], one bouncy button press goes
//! through the real [`Debouncer`], and the real [`EventLoop`] drives an
//! emulated SSD1306. Frames are printed as ASCII art.
//!
//! ```bash
//! RUST_LOG=debug cargo run --bin thermo --target x86_64-unknown-linux-gnu
//! ```

mod panel;

use std::convert::Infallible;

use embassy_futures::block_on;
use embedded_hal::digital::{ErrorType, OutputPin};
use env_logger::Env;
use log::{debug, info};
use thermo_pico2::config::{ADC_RANGE, ADC_VREF, SAMPLE_PERIOD_MS, SENSOR_OFFSET_V, SENSOR_SLOPE_V_PER_C};
use thermo_pico2::{AcquisitionScheduler, Debouncer, EventLoop, SharedState, Ssd1306, StepOutcome};

use self::panel::EmulatedPanel;

/// Samples to simulate (30 s at the firmware sampling rate).
const PREVIEW_TICKS: u64 = 60;

/// Print the panel every this many samples.
const PRINT_EVERY: u64 = 10;

/// Synthetic diode temperature at t=0.
const RAMP_START_C: f32 = 25.0;

/// Temperature rise per sample.
const RAMP_STEP_C: f32 = 0.5;

/// Falling edges seen on the button line: one press at 12.03 s with
/// contact bounce, all inside the quiet window.
const BUTTON_EDGES_MS: [u64; 4] = [12_030, 12_034, 12_041, 12_180];

/// ADC code the diode would produce at `celsius`.
fn synthetic_raw(celsius: f32) -> u16 {
    let volts = SENSOR_OFFSET_V - SENSOR_SLOPE_V_PER_C * celsius;
    (volts * ADC_RANGE as f32 / ADC_VREF).round().clamp(0.0, (ADC_RANGE - 1) as f32) as u16
}

/// Indicator LED that logs its transitions.
#[derive(Default)]
struct PreviewLed {
    lit: Option<bool>,
}

impl ErrorType for PreviewLed {
    type Error = Infallible;
}

impl OutputPin for PreviewLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.lit != Some(false) {
            info!("LED off");
        }
        self.lit = Some(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if self.lit != Some(true) {
            info!("LED on");
        }
        self.lit = Some(true);
        Ok(())
    }
}

pub fn run() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    info!("Thermometer preview: {PREVIEW_TICKS} samples, {SAMPLE_PERIOD_MS} ms apart");

    let panel = EmulatedPanel::new();
    let shared = SharedState::new();

    let mut display = Ssd1306::new(panel.clone());
    let Ok(()) = block_on(display.init());
    info!("Panel initialized (display on: {})", panel.inspect(|p| p.display_on()));

    let mut event_loop = EventLoop::new(display);
    let mut scheduler: AcquisitionScheduler = AcquisitionScheduler::new();
    let mut debouncer = Debouncer::new();
    let mut led = PreviewLed::default();
    let mut edges = BUTTON_EDGES_MS.iter().copied().peekable();

    for tick in 1..=PREVIEW_TICKS {
        let now_ms = tick * SAMPLE_PERIOD_MS;

        // Button edges since the previous sample, in order
        while let Some(edge_ms) = edges.next_if(|&t| t <= now_ms) {
            if debouncer.poll(edge_ms) {
                debug!("t={edge_ms} ms: button re-armed");
            }
            if debouncer.on_falling_edge(edge_ms) {
                info!("t={edge_ms} ms: button press");
                shared.request_unit_toggle();
            } else {
                debug!("t={edge_ms} ms: bounce ignored");
            }
        }
        if debouncer.poll(now_ms) {
            debug!("t={now_ms} ms: button re-armed");
        }

        let celsius = RAMP_START_C + RAMP_STEP_C * tick as f32;
        let raw = synthetic_raw(celsius);
        let Ok(measurement) = scheduler.tick(raw, &mut led, &shared);
        debug!(
            "t={now_ms} ms: raw={raw} V={:.4} T={:.2} filtered={:.2}",
            measurement.voltage,
            measurement.raw_temperature_celsius,
            measurement.filtered_temperature_celsius
        );

        let unit_before = event_loop.unit();
        let Ok(outcome) = block_on(event_loop.step(&shared));

        if outcome == StepOutcome::Rendered && (tick % PRINT_EVERY == 0 || event_loop.unit() != unit_before) {
            println!("t={now_ms} ms, unit {}", event_loop.unit().suffix());
            panel.inspect(|p| println!("{p}"));
        }
    }

    info!("Preview done: {} frames sent", panel.inspect(|p| p.frames()));
}
