//! Temperature monitor firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Samples a 1N4148 diode on the ADC every 500 ms, smooths the reading with
//! a 40-sample moving average and shows voltage and temperature on a 128x32
//! SSD1306 OLED. The button toggles between Celsius and Fahrenheit.
//!
//! # Architecture
//!
//! - `sample_task`: ticker-driven acquisition, publishes into [`SharedState`]
//! - `button_task`: falling-edge wait + 200 ms debounce, raises the unit toggle
//! - main task: the event loop; sleeps until one of the tasks raises a flag
//!
//! The executor puts the core to sleep whenever every task is waiting.
//!
//! # Pin Mapping
//!
//! - GPIO26 (ADC0): diode sensor
//! - GPIO11: indicator LED (on below 40 °C)
//! - GPIO10: unit button (active-low, internal pull-up)
//! - GPIO4 / GPIO5: I2C0 SDA / SCL to the OLED
//!
//! # Host Preview
//!
//! Built for any other architecture, this binary runs the same pipeline
//! against an emulated panel and prints the frames to the terminal.

#![cfg_attr(target_arch = "arm", no_std)]
#![cfg_attr(target_arch = "arm", no_main)]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

// Modules only used in the firmware
#[cfg(target_arch = "arm")]
mod display;
#[cfg(target_arch = "arm")]
mod tasks;

// Host-only panel emulation
#[cfg(not(target_arch = "arm"))]
mod preview;

#[cfg(target_arch = "arm")]
use defmt::{info, warn};
#[cfg(target_arch = "arm")]
use embassy_executor::Spawner;
#[cfg(target_arch = "arm")]
use embassy_rp::adc::{self, Adc, Channel};
#[cfg(target_arch = "arm")]
use embassy_rp::bind_interrupts;
#[cfg(target_arch = "arm")]
use embassy_rp::gpio::{Input, Level, Output, Pull};
#[cfg(target_arch = "arm")]
use embassy_rp::i2c::{self, I2c};
#[cfg(target_arch = "arm")]
use embassy_rp::peripherals::I2C0;
#[cfg(target_arch = "arm")]
use thermo_pico2::{EventLoop, SharedState, Ssd1306};
#[cfg(target_arch = "arm")]
use {defmt_rtt as _, panic_probe as _};

#[cfg(target_arch = "arm")]
bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

/// Flags and latest measurement shared by the tasks and the event loop.
#[cfg(target_arch = "arm")]
static SHARED: SharedState = SharedState::new();

// Program metadata for `picotool info`
#[cfg(target_arch = "arm")]
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"pico2-thermo"),
    embassy_rp::binary_info::rp_program_description!(c"Diode thermometer with 128x32 SSD1306 OLED"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

#[cfg(target_arch = "arm")]
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Temperature monitor starting...");

    let p = embassy_rp::init(Default::default());

    // Indicator LED stays off until the first sample
    let led = Output::new(p.PIN_11, Level::Low);

    // Unit button (active-low with internal pull-up)
    let button = Input::new(p.PIN_10, Pull::Up);

    // Diode on ADC0
    let adc = Adc::new_blocking(p.ADC, adc::Config::default());
    let sensor = Channel::new_pin(p.PIN_26, Pull::None);

    // OLED on I2C0 (SCL=5, SDA=4)
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, display::display_i2c_config());
    let mut display = Ssd1306::new(i2c);
    match display.init().await {
        Ok(()) => info!("Display initialized"),
        Err(e) => warn!("Display init failed: {}", e),
    }

    spawner.spawn(tasks::sample_task(adc, sensor, led, &SHARED)).unwrap();
    info!("Sample task spawned");

    spawner.spawn(tasks::button_task(button, &SHARED)).unwrap();
    info!("Button task spawned");

    info!("Event loop starting");
    let mut event_loop = EventLoop::new(display);
    event_loop
        .run(&SHARED, |e| warn!("Display transfer failed: {}", e))
        .await;
}

#[cfg(not(target_arch = "arm"))]
fn main() { preview::run(); }
