//! Cooperative event loop: unit toggling and display refresh.
//!
//! One [`EventLoop::step`] drains the pending flags:
//! - unit toggle → flip [`DisplayUnit`], and force a redraw
//! - display update → compose a fresh frame and push it to the panel
//!
//! Between steps the caller awaits [`SharedState::wait_for_event`]; on the
//! firmware the executor parks the core until the next interrupt.
//!
//! # Frame Layout
//!
//! ```text
//! (10,0) TENSAO:        (70,0) 1.650 V
//! (10,8) TEMP:          (70,8) 23.4 C
//! ```
//! Punctuation has no glyph, so it shows as a gap on the panel.

use core::fmt::Write;

use embedded_hal_async::i2c::I2c;
use heapless::String;

use crate::acquisition::Measurement;
use crate::config::{LABEL_X, TEMPERATURE_ROW_Y, VALUE_X, VOLTAGE_ROW_Y};
use crate::convert::celsius_to_fahrenheit;
use crate::framebuffer::Framebuffer;
use crate::shared::SharedState;
use crate::ssd1306::{RenderRegion, Ssd1306};

/// Label text for the voltage row.
pub const VOLTAGE_LABEL: &str = "Tensao:";

/// Label text for the temperature row.
pub const TEMPERATURE_LABEL: &str = "Temp:";

/// Capacity of a formatted value string.
const VALUE_LEN: usize = 16;

// =============================================================================
// Display Unit
// =============================================================================

/// Temperature unit shown on the panel.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum DisplayUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl DisplayUnit {
    /// The other unit.
    #[inline]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }

    /// Suffix printed after the value.
    #[inline]
    pub const fn suffix(self) -> char {
        match self {
            Self::Celsius => 'C',
            Self::Fahrenheit => 'F',
        }
    }

    /// Express a Celsius temperature in this unit.
    #[inline]
    pub fn from_celsius(
        self,
        celsius: f32,
    ) -> f32 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius_to_fahrenheit(celsius),
        }
    }
}

// =============================================================================
// Frame Composition
// =============================================================================

/// Voltage with three decimals, e.g. `"1.650 V"`.
pub fn format_voltage(voltage: f32) -> String<VALUE_LEN> {
    let mut text = String::new();
    // Overflow only truncates the text shown on the panel
    let _ = write!(text, "{voltage:.3} V");
    text
}

/// Temperature with one decimal and the unit suffix, e.g. `"23.4 C"`.
pub fn format_temperature(
    celsius: f32,
    unit: DisplayUnit,
) -> String<VALUE_LEN> {
    let mut text = String::new();
    let _ = write!(text, "{:.1} {}", unit.from_celsius(celsius), unit.suffix());
    text
}

/// Build the frame for a measurement in the given unit.
pub fn compose_frame(
    measurement: &Measurement,
    unit: DisplayUnit,
) -> Framebuffer {
    let mut frame = Framebuffer::new();
    frame.write_string(LABEL_X, VOLTAGE_ROW_Y, VOLTAGE_LABEL);
    frame.write_string(VALUE_X, VOLTAGE_ROW_Y, &format_voltage(measurement.voltage));
    frame.write_string(LABEL_X, TEMPERATURE_ROW_Y, TEMPERATURE_LABEL);
    frame.write_string(
        VALUE_X,
        TEMPERATURE_ROW_Y,
        &format_temperature(measurement.filtered_temperature_celsius, unit),
    );
    frame
}

// =============================================================================
// Event Loop
// =============================================================================

/// What one [`EventLoop::step`] did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StepOutcome {
    /// No flag was pending.
    Idle,
    /// A frame was pushed to the display.
    Rendered,
}

/// Consumer side of [`SharedState`]: owns the display and the active unit.
pub struct EventLoop<I2C> {
    display: Ssd1306<I2C>,
    region: RenderRegion,
    unit: DisplayUnit,
}

impl<I2C: I2c> EventLoop<I2C> {
    /// Wrap an initialised display; frames cover the full screen.
    pub fn new(display: Ssd1306<I2C>) -> Self {
        Self {
            display,
            region: RenderRegion::full_screen(),
            unit: DisplayUnit::default(),
        }
    }

    /// Handle every pending flag once.
    ///
    /// A transport error is returned after the flags have been cleared, so
    /// the next frame is attempted on the next update request.
    pub async fn step(
        &mut self,
        shared: &SharedState,
    ) -> Result<StepOutcome, I2C::Error> {
        let mut refresh = false;

        if shared.take_unit_toggle() {
            self.unit = self.unit.toggle();
            refresh = true;
        }

        if shared.take_display_update() {
            refresh = true;
        }

        if !refresh {
            return Ok(StepOutcome::Idle);
        }

        let frame = compose_frame(&shared.latest(), self.unit);
        self.display.render(frame.as_bytes(), &self.region).await?;
        Ok(StepOutcome::Rendered)
    }

    /// Step, then sleep until a producer raises a flag. Never returns.
    ///
    /// `on_error` sees every transport failure; the loop itself never stops.
    pub async fn run<F>(
        &mut self,
        shared: &SharedState,
        mut on_error: F,
    ) where
        F: FnMut(I2C::Error),
    {
        loop {
            if let Err(e) = self.step(shared).await {
                on_error(e);
            }
            shared.wait_for_event().await;
        }
    }

    /// Active display unit.
    #[inline]
    pub const fn unit(&self) -> DisplayUnit { self.unit }

    /// Give the display back.
    pub fn release(self) -> Ssd1306<I2C> { self.display }
}

// =============================================================================
// Unit Tests
// =============================================================================
