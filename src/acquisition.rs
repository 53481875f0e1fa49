//! Periodic sampling step.
//!
//! Runs once per [`SAMPLE_PERIOD_MS`](crate::config::SAMPLE_PERIOD_MS) tick:
//! ADC code → volts → °C → moving average → indicator LED → publish →
//! display update request. Nothing in the step awaits, so it completes in
//! bounded time inside the tick.

use embedded_hal::digital::{OutputPin, PinState};

use crate::config::{INDICATOR_THRESHOLD_C, MOVING_AVG_WINDOW};
use crate::convert::{adc_to_voltage, voltage_to_celsius};
use crate::filter::MovingAverage;
use crate::shared::SharedState;

/// Snapshot produced by one sampling tick.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Measurement {
    /// Sensor voltage.
    pub voltage: f32,
    /// Unfiltered temperature in °C.
    pub raw_temperature_celsius: f32,
    /// Moving-average temperature in °C.
    pub filtered_temperature_celsius: f32,
}

impl Measurement {
    /// Value before the first tick.
    pub const ZERO: Self = Self {
        voltage: 0.0,
        raw_temperature_celsius: 0.0,
        filtered_temperature_celsius: 0.0,
    };

    /// Whether the indicator LED should be lit for this reading.
    #[inline]
    pub fn indicator_on(&self) -> bool { self.filtered_temperature_celsius < INDICATOR_THRESHOLD_C }
}

/// Owner of the sample history; the only writer of the published measurement.
pub struct AcquisitionScheduler<const N: usize = MOVING_AVG_WINDOW> {
    history: MovingAverage<N>,
}

impl<const N: usize> AcquisitionScheduler<N> {
    pub const fn new() -> Self {
        Self {
            history: MovingAverage::new(),
        }
    }

    /// Process one raw ADC reading.
    ///
    /// The measurement is published and the display update requested even if
    /// driving the indicator fails; the pin error is returned afterwards.
    pub fn tick<P: OutputPin>(
        &mut self,
        raw: u16,
        indicator: &mut P,
        shared: &SharedState,
    ) -> Result<Measurement, P::Error> {
        let voltage = adc_to_voltage(raw);
        let raw_temperature_celsius = voltage_to_celsius(voltage);
        let filtered_temperature_celsius = self.history.push(raw_temperature_celsius);
        let measurement = Measurement {
            voltage,
            raw_temperature_celsius,
            filtered_temperature_celsius,
        };

        let led = indicator.set_state(PinState::from(measurement.indicator_on()));
        shared.publish(measurement);
        shared.request_display_update();

        led.map(|()| measurement)
    }

    /// Read-only view of the sample history.
    #[inline]
    pub const fn history(&self) -> &MovingAverage<N> { &self.history }
}

impl<const N: usize> Default for AcquisitionScheduler<N> {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPin;

    /// ADC code for a given temperature under the diode model.
    fn raw_for(celsius: f32) -> u16 {
        let voltage = crate::config::SENSOR_OFFSET_V - crate::config::SENSOR_SLOPE_V_PER_C * celsius;
        (voltage * crate::config::ADC_RANGE as f32 / crate::config::ADC_VREF).round() as u16
    }

    #[test]
    fn test_mid_scale_reading() {
        let shared = SharedState::new();
        let mut led = MockPin::default();
        let mut scheduler = AcquisitionScheduler::<40>::new();

        let m = scheduler.tick(2048, &mut led, &shared).unwrap();
        assert!((m.voltage - 1.65).abs() < 1e-6);
        assert!((m.raw_temperature_celsius - (-487.43)).abs() < 0.05);
        // First sample: mean equals the sample
        assert_eq!(m.filtered_temperature_celsius, m.raw_temperature_celsius);
    }

    #[test]
    fn test_tick_publishes_and_requests_update() {
        let shared = SharedState::new();
        let mut led = MockPin::default();
        let mut scheduler = AcquisitionScheduler::<40>::new();

        let m = scheduler.tick(raw_for(25.0), &mut led, &shared).unwrap();
        assert_eq!(shared.latest(), m);
        assert!(shared.take_display_update());
        assert!(!shared.take_unit_toggle());
    }

    #[test]
    fn test_indicator_follows_filtered_threshold() {
        let shared = SharedState::new();
        let mut led = MockPin::default();
        let mut scheduler = AcquisitionScheduler::<2>::new();

        scheduler.tick(raw_for(20.0), &mut led, &shared).unwrap();
        assert_eq!(led.is_high(), Some(true));

        // Raw jumps to 80 °C, filtered mean ~50 °C
        let m = scheduler.tick(raw_for(80.0), &mut led, &shared).unwrap();
        assert!(m.filtered_temperature_celsius > 40.0);
        assert_eq!(led.is_high(), Some(false));
    }

    #[test]
    fn test_indicator_on_boundary() {
        let at = Measurement {
            filtered_temperature_celsius: 40.0,
            ..Measurement::ZERO
        };
        let below = Measurement {
            filtered_temperature_celsius: 39.9,
            ..Measurement::ZERO
        };
        assert!(!at.indicator_on());
        assert!(below.indicator_on());
    }

    #[test]
    fn test_filter_smooths_across_ticks() {
        let shared = SharedState::new();
        let mut led = MockPin::default();
        let mut scheduler = AcquisitionScheduler::<4>::new();

        let readings = [raw_for(20.0), raw_for(30.0), raw_for(20.0), raw_for(30.0)];
        let mut last = Measurement::ZERO;
        let mut raw_sum = 0.0;
        for raw in readings {
            last = scheduler.tick(raw, &mut led, &shared).unwrap();
            raw_sum += last.raw_temperature_celsius;
        }
        assert!(scheduler.history().is_filled());
        assert!((last.filtered_temperature_celsius - raw_sum / 4.0).abs() < 1e-3);
        assert!((last.filtered_temperature_celsius - 25.0).abs() < 0.5);
    }

    #[test]
    fn test_default_window_size() {
        let scheduler: AcquisitionScheduler = AcquisitionScheduler::new();
        assert_eq!(scheduler.history().capacity(), MOVING_AVG_WINDOW);
    }
}
