//! Sensor and unit conversions.
//!
//! All mappings are linear and unclamped: a voltage outside the diode's
//! working range yields a temperature outside the physical range, and that
//! value is passed on as-is.

use crate::config::{ADC_RANGE, ADC_VREF, SENSOR_OFFSET_V, SENSOR_SLOPE_V_PER_C};

/// Convert a raw 12-bit ADC code to volts.
#[inline]
pub fn adc_to_voltage(raw: u16) -> f32 { (raw as f32 * ADC_VREF) / ADC_RANGE as f32 }

/// Convert the diode forward voltage to degrees Celsius.
///
/// Inverse of the sensor model `v = V0 - S * celsius`.
#[inline]
pub fn voltage_to_celsius(voltage: f32) -> f32 { (voltage - SENSOR_OFFSET_V) / (-SENSOR_SLOPE_V_PER_C) }

/// Convert degrees Celsius to degrees Fahrenheit.
#[inline]
pub fn celsius_to_fahrenheit(celsius: f32) -> f32 { (celsius * 9.0 / 5.0) + 32.0 }

// =============================================================================
// Unit Tests
// =============================================================================
