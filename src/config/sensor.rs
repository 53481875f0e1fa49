//! Sensor calibration and timing constants.
//!
//! The temperature probe is a 1N4148 diode whose forward voltage falls
//! linearly with temperature: `v = V0 - S * celsius`.

// =============================================================================
// ADC
// =============================================================================

/// ADC reference voltage.
pub const ADC_VREF: f32 = 3.3;

/// Number of ADC codes (12-bit converter).
pub const ADC_RANGE: u32 = 1 << 12;

// =============================================================================
// Diode Calibration
// =============================================================================

/// Forward voltage at 0 °C.
pub const SENSOR_OFFSET_V: f32 = 0.6264;

/// Forward voltage drop per °C.
pub const SENSOR_SLOPE_V_PER_C: f32 = 0.0021;

const _: () = assert!(SENSOR_SLOPE_V_PER_C > 0.0);

// =============================================================================
// Filtering and Timing
// =============================================================================

/// Number of samples averaged by the moving-average filter.
pub const MOVING_AVG_WINDOW: usize = 40;

/// Period of the acquisition timer.
pub const SAMPLE_PERIOD_MS: u64 = 500;

/// Quiet period after a button edge before the edge interrupt is re-armed.
pub const DEBOUNCE_MS: u64 = 200;

/// The indicator LED is lit while the filtered temperature is below this.
pub const INDICATOR_THRESHOLD_C: f32 = 40.0;

const _: () = assert!(MOVING_AVG_WINDOW > 0);
const _: () = assert!(DEBOUNCE_MS < SAMPLE_PERIOD_MS);
