//! Application configuration.
//!
//! - `display`: Panel geometry, I2C addressing and the fixed frame layout
//! - `sensor`: ADC scaling, diode calibration and timing constants
//!
//! Everything here is a compile-time constant. The only runtime-mutable
//! state in the firmware is the display unit.

pub mod display;
pub mod sensor;

// Re-export display constants at config level for convenience
pub use display::{
    BUF_LEN,
    GLYPH_HEIGHT,
    GLYPH_WIDTH,
    I2C_ADDRESS,
    I2C_FREQUENCY_HZ,
    LABEL_X,
    NUM_PAGES,
    PAGE_HEIGHT,
    SCREEN_HEIGHT,
    SCREEN_WIDTH,
    TEMPERATURE_ROW_Y,
    VALUE_X,
    VOLTAGE_ROW_Y,
};
// Re-export sensor constants at config level for convenience
pub use sensor::{
    ADC_RANGE,
    ADC_VREF,
    DEBOUNCE_MS,
    INDICATOR_THRESHOLD_C,
    MOVING_AVG_WINDOW,
    SAMPLE_PERIOD_MS,
    SENSOR_OFFSET_V,
    SENSOR_SLOPE_V_PER_C,
};
