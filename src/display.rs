//! I2C configuration for the 128x32 SSD1306 OLED module.
//!
//! Pin mapping (Pico 2 default I2C):
//! - SDA: GPIO4 (I2C0)
//! - SCL: GPIO5 (I2C0)
//! - Reset: none, the module has its own power-on reset

use embassy_rp::i2c::Config as I2cConfig;
use thermo_pico2::config::I2C_FREQUENCY_HZ;

/// I2C configuration for the OLED. The SSD1306 supports fast mode (400 kHz).
pub fn display_i2c_config() -> I2cConfig {
    let mut config = I2cConfig::default();
    config.frequency = I2C_FREQUENCY_HZ;
    config
}
