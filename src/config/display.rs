//! Display geometry and layout constants.
//!
//! The panel is a 128x32 SSD1306 OLED on I2C. Its RAM is organised in
//! 8-pixel-tall pages; each framebuffer byte is one column of one page,
//! bit 0 at the top.

// =============================================================================
// Panel Geometry
// =============================================================================

/// Display width in pixels.
pub const SCREEN_WIDTH: usize = 128;

/// Display height in pixels.
pub const SCREEN_HEIGHT: usize = 32;

/// Height of one addressable page in pixels.
pub const PAGE_HEIGHT: usize = 8;

/// Number of pages covering the panel height.
pub const NUM_PAGES: usize = SCREEN_HEIGHT / PAGE_HEIGHT;

/// Framebuffer length in bytes (one byte per column per page).
pub const BUF_LEN: usize = NUM_PAGES * SCREEN_WIDTH;

const _: () = assert!(SCREEN_HEIGHT % PAGE_HEIGHT == 0);
const _: () = assert!(SCREEN_WIDTH <= 128 && NUM_PAGES <= 8);

// =============================================================================
// I2C Transport
// =============================================================================

/// 7-bit I2C address of the display controller.
pub const I2C_ADDRESS: u8 = 0x3C;

/// I2C bus clock.
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

// =============================================================================
// Font
// =============================================================================

/// Glyph width in pixels (one byte per column).
pub const GLYPH_WIDTH: usize = 8;

/// Glyph height in pixels (exactly one page).
pub const GLYPH_HEIGHT: usize = 8;

const _: () = assert!(GLYPH_HEIGHT == PAGE_HEIGHT);
const _: () = assert!(GLYPH_WIDTH <= SCREEN_WIDTH);

// =============================================================================
// Frame Layout
// =============================================================================

/// X position of the "Tensao:" and "Temp:" labels.
pub const LABEL_X: u16 = 10;

/// X position of the formatted values.
pub const VALUE_X: u16 = 70;

/// Y position of the voltage row.
pub const VOLTAGE_ROW_Y: u16 = 0;

/// Y position of the temperature row.
pub const TEMPERATURE_ROW_Y: u16 = 8;

const _: () = assert!((TEMPERATURE_ROW_Y as usize) + GLYPH_HEIGHT <= SCREEN_HEIGHT);
