//! SSD1306 OLED driver façade over async I2C.
//!
//! # Wire Protocol
//!
//! Every transfer goes to [`I2C_ADDRESS`](crate::config::I2C_ADDRESS).
//! Commands are sent one byte per write, each prefixed with the
//! [`CONTROL_COMMAND`] byte; command arguments travel the same way.
//! Pixel data is one write: [`CONTROL_DATA`] followed by the whole payload.
//!
//! # Render Sequence
//!
//! 1. `SET_COLUMN_ADDRESS start end`
//! 2. `SET_PAGE_ADDRESS start end`
//! 3. data transfer of exactly [`RenderRegion::buffer_length`] bytes
//!
//! [`Ssd1306::render`] takes `&mut self`, so one render can never interleave
//! with another on the same bus handle.

use embedded_hal_async::i2c::{I2c, Operation};

use crate::config::{I2C_ADDRESS, NUM_PAGES, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Control byte preceding a single command byte.
pub const CONTROL_COMMAND: u8 = 0x80;

/// Control byte preceding a run of display RAM data.
pub const CONTROL_DATA: u8 = 0x40;

// SSD1306 Commands
pub const SET_MEMORY_MODE: u8 = 0x20;
pub const SET_COLUMN_ADDRESS: u8 = 0x21;
pub const SET_PAGE_ADDRESS: u8 = 0x22;
pub const SET_DISPLAY_START_LINE: u8 = 0x40;
pub const SET_CONTRAST: u8 = 0x81;
pub const SET_CHARGE_PUMP: u8 = 0x8D;
pub const SET_SEGMENT_REMAP: u8 = 0xA0;
pub const SET_ENTIRE_ON: u8 = 0xA4;
pub const SET_NORMAL_DISPLAY: u8 = 0xA6;
pub const SET_MUX_RATIO: u8 = 0xA8;
pub const SET_DISPLAY: u8 = 0xAE;
pub const SET_COM_OUTPUT_DIR: u8 = 0xC0;
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
pub const SET_DISPLAY_CLOCK_DIV: u8 = 0xD5;
pub const SET_PRECHARGE: u8 = 0xD9;
pub const SET_COM_PIN_CONFIG: u8 = 0xDA;
pub const SET_VCOM_DESELECT: u8 = 0xDB;

/// Power-up configuration, sent once in order before the first render.
#[rustfmt::skip]
pub const INIT_SEQUENCE: [u8; 25] = [
    SET_DISPLAY,                        // display off
    SET_MEMORY_MODE, 0x00,              // horizontal addressing
    SET_DISPLAY_START_LINE,             // start line 0
    SET_SEGMENT_REMAP | 0x01,           // column 127 mapped to SEG0
    SET_MUX_RATIO, (SCREEN_HEIGHT - 1) as u8,
    SET_COM_OUTPUT_DIR | 0x08,          // scan from COM[N-1] to COM0
    SET_DISPLAY_OFFSET, 0x00,
    SET_COM_PIN_CONFIG, 0x02,           // sequential, no left/right remap
    SET_DISPLAY_CLOCK_DIV, 0x80,
    SET_PRECHARGE, 0xF1,
    SET_VCOM_DESELECT, 0x30,            // 0.83 x Vcc
    SET_CONTRAST, 0xFF,
    SET_ENTIRE_ON,                      // follow RAM content
    SET_NORMAL_DISPLAY,                 // not inverted
    SET_CHARGE_PUMP, 0x14,              // internal Vcc
    SET_DISPLAY | 0x01,                 // display on
];

// =============================================================================
// Render Region
// =============================================================================

/// Page-aligned rectangle of display RAM addressed by one render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderRegion {
    pub start_column: u8,
    pub end_column: u8,
    pub start_page: u8,
    pub end_page: u8,
    /// Payload size: columns x pages.
    pub buffer_length: usize,
}

impl RenderRegion {
    /// Region spanning the given inclusive column and page ranges.
    ///
    /// # Panics
    ///
    /// If either range is reversed (`start > end`). In a `const` context
    /// this is a compile error.
    pub const fn new(
        start_column: u8,
        end_column: u8,
        start_page: u8,
        end_page: u8,
    ) -> Self {
        assert!(start_column <= end_column, "reversed column range");
        assert!(start_page <= end_page, "reversed page range");
        let columns = (end_column - start_column) as usize + 1;
        let pages = (end_page - start_page) as usize + 1;
        Self {
            start_column,
            end_column,
            start_page,
            end_page,
            buffer_length: columns * pages,
        }
    }

    /// The whole panel.
    pub const fn full_screen() -> Self { Self::new(0, (SCREEN_WIDTH - 1) as u8, 0, (NUM_PAGES - 1) as u8) }
}

// =============================================================================
// Driver
// =============================================================================

/// SSD1306 controller on an I2C bus.
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Ssd1306<I2C> {
    /// Driver for a panel at the default address.
    pub fn new(i2c: I2C) -> Self { Self::with_address(i2c, I2C_ADDRESS) }

    /// Driver for a panel at a non-default address.
    pub fn with_address(
        i2c: I2C,
        address: u8,
    ) -> Self {
        Self { i2c, address }
    }

    /// Send the power-up configuration.
    pub async fn init(&mut self) -> Result<(), I2C::Error> { self.send_commands(&INIT_SEQUENCE).await }

    /// Push `buffer` into the display RAM covered by `region`.
    ///
    /// Exactly `region.buffer_length` bytes are transferred (fewer only if
    /// `buffer` itself is shorter).
    pub async fn render(
        &mut self,
        buffer: &[u8],
        region: &RenderRegion,
    ) -> Result<(), I2C::Error> {
        self.send_commands(&[
            SET_COLUMN_ADDRESS,
            region.start_column,
            region.end_column,
            SET_PAGE_ADDRESS,
            region.start_page,
            region.end_page,
        ])
        .await?;

        let len = region.buffer_length.min(buffer.len());
        self.send_data(&buffer[..len]).await
    }

    /// Send one command byte.
    pub async fn send_command(
        &mut self,
        command: u8,
    ) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[CONTROL_COMMAND, command]).await
    }

    /// Send command bytes one at a time, stopping at the first failure.
    pub async fn send_commands(
        &mut self,
        commands: &[u8],
    ) -> Result<(), I2C::Error> {
        for &command in commands {
            self.send_command(command).await?;
        }
        Ok(())
    }

    /// Send a run of display RAM bytes in a single write.
    pub async fn send_data(
        &mut self,
        data: &[u8],
    ) -> Result<(), I2C::Error> {
        // Adjacent writes in one transaction go out back to back, no restart
        self.i2c
            .transaction(self.address, &mut [Operation::Write(&[CONTROL_DATA]), Operation::Write(data)])
            .await
    }

    /// Give the bus back.
    pub fn release(self) -> I2C { self.i2c }
}

// =============================================================================
// Unit Tests
// =============================================================================
