//! Emulated SSD1306 controller.
//!
//! Decodes the same I2C traffic the real panel sees: `0x80` control bytes
//! followed by a command byte, `0x40` followed by display data. Commands
//! with arguments arrive one byte per transaction, so argument collection
//! spans transactions. Only the state that affects what is shown is kept:
//! the column/page window, the write cursor and on/off.

use std::cell::RefCell;
use std::convert::Infallible;
use std::fmt;
use std::rc::Rc;

use embedded_hal_async::i2c::{ErrorType, I2c, Operation};
use log::{debug, warn};
use thermo_pico2::config::{BUF_LEN, I2C_ADDRESS, NUM_PAGES, SCREEN_HEIGHT, SCREEN_WIDTH};
use thermo_pico2::ssd1306::{
    SET_COLUMN_ADDRESS,
    SET_DISPLAY,
    SET_MEMORY_MODE,
    SET_PAGE_ADDRESS,
};

/// Horizontal addressing, the only mode the driver uses.
const HORIZONTAL_ADDRESSING: u8 = 0x00;

/// Control byte bit selecting data (D/C#) over commands.
const CONTROL_DC_BIT: u8 = 0x40;

/// Number of argument bytes following `opcode`.
const fn argument_count(opcode: u8) -> usize {
    match opcode {
        SET_COLUMN_ADDRESS | SET_PAGE_ADDRESS => 2,
        SET_MEMORY_MODE | 0x81 | 0x8D | 0xA8 | 0xD3 | 0xD5 | 0xD9 | 0xDA | 0xDB => 1,
        _ => 0,
    }
}

// =============================================================================
// Panel State
// =============================================================================

/// Controller RAM plus addressing registers.
pub struct PanelState {
    ram: [u8; BUF_LEN],
    column_start: usize,
    column_end: usize,
    page_start: usize,
    page_end: usize,
    column: usize,
    page: usize,
    display_on: bool,
    command: Option<(u8, Vec<u8>)>,
    frames: usize,
}

impl PanelState {
    fn new() -> Self {
        Self {
            ram: [0; BUF_LEN],
            column_start: 0,
            column_end: SCREEN_WIDTH - 1,
            page_start: 0,
            page_end: NUM_PAGES - 1,
            column: 0,
            page: 0,
            display_on: false,
            command: None,
            frames: 0,
        }
    }

    fn feed_command(
        &mut self,
        byte: u8,
    ) {
        let (opcode, mut args) = match self.command.take() {
            Some((opcode, mut args)) => {
                args.push(byte);
                (opcode, args)
            }
            None => (byte, Vec::new()),
        };

        if args.len() < argument_count(opcode) {
            self.command = Some((opcode, args));
            return;
        }
        args.truncate(argument_count(opcode));
        self.apply(opcode, &args);
    }

    fn apply(
        &mut self,
        opcode: u8,
        args: &[u8],
    ) {
        match (opcode, args) {
            (SET_COLUMN_ADDRESS, &[start, end]) => {
                self.column_start = usize::from(start).min(SCREEN_WIDTH - 1);
                self.column_end = usize::from(end).min(SCREEN_WIDTH - 1);
                self.column = self.column_start;
            }
            (SET_PAGE_ADDRESS, &[start, end]) => {
                self.page_start = usize::from(start).min(NUM_PAGES - 1);
                self.page_end = usize::from(end).min(NUM_PAGES - 1);
                self.page = self.page_start;
            }
            (SET_MEMORY_MODE, &[mode]) if mode != HORIZONTAL_ADDRESSING => {
                warn!("panel: addressing mode {mode:#04x} not emulated");
            }
            (op, _) if op & 0xFE == SET_DISPLAY => {
                self.display_on = op & 0x01 != 0;
                debug!("panel: display {}", if self.display_on { "on" } else { "off" });
            }
            _ => {}
        }
    }

    fn feed_data(
        &mut self,
        bytes: &[u8],
    ) {
        for &byte in bytes {
            self.ram[self.page * SCREEN_WIDTH + self.column] = byte;

            // Horizontal addressing: column wraps into the next page, page wraps to the start
            if self.column >= self.column_end {
                self.column = self.column_start;
                self.page = if self.page >= self.page_end { self.page_start } else { self.page + 1 };
            } else {
                self.column += 1;
            }
        }
        self.frames += 1;
    }

    /// Whether the pixel at (`x`, `y`) is lit in controller RAM.
    pub fn pixel(
        &self,
        x: usize,
        y: usize,
    ) -> bool {
        self.ram[(y / 8) * SCREEN_WIDTH + x] & (1 << (y % 8)) != 0
    }

    /// Data transfers received so far.
    pub const fn frames(&self) -> usize { self.frames }

    pub const fn display_on(&self) -> bool { self.display_on }
}

/// Panel as ASCII art inside a frame.
impl fmt::Display for PanelState {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let border = "-".repeat(SCREEN_WIDTH);
        writeln!(f, "+{border}+")?;
        for y in 0..SCREEN_HEIGHT {
            let row: String = (0..SCREEN_WIDTH)
                .map(|x| if self.display_on && self.pixel(x, y) { '#' } else { ' ' })
                .collect();
            writeln!(f, "|{row}|")?;
        }
        write!(f, "+{border}+")
    }
}

// =============================================================================
// I2C Front End
// =============================================================================

/// I2C device side of the emulated panel.
///
/// Cloning gives another handle onto the same controller, so the preview can
/// look at the panel while the event loop owns the bus.
#[derive(Clone)]
pub struct EmulatedPanel {
    state: Rc<RefCell<PanelState>>,
}

impl EmulatedPanel {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(PanelState::new())),
        }
    }

    /// Run `f` against the current controller state.
    pub fn inspect<R>(
        &self,
        f: impl FnOnce(&PanelState) -> R,
    ) -> R {
        f(&self.state.borrow())
    }
}

impl ErrorType for EmulatedPanel {
    type Error = Infallible;
}

impl I2c for EmulatedPanel {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != I2C_ADDRESS {
            warn!("panel: ignoring transfer to {address:#04x}");
            return Ok(());
        }

        let mut bytes = Vec::new();
        for op in operations.iter_mut() {
            match op {
                Operation::Write(data) => bytes.extend_from_slice(data),
                // Reads return zeroes, the controller has no status worth emulating
                Operation::Read(buf) => buf.fill(0),
            }
        }

        let Some((&control, payload)) = bytes.split_first() else {
            return Ok(());
        };

        let mut state = self.state.borrow_mut();
        if control & CONTROL_DC_BIT != 0 {
            state.feed_data(payload);
        } else {
            for &byte in payload {
                state.feed_command(byte);
            }
        }
        Ok(())
    }
}
