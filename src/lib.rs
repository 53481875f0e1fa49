//! Temperature monitor library - testable modules for the thermometer firmware.
//!
//! This library contains the whole sensing/filtering/rendering pipeline. The
//! binary (`main.rs`) wires it to the RP2350 peripherals and the embassy
//! executor.
//!
//! # Pipeline
//!
//! ```text
//! timer tick ─► acquisition ─► convert ─► filter ─► SharedState ─┐
//! button edge ─► debounce ───────────────────────► SharedState ─┤
//!                                                                ▼
//!                    event_loop ─► framebuffer + font ─► ssd1306 ─► I2C
//! ```
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib --target x86_64-unknown-linux-gnu  # Linux/macOS
//! cargo test --lib --target x86_64-pc-windows-msvc    # Windows
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

// Configuration
pub mod config;

// Signal chain
pub mod acquisition;
pub mod convert;
pub mod filter;

// Input
pub mod debounce;

// Rendering
pub mod font;
pub mod framebuffer;
pub mod ssd1306;

// Coordination
pub mod event_loop;
pub mod shared;

#[cfg(test)]
mod mock;

pub use acquisition::{AcquisitionScheduler, Measurement};
pub use debounce::{DebounceState, Debouncer};
pub use event_loop::{DisplayUnit, EventLoop, StepOutcome};
pub use filter::MovingAverage;
pub use framebuffer::Framebuffer;
pub use shared::SharedState;
pub use ssd1306::{RenderRegion, Ssd1306};
