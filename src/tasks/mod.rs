//! Async tasks for the thermometer firmware.
//!
//! Both tasks only produce into [`SharedState`](thermo_pico2::SharedState):
//! - `sample`: periodic ADC acquisition and filtering
//! - `button`: debounced unit toggle

pub mod button;
pub mod sample;

pub use button::button_task;
pub use sample::sample_task;
