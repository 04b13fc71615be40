//! Board peripheral emulation.
//!
//! Peripherals attached to the emulated microcontroller:
//!
//! - [`Tmc2130`] — Trinamic stepper driver (SPI register file, step/dir
//!   integration, standstill detection, one per axis)
//! - [`AdcButtons`] — front-panel button ladder on an ADC mux channel

mod adc_buttons;
mod tmc2130;

pub use adc_buttons::{AdcButtons, AdcButtonsOut, ACT_PRESS, BUTTON_COUNT};
pub use tmc2130::{
    AxisSnapshot, AxisView, Tmc2130, Tmc2130Config, Tmc2130Out, ACT_RESET_DIAG, ACT_SET_DIAG,
    ACT_TOGGLE_STALL, ACT_WAIT_FOR_STALL, FRAME_LEN,
};
