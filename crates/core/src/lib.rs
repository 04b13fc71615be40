//! # einsy-core
//!
//! Peripheral emulation core for an Einsy Rambo (Prusa MK3-class) 3D
//! printer board simulation. Emulates the board hardware firmware talks to
//! — four TMC2130 stepper drivers on a shared SPI bus and the front-panel
//! button ladder on an ADC channel — faithfully enough at the register and
//! signal level to drive unmodified firmware.
//!
//! The host microcontroller simulator stays outside this crate: it owns the
//! cycle clock, delivers named input signals (chip-select edges, SPI bytes,
//! step/dir/enable pins, ADC sample requests) and drains output signals
//! (DIAG faults, end-stop levels, positions, samples). See [`bus`] for the
//! contract.
//!
//! ## Architecture
//!
//! - [`EinsyPeripherals`] — Top-level wiring of all board peripherals with
//!   dotted-name signal dispatch (`"x.step_in"`, `"adc.trigger"`, …)
//! - [`peripherals::Tmc2130`] — Trinamic stepper driver: 40-bit SPI
//!   command protocol, 128-word register file, step integration, end-stop
//!   clamping, standstill detection
//! - [`peripherals::AdcButtons`] — resistor-ladder button matrix sampled
//!   through one ADC mux channel
//! - [`charrom`] — HD44780 character-generator ROM consumed by the LCD
//!   renderer
//! - [`scriptable`] — action contract for external test scripts
//! - [`savestate`] — board state snapshots (bincode + deflate)
//!
//! ## Threading
//!
//! All signal handlers and timers run on the single simulation thread. The
//! only cross-thread surface is [`peripherals::AxisSnapshot`], a packed
//! atomic word a render thread may read at any time.

pub mod bus;
pub mod charrom;
pub mod peripherals;
pub mod regs;
pub mod savestate;
pub mod scriptable;

use std::path::Path;

use crate::bus::SignalTable;
use crate::peripherals::{AdcButtons, Tmc2130, Tmc2130Config};
use crate::savestate::EinsyState;
use crate::scriptable::{ActionStatus, Scriptable};

/// Host CPU clock frequency: 16 MHz. Cycle counts in signal events and
/// timer deadlines are in units of this clock.
pub const CLOCK_HZ: u32 = 16_000_000;

/// ADC mux channel the button ladder is wired to.
pub const BUTTONS_ADC_CHANNEL: u8 = 2;

/// Motion axes of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
    E,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::X, Axis::Y, Axis::Z, Axis::E];

    /// Lower-case id used in signal and action target names.
    pub fn id(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
            Axis::E => 'e',
        }
    }
}

/// All peripherals of the board, wired for named-signal dispatch.
///
/// Input signals use dotted names: `"x.step_in"`, `"z.cs_in"`,
/// `"adc.trigger"`, … — prefix selects the peripheral, the rest is the
/// line name in its [`SignalTable`]. Output events accumulate in each
/// peripheral's `outbox` for the host to drain.
pub struct EinsyPeripherals {
    pub motor_x: Tmc2130,
    pub motor_y: Tmc2130,
    pub motor_z: Tmc2130,
    pub motor_e: Tmc2130,
    pub buttons: AdcButtons,
    motor_table: SignalTable<Tmc2130>,
    adc_table: SignalTable<AdcButtons>,
}

impl EinsyPeripherals {
    /// Board with MK3 axis geometry, unconfigured until [`Self::init`].
    pub fn new() -> Self {
        EinsyPeripherals {
            motor_x: Tmc2130::new('x'),
            motor_y: Tmc2130::new('y'),
            motor_z: Tmc2130::new('z'),
            motor_e: Tmc2130::new('e'),
            buttons: AdcButtons::new(),
            motor_table: Tmc2130::signal_table(),
            adc_table: AdcButtons::signal_table(),
        }
    }

    /// Configure and arm every peripheral. `now` is the host's current
    /// cycle count.
    pub fn init(&mut self, now: u64) {
        self.motor_x.set_config(Tmc2130Config::default());
        self.motor_y.set_config(Tmc2130Config { max_mm: 210, ..Default::default() });
        self.motor_z.set_config(Tmc2130Config {
            steps_per_mm: 400,
            max_mm: 210,
            ..Default::default()
        });
        self.motor_e.set_config(Tmc2130Config {
            steps_per_mm: 280,
            no_end_stops: true,
            start_pos_mm: 0.0,
            ..Default::default()
        });
        for axis in Axis::ALL {
            self.motor_mut(axis).init(now);
        }
        self.buttons.init(BUTTONS_ADC_CHANNEL);
    }

    pub fn motor(&self, axis: Axis) -> &Tmc2130 {
        match axis {
            Axis::X => &self.motor_x,
            Axis::Y => &self.motor_y,
            Axis::Z => &self.motor_z,
            Axis::E => &self.motor_e,
        }
    }

    pub fn motor_mut(&mut self, axis: Axis) -> &mut Tmc2130 {
        match axis {
            Axis::X => &mut self.motor_x,
            Axis::Y => &mut self.motor_y,
            Axis::Z => &mut self.motor_z,
            Axis::E => &mut self.motor_e,
        }
    }

    /// Deliver one named input event. Returns the immediate reply for
    /// request/response lines (SPI byte-out, ADC sample).
    pub fn dispatch(&mut self, name: &str, value: u32, now: u64) -> Option<u32> {
        let Some((prefix, line)) = name.split_once('.') else {
            log::warn!("unroutable signal name {:?}", name);
            return None;
        };
        match prefix {
            "x" => self.motor_table.dispatch(&mut self.motor_x, line, value, now),
            "y" => self.motor_table.dispatch(&mut self.motor_y, line, value, now),
            "z" => self.motor_table.dispatch(&mut self.motor_z, line, value, now),
            "e" => self.motor_table.dispatch(&mut self.motor_e, line, value, now),
            "adc" => self.adc_table.dispatch(&mut self.buttons, line, value, now),
            _ => {
                log::warn!("no peripheral for signal {:?}", name);
                None
            }
        }
    }

    /// Advance deferred work (standstill timers) to cycle `now`.
    pub fn tick(&mut self, now: u64) {
        for axis in Axis::ALL {
            self.motor_mut(axis).tick(now);
        }
    }

    /// Route a scripted action to the named peripheral (`"x"`…`"e"`,
    /// `"adc"`).
    pub fn process_action(&mut self, target: &str, id: u32, args: &[String]) -> ActionStatus {
        match target {
            "x" => self.motor_x.process_action(id, args),
            "y" => self.motor_y.process_action(id, args),
            "z" => self.motor_z.process_action(id, args),
            "e" => self.motor_e.process_action(id, args),
            "adc" => self.buttons.process_action(id, args),
            _ => {
                log::warn!("no peripheral for action target {:?}", target);
                ActionStatus::Error
            }
        }
    }

    pub fn save_state(&self) -> EinsyState {
        EinsyState {
            motor_x: self.motor_x.save_state(),
            motor_y: self.motor_y.save_state(),
            motor_z: self.motor_z.save_state(),
            motor_e: self.motor_e.save_state(),
            buttons: self.buttons.save_state(),
        }
    }

    pub fn load_state(&mut self, s: &EinsyState) {
        self.motor_x.load_state(&s.motor_x);
        self.motor_y.load_state(&s.motor_y);
        self.motor_z.load_state(&s.motor_z);
        self.motor_e.load_state(&s.motor_e);
        self.buttons.load_state(&s.buttons);
    }

    /// Save the whole board to a state file.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        savestate::save_to_file(&self.save_state(), path)
    }

    /// Restore the whole board from a state file.
    pub fn load(&mut self, path: &Path) -> Result<(), String> {
        let state = savestate::load_from_file(path)?;
        self.load_state(&state);
        Ok(())
    }
}

impl Default for EinsyPeripherals {
    fn default() -> Self {
        Self::new()
    }
}
