//! TMC2130 stepper-motor driver emulation.
//!
//! Emulates one Trinamic TMC2130 driver as firmware sees it over a shared
//! SPI bus: the 40-bit command/reply protocol, the addressable register
//! file, and the physical side — step/direction/enable pins integrated into
//! an axis position with end-stop clamping and standstill detection.
//!
//! ## SPI transaction
//!
//! While chip-select is asserted (low), each `byte_in` event shifts one byte
//! into a 5-byte command buffer (MSB first) and shifts one byte of the
//! previously latched reply out. The command is committed only at the
//! chip-select deassert edge, and only if exactly 5 bytes arrived; anything
//! else is dropped without touching the register file. A read command
//! latches its reply at commit, so the data appears during the *next*
//! transaction — the same one-transaction delay as the real chip.
//!
//! ## Motion
//!
//! Step edges (rising, or both when CHOPCONF.dedge is set) move the step
//! counter by the latched direction while the enable line is active (low).
//! With end-stops present the counter is clamped to `[0, max_mm *
//! steps_per_mm]`. Every qualifying step re-arms the standstill one-shot;
//! if it expires first, DRV_STATUS.stst sets and stays set until the next
//! step or an explicit reset. A step edge also clears any scripted
//! stall/diag override.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::bus::{CycleTimer, Outbox, SignalTable};
use crate::regs::{self, addr, chopconf, drv_status, gconf, gstat, ioin, RegFile};
use crate::savestate::Tmc2130State;
use crate::scriptable::{ActionStatus, Scriptable};
use crate::CLOCK_HZ;

/// SPI frame length: 1 read/write bit + 7-bit address + 32-bit data.
pub const FRAME_LEN: usize = 5;

/// SG_RESULT reported while the motor is running load-free.
const SG_NOMINAL: u32 = 250;

/// Scripted action ids.
pub const ACT_TOGGLE_STALL: u32 = 0;
pub const ACT_SET_DIAG: u32 = 1;
pub const ACT_RESET_DIAG: u32 = 2;
pub const ACT_WAIT_FOR_STALL: u32 = 3;

/// Axis geometry and conversion configuration. Applied atomically via
/// [`Tmc2130::set_config`] before first use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tmc2130Config {
    /// Flip the direction interpretation.
    pub inverted: bool,
    /// Conversion factor between step pulses and distance.
    pub steps_per_mm: u16,
    /// Axis travel; end-stop bound when end-stops are present.
    pub max_mm: i16,
    /// Position at power-up, in mm.
    pub start_pos_mm: f32,
    /// Free-running axis (no position clamping).
    pub no_end_stops: bool,
    /// Standstill window: no step for this long sets DRV_STATUS.stst.
    pub standstill_timeout_us: u32,
}

impl Default for Tmc2130Config {
    fn default() -> Self {
        Tmc2130Config {
            inverted: false,
            steps_per_mm: 100,
            max_mm: 200,
            start_pos_mm: 10.0,
            no_end_stops: false,
            standstill_timeout_us: 100_000,
        }
    }
}

/// Output signal lines of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tmc2130Out {
    /// Fault/stall output pin (DIAG).
    Diag,
    /// High while the axis sits at the minimum end-stop.
    Min,
    /// Raw step count, for visualization consumers.
    Position,
}

/// Consistent view of one axis for a visualization thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisView {
    pub axis: char,
    pub position_mm: f32,
    pub stalled: bool,
    pub enabled: bool,
}

/// Lock-free axis snapshot, updated as a single unit.
///
/// The simulation thread publishes position, stall flag, enable flag and
/// axis id packed into one `AtomicU64`; a render thread reads them through
/// a shared handle without ever touching the driver's main state.
///
/// Layout: bits 31:0 position f32 bits, bit 32 stalled, bit 33 enabled,
/// bits 47:40 axis id byte.
pub struct AxisSnapshot {
    packed: AtomicU64,
}

impl AxisSnapshot {
    fn new(axis: char) -> Self {
        let s = AxisSnapshot { packed: AtomicU64::new(0) };
        s.publish(axis, 0.0, false, true);
        s
    }

    fn publish(&self, axis: char, position_mm: f32, stalled: bool, enabled: bool) {
        let mut w = position_mm.to_bits() as u64;
        w |= (stalled as u64) << 32;
        w |= (enabled as u64) << 33;
        w |= ((axis as u8) as u64) << 40;
        self.packed.store(w, Ordering::Release);
    }

    /// Read the last published state.
    pub fn read(&self) -> AxisView {
        let w = self.packed.load(Ordering::Acquire);
        AxisView {
            axis: ((w >> 40) as u8) as char,
            position_mm: f32::from_bits(w as u32),
            stalled: w & (1 << 32) != 0,
            enabled: w & (1 << 33) != 0,
        }
    }
}

/// One emulated TMC2130 driver.
pub struct Tmc2130 {
    axis: char,
    cfg: Tmc2130Config,
    configured: bool,
    regs: RegFile,

    // SPI transaction state
    selected: bool,
    cmd_in: [u8; FRAME_LEN],
    cmd_len: u8,
    cmd_out: [u8; FRAME_LEN],
    out_pos: u8,

    // Motion state
    dir: bool,
    enabled: bool,
    step_level: bool,
    cur_step: i32,
    max_step: i32,
    stall: bool,
    standstill: bool,
    diag_forced: bool,
    standstill_timer: CycleTimer,

    snapshot: Arc<AxisSnapshot>,
    /// Output events pending for the host bus.
    pub outbox: Outbox<Tmc2130Out>,
    /// Debug counter: malformed frames discarded at chip-select deassert.
    pub dbg_dropped_frames: u64,
}

impl Tmc2130 {
    pub fn new(axis: char) -> Self {
        Tmc2130 {
            axis,
            cfg: Tmc2130Config::default(),
            configured: false,
            regs: RegFile::new(),
            selected: false,
            cmd_in: [0; FRAME_LEN],
            cmd_len: 0,
            cmd_out: [0; FRAME_LEN],
            out_pos: 0,
            dir: false,
            enabled: true,
            step_level: false,
            cur_step: 0,
            max_step: 0,
            stall: false,
            standstill: false,
            diag_forced: false,
            standstill_timer: CycleTimer::new(),
            snapshot: Arc::new(AxisSnapshot::new(axis)),
            outbox: Outbox::new(),
            dbg_dropped_frames: 0,
        }
    }

    /// Apply axis configuration. Not safe to call mid-transaction; the host
    /// does this once during board setup.
    pub fn set_config(&mut self, cfg: Tmc2130Config) {
        self.max_step = cfg.max_mm as i32 * cfg.steps_per_mm as i32;
        self.cur_step = (cfg.start_pos_mm * cfg.steps_per_mm as f32).round() as i32;
        if !cfg.no_end_stops {
            self.cur_step = self.cur_step.clamp(0, self.max_step);
        }
        self.cfg = cfg;
        self.configured = true;
        self.publish_snapshot();
    }

    /// Arm the standstill window and raise the initial output levels.
    /// Call once after [`Tmc2130::set_config`], with the host's current
    /// cycle count.
    pub fn init(&mut self, now: u64) {
        self.standstill_timer.arm(now, self.standstill_cycles());
        self.outbox.raise(Tmc2130Out::Position, self.cur_step as u32);
        self.outbox.raise(Tmc2130Out::Min, self.at_minimum() as u32);
        self.publish_snapshot();
    }

    /// The name→handler table for this peripheral's input signals.
    pub fn signal_table() -> SignalTable<Tmc2130> {
        let mut t = SignalTable::new();
        t.register("byte_in", |p: &mut Tmc2130, v, now| p.on_byte_in(v, now));
        t.register("cs_in", |p: &mut Tmc2130, v, now| {
            p.on_csel_in(v, now);
            None
        });
        t.register("step_in", |p: &mut Tmc2130, v, now| {
            p.on_step_in(v, now);
            None
        });
        t.register("dir_in", |p: &mut Tmc2130, v, _| {
            p.on_dir_in(v);
            None
        });
        t.register("en_in", |p: &mut Tmc2130, v, _| {
            p.on_enable_in(v);
            None
        });
        t
    }

    /// Shared handle for a render thread.
    pub fn snapshot_handle(&self) -> Arc<AxisSnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn axis(&self) -> char {
        self.axis
    }

    /// Current position derived from the step counter.
    pub fn position_mm(&self) -> f32 {
        self.cur_step as f32 / self.cfg.steps_per_mm as f32
    }

    pub fn step_count(&self) -> i32 {
        self.cur_step
    }

    /// Register word as firmware would read it (status refresh included,
    /// but without the clear-on-read side effect of a real SPI read).
    pub fn peek_reg(&mut self, address: u8) -> u32 {
        match address & 0x7F {
            addr::DRV_STATUS => self.refresh_drv_status(),
            addr::IOIN => self.refresh_ioin(),
            _ => {}
        }
        self.regs.read(address)
    }

    // ─── SPI handlers ───────────────────────────────────────────────────

    /// Chip-select edge. Low asserts and opens a transaction; high commits
    /// a full 5-byte frame or silently drops anything else.
    pub fn on_csel_in(&mut self, value: u32, _now: u64) {
        let asserted = value == 0;
        if asserted {
            self.selected = true;
            self.cmd_len = 0;
            self.out_pos = 0;
        } else if self.selected {
            self.selected = false;
            if self.cmd_len as usize == FRAME_LEN {
                self.commit_command();
            } else if self.cmd_len > 0 {
                self.dbg_dropped_frames += 1;
                log::debug!(
                    "tmc2130 {}: dropped malformed frame ({} bytes)",
                    self.axis,
                    self.cmd_len
                );
            }
            self.cmd_len = 0;
        }
    }

    /// One byte shifted in while selected; returns the byte shifted out.
    pub fn on_byte_in(&mut self, value: u32, _now: u64) -> Option<u32> {
        if !self.selected {
            return None;
        }
        let out = if (self.out_pos as usize) < FRAME_LEN {
            self.cmd_out[self.out_pos as usize]
        } else {
            0
        };
        self.out_pos = self.out_pos.saturating_add(1);
        if (self.cmd_len as usize) < FRAME_LEN {
            self.cmd_in[self.cmd_len as usize] = value as u8;
        }
        // Saturating count: an overlong transaction stays marked overlong
        // and is discarded at commit.
        self.cmd_len = self.cmd_len.saturating_add(1);
        Some(out as u32)
    }

    fn commit_command(&mut self) {
        let mut frame: u64 = 0;
        for b in self.cmd_in {
            frame = (frame << 8) | b as u64;
        }
        let write = frame >> 39 & 1 == 1;
        let address = ((frame >> 32) & 0x7F) as u8;
        let data = frame as u32;

        if write {
            if self.regs.write(address, data) {
                if address == addr::GCONF {
                    // Diag pin routing may have changed.
                    self.refresh_diag();
                }
            } else {
                log::debug!(
                    "tmc2130 {}: write to read-only register {:#04X} ignored",
                    self.axis,
                    address
                );
            }
        } else {
            let data = match address {
                addr::DRV_STATUS => {
                    self.refresh_drv_status();
                    self.regs.read(address)
                }
                addr::IOIN => {
                    self.refresh_ioin();
                    self.regs.read(address)
                }
                _ => self.regs.read(address),
            };
            self.latch_reply(data);
            if address == addr::GSTAT {
                // Clear-on-read: reset/error flags report once. Cleared
                // after latching so the status bits still carry them.
                self.regs.set(addr::GSTAT, 0);
            }
        }
    }

    /// Latch the reply frame served during the next transaction.
    fn latch_reply(&mut self, data: u32) {
        self.cmd_out[0] = self.status_bits();
        self.cmd_out[1..].copy_from_slice(&data.to_be_bytes());
    }

    /// SPI_STATUS bits carried in the first reply byte.
    fn status_bits(&self) -> u8 {
        let g = self.regs.read(addr::GSTAT);
        (regs::bit(g, gstat::RESET) as u8)
            | (regs::bit(g, gstat::DRV_ERR) as u8) << 1
            | (self.stall as u8) << 2
            | (self.standstill as u8) << 3
    }

    // ─── Pin handlers ───────────────────────────────────────────────────

    /// Direction pin; latched for subsequent step edges.
    pub fn on_dir_in(&mut self, value: u32) {
        self.dir = value != 0;
    }

    /// Enable pin, active low. Disabling gates step handling but keeps the
    /// step count.
    pub fn on_enable_in(&mut self, value: u32) {
        self.enabled = value == 0;
        self.publish_snapshot();
    }

    /// Step pin edge. Rising edges count; both edges when CHOPCONF.dedge
    /// is set.
    pub fn on_step_in(&mut self, value: u32, now: u64) {
        let level = value != 0;
        let prev = self.step_level;
        self.step_level = level;
        if !self.configured || !self.enabled {
            return;
        }
        let dedge = regs::bit(self.regs.read(addr::CHOPCONF), chopconf::DEDGE);
        let qualifying = if dedge { level != prev } else { level && !prev };
        if !qualifying {
            return;
        }

        let delta = if self.dir != self.cfg.inverted { -1 } else { 1 };
        self.cur_step += delta;
        if !self.cfg.no_end_stops {
            self.cur_step = self.cur_step.clamp(0, self.max_step);
        }

        // Motion clears the standstill flag and any scripted override.
        self.stall = false;
        self.standstill = false;
        self.diag_forced = false;
        self.refresh_drv_status();
        self.refresh_diag();

        self.standstill_timer.arm(now, self.standstill_cycles());
        self.outbox.raise(Tmc2130Out::Position, self.cur_step as u32);
        self.outbox.raise(Tmc2130Out::Min, self.at_minimum() as u32);
        self.publish_snapshot();
    }

    /// Advance the driver's deferred work to cycle `now`.
    pub fn tick(&mut self, now: u64) {
        if self.standstill_timer.fire_due(now) {
            self.on_standstill_timeout();
        }
    }

    fn on_standstill_timeout(&mut self) {
        self.standstill = true;
        self.refresh_drv_status();
        self.refresh_diag();
        self.publish_snapshot();
    }

    // ─── Status maintenance ─────────────────────────────────────────────

    fn refresh_drv_status(&mut self) {
        let mut w = self.regs.read(addr::DRV_STATUS);
        regs::set_bit(&mut w, drv_status::STALLGUARD, self.stall);
        regs::set_bit(&mut w, drv_status::STST, self.standstill);
        regs::set_bits(
            &mut w,
            drv_status::SG_RESULT_HI,
            drv_status::SG_RESULT_LO,
            if self.stall { 0 } else { SG_NOMINAL },
        );
        self.regs.set(addr::DRV_STATUS, w);
    }

    fn refresh_ioin(&mut self) {
        let mut w = self.regs.read(addr::IOIN);
        regs::set_bit(&mut w, ioin::STEP, self.step_level);
        regs::set_bit(&mut w, ioin::DIR, self.dir);
        // ENN pin is the inverse of the enabled state.
        regs::set_bit(&mut w, ioin::DRV_ENN, !self.enabled);
        self.regs.set(addr::IOIN, w);
    }

    /// Recompute the DIAG output level: scripted override, or a stall /
    /// standstill condition wired to a diag pin via GCONF.
    fn refresh_diag(&mut self) {
        let g = self.regs.read(addr::GCONF);
        let wired = regs::bit(g, gconf::DIAG0_STALL) || regs::bit(g, gconf::DIAG1_STALL);
        let level = self.diag_forced || ((self.stall || self.standstill) && wired);
        self.outbox.raise(Tmc2130Out::Diag, level as u32);
    }

    fn at_minimum(&self) -> bool {
        !self.cfg.no_end_stops && self.cur_step <= 0
    }

    fn standstill_cycles(&self) -> u64 {
        self.cfg.standstill_timeout_us as u64 * (CLOCK_HZ as u64 / 1_000_000)
    }

    fn publish_snapshot(&self) {
        self.snapshot
            .publish(self.axis, self.position_mm(), self.stall, self.enabled);
    }

    // ─── Save state ─────────────────────────────────────────────────────

    pub fn save_state(&self) -> Tmc2130State {
        Tmc2130State {
            cfg: self.cfg.clone(),
            configured: self.configured,
            regs: self.regs.words().to_vec(),
            selected: self.selected,
            cmd_in: self.cmd_in,
            cmd_len: self.cmd_len,
            cmd_out: self.cmd_out,
            out_pos: self.out_pos,
            dir: self.dir,
            enabled: self.enabled,
            step_level: self.step_level,
            cur_step: self.cur_step,
            max_step: self.max_step,
            stall: self.stall,
            standstill: self.standstill,
            diag_forced: self.diag_forced,
            standstill_deadline: self.standstill_timer.deadline(),
        }
    }

    pub fn load_state(&mut self, s: &Tmc2130State) {
        self.cfg = s.cfg.clone();
        self.configured = s.configured;
        self.regs.restore(&s.regs);
        self.selected = s.selected;
        self.cmd_in = s.cmd_in;
        self.cmd_len = s.cmd_len;
        self.cmd_out = s.cmd_out;
        self.out_pos = s.out_pos;
        self.dir = s.dir;
        self.enabled = s.enabled;
        self.step_level = s.step_level;
        self.cur_step = s.cur_step;
        self.max_step = s.max_step;
        self.stall = s.stall;
        self.standstill = s.standstill;
        self.diag_forced = s.diag_forced;
        self.standstill_timer.restore(s.standstill_deadline);
        self.publish_snapshot();
    }
}

impl Scriptable for Tmc2130 {
    fn process_action(&mut self, id: u32, _args: &[String]) -> ActionStatus {
        match id {
            ACT_TOGGLE_STALL => {
                self.stall = !self.stall;
                self.refresh_drv_status();
                self.refresh_diag();
                self.publish_snapshot();
                ActionStatus::Finished
            }
            ACT_SET_DIAG => {
                self.diag_forced = true;
                self.refresh_diag();
                ActionStatus::Finished
            }
            ACT_RESET_DIAG => {
                self.diag_forced = false;
                self.refresh_diag();
                ActionStatus::Finished
            }
            ACT_WAIT_FOR_STALL => {
                if self.stall || self.standstill {
                    ActionStatus::Finished
                } else {
                    ActionStatus::Waiting
                }
            }
            _ => {
                log::warn!("tmc2130 {}: unknown action {}", self.axis, id);
                ActionStatus::Error
            }
        }
    }

    fn action_names(&self) -> &'static [&'static str] {
        &["ToggleStall", "SetDiag", "ResetDiag", "WaitForStall"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(axis: char) -> Tmc2130 {
        let mut t = Tmc2130::new(axis);
        t.set_config(Tmc2130Config::default());
        t.init(0);
        t
    }

    fn write_frame(address: u8, data: u32) -> [u8; 5] {
        let d = data.to_be_bytes();
        [0x80 | address, d[0], d[1], d[2], d[3]]
    }

    fn read_frame(address: u8) -> [u8; 5] {
        [address, 0, 0, 0, 0]
    }

    /// Run one full transaction and collect the shifted-out reply.
    fn transact(t: &mut Tmc2130, frame: [u8; 5]) -> [u8; 5] {
        t.on_csel_in(0, 0);
        let mut out = [0u8; 5];
        for (i, b) in frame.iter().enumerate() {
            out[i] = t.on_byte_in(*b as u32, 0).unwrap() as u8;
        }
        t.on_csel_in(1, 0);
        out
    }

    fn read_register(t: &mut Tmc2130, address: u8) -> (u8, u32) {
        transact(t, read_frame(address));
        // Reply shifts out during the following transaction.
        let reply = transact(t, read_frame(address));
        let data = u32::from_be_bytes([reply[1], reply[2], reply[3], reply[4]]);
        (reply[0], data)
    }

    fn step(t: &mut Tmc2130, now: u64) {
        t.on_step_in(1, now);
        t.on_step_in(0, now);
    }

    #[test]
    fn test_write_read_round_trip() {
        let mut t = configured('x');
        transact(&mut t, write_frame(addr::CHOPCONF, 0x1234_5678));
        let (_, data) = read_register(&mut t, addr::CHOPCONF);
        assert_eq!(data, 0x1234_5678);
    }

    #[test]
    fn test_read_only_register_write_is_noop() {
        let mut t = configured('x');
        let before = t.peek_reg(addr::DRV_STATUS);
        transact(&mut t, write_frame(addr::DRV_STATUS, 0xFFFF_FFFF));
        assert_eq!(t.peek_reg(addr::DRV_STATUS), before);
    }

    #[test]
    fn test_malformed_frames_are_dropped() {
        let mut t = configured('x');
        transact(&mut t, write_frame(addr::CHOPCONF, 0xAA));
        let out_before = t.cmd_out;

        // Short transaction: 3 bytes, then deassert.
        t.on_csel_in(0, 0);
        for b in [0x80 | addr::CHOPCONF, 0xDE, 0xAD] {
            t.on_byte_in(b as u32, 0);
        }
        t.on_csel_in(1, 0);

        assert_eq!(t.peek_reg(addr::CHOPCONF), 0xAA);
        assert_eq!(t.cmd_out, out_before);
        assert_eq!(t.dbg_dropped_frames, 1);

        // Overlong transaction: 6 bytes.
        t.on_csel_in(0, 0);
        for b in [0x80 | addr::CHOPCONF, 0, 0, 0, 0x55, 0x55] {
            t.on_byte_in(b as u32, 0);
        }
        t.on_csel_in(1, 0);

        assert_eq!(t.peek_reg(addr::CHOPCONF), 0xAA);
        assert_eq!(t.dbg_dropped_frames, 2);
    }

    #[test]
    fn test_bytes_ignored_while_deselected() {
        let mut t = configured('x');
        assert_eq!(t.on_byte_in(0xFF, 0), None);
        t.on_csel_in(1, 0); // deassert without a transaction is harmless
        assert_eq!(t.dbg_dropped_frames, 0);
    }

    #[test]
    fn test_gstat_reports_reset_then_clears() {
        let mut t = configured('x');
        let (status, data) = read_register(&mut t, addr::GSTAT);
        assert_eq!(status & 0x01, 0x01, "reset flag in SPI status bits");
        assert_eq!(data & 0x01, 0x01, "reset flag in GSTAT data");

        let (status, data) = read_register(&mut t, addr::GSTAT);
        assert_eq!(status & 0x01, 0);
        assert_eq!(data, 0);
    }

    #[test]
    fn test_ioin_reflects_pins_and_version() {
        let mut t = configured('x');
        t.on_dir_in(1);
        t.on_enable_in(1); // disable: ENN high
        let (_, data) = read_register(&mut t, addr::IOIN);
        assert!(regs::bit(data, ioin::DIR));
        assert!(regs::bit(data, ioin::DRV_ENN));
        assert_eq!(regs::bits(data, ioin::VERSION_HI, ioin::VERSION_LO), 0x11);
    }

    #[test]
    fn test_step_counting_and_position() {
        let mut t = configured('x');
        assert_eq!(t.step_count(), 1000); // 10.0 mm at 100 steps/mm
        for i in 0..500 {
            step(&mut t, i);
        }
        assert_eq!(t.step_count(), 1500);
        assert!((t.position_mm() - 15.0).abs() < 1e-6);
    }

    #[test]
    fn test_direction_and_inversion() {
        let mut t = configured('x');
        t.on_dir_in(1);
        step(&mut t, 0);
        assert_eq!(t.step_count(), 999);

        let mut t = Tmc2130::new('y');
        t.set_config(Tmc2130Config { inverted: true, ..Default::default() });
        t.init(0);
        t.on_dir_in(1);
        step(&mut t, 0);
        assert_eq!(t.step_count(), 1001);
    }

    #[test]
    fn test_disable_gates_steps_but_keeps_count() {
        let mut t = configured('x');
        t.on_enable_in(1);
        step(&mut t, 0);
        assert_eq!(t.step_count(), 1000);
        t.on_enable_in(0);
        step(&mut t, 0);
        assert_eq!(t.step_count(), 1001);
    }

    #[test]
    fn test_clamping_at_end_stops() {
        let mut t = configured('x');
        t.on_dir_in(1); // toward minimum
        for i in 0..2000 {
            step(&mut t, i);
        }
        assert_eq!(t.step_count(), 0);
        assert_eq!(t.outbox.last(Tmc2130Out::Min), Some(1));

        t.on_dir_in(0);
        step(&mut t, 3000);
        assert_eq!(t.step_count(), 1);
        assert_eq!(t.outbox.last(Tmc2130Out::Min), Some(0));
    }

    #[test]
    fn test_free_running_axis_is_unclamped() {
        let mut t = Tmc2130::new('e');
        t.set_config(Tmc2130Config {
            no_end_stops: true,
            start_pos_mm: 0.0,
            ..Default::default()
        });
        t.init(0);
        t.on_dir_in(1);
        for i in 0..10 {
            step(&mut t, i);
        }
        assert_eq!(t.step_count(), -10);
    }

    #[test]
    fn test_dedge_counts_both_edges() {
        let mut t = configured('x');
        let mut cc = 0;
        regs::set_bit(&mut cc, chopconf::DEDGE, true);
        transact(&mut t, write_frame(addr::CHOPCONF, cc));
        t.on_step_in(1, 0);
        t.on_step_in(0, 0);
        assert_eq!(t.step_count(), 1002);
    }

    #[test]
    fn test_standstill_sets_once_and_clears_on_step() {
        let mut t = configured('x');
        let window = 100_000u64 * (CLOCK_HZ as u64 / 1_000_000);

        t.tick(window - 1);
        assert!(!regs::bit(t.peek_reg(addr::DRV_STATUS), drv_status::STST));

        t.tick(window);
        assert!(regs::bit(t.peek_reg(addr::DRV_STATUS), drv_status::STST));
        let (status, _) = read_register(&mut t, addr::CHOPCONF);
        assert_eq!(status & 0x08, 0x08, "standstill in SPI status bits");

        // The timer fired once; with no re-arm it stays quiet.
        t.tick(window * 10);
        assert!(regs::bit(t.peek_reg(addr::DRV_STATUS), drv_status::STST));

        step(&mut t, window * 10);
        assert!(!regs::bit(t.peek_reg(addr::DRV_STATUS), drv_status::STST));

        // Stepping re-armed the window.
        t.tick(window * 11);
        assert!(regs::bit(t.peek_reg(addr::DRV_STATUS), drv_status::STST));
    }

    #[test]
    fn test_toggle_stall_action() {
        let mut t = configured('x');
        let mut g = 0;
        regs::set_bit(&mut g, gconf::DIAG0_STALL, true);
        transact(&mut t, write_frame(addr::GCONF, g));

        assert_eq!(t.process_action(ACT_TOGGLE_STALL, &[]), ActionStatus::Finished);
        let w = t.peek_reg(addr::DRV_STATUS);
        assert!(regs::bit(w, drv_status::STALLGUARD));
        assert_eq!(regs::bits(w, drv_status::SG_RESULT_HI, drv_status::SG_RESULT_LO), 0);
        assert_eq!(t.outbox.last(Tmc2130Out::Diag), Some(1));

        assert_eq!(t.process_action(ACT_TOGGLE_STALL, &[]), ActionStatus::Finished);
        let w = t.peek_reg(addr::DRV_STATUS);
        assert!(!regs::bit(w, drv_status::STALLGUARD));
        assert_eq!(t.outbox.last(Tmc2130Out::Diag), Some(0));
    }

    #[test]
    fn test_stall_without_diag_wiring_stays_off_the_pin() {
        let mut t = configured('x');
        t.process_action(ACT_TOGGLE_STALL, &[]);
        assert_ne!(t.outbox.last(Tmc2130Out::Diag), Some(1));
    }

    #[test]
    fn test_diag_override_actions() {
        let mut t = configured('x');
        assert_eq!(t.process_action(ACT_SET_DIAG, &[]), ActionStatus::Finished);
        assert_eq!(t.outbox.last(Tmc2130Out::Diag), Some(1));
        // idempotent
        assert_eq!(t.process_action(ACT_SET_DIAG, &[]), ActionStatus::Finished);
        assert_eq!(t.outbox.last(Tmc2130Out::Diag), Some(1));

        assert_eq!(t.process_action(ACT_RESET_DIAG, &[]), ActionStatus::Finished);
        assert_eq!(t.outbox.last(Tmc2130Out::Diag), Some(0));

        // A step edge clears a pending override.
        t.process_action(ACT_SET_DIAG, &[]);
        step(&mut t, 0);
        assert_eq!(t.outbox.last(Tmc2130Out::Diag), Some(0));
    }

    #[test]
    fn test_wait_for_stall_action() {
        let mut t = configured('x');
        assert_eq!(t.process_action(ACT_WAIT_FOR_STALL, &[]), ActionStatus::Waiting);
        t.process_action(ACT_TOGGLE_STALL, &[]);
        assert_eq!(t.process_action(ACT_WAIT_FOR_STALL, &[]), ActionStatus::Finished);
    }

    #[test]
    fn test_unknown_action_is_an_error() {
        let mut t = configured('x');
        assert_eq!(t.process_action(99, &[]), ActionStatus::Error);
    }

    #[test]
    fn test_snapshot_reads_from_another_thread() {
        let mut t = configured('z');
        let handle = t.snapshot_handle();
        for i in 0..100 {
            step(&mut t, i);
        }
        let view = std::thread::spawn(move || handle.read()).join().unwrap();
        assert_eq!(view.axis, 'z');
        assert!((view.position_mm - 11.0).abs() < 1e-6);
        assert!(view.enabled);
        assert!(!view.stalled);
    }

    #[test]
    fn test_save_state_round_trip() {
        let mut t = configured('x');
        transact(&mut t, write_frame(addr::CHOPCONF, 0xCAFE));
        for i in 0..7 {
            step(&mut t, i);
        }
        transact(&mut t, read_frame(addr::CHOPCONF));
        let saved = t.save_state();

        let mut r = Tmc2130::new('x');
        r.load_state(&saved);
        assert_eq!(r.step_count(), 1007);
        assert_eq!(r.peek_reg(addr::CHOPCONF), 0xCAFE);
        // The latched reply survives: next transaction shifts it out.
        let reply = transact(&mut r, read_frame(addr::CHOPCONF));
        assert_eq!(u32::from_be_bytes([reply[1], reply[2], reply[3], reply[4]]), 0xCAFE);
    }
}
