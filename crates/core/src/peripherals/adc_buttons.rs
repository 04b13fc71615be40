//! ADC-sampled button matrix emulation.
//!
//! Models the front-panel buttons wired as a resistor ladder into one ADC
//! mux channel: each button grounds a different tap, so the sampled voltage
//! identifies the pressed button. With nothing pressed the line sits at
//! full scale.
//!
//! Sample values are in millivolts against a 5 V supply; the host quantizes
//! them against its own reference. Button 1 = 299 mV, 2 = 391 mV,
//! 3 = 650 mV, none = 5000 mV.

use crate::bus::{Outbox, SignalTable};
use crate::savestate::AdcButtonsState;
use crate::scriptable::{parse_arg, ActionStatus, Scriptable};

/// Highest valid button id.
pub const BUTTON_COUNT: u8 = 3;

/// Ladder taps in millivolts, indexed by button id (0 = none).
const LADDER_MV: [u32; BUTTON_COUNT as usize + 1] = [5000, 299, 391, 650];

/// Scripted action: press a button (`args[0]` = id, 0 releases).
pub const ACT_PRESS: u32 = 0;

/// Output signal lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdcButtonsOut {
    /// The analog sample, raised on every read.
    Value,
    /// Raw button id, for debugging consumers.
    Digital,
}

pub struct AdcButtons {
    mux_channel: u8,
    cur_btn: u8,
    /// Output events pending for the host bus.
    pub outbox: Outbox<AdcButtonsOut>,
}

impl AdcButtons {
    pub fn new() -> Self {
        AdcButtons { mux_channel: 0, cur_btn: 0, outbox: Outbox::new() }
    }

    /// Bind this peripheral to an ADC input channel on the host bus.
    pub fn init(&mut self, mux_channel: u8) {
        self.mux_channel = mux_channel;
    }

    /// The name→handler table for this peripheral's input signals.
    pub fn signal_table() -> SignalTable<AdcButtons> {
        let mut t = SignalTable::new();
        t.register("trigger", |p: &mut AdcButtons, v, now| p.on_adc_read(v, now));
        t
    }

    pub fn mux_channel(&self) -> u8 {
        self.mux_channel
    }

    /// Press a button: 1 = left, 2 = middle, 3 = right, 0 = none.
    /// Out-of-range ids clamp to "none".
    pub fn push(&mut self, button: u8) {
        if button > BUTTON_COUNT {
            log::warn!("adc_buttons: button id {} out of range, treating as none", button);
            self.cur_btn = 0;
        } else {
            self.cur_btn = button;
        }
    }

    /// Sample request on the bound channel. Returns the ladder voltage for
    /// the current button and echoes the raw id on the digital output.
    pub fn on_adc_read(&mut self, _value: u32, _now: u64) -> Option<u32> {
        let mv = LADDER_MV
            .get(self.cur_btn as usize)
            .copied()
            .unwrap_or(LADDER_MV[0]);
        self.outbox.raise(AdcButtonsOut::Digital, self.cur_btn as u32);
        self.outbox.raise(AdcButtonsOut::Value, mv);
        Some(mv)
    }

    pub fn save_state(&self) -> AdcButtonsState {
        AdcButtonsState { mux_channel: self.mux_channel, cur_btn: self.cur_btn }
    }

    pub fn load_state(&mut self, s: &AdcButtonsState) {
        self.mux_channel = s.mux_channel;
        self.cur_btn = s.cur_btn;
    }
}

impl Default for AdcButtons {
    fn default() -> Self {
        Self::new()
    }
}

impl Scriptable for AdcButtons {
    fn process_action(&mut self, id: u32, args: &[String]) -> ActionStatus {
        match id {
            ACT_PRESS => match parse_arg::<u8>(args, 0) {
                Some(button) => {
                    self.push(button);
                    ActionStatus::Finished
                }
                None => ActionStatus::Error,
            },
            _ => {
                log::warn!("adc_buttons: unknown action {}", id);
                ActionStatus::Error
            }
        }
    }

    fn action_names(&self) -> &'static [&'static str] {
        &["Press"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_identify_each_button() {
        let mut b = AdcButtons::new();
        b.init(2);
        let mut seen = Vec::new();
        for btn in 0..=BUTTON_COUNT {
            b.push(btn);
            let mv = b.on_adc_read(0, 0).unwrap();
            assert!(!seen.contains(&mv), "button {} sample not unique", btn);
            seen.push(mv);
        }
    }

    #[test]
    fn test_no_button_reads_full_scale() {
        let mut b = AdcButtons::new();
        b.push(0);
        assert_eq!(b.on_adc_read(0, 0), Some(5000));
    }

    #[test]
    fn test_out_of_range_clamps_to_none() {
        let mut b = AdcButtons::new();
        b.push(BUTTON_COUNT + 1);
        assert_eq!(b.on_adc_read(0, 0), Some(5000));
    }

    #[test]
    fn test_digital_echo() {
        let mut b = AdcButtons::new();
        b.push(2);
        b.on_adc_read(0, 0);
        assert_eq!(b.outbox.last(AdcButtonsOut::Digital), Some(2));
        assert_eq!(b.outbox.last(AdcButtonsOut::Value), Some(391));
    }

    #[test]
    fn test_press_action() {
        let mut b = AdcButtons::new();
        let status = b.process_action(ACT_PRESS, &["3".to_string()]);
        assert_eq!(status, ActionStatus::Finished);
        assert_eq!(b.on_adc_read(0, 0), Some(650));

        assert_eq!(b.process_action(ACT_PRESS, &[]), ActionStatus::Error);
        assert_eq!(b.process_action(7, &[]), ActionStatus::Error);
    }

    #[test]
    fn test_save_state_round_trip() {
        let mut b = AdcButtons::new();
        b.init(5);
        b.push(1);
        let saved = b.save_state();

        let mut r = AdcButtons::new();
        r.load_state(&saved);
        assert_eq!(r.mux_channel(), 5);
        assert_eq!(r.on_adc_read(0, 0), Some(299));
    }
}
