//! Save state for the board's peripheral set.
//!
//! Captures every peripheral's firmware-visible state to a file using
//! bincode serialization with deflate compression, so a simulation session
//! can be frozen and resumed without re-running firmware setup.
//!
//! ## File format
//!
//! ```text
//! +------------------+
//! | Magic "EYPS"     |  4 bytes
//! +------------------+
//! | Format version   |  u32 little-endian (currently 1)
//! +------------------+
//! | Compressed data  |  deflate-compressed bincode payload
//! +------------------+
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::peripherals::Tmc2130Config;

/// Magic bytes identifying an einsy-core save state file.
const MAGIC: &[u8; 4] = b"EYPS";
/// Current save state format version.
const FORMAT_VERSION: u32 = 1;

// ─── Per-peripheral state structs ───────────────────────────────────────────

#[derive(Serialize, Deserialize)]
pub struct Tmc2130State {
    pub cfg: Tmc2130Config,
    pub configured: bool,
    pub regs: Vec<u32>,
    pub selected: bool,
    pub cmd_in: [u8; 5],
    pub cmd_len: u8,
    pub cmd_out: [u8; 5],
    pub out_pos: u8,
    pub dir: bool,
    pub enabled: bool,
    pub step_level: bool,
    pub cur_step: i32,
    pub max_step: i32,
    pub stall: bool,
    pub standstill: bool,
    pub diag_forced: bool,
    pub standstill_deadline: Option<u64>,
}

#[derive(Serialize, Deserialize)]
pub struct AdcButtonsState {
    pub mux_channel: u8,
    pub cur_btn: u8,
}

// ─── Top-level save state ───────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
pub struct EinsyState {
    pub motor_x: Tmc2130State,
    pub motor_y: Tmc2130State,
    pub motor_z: Tmc2130State,
    pub motor_e: Tmc2130State,
    pub buttons: AdcButtonsState,
}

// ─── Encoding / file I/O ────────────────────────────────────────────────────

/// Encode a state to the on-disk byte format.
pub fn to_bytes(state: &EinsyState) -> Result<Vec<u8>, String> {
    let payload = bincode::serialize(state).map_err(|e| format!("Serialize error: {}", e))?;

    let compressed = miniz_oxide::deflate::compress_to_vec(&payload, 6);

    let mut out = Vec::with_capacity(8 + compressed.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    out.extend_from_slice(&compressed);
    Ok(out)
}

/// Decode a state from the on-disk byte format, verifying magic and version.
pub fn from_bytes(data: &[u8]) -> Result<EinsyState, String> {
    if data.len() < 8 {
        return Err("File too small".into());
    }
    if &data[0..4] != MAGIC {
        return Err("Invalid save state file (bad magic)".into());
    }
    let version = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
    if version != FORMAT_VERSION {
        return Err(format!(
            "Unsupported save state version {} (expected {})",
            version, FORMAT_VERSION
        ));
    }

    let decompressed = miniz_oxide::inflate::decompress_to_vec(&data[8..])
        .map_err(|e| format!("Decompress error: {:?}", e))?;

    bincode::deserialize(&decompressed).map_err(|e| format!("Deserialize error: {}", e))
}

/// Save state to file.
pub fn save_to_file(state: &EinsyState, path: &Path) -> Result<(), String> {
    let bytes = to_bytes(state)?;
    std::fs::write(path, &bytes).map_err(|e| format!("Write error: {}", e))
}

/// Load state from file.
pub fn load_from_file(path: &Path) -> Result<EinsyState, String> {
    let data = std::fs::read(path).map_err(|e| format!("Read error: {}", e))?;
    from_bytes(&data)
}
