//! HD44780 character generator ROM (A00 variant).
//!
//! 5x7-dot glyphs for the character LCD peripheral: 256 character codes,
//! 7 row bytes each, the low 5 bits of every row holding the dots (bit 4 =
//! leftmost column). The table is byte-for-byte the mask ROM of the real
//! controller so rendered text matches the hardware exactly.

/// Glyph width in dots.
pub const GLYPH_WIDTH: usize = 5;
/// Glyph height in dots.
pub const GLYPH_HEIGHT: usize = 7;
/// ROM size: 256 glyphs x 7 row bytes.
pub const ROM_SIZE: usize = 256 * GLYPH_HEIGHT;

/// The A00 (Japanese standard font) character ROM.
pub static CHAR_ROM: [u8; ROM_SIZE] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04,
    0x0A, 0x0A, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A,
    0x04, 0x0F, 0x14, 0x0E, 0x05, 0x1E, 0x04, 0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03,
    0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D, 0x0C, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00,
    0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02, 0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08,
    0x00, 0x04, 0x15, 0x0E, 0x15, 0x04, 0x00, 0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08, 0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C, 0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00,
    0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E, 0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E,
    0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F, 0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E,
    0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02, 0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E,
    0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E, 0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08,
    0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E, 0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C,
    0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00, 0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x04, 0x08,
    0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02, 0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00,
    0x10, 0x08, 0x04, 0x02, 0x04, 0x08, 0x10, 0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04,
    0x0E, 0x11, 0x01, 0x0D, 0x15, 0x15, 0x0E, 0x0E, 0x11, 0x11, 0x11, 0x1F, 0x11, 0x11,
    0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E, 0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E,
    0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E, 0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F,
    0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10, 0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F,
    0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11, 0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E,
    0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C, 0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11,
    0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F, 0x11, 0x1B, 0x15, 0x11, 0x11, 0x11, 0x11,
    0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E,
    0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10, 0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D,
    0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11, 0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E,
    0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E,
    0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04, 0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A,
    0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04,
    0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F, 0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E,
    0x11, 0x0A, 0x1F, 0x04, 0x1F, 0x04, 0x04, 0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E,
    0x04, 0x0A, 0x11, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F,
    0x08, 0x04, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F,
    0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x1E, 0x00, 0x00, 0x0E, 0x10, 0x10, 0x11, 0x0E,
    0x01, 0x01, 0x0D, 0x13, 0x11, 0x11, 0x0F, 0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E,
    0x06, 0x09, 0x08, 0x1C, 0x08, 0x08, 0x08, 0x0F, 0x11, 0x11, 0x0F, 0x01, 0x01, 0x0E,
    0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x11, 0x04, 0x00, 0x0C, 0x04, 0x04, 0x04, 0x0E,
    0x02, 0x00, 0x06, 0x02, 0x02, 0x12, 0x0C, 0x10, 0x10, 0x12, 0x14, 0x18, 0x14, 0x12,
    0x0C, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E, 0x00, 0x00, 0x1A, 0x15, 0x15, 0x11, 0x11,
    0x00, 0x00, 0x16, 0x19, 0x11, 0x11, 0x11, 0x00, 0x00, 0x0E, 0x11, 0x11, 0x11, 0x0E,
    0x00, 0x00, 0x1E, 0x11, 0x1E, 0x10, 0x10, 0x00, 0x00, 0x0D, 0x13, 0x0F, 0x01, 0x01,
    0x00, 0x00, 0x16, 0x19, 0x10, 0x10, 0x10, 0x00, 0x00, 0x0F, 0x10, 0x0E, 0x01, 0x1E,
    0x08, 0x1C, 0x08, 0x08, 0x08, 0x09, 0x06, 0x00, 0x00, 0x11, 0x11, 0x11, 0x13, 0x0D,
    0x00, 0x00, 0x11, 0x11, 0x11, 0x0A, 0x04, 0x00, 0x00, 0x11, 0x11, 0x15, 0x15, 0x0A,
    0x00, 0x00, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x00, 0x00, 0x11, 0x11, 0x0F, 0x01, 0x0E,
    0x00, 0x00, 0x1F, 0x02, 0x04, 0x08, 0x1F, 0x02, 0x04, 0x04, 0x08, 0x04, 0x04, 0x02,
    0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x08, 0x04, 0x04, 0x02, 0x04, 0x04, 0x08,
    0x00, 0x04, 0x02, 0x1F, 0x02, 0x04, 0x00, 0x00, 0x04, 0x08, 0x1F, 0x08, 0x04, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1C, 0x14, 0x1C,
    0x07, 0x04, 0x04, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x04, 0x04, 0x1C,
    0x00, 0x00, 0x00, 0x00, 0x10, 0x08, 0x04, 0x00, 0x00, 0x00, 0x0C, 0x0C, 0x00, 0x00,
    0x00, 0x1F, 0x01, 0x1F, 0x01, 0x02, 0x04, 0x00, 0x00, 0x1F, 0x01, 0x06, 0x04, 0x08,
    0x00, 0x00, 0x02, 0x04, 0x0C, 0x14, 0x04, 0x00, 0x00, 0x04, 0x1F, 0x11, 0x01, 0x06,
    0x00, 0x00, 0x00, 0x1F, 0x04, 0x04, 0x1F, 0x00, 0x00, 0x02, 0x1F, 0x06, 0x0A, 0x12,
    0x00, 0x00, 0x08, 0x1F, 0x09, 0x0A, 0x08, 0x00, 0x00, 0x00, 0x0E, 0x02, 0x02, 0x1F,
    0x00, 0x00, 0x1E, 0x02, 0x1E, 0x02, 0x1E, 0x00, 0x00, 0x00, 0x15, 0x15, 0x01, 0x06,
    0x00, 0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x1F, 0x01, 0x05, 0x06, 0x04, 0x04, 0x08,
    0x01, 0x02, 0x04, 0x0C, 0x14, 0x04, 0x04, 0x04, 0x1F, 0x11, 0x11, 0x01, 0x02, 0x04,
    0x00, 0x00, 0x1F, 0x04, 0x04, 0x04, 0x1F, 0x02, 0x1F, 0x02, 0x06, 0x0A, 0x12, 0x02,
    0x08, 0x1F, 0x09, 0x09, 0x09, 0x09, 0x12, 0x04, 0x1F, 0x04, 0x1F, 0x04, 0x04, 0x04,
    0x00, 0x0F, 0x09, 0x11, 0x01, 0x02, 0x0C, 0x08, 0x0F, 0x12, 0x02, 0x02, 0x02, 0x04,
    0x00, 0x1F, 0x01, 0x01, 0x01, 0x01, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A, 0x02, 0x04, 0x08,
    0x00, 0x18, 0x01, 0x19, 0x01, 0x02, 0x1C, 0x00, 0x1F, 0x01, 0x02, 0x04, 0x0A, 0x11,
    0x08, 0x1F, 0x09, 0x0A, 0x08, 0x08, 0x07, 0x00, 0x11, 0x11, 0x09, 0x01, 0x02, 0x0C,
    0x00, 0x0F, 0x09, 0x15, 0x03, 0x02, 0x0C, 0x02, 0x1C, 0x04, 0x1F, 0x04, 0x04, 0x08,
    0x00, 0x15, 0x15, 0x01, 0x01, 0x02, 0x04, 0x0E, 0x00, 0x1F, 0x04, 0x04, 0x04, 0x08,
    0x08, 0x08, 0x08, 0x0C, 0x0A, 0x08, 0x08, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x08, 0x10,
    0x00, 0x0E, 0x00, 0x00, 0x00, 0x00, 0x1F, 0x00, 0x1F, 0x01, 0x0A, 0x04, 0x0A, 0x10,
    0x04, 0x1F, 0x02, 0x04, 0x0E, 0x15, 0x04, 0x02, 0x02, 0x02, 0x02, 0x02, 0x04, 0x08,
    0x00, 0x04, 0x02, 0x11, 0x11, 0x11, 0x11, 0x10, 0x10, 0x1F, 0x10, 0x10, 0x10, 0x0F,
    0x00, 0x1F, 0x01, 0x01, 0x01, 0x02, 0x0C, 0x00, 0x08, 0x14, 0x02, 0x01, 0x01, 0x00,
    0x04, 0x1F, 0x04, 0x04, 0x15, 0x15, 0x04, 0x00, 0x1F, 0x01, 0x01, 0x0A, 0x04, 0x02,
    0x00, 0x0E, 0x00, 0x0E, 0x00, 0x0E, 0x01, 0x00, 0x04, 0x08, 0x10, 0x11, 0x1F, 0x01,
    0x00, 0x01, 0x01, 0x0A, 0x04, 0x0A, 0x10, 0x00, 0x1F, 0x08, 0x1F, 0x08, 0x08, 0x07,
    0x08, 0x08, 0x1F, 0x09, 0x0A, 0x08, 0x08, 0x00, 0x0E, 0x02, 0x02, 0x02, 0x02, 0x1F,
    0x00, 0x1F, 0x01, 0x1F, 0x01, 0x01, 0x1F, 0x0E, 0x00, 0x1F, 0x01, 0x01, 0x02, 0x04,
    0x12, 0x12, 0x12, 0x12, 0x02, 0x04, 0x08, 0x00, 0x04, 0x14, 0x14, 0x15, 0x15, 0x16,
    0x00, 0x10, 0x10, 0x11, 0x12, 0x14, 0x18, 0x00, 0x1F, 0x11, 0x11, 0x11, 0x11, 0x1F,
    0x00, 0x1F, 0x11, 0x11, 0x01, 0x02, 0x04, 0x00, 0x18, 0x00, 0x01, 0x01, 0x02, 0x1C,
    0x04, 0x12, 0x08, 0x00, 0x00, 0x00, 0x00, 0x1C, 0x14, 0x1C, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x09, 0x15, 0x12, 0x12, 0x0D, 0x0A, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F,
    0x00, 0x0E, 0x11, 0x1E, 0x11, 0x1E, 0x10, 0x00, 0x00, 0x0E, 0x10, 0x0C, 0x11, 0x0E,
    0x00, 0x11, 0x11, 0x11, 0x13, 0x1D, 0x10, 0x00, 0x00, 0x0F, 0x14, 0x12, 0x11, 0x0E,
    0x00, 0x06, 0x09, 0x11, 0x11, 0x1E, 0x10, 0x00, 0x0F, 0x11, 0x11, 0x11, 0x0F, 0x01,
    0x00, 0x00, 0x07, 0x04, 0x04, 0x14, 0x08, 0x02, 0x1A, 0x02, 0x00, 0x00, 0x00, 0x00,
    0x02, 0x00, 0x06, 0x02, 0x02, 0x02, 0x02, 0x00, 0x14, 0x08, 0x14, 0x00, 0x00, 0x00,
    0x04, 0x0E, 0x14, 0x15, 0x0E, 0x04, 0x00, 0x08, 0x08, 0x1C, 0x08, 0x1C, 0x08, 0x0F,
    0x0E, 0x00, 0x16, 0x19, 0x11, 0x11, 0x11, 0x0A, 0x00, 0x0E, 0x11, 0x11, 0x11, 0x0E,
    0x00, 0x16, 0x19, 0x11, 0x11, 0x1E, 0x10, 0x00, 0x0D, 0x13, 0x11, 0x11, 0x0F, 0x01,
    0x0E, 0x11, 0x1F, 0x11, 0x11, 0x0E, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0B, 0x15, 0x1A,
    0x00, 0x0E, 0x11, 0x11, 0x0A, 0x1B, 0x00, 0x0A, 0x00, 0x11, 0x11, 0x11, 0x13, 0x0D,
    0x1F, 0x10, 0x08, 0x04, 0x08, 0x10, 0x1F, 0x00, 0x1F, 0x0A, 0x0A, 0x0A, 0x13, 0x00,
    0x1F, 0x00, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x00, 0x11, 0x11, 0x11, 0x11, 0x0F, 0x01,
    0x01, 0x1E, 0x04, 0x1F, 0x04, 0x04, 0x00, 0x00, 0x1F, 0x08, 0x0F, 0x09, 0x11, 0x00,
    0x00, 0x00, 0x1F, 0x15, 0x1F, 0x11, 0x11, 0x00, 0x00, 0x04, 0x00, 0x1F, 0x00, 0x04,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F,
];

/// The 7 row bytes of the glyph for `code`.
pub fn glyph(code: u8) -> &'static [u8; GLYPH_HEIGHT] {
    let start = code as usize * GLYPH_HEIGHT;
    CHAR_ROM[start..start + GLYPH_HEIGHT]
        .try_into()
        .unwrap_or(&[0; GLYPH_HEIGHT])
}

/// Whether the dot at (`x`, `y`) of the glyph for `code` is set.
/// `x` = 0 is the leftmost column, `y` = 0 the top row. Out-of-range
/// coordinates are dark.
pub fn pixel(code: u8, x: usize, y: usize) -> bool {
    if x >= GLYPH_WIDTH || y >= GLYPH_HEIGHT {
        return false;
    }
    glyph(code)[y] & (1 << (GLYPH_WIDTH - 1 - x)) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rom_dimensions() {
        assert_eq!(CHAR_ROM.len(), 1792);
    }

    #[test]
    fn test_glyph_capital_a() {
        // Classic 5x7 'A': peak, sides, crossbar.
        assert_eq!(glyph(b'A'), &[0x0E, 0x11, 0x11, 0x11, 0x1F, 0x11, 0x11]);
    }

    #[test]
    fn test_glyph_space_is_blank() {
        assert_eq!(glyph(b' '), &[0; GLYPH_HEIGHT]);
    }

    #[test]
    fn test_pixel_addressing() {
        // Top row of 'A' is 0x0E = .###.
        assert!(!pixel(b'A', 0, 0));
        assert!(pixel(b'A', 1, 0));
        assert!(pixel(b'A', 2, 0));
        assert!(pixel(b'A', 3, 0));
        assert!(!pixel(b'A', 4, 0));
        // Crossbar row is 0x1F = #####
        for x in 0..GLYPH_WIDTH {
            assert!(pixel(b'A', x, 4));
        }
        assert!(!pixel(b'A', 5, 0));
        assert!(!pixel(b'A', 0, 7));
    }

    #[test]
    fn test_rows_use_five_bits() {
        for &row in CHAR_ROM.iter() {
            assert_eq!(row & 0xE0, 0, "row byte {:#04X} exceeds 5 dots", row);
        }
    }
}
