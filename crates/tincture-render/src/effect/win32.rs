//! Windows console text attribute bits.
//!
//! A console attribute is a 16-bit word: bits 0-3 select the foreground
//! color and intensity, bits 4-7 the background, and the high byte carries
//! the underscore and reverse-video flags (honored only with double-byte
//! character sets).

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use super::ecma48;

pub const FOREGROUND_BLUE: u16 = 0x0001;
pub const FOREGROUND_GREEN: u16 = 0x0002;
pub const FOREGROUND_RED: u16 = 0x0004;
pub const FOREGROUND_INTENSITY: u16 = 0x0008;

pub const BACKGROUND_BLUE: u16 = 0x0010;
pub const BACKGROUND_GREEN: u16 = 0x0020;
pub const BACKGROUND_RED: u16 = 0x0040;
pub const BACKGROUND_INTENSITY: u16 = 0x0080;

pub const COMMON_LVB_REVERSE_VIDEO: u16 = 0x4000;
pub const COMMON_LVB_UNDERSCORE: u16 = 0x8000;

/// Bits that are OR-ed into the current attribute instead of replacing a
/// color field.
const PASSTHROUGH: [u16; 4] = [
    FOREGROUND_INTENSITY,
    BACKGROUND_INTENSITY,
    COMMON_LVB_UNDERSCORE,
    COMMON_LVB_REVERSE_VIDEO,
];

/// Code stored for an effect in the Windows table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum W32Code {
    /// Restore the console's original attribute.
    Reset,
    /// Attribute bits to fold into the current attribute.
    Attr(u16),
}

/// Effect name → console attribute code.
pub static EFFECTS: Lazy<BTreeMap<&'static str, W32Code>> = Lazy::new(|| {
    use W32Code::{Attr, Reset};
    BTreeMap::from([
        ("none", Reset),
        ("black", Attr(0)),
        ("red", Attr(FOREGROUND_RED)),
        ("green", Attr(FOREGROUND_GREEN)),
        ("yellow", Attr(FOREGROUND_RED | FOREGROUND_GREEN)),
        ("blue", Attr(FOREGROUND_BLUE)),
        ("magenta", Attr(FOREGROUND_BLUE | FOREGROUND_RED)),
        ("cyan", Attr(FOREGROUND_BLUE | FOREGROUND_GREEN)),
        (
            "white",
            Attr(FOREGROUND_RED | FOREGROUND_GREEN | FOREGROUND_BLUE),
        ),
        ("bold", Attr(FOREGROUND_INTENSITY)),
        // Any value above 0x0f lands in the background branch; 0x100 has no
        // background bits set, so it clears them to black.
        ("black_background", Attr(0x100)),
        ("red_background", Attr(BACKGROUND_RED)),
        ("green_background", Attr(BACKGROUND_GREEN)),
        ("yellow_background", Attr(BACKGROUND_RED | BACKGROUND_GREEN)),
        ("blue_background", Attr(BACKGROUND_BLUE)),
        ("magenta_background", Attr(BACKGROUND_BLUE | BACKGROUND_RED)),
        ("purple_background", Attr(BACKGROUND_BLUE | BACKGROUND_RED)),
        ("cyan_background", Attr(BACKGROUND_BLUE | BACKGROUND_GREEN)),
        (
            "white_background",
            Attr(BACKGROUND_RED | BACKGROUND_GREEN | BACKGROUND_BLUE),
        ),
        ("bold_background", Attr(BACKGROUND_INTENSITY)),
        ("underline", Attr(COMMON_LVB_UNDERSCORE)),
        ("inverse", Attr(COMMON_LVB_REVERSE_VIDEO)),
    ])
});

/// Returns the console code for an effect name.
pub fn code(effect: &str) -> Option<W32Code> {
    EFFECTS.get(effect).copied()
}

/// Translates an ECMA-48 SGR parameter into the console code with the same
/// visible meaning, if the console can express it.
pub fn from_ecma48(sgr: u8) -> Option<W32Code> {
    ecma48::name_for_code(sgr).and_then(code)
}

/// Folds one effect code into `attr`.
///
/// Reset restores `original`, passthrough bits are OR-ed in, background
/// values replace the background field, and everything else replaces the
/// foreground color (keeping the intensity bit).
pub fn apply(code: W32Code, attr: u16, original: u16) -> u16 {
    match code {
        W32Code::Reset => original,
        W32Code::Attr(value) if PASSTHROUGH.contains(&value) => attr | value,
        W32Code::Attr(value) if value > 0x0f => (value & 0x70) | (attr & 0xff8f),
        W32Code::Attr(value) => (value & 0x07) | (attr & 0xfff8),
    }
}
