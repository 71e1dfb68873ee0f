//! ECMA-48 Select Graphic Rendition codes.
//!
//! This is the default table and the one every other backend falls back to.
//! Codes are joined with `;` inside a single `ESC[...m` sequence.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

/// Reset all attributes to default.
pub const RESET: &str = "\x1b[0m";

/// Effect name → SGR parameter.
pub static EFFECTS: Lazy<BTreeMap<&'static str, u8>> = Lazy::new(|| {
    BTreeMap::from([
        ("none", 0),
        ("bold", 1),
        ("dim", 2),
        ("italic", 3),
        ("underline", 4),
        ("blink", 5),
        ("inverse", 7),
        ("standout", 7),
        ("invisible", 8),
        ("black", 30),
        ("red", 31),
        ("green", 32),
        ("yellow", 33),
        ("blue", 34),
        ("magenta", 35),
        ("cyan", 36),
        ("white", 37),
        ("black_background", 40),
        ("red_background", 41),
        ("green_background", 42),
        ("yellow_background", 43),
        ("blue_background", 44),
        ("magenta_background", 45),
        ("purple_background", 45),
        ("cyan_background", 46),
        ("white_background", 47),
    ])
});

/// Returns the SGR parameter for an effect name.
pub fn code(effect: &str) -> Option<u8> {
    EFFECTS.get(effect).copied()
}

/// Returns the first effect name (alphabetically) carrying this SGR parameter.
pub fn name_for_code(code: u8) -> Option<&'static str> {
    EFFECTS
        .iter()
        .find(|(_, value)| **value == code)
        .map(|(name, _)| *name)
}

/// Builds the `ESC[...m` sequence for a run of effects, skipping names
/// this table does not know.
pub fn sequence<'a>(effects: impl IntoIterator<Item = &'a str>) -> String {
    let codes: Vec<String> = effects
        .into_iter()
        .filter_map(code)
        .map(|c| c.to_string())
        .collect();
    format!("\x1b[{}m", codes.join(";"))
}
