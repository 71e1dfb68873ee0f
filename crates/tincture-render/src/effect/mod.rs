//! Effect names and their backend codes.
//!
//! An effect is one atomic visual attribute: a color, a background color, or
//! a text decoration. Each backend spells effects differently:
//!
//! | Backend  | Table                     | Example (`red`)          |
//! |----------|---------------------------|--------------------------|
//! | ECMA-48  | [`ecma48::EFFECTS`]       | SGR `31`                 |
//! | terminfo | [`TerminfoEffects`]       | `setaf` with slot 1      |
//! | Windows  | [`win32::EFFECTS`]        | `FOREGROUND_RED` (0x04)  |
//!
//! [`EffectRegistry`] holds whichever one mode resolution installed. The
//! effect `none` exists in every table and always resets all effects.

pub mod ecma48;
pub mod terminfo;
pub mod win32;

use std::collections::BTreeSet;

use crate::render::win32::Win32Renderer;

pub use terminfo::{TerminfoEffects, TerminfoParam};

const BACKGROUND_SUFFIX: &str = "_background";

/// Splits `red_background` into (`red`, true); other names pass through.
pub fn split_background(effect: &str) -> (&str, bool) {
    match effect.strip_suffix(BACKGROUND_SUFFIX) {
        Some(base) => (base, true),
        None => (effect, false),
    }
}

/// The effect table installed by mode resolution.
#[derive(Debug, Default)]
pub enum EffectRegistry {
    /// Numeric SGR codes. Used by ANSI mode, and by debug or disabled mode
    /// where codes are never emitted.
    #[default]
    Ecma48,
    /// Capability lookups in the terminal's terminfo entry.
    Terminfo(TerminfoEffects),
    /// Windows console attribute bits, with the console they are applied to.
    Win32(Win32Renderer),
}

impl EffectRegistry {
    /// Returns true if `effect` can be rendered by this backend.
    ///
    /// In Windows mode both the console table and the ECMA-48 table count,
    /// since buffered output is rendered as ECMA-48 and translated when it
    /// reaches the console.
    pub fn is_valid(&self, effect: &str) -> bool {
        match self {
            EffectRegistry::Ecma48 => ecma48::code(effect).is_some(),
            EffectRegistry::Terminfo(table) => table.is_valid(effect),
            EffectRegistry::Win32(_) => {
                ecma48::code(effect).is_some() || win32::code(effect).is_some()
            }
        }
    }

    /// All effect names this backend knows about, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: BTreeSet<&str> = ecma48::EFFECTS.keys().copied().collect();
        if let EffectRegistry::Win32(_) = self {
            names.extend(win32::EFFECTS.keys().copied());
        }
        names.into_iter().map(str::to_string).collect()
    }

    pub fn as_terminfo(&self) -> Option<&TerminfoEffects> {
        match self {
            EffectRegistry::Terminfo(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_win32(&self) -> Option<&Win32Renderer> {
        match self {
            EffectRegistry::Win32(renderer) => Some(renderer),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::win32::MockConsole;
    use crate::MockTerminfo;

    #[test]
    fn test_split_background() {
        assert_eq!(split_background("red_background"), ("red", true));
        assert_eq!(split_background("bold"), ("bold", false));
    }

    #[test]
    fn test_none_valid_everywhere() {
        let terminfo = EffectRegistry::Terminfo(TerminfoEffects::new(
            TerminfoEffects::builtin_table(),
            Box::new(MockTerminfo::xterm()),
        ));
        let win32 = EffectRegistry::Win32(Win32Renderer::new(Box::new(MockConsole::new(0x07))).unwrap());
        for registry in [EffectRegistry::Ecma48, terminfo, win32] {
            assert!(registry.is_valid("none"), "{registry:?}");
        }
    }

    #[test]
    fn test_win32_accepts_both_tables() {
        let registry = EffectRegistry::Win32(Win32Renderer::new(Box::new(MockConsole::new(0x07))).unwrap());
        assert!(registry.is_valid("bold_background"));
        assert!(registry.is_valid("italic"));
        assert!(!EffectRegistry::Ecma48.is_valid("bold_background"));
    }

    #[test]
    fn test_names_are_sorted_and_merged() {
        let names = EffectRegistry::Ecma48.names();
        assert!(names.windows(2).all(|w| w[0] < w[1]));
        assert!(!names.contains(&"bold_background".to_string()));

        let registry = EffectRegistry::Win32(Win32Renderer::new(Box::new(MockConsole::new(0x07))).unwrap());
        assert!(registry.names().contains(&"bold_background".to_string()));
    }
}
