//! Turning effect sequences into terminal bytes.
//!
//! For the ECMA-48 and terminfo backends a styled fragment is
//! `start + text + stop`, where `start` applies `none` followed by every
//! requested effect and `stop` applies `none` again. Starting from `none`
//! gives each fragment a clean baseline; ending with it keeps effects from
//! bleeding into whatever is written next.
//!
//! Multi-line text is wrapped line by line, so no line depends on state set
//! by a previous one.
//!
//! The Windows console has no in-band codes at all; see [`win32`].

pub mod win32;

use std::iter;

use crate::effect::ecma48;
use crate::{EffectRegistry, EffectSequence};

/// The sequences wrapped around a styled fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Wrap {
    start: String,
    stop: String,
}

impl Wrap {
    fn new(effects: &EffectSequence, registry: &EffectRegistry) -> Self {
        let applied = iter::once("none").chain(effects.iter());
        match registry.as_terminfo() {
            Some(table) => {
                let start: Vec<u8> = applied.flat_map(|e| table.effect_bytes(e)).collect();
                Self {
                    start: String::from_utf8_lossy(&start).into_owned(),
                    stop: String::from_utf8_lossy(&table.reset_bytes()).into_owned(),
                }
            }
            None => Self {
                start: ecma48::sequence(applied),
                stop: ecma48::RESET.to_string(),
            },
        }
    }

    fn apply(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        format!("{}{}{}", self.start, text, self.stop)
    }
}

/// Wraps `text` in the start and stop sequences for `effects`.
///
/// Empty text is returned unchanged.
///
/// # Example
///
/// ```rust
/// use tincture_render::{render_effects, EffectRegistry, EffectSequence};
///
/// let effects: EffectSequence = ["green", "bold"].into_iter().collect();
/// let out = render_effects("added", &effects, &EffectRegistry::Ecma48);
/// assert_eq!(out, "\x1b[0;32;1madded\x1b[0m");
/// ```
pub fn render_effects(text: &str, effects: &EffectSequence, registry: &EffectRegistry) -> String {
    Wrap::new(effects, registry).apply(text)
}

/// Like [`render_effects`], but wraps each line of `text` on its own.
pub fn render_lines(text: &str, effects: &EffectSequence, registry: &EffectRegistry) -> String {
    if text.is_empty() {
        return String::new();
    }
    let wrap = Wrap::new(effects, registry);
    text.split('\n')
        .map(|line| wrap.apply(line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MockTerminfo, TerminfoEffects};

    fn sequence(effects: &str) -> EffectSequence {
        effects.split_whitespace().collect()
    }

    fn terminfo() -> EffectRegistry {
        EffectRegistry::Terminfo(TerminfoEffects::new(
            TerminfoEffects::builtin_table(),
            Box::new(MockTerminfo::xterm()),
        ))
    }

    #[test]
    fn test_ecma48_status_modified() {
        let out = render_effects(
            "M README",
            &sequence("blue bold underline red_background"),
            &EffectRegistry::Ecma48,
        );
        assert_eq!(out, "\x1b[0;34;1;4;41mM README\x1b[0m");
    }

    #[test]
    fn test_empty_text_unchanged() {
        let effects = sequence("red bold");
        assert_eq!(render_effects("", &effects, &EffectRegistry::Ecma48), "");
        assert_eq!(render_effects("", &effects, &terminfo()), "");
        assert_eq!(render_lines("", &effects, &EffectRegistry::Ecma48), "");
    }

    #[test]
    fn test_none_in_sequence_is_emitted_in_place() {
        let out = render_effects("x", &sequence("red none green"), &EffectRegistry::Ecma48);
        assert_eq!(out, "\x1b[0;31;0;32mx\x1b[0m");
    }

    #[test]
    fn test_lines_wrapped_independently() {
        let out = render_lines("one\ntwo\n", &sequence("green"), &EffectRegistry::Ecma48);
        assert_eq!(out, "\x1b[0;32mone\x1b[0m\n\x1b[0;32mtwo\x1b[0m\n");
    }

    #[test]
    fn test_terminfo_sequences() {
        let out = render_effects("x", &sequence("red underline"), &terminfo());
        assert_eq!(out, "\x1b(B\x1b[m\x1b[31m\x1b[4mx\x1b(B\x1b[m");
    }

    #[test]
    fn test_terminfo_skips_unknown_effects() {
        let out = render_effects("x", &sequence("sparkly bold"), &terminfo());
        assert_eq!(out, "\x1b(B\x1b[m\x1b[1mx\x1b(B\x1b[m");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn every_line_is_reset(text in "[a-z \n]{0,40}") {
            let effects: EffectSequence = ["red", "bold"].into_iter().collect();
            let out = render_lines(&text, &effects, &EffectRegistry::Ecma48);
            for line in out.split('\n') {
                prop_assert!(line.is_empty() || line.ends_with(ecma48::RESET));
            }
            prop_assert_eq!(console::strip_ansi_codes(&out).into_owned(), text);
        }
    }
}
