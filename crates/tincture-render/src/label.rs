//! Label resolution.
//!
//! A write carries a whitespace-separated label string such as
//! `"log.changeset changeset.secret"`. Each label is looked up in the
//! [`StyleTable`] and its effects appended, in order, to an
//! [`EffectSequence`]. A label that has no style of its own but is itself an
//! effect name (`"bold"`) contributes that effect directly. Anything else
//! contributes nothing.
//!
//! The sequence is applied left to right by the renderer, which gives two
//! rules for free:
//!
//! - the last label wins when labels conflict (`red` then `green` is green)
//! - `none` wipes out everything applied before it, across label boundaries

use std::fmt;

use crate::{EffectRegistry, StyleTable};

/// Effects resolved for one write, in application order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectSequence {
    effects: Vec<String>,
}

impl EffectSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: impl Into<String>) {
        self.effects.push(effect.into());
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.effects.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for EffectSequence {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            effects: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for EffectSequence {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.effects.extend(iter.into_iter().map(Into::into));
    }
}

impl fmt::Display for EffectSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.effects.join(" "))
    }
}

/// Resolves a label string into the effects to apply.
pub fn resolve_labels(label: &str, styles: &StyleTable, effects: &EffectRegistry) -> EffectSequence {
    let mut sequence = EffectSequence::new();
    for name in label.split_whitespace() {
        match styles.get(name) {
            Some(style) if !style.is_empty() => sequence.extend(style.iter().map(String::as_str)),
            _ if effects.is_valid(name) => sequence.push(name),
            _ => {}
        }
    }
    sequence
}

/// Renders a write for debug mode: `[label|msg]`.
///
/// A trailing newline stays outside the brackets. Unlabeled or empty text
/// is returned as is.
pub fn show_label(msg: &str, label: &str) -> String {
    if label.is_empty() || msg.is_empty() {
        return msg.to_string();
    }
    match msg.strip_suffix('\n') {
        Some(body) => format!("[{label}|{body}]\n"),
        None => format!("[{label}|{msg}]"),
    }
}
