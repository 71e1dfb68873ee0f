//! The style table: which effects each label gets.
//!
//! A style is an ordered list of effect names bound to a label. Order
//! matters: effects are applied left to right, so `red bold none green`
//! ends up plain green.
//!
//! The table starts from [`StyleTable::defaults`] and is overlaid with user
//! configuration once per command. An empty style means "no effects of my
//! own", letting the surrounding text's style show through; a style of
//! `none` actively resets.

use std::collections::BTreeMap;

/// Compiled-in styles for the labels the host emits.
const DEFAULT_STYLES: &[(&str, &str)] = &[
    ("grep.match", "red bold"),
    ("grep.linenumber", "green"),
    ("grep.rev", "green"),
    ("grep.change", "green"),
    ("grep.sep", "cyan"),
    ("grep.filename", "magenta"),
    ("grep.user", "magenta"),
    ("grep.date", "magenta"),
    ("bookmarks.active", "green"),
    ("branches.active", "none"),
    ("branches.closed", "black bold"),
    ("branches.current", "green"),
    ("branches.inactive", "none"),
    ("diff.changed", "white"),
    ("diff.deleted", "red"),
    ("diff.diffline", "bold"),
    ("diff.extended", "cyan bold"),
    ("diff.file_a", "red bold"),
    ("diff.file_b", "green bold"),
    ("diff.hunk", "magenta"),
    ("diff.inserted", "green"),
    ("diff.tab", ""),
    ("diff.trailingwhitespace", "bold red_background"),
    ("changeset.public", ""),
    ("changeset.draft", ""),
    ("changeset.secret", ""),
    ("diffstat.deleted", "red"),
    ("diffstat.inserted", "green"),
    ("histedit.remaining", "red bold"),
    ("ui.prompt", "yellow"),
    ("log.changeset", "yellow"),
    ("patchbomb.finalsummary", ""),
    ("patchbomb.from", "magenta"),
    ("patchbomb.to", "cyan"),
    ("patchbomb.subject", "green"),
    ("patchbomb.diffstats", ""),
    ("rebase.rebased", "blue"),
    ("rebase.remaining", "red bold"),
    ("resolve.resolved", "green bold"),
    ("resolve.unresolved", "red bold"),
    ("shelve.age", "cyan"),
    ("shelve.newest", "green bold"),
    ("shelve.name", "blue bold"),
    ("status.added", "green bold"),
    ("status.clean", "none"),
    ("status.copied", "none"),
    ("status.deleted", "cyan bold underline"),
    ("status.ignored", "black bold"),
    ("status.modified", "blue bold"),
    ("status.removed", "red bold"),
    ("status.unknown", "magenta bold underline"),
    ("tags.normal", "green"),
    ("tags.local", "black bold"),
];

/// Label → ordered effect names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleTable {
    styles: BTreeMap<String, Vec<String>>,
}

impl StyleTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table holding the compiled-in styles.
    pub fn defaults() -> Self {
        let mut table = Self::new();
        for &(label, effects) in DEFAULT_STYLES {
            table.set_str(label, effects);
        }
        table
    }

    /// Returns the effects bound to `label`, or `None` if the label is unstyled.
    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.styles.get(label).map(Vec::as_slice)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.styles.contains_key(label)
    }

    /// Binds `label` to `effects`, replacing any previous style.
    pub fn set<I, S>(&mut self, label: impl Into<String>, effects: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.styles
            .insert(label.into(), effects.into_iter().map(Into::into).collect());
    }

    /// Binds `label` to a whitespace-separated effect list.
    pub fn set_str(&mut self, label: impl Into<String>, effects: &str) {
        self.set(label, effects.split_whitespace());
    }

    pub fn remove(&mut self, label: &str) -> Option<Vec<String>> {
        self.styles.remove(label)
    }

    /// Iterates over styles in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.styles
            .iter()
            .map(|(label, effects)| (label.as_str(), effects.as_slice()))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
