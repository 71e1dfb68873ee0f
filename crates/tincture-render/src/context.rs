//! Per-command color state.

use crate::render::win32::Win32Renderer;
use crate::{render_lines, resolve_labels, show_label, EffectRegistry, EffectSequence, Mode, StyleTable};

/// The resolved mode, effect table, and style table for one command.
///
/// Built once after mode resolution and shared by every write.
#[derive(Debug, Default)]
pub struct ColorContext {
    mode: Mode,
    effects: EffectRegistry,
    styles: StyleTable,
}

impl ColorContext {
    pub fn new(mode: Mode, effects: EffectRegistry, styles: StyleTable) -> Self {
        Self {
            mode,
            effects,
            styles,
        }
    }

    /// A context that leaves all text untouched.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn effects(&self) -> &EffectRegistry {
        &self.effects
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// Swaps in a new style table, returning the old one.
    pub fn replace_styles(&mut self, styles: StyleTable) -> StyleTable {
        std::mem::replace(&mut self.styles, styles)
    }

    /// Resolves `label` against this context's styles and effects.
    pub fn resolve(&self, label: &str) -> EffectSequence {
        resolve_labels(label, &self.styles, &self.effects)
    }

    /// Returns `msg` decorated for `label` in the active mode.
    ///
    /// Disabled mode returns `msg` unchanged and debug mode shows the label
    /// in brackets. Otherwise each line is wrapped in the resolved effects;
    /// a label resolving to no effects leaves `msg` unchanged.
    pub fn label(&self, msg: &str, label: &str) -> String {
        match self.mode {
            Mode::Disabled => msg.to_string(),
            Mode::Debug => show_label(msg, label),
            Mode::Ansi | Mode::Terminfo | Mode::Win32 => {
                let effects = self.resolve(label);
                if effects.is_empty() {
                    return msg.to_string();
                }
                render_lines(msg, &effects, &self.effects)
            }
        }
    }

    /// The console renderer, when running in Windows mode.
    pub fn win32(&self) -> Option<&Win32Renderer> {
        match self.mode {
            Mode::Win32 => self.effects.as_win32(),
            _ => None,
        }
    }
}
