//! Host integration points.
//!
//! Styling plugs into a host at two places:
//!
//! ```text
//! parsed CLI args
//!   → PRE-COMMAND HOOK ← (resolve mode, wrap the Ui)
//!   → command runs, writing through the styled Ui
//!       → SUBPROCESS FILTER ← (forward color to child tools)
//! ```

use std::io;

use tincture_render::Mode;

use crate::config::Config;
use crate::mode::{Backends, TerminalProbe};
use crate::setup::setup_color;
use crate::{StyledUi, Ui};

/// Color hooks for one command invocation.
#[derive(Debug, Clone)]
pub struct ColorHooks {
    option: String,
}

impl ColorHooks {
    /// Creates hooks for the value of the `--color` option.
    pub fn new(option: impl Into<String>) -> Self {
        Self {
            option: option.into(),
        }
    }

    pub fn option(&self) -> &str {
        &self.option
    }

    /// Resolves the mode and wraps `ui` in a styling decorator.
    ///
    /// Warnings raised during resolution go to `ui` before it is wrapped.
    pub fn pre_command<U: Ui>(
        &self,
        mut ui: U,
        config: &Config,
        probe: &TerminalProbe,
        backends: Backends,
    ) -> io::Result<StyledUi<U>> {
        let ctx = setup_color(&self.option, config, probe, backends, &mut ui)?;
        Ok(StyledUi::new(ui, ctx))
    }
}

/// Adjusts the arguments of a `git` subprocess so its diff output keeps
/// color when ours is active.
///
/// `--color` goes right after `diff`, since trailing arguments are paths.
pub fn filter_subprocess_args(mode: Mode, args: &mut Vec<String>) {
    if mode.is_active() && args.first().is_some_and(|a| a == "diff") {
        args.insert(1, "--color".to_string());
    }
}
