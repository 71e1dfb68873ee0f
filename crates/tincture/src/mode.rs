//! Mode resolution.
//!
//! Runs once per command and decides which backend, if any, styles output.
//! The inputs are the `--color` option, the `color.mode` and
//! `color.pagermode` settings, and what the terminal looks like:
//!
//! | `--color`        | Result                                            |
//! |------------------|---------------------------------------------------|
//! | `debug`          | [`Mode::Debug`], unconditionally                  |
//! | `never`, `0`,... | [`Mode::Disabled`]                                |
//! | `always`, `1`,...| the configured backend                            |
//! | `auto`           | the configured backend if the terminal is formatted |
//! | anything else    | [`Mode::Disabled`]                                |
//!
//! A configured backend that cannot be used degrades: `terminfo` falls back
//! to `ansi`, `win32` disables color. A warning is printed only when the
//! backend was asked for explicitly and output goes to a terminal.

use std::io;

use tincture_render::render::win32::system_console;
use tincture_render::{Console, EffectRegistry, Mode, Terminfo, Win32Renderer};

use crate::config::{parse_bool, Config};
use crate::env::EnvReader;
use crate::setup::setup_terminfo;
use crate::Ui;

/// What the host knows about its terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminalProbe {
    /// Value of `TERM`.
    pub term: Option<String>,
    /// True when output goes to an interactive terminal.
    pub formatted: bool,
    /// True when output goes through a pager.
    pub pager_active: bool,
    /// True on Windows hosts.
    pub windows: bool,
    /// True when plain output was requested, which skips styling entirely.
    pub plain: bool,
}

impl TerminalProbe {
    /// Probes stdout and the environment.
    ///
    /// Plain mode is on when `TINCTURE_PLAIN` is set, unless
    /// `TINCTURE_PLAINEXCEPT` lists `color`.
    pub fn detect(env: &dyn EnvReader, pager_active: bool) -> Self {
        let excepted = env
            .var("TINCTURE_PLAINEXCEPT")
            .is_some_and(|v| v.split(',').any(|f| f.trim() == "color"));
        Self {
            term: env.var("TERM"),
            formatted: console::Term::stdout().is_term(),
            pager_active,
            windows: cfg!(windows),
            plain: env.var("TINCTURE_PLAIN").is_some() && !excepted,
        }
    }

    fn term_contains(&self, needle: &str) -> bool {
        self.term.as_deref().is_some_and(|t| t.contains(needle))
    }
}

/// Backends that may be available on this host.
#[derive(Default)]
pub struct Backends {
    pub terminfo: Option<Box<dyn Terminfo>>,
    pub console: Option<Box<dyn Console>>,
}

impl std::fmt::Debug for Backends {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backends")
            .field("terminfo", &self.terminfo.is_some())
            .field("console", &self.console.is_some())
            .finish()
    }
}

impl Backends {
    /// No terminfo database and no console.
    pub fn none() -> Self {
        Self::default()
    }

    /// The system terminfo database (when built with it) and the console
    /// attached to stdout, if any.
    pub fn detect() -> Self {
        #[cfg(feature = "terminfo")]
        let terminfo: Option<Box<dyn Terminfo>> =
            Some(Box::new(tincture_render::SystemTerminfo::new()));
        #[cfg(not(feature = "terminfo"))]
        let terminfo: Option<Box<dyn Terminfo>> = None;

        Self {
            terminfo,
            console: system_console(),
        }
    }

    pub fn with_terminfo(mut self, database: impl Terminfo + 'static) -> Self {
        self.terminfo = Some(Box::new(database));
        self
    }

    pub fn with_console(mut self, console: impl Console + 'static) -> Self {
        self.console = Some(Box::new(console));
        self
    }
}

/// The outcome of mode resolution.
#[derive(Debug, Default)]
pub struct Resolution {
    pub mode: Mode,
    pub effects: EffectRegistry,
}

impl Resolution {
    fn new(mode: Mode, effects: EffectRegistry) -> Self {
        Self { mode, effects }
    }

    fn disabled() -> Self {
        Self::default()
    }
}

fn win32_renderer(console: Option<Box<dyn Console>>) -> Option<Win32Renderer> {
    Win32Renderer::new(console?)
        .map_err(|err| tracing::debug!(%err, "console unavailable"))
        .ok()
}

/// Picks the mode for this command and initializes its backend.
///
/// Only writing a warning can fail.
pub fn resolve_mode(
    option: &str,
    config: &Config,
    probe: &TerminalProbe,
    backends: Backends,
    ui: &mut dyn Ui,
) -> io::Result<Resolution> {
    if option == "debug" {
        return Ok(Resolution::new(Mode::Debug, EffectRegistry::Ecma48));
    }

    let auto = option == "auto";
    let always = !auto && parse_bool(option) == Some(true);
    if !always && !auto {
        tracing::debug!(option, "color disabled by option");
        return Ok(Resolution::disabled());
    }

    let formatted = always || (probe.term.as_deref() != Some("dumb") && probe.formatted);

    let mut mode = config.get_or("color", "mode", "auto");
    if probe.pager_active {
        mode = config.get_or("color", "pagermode", mode);
    }

    let explicit = mode != "auto";
    let mode_failed = |ui: &mut dyn Ui| {
        if explicit && probe.formatted {
            ui.warn(&format!("warning: failed to set color mode to {mode}\n"))
        } else {
            Ok(())
        }
    };

    let Backends { terminfo, console } = backends;
    let resolution = match mode {
        "auto" if probe.windows && !probe.term_contains("xterm") => match win32_renderer(console) {
            Some(renderer) => Resolution::new(Mode::Win32, EffectRegistry::Win32(renderer)),
            None => Resolution::new(Mode::Ansi, EffectRegistry::Ecma48),
        },
        "auto" | "ansi" => Resolution::new(Mode::Ansi, EffectRegistry::Ecma48),
        "win32" => match win32_renderer(console) {
            Some(renderer) => Resolution::new(Mode::Win32, EffectRegistry::Win32(renderer)),
            None => {
                mode_failed(ui)?;
                return Ok(Resolution::disabled());
            }
        },
        "terminfo" => match setup_terminfo(config, terminfo, explicit, ui)? {
            Some(effects) => Resolution::new(Mode::Terminfo, EffectRegistry::Terminfo(effects)),
            None => {
                mode_failed(ui)?;
                Resolution::new(Mode::Ansi, EffectRegistry::Ecma48)
            }
        },
        other => {
            tracing::debug!(mode = other, "unknown color mode");
            return Ok(Resolution::disabled());
        }
    };

    if always || (auto && formatted) {
        tracing::debug!(mode = %resolution.mode, "color mode resolved");
        Ok(resolution)
    } else {
        tracing::debug!(mode = %resolution.mode, "terminal not formatted, color disabled");
        Ok(Resolution::disabled())
    }
}
