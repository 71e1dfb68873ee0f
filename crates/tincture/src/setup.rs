//! Per-command color setup: terminfo initialization, style configuration
//! and the entry point tying them to mode resolution.

use std::io;

use tincture_render::{ColorContext, EffectRegistry, StyleTable, Terminfo, TerminfoEffects, TerminfoParam};

use crate::config::{split_list, Config};
use crate::mode::{resolve_mode, Backends, TerminalProbe};
use crate::Ui;

/// Builds the terminfo effect table.
///
/// The builtin capabilities are overlaid with `color.color.<name> = <slot>`
/// custom colors and `color.terminfo.<name> = <raw>` overrides, where `\E`
/// stands for ESC. Entries the terminal cannot produce are dropped.
///
/// Returns `None` when there is no database, it fails to load, or the
/// terminal cannot set colors. The last case warns when `explicit` is set.
pub fn setup_terminfo(
    config: &Config,
    database: Option<Box<dyn Terminfo>>,
    explicit: bool,
    ui: &mut dyn Ui,
) -> io::Result<Option<TerminfoEffects>> {
    let Some(mut database) = database else {
        tracing::debug!("no terminfo database available");
        return Ok(None);
    };

    let mut table = TerminfoEffects::builtin_table();
    for (key, value) in config.items("color") {
        if let Some(name) = key.strip_prefix("color.") {
            match value.trim().parse() {
                Ok(slot) => {
                    table.insert(name.to_string(), TerminfoParam::ColorSlot(slot));
                }
                Err(err) => tracing::debug!(key, value, %err, "ignoring custom color"),
            }
        } else if let Some(name) = key.strip_prefix("terminfo.") {
            let raw = value.replace("\\E", "\x1b");
            table.insert(name.to_string(), TerminfoParam::Raw(raw.into_bytes()));
        }
    }

    if let Err(err) = database.setup() {
        tracing::debug!(%err, "terminfo setup failed");
        return Ok(None);
    }

    let mut effects = TerminfoEffects::new(table, database);
    for capability in effects.prune_missing() {
        tracing::debug!("no terminfo entry for {capability}");
    }

    if !effects.supports_color() {
        if explicit {
            ui.warn("no terminfo entry for setab/setaf: reverting to ECMA-48 color\n")?;
        }
        return Ok(None);
    }
    Ok(Some(effects))
}

/// Builds the style table: compiled-in defaults overlaid with every
/// `color.<label> = <effects>` item.
///
/// Items whose key has no dot, or that define custom colors, are not
/// styles. Effects the active backend cannot render are dropped with a
/// warning; an empty value leaves the label with no effects.
pub fn configure_styles(
    config: &Config,
    effects: &EffectRegistry,
    ui: &mut dyn Ui,
) -> io::Result<StyleTable> {
    let mut styles = StyleTable::defaults();
    for (label, value) in config.items("color") {
        if !label.contains('.') || label.starts_with("color.") || label.starts_with("terminfo.") {
            continue;
        }
        let mut valid = Vec::new();
        for effect in split_list(value) {
            if effects.is_valid(&effect) {
                valid.push(effect);
            } else {
                ui.warn(&format!(
                    "ignoring unknown color/effect '{effect}' (configured in color.{label})\n"
                ))?;
            }
        }
        styles.set(label, valid);
    }
    Ok(styles)
}

/// Resolves the mode for one command and builds its [`ColorContext`].
///
/// Plain mode skips everything and yields a disabled context.
pub fn setup_color(
    option: &str,
    config: &Config,
    probe: &TerminalProbe,
    backends: Backends,
    ui: &mut dyn Ui,
) -> io::Result<ColorContext> {
    if probe.plain {
        tracing::debug!("plain mode, color disabled");
        return Ok(ColorContext::disabled());
    }

    let resolution = resolve_mode(option, config, probe, backends, ui)?;
    if !resolution.mode.is_active() {
        return Ok(ColorContext::disabled());
    }
    let styles = configure_styles(config, &resolution.effects, ui)?;
    Ok(ColorContext::new(resolution.mode, resolution.effects, styles))
}
