//! The `debugcolor` reports.
//!
//! Both reports run against a temporary style table and put the command's
//! own table back when they finish.

use std::io;

use console::measure_text_width;
use tincture_render::{Mode, StyleTable};

use crate::config::Config;
use crate::{StyledUi, Ui};

/// Writes the active mode followed by the colors report, or the styles
/// report when `style` is set.
pub fn debugcolor<U: Ui>(ui: &mut StyledUi<U>, config: &Config, style: bool) -> io::Result<()> {
    let mode = ui.context().mode();
    ui.write(&format!("color mode: {mode}\n"), "")?;
    if style {
        display_styles(ui)
    } else {
        display_colors(ui, config)
    }
}

/// Lists every effect name, each written in its own effect.
///
/// In terminfo mode the custom `color.*` and `terminfo.*` names are listed
/// too, under their config keys. Names containing `_` sort after the rest so
/// backgrounds are grouped together.
pub fn display_colors<U: Ui>(ui: &mut StyledUi<U>, config: &Config) -> io::Result<()> {
    let mut temp = StyleTable::new();
    for name in ui.context().effects().names() {
        temp.set(name.clone(), [name]);
    }
    if ui.context().mode() == Mode::Terminfo {
        for (key, _) in config.items("color") {
            if let Some(name) = key.strip_prefix("color.").or_else(|| key.strip_prefix("terminfo.")) {
                temp.set(key, [name]);
            }
        }
    }

    let mut entries: Vec<(String, String)> = temp
        .iter()
        .map(|(name, effects)| (name.to_string(), effects.join(" ")))
        .collect();
    entries.sort_by(|a, b| {
        (a.0.contains('_'), &a.0, &a.1).cmp(&(b.0.contains('_'), &b.0, &b.1))
    });

    ui.with_styles(temp, |ui| -> io::Result<()> {
        ui.write("available colors:\n", "")?;
        for (name, label) in &entries {
            ui.write(&format!("{name}\n"), label)?;
        }
        Ok(())
    })
}

/// Lists every style with its effects, each effect written in itself.
pub fn display_styles<U: Ui>(ui: &mut StyledUi<U>) -> io::Result<()> {
    let styles = ui.context().styles().clone();
    ui.with_styles(styles.clone(), |ui| -> io::Result<()> {
        ui.write("available style:\n", "")?;
        let width = styles.labels().map(measure_text_width).max().unwrap_or(0);
        for (label, effects) in styles.iter() {
            ui.write(label, label)?;
            if !effects.is_empty() {
                ui.write(": ", "")?;
                ui.write(&" ".repeat(width - measure_text_width(label)), "")?;
                let rendered: Vec<String> = effects.iter().map(|e| ui.label(e, e)).collect();
                ui.write(&rendered.join(", "), "")?;
            }
            ui.write("\n", "")?;
        }
        Ok(())
    })
}
