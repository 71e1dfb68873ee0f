//! Command-line interface.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use crate::config::{Config, ConfigError};
use crate::debug::debugcolor;
use crate::hooks::{filter_subprocess_args, ColorHooks};
use crate::mode::{Backends, TerminalProbe};
use crate::{StyledUi, Ui};

/// Label-driven terminal colors
#[derive(Debug, Parser)]
#[command(name = "tincture")]
#[command(version)]
#[command(about = "Style labeled output for the current terminal")]
pub struct Cli {
    /// When to colorize (always, auto, never, debug, or a boolean)
    #[arg(long, global = true, value_name = "TYPE", default_value = "auto")]
    pub color: String,

    /// Read configuration from a YAML file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Set a configuration item, overriding the file
    #[arg(long = "set", global = true, value_name = "SECTION.KEY=VALUE")]
    pub overrides: Vec<String>,

    /// Behave as if output went through a pager
    #[arg(long, global = true)]
    pub pager: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show available colors, effects or styles
    Debugcolor(DebugcolorArgs),

    /// Write text with a label applied
    Label(LabelArgs),

    /// Show the arguments a git subprocess would receive
    GitArgs(GitArgs),
}

#[derive(Debug, Args)]
pub struct DebugcolorArgs {
    /// Show all configured styles instead of colors
    #[arg(long)]
    pub style: bool,
}

#[derive(Debug, Args)]
pub struct LabelArgs {
    /// Labels to apply, separated by spaces
    #[arg(short, long, default_value = "")]
    pub label: String,

    /// Write to stderr instead of stdout
    #[arg(long)]
    pub stderr: bool,

    /// Text words (joined with spaces)
    #[arg(required = true, value_name = "TEXT")]
    pub text: Vec<String>,
}

#[derive(Debug, Args)]
pub struct GitArgs {
    /// git arguments
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Loads the config file, if any, and applies `--set` overrides.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::new(),
        };
        for item in &self.overrides {
            config.set_item(item)?;
        }
        Ok(config)
    }
}

/// Runs one command, returning the styled `Ui` it wrote to.
pub fn run<U: Ui>(
    cli: &Cli,
    ui: U,
    probe: &TerminalProbe,
    backends: Backends,
) -> anyhow::Result<StyledUi<U>> {
    let config = cli.load_config().context("failed to load configuration")?;
    let hooks = ColorHooks::new(&cli.color);
    let mut ui = hooks
        .pre_command(ui, &config, probe, backends)
        .context("failed to set up color")?;

    match &cli.command {
        Commands::Debugcolor(args) => debugcolor(&mut ui, &config, args.style)?,
        Commands::Label(args) => {
            let text = format!("{}\n", args.text.join(" "));
            if args.stderr {
                ui.write_err(&text, &args.label)?;
            } else {
                ui.write(&text, &args.label)?;
            }
        }
        Commands::GitArgs(args) => {
            let mut git = args.args.clone();
            filter_subprocess_args(ui.context().mode(), &mut git);
            ui.write(&format!("{}\n", git.join(" ")), "")?;
        }
    }
    ui.flush()?;
    Ok(ui)
}
