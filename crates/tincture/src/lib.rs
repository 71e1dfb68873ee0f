//! # Tincture - Label-Driven Output Coloring
//!
//! `tincture` decides, once per command, whether and how a host tool's output
//! is colored, then styles every labeled write accordingly. Rendering lives
//! in [`tincture_render`]; this crate supplies everything around it:
//!
//! - [`Config`]: `section.key = value` settings, loadable from YAML
//! - [`TerminalProbe`] and [`Backends`]: what the terminal can do
//! - [`resolve_mode`]: picks the backend from `--color`, `color.mode` and the probes
//! - [`Ui`], [`PlainUi`], [`StyledUi`]: the host output channel and its styling decorator
//! - [`ColorHooks`] and [`filter_subprocess_args`]: host integration points
//! - [`debugcolor`]: lists effects and styles
//!
//! ## Quick Start
//!
//! ```rust
//! use tincture::{Backends, ColorHooks, Config, PlainUi, TerminalProbe, Ui};
//!
//! let mut config = Config::new();
//! config.set("color", "status.modified", "blue bold");
//!
//! let plain: PlainUi<Vec<u8>, Vec<u8>> = PlainUi::new(Vec::new(), Vec::new());
//! let mut ui = ColorHooks::new("always")
//!     .pre_command(plain, &config, &TerminalProbe::default(), Backends::none())
//!     .unwrap();
//! ui.write("M README\n", "status.modified").unwrap();
//!
//! let (out, _) = ui.into_inner().into_parts();
//! assert_eq!(out, b"\x1b[0;34;1mM README\x1b[0m\n");
//! ```
//!
//! ## Configuration Keys
//!
//! | Key                           | Meaning                                        |
//! |-------------------------------|------------------------------------------------|
//! | `color.mode`                  | `auto`, `ansi`, `terminfo`, `win32`            |
//! | `color.pagermode`             | overrides `color.mode` while paging            |
//! | `color.<label>`               | effects for a label; empty for none            |
//! | `color.color.<name>`          | custom terminfo color slot                     |
//! | `color.terminfo.<name>`       | raw escape override, `\E` for ESC              |

pub mod cli;
pub mod config;
mod debug;
pub mod env;
mod hooks;
mod mode;
mod setup;
mod ui;

pub use config::{parse_bool, Config, ConfigError};
pub use debug::{debugcolor, display_colors, display_styles};
pub use hooks::{filter_subprocess_args, ColorHooks};
pub use mode::{resolve_mode, Backends, Resolution, TerminalProbe};
pub use setup::{configure_styles, setup_color, setup_terminfo};
pub use ui::{PlainUi, StyledUi, Ui};
