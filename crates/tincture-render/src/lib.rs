//! # Tincture Render - Label-Driven Terminal Effects
//!
//! `tincture-render` turns output fragments tagged with semantic labels
//! (`diff.inserted`, `status.modified`, ...) into terminal bytes. It knows
//! nothing about where configuration comes from or how the active mode was
//! chosen; the `tincture` crate does that and hands a finished
//! [`ColorContext`] to every write.
//!
//! ## Core Concepts
//!
//! - [`EffectRegistry`]: effect names (`red`, `bold`, `blue_background`, ...)
//!   and their backend codes: ECMA-48 SGR numbers, terminfo capabilities, or
//!   Windows console attribute bits.
//! - [`StyleTable`]: label → ordered list of effect names.
//! - [`EffectSequence`]: the effects resolved for one write, applied in order.
//!   Later effects override earlier ones and `none` resets everything before it.
//! - [`Mode`]: the active backend for this invocation.
//! - [`ColorContext`]: the three above bundled, created once per command.
//!
//! ## Quick Start
//!
//! ```rust
//! use tincture_render::{ColorContext, EffectRegistry, Mode, StyleTable};
//!
//! let mut styles = StyleTable::new();
//! styles.set_str("status.modified", "blue bold underline red_background");
//!
//! let ctx = ColorContext::new(Mode::Ansi, EffectRegistry::Ecma48, styles);
//! let out = ctx.label("M src/lib.rs", "status.modified");
//! assert_eq!(out, "\x1b[0;34;1;4;41mM src/lib.rs\x1b[0m");
//! ```
//!
//! ## Debug Mode
//!
//! In [`Mode::Debug`] no escape codes are produced; labels become visible:
//!
//! ```rust
//! use tincture_render::{ColorContext, EffectRegistry, Mode, StyleTable};
//!
//! let ctx = ColorContext::new(Mode::Debug, EffectRegistry::Ecma48, StyleTable::defaults());
//! assert_eq!(
//!     ctx.label("22611:6f0a53c8f587", "log.changeset"),
//!     "[log.changeset|22611:6f0a53c8f587]"
//! );
//! ```

pub mod context;
pub mod effect;
mod error;
pub mod label;
mod mode;
pub mod render;
pub mod style;

pub use context::ColorContext;
pub use effect::{EffectRegistry, TerminfoEffects, TerminfoParam};
pub use error::ColorError;
pub use label::{resolve_labels, show_label, EffectSequence};
pub use mode::Mode;
pub use render::win32::{Console, MockConsole, Win32Renderer};
pub use render::{render_effects, render_lines};
pub use style::StyleTable;

pub use effect::terminfo::{MockTerminfo, Terminfo};

#[cfg(feature = "terminfo")]
pub use effect::terminfo::SystemTerminfo;
