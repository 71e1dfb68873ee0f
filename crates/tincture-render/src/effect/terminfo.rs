//! Terminfo-driven effects.
//!
//! Instead of hard-coding SGR numbers, the terminfo backend asks the
//! terminal's capability database how to produce each effect. Colors go
//! through the parameterized `setaf`/`setab` capabilities with a color slot;
//! everything else names a capability directly (`bold`, `smul`, `sgr0`, ...).
//!
//! Users may add color names for extra slots (`color.pink = 207`) and raw
//! escape overrides for broken entries (`terminfo.dim = \E[2m`). Raw
//! overrides are used verbatim and never checked against the database.
//!
//! The database sits behind the [`Terminfo`] trait so every code path can be
//! exercised with [`MockTerminfo`].

use std::collections::{BTreeMap, HashMap};

use crate::ColorError;

/// How an effect is produced in terminfo mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminfoParam {
    /// A named capability, e.g. `bold` or `smul`.
    Capability(String),
    /// A color slot passed to `setaf` or `setab`.
    ColorSlot(i32),
    /// A raw escape sequence from configuration.
    Raw(Vec<u8>),
}

/// Access to a terminal capability database.
pub trait Terminfo: Send {
    /// Loads the entry for the current terminal.
    fn setup(&mut self) -> Result<(), ColorError>;

    /// Returns the string value of a capability, if the terminal defines it.
    fn capability(&self, name: &str) -> Option<Vec<u8>>;

    /// Expands a parameterized capability with a single numeric argument.
    fn expand(&self, name: &str, param: i32) -> Result<Vec<u8>, ColorError>;
}

/// Capability table for the terminfo backend.
pub struct TerminfoEffects {
    table: BTreeMap<String, TerminfoParam>,
    database: Box<dyn Terminfo>,
}

impl std::fmt::Debug for TerminfoEffects {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminfoEffects")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl TerminfoEffects {
    /// The effects every terminal is asked about before configuration is applied.
    pub fn builtin_table() -> BTreeMap<String, TerminfoParam> {
        let capabilities = [
            ("none", "sgr0"),
            ("standout", "smso"),
            ("underline", "smul"),
            ("reverse", "rev"),
            ("inverse", "rev"),
            ("blink", "blink"),
            ("dim", "dim"),
            ("bold", "bold"),
            ("invisible", "invis"),
            ("italic", "sitm"),
        ];
        let colors = [
            "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
        ];

        let mut table: BTreeMap<String, TerminfoParam> = capabilities
            .iter()
            .map(|(name, cap)| (name.to_string(), TerminfoParam::Capability(cap.to_string())))
            .collect();
        for (slot, color) in colors.iter().enumerate() {
            table.insert(color.to_string(), TerminfoParam::ColorSlot(slot as i32));
        }
        table
    }

    /// Creates the backend from a table and an already set-up database.
    pub fn new(table: BTreeMap<String, TerminfoParam>, database: Box<dyn Terminfo>) -> Self {
        Self { table, database }
    }

    pub fn table(&self) -> &BTreeMap<String, TerminfoParam> {
        &self.table
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Removes capability entries the terminal does not define.
    ///
    /// Returns the names of the missing capabilities. Raw overrides and
    /// color slots are kept.
    pub fn prune_missing(&mut self) -> Vec<String> {
        let mut missing = Vec::new();
        let database = &self.database;
        self.table.retain(|_, param| match param {
            TerminfoParam::Capability(cap) if database.capability(cap).is_none() => {
                missing.push(cap.clone());
                false
            }
            _ => true,
        });
        missing
    }

    /// True when the terminal can set both foreground and background colors.
    pub fn supports_color(&self) -> bool {
        self.database.capability("setaf").is_some() && self.database.capability("setab").is_some()
    }

    /// True if `effect`, or `effect` without its `_background` suffix, is in the table.
    pub fn is_valid(&self, effect: &str) -> bool {
        let (base, _) = super::split_background(effect);
        self.table.contains_key(effect) || self.table.contains_key(base)
    }

    /// Returns the escape sequence producing `effect`, or nothing if the
    /// effect is unknown or cannot be expanded.
    pub fn effect_bytes(&self, effect: &str) -> Vec<u8> {
        let (base, background) = super::split_background(effect);
        let Some(param) = self.table.get(base) else {
            return Vec::new();
        };
        match param {
            TerminfoParam::Raw(bytes) => bytes.clone(),
            TerminfoParam::Capability(cap) => self.database.capability(cap).unwrap_or_default(),
            TerminfoParam::ColorSlot(slot) => {
                let cap = if background { "setab" } else { "setaf" };
                self.database.expand(cap, *slot).unwrap_or_else(|err| {
                    tracing::debug!(effect, %err, "dropping effect");
                    Vec::new()
                })
            }
        }
    }

    /// The reset sequence (`sgr0`).
    pub fn reset_bytes(&self) -> Vec<u8> {
        self.effect_bytes("none")
    }
}

/// The system terminfo database, read through the `terminfo` crate.
#[cfg(feature = "terminfo")]
#[derive(Debug, Default)]
pub struct SystemTerminfo {
    database: Option<terminfo::Database>,
}

#[cfg(feature = "terminfo")]
impl SystemTerminfo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "terminfo")]
impl Terminfo for SystemTerminfo {
    fn setup(&mut self) -> Result<(), ColorError> {
        let database = terminfo::Database::from_env()
            .map_err(|e| ColorError::TerminfoUnavailable(e.to_string()))?;
        self.database = Some(database);
        Ok(())
    }

    fn capability(&self, name: &str) -> Option<Vec<u8>> {
        match self.database.as_ref()?.raw(name)? {
            terminfo::capability::Value::String(bytes) => Some(bytes.clone()),
            _ => None,
        }
    }

    fn expand(&self, name: &str, param: i32) -> Result<Vec<u8>, ColorError> {
        use terminfo::expand::{Context, Expand, Parameter};

        let template = self
            .capability(name)
            .ok_or_else(|| ColorError::MissingCapability(name.to_string()))?;
        let mut output = Vec::new();
        template
            .as_slice()
            .expand(
                &mut output,
                &[Parameter::Number(param)],
                &mut Context::default(),
            )
            .map_err(|e| ColorError::expand(name, e.to_string()))?;
        Ok(output)
    }
}

/// In-memory capability database for tests.
///
/// Parameterized capabilities support the `%p1%d` form only, which is
/// enough for the `setaf`/`setab` entries of basic terminals.
#[derive(Debug, Clone, Default)]
pub struct MockTerminfo {
    capabilities: HashMap<String, Vec<u8>>,
    fail_setup: bool,
}

impl MockTerminfo {
    /// A database with no capabilities at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// A database resembling a basic 8-color xterm entry.
    pub fn xterm() -> Self {
        Self::new()
            .with_capability("sgr0", "\x1b(B\x1b[m")
            .with_capability("smso", "\x1b[7m")
            .with_capability("smul", "\x1b[4m")
            .with_capability("rev", "\x1b[7m")
            .with_capability("blink", "\x1b[5m")
            .with_capability("dim", "\x1b[2m")
            .with_capability("bold", "\x1b[1m")
            .with_capability("invis", "\x1b[8m")
            .with_capability("setaf", "\x1b[3%p1%dm")
            .with_capability("setab", "\x1b[4%p1%dm")
    }

    /// A database whose setup always fails.
    pub fn broken() -> Self {
        Self {
            capabilities: HashMap::new(),
            fail_setup: true,
        }
    }

    pub fn with_capability(mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.capabilities.insert(name.into(), value.into());
        self
    }

    pub fn without_capability(mut self, name: &str) -> Self {
        self.capabilities.remove(name);
        self
    }
}

impl Terminfo for MockTerminfo {
    fn setup(&mut self) -> Result<(), ColorError> {
        if self.fail_setup {
            return Err(ColorError::TerminfoUnavailable(
                "unknown terminal type".to_string(),
            ));
        }
        Ok(())
    }

    fn capability(&self, name: &str) -> Option<Vec<u8>> {
        self.capabilities.get(name).cloned()
    }

    fn expand(&self, name: &str, param: i32) -> Result<Vec<u8>, ColorError> {
        let template = self
            .capabilities
            .get(name)
            .ok_or_else(|| ColorError::MissingCapability(name.to_string()))?;
        let template = String::from_utf8_lossy(template);
        Ok(template.replace("%p1%d", &param.to_string()).into_bytes())
    }
}
