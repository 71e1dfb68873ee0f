//! Host configuration store.
//!
//! Configuration is a set of `section.key = value` items. Keys may contain
//! dots of their own (`color.status.modified`), so a section is everything
//! before the *first* dot.
//!
//! Items keep the order they were set in, which is the order style overlays
//! and custom terminfo colors are applied.
//!
//! # YAML
//!
//! Files are a mapping of sections to mappings of keys to scalars:
//!
//! ```yaml
//! color:
//!   mode: terminfo
//!   status.modified: blue bold underline
//!   color.orange: 202
//!   terminfo.dim: "\\E[2m"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// A config value as written in YAML. Everything is stored as a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Null(()),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Str(s) => s,
            Scalar::Null(()) => String::new(),
        }
    }
}

/// Ordered `section → key → value` store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    sections: BTreeMap<String, Vec<(String, String)>>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&source)
    }

    /// Parses YAML config text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::new();
        if yaml.trim().is_empty() {
            return Ok(config);
        }

        let root: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        let sections = root
            .as_mapping()
            .ok_or_else(|| ConfigError::Invalid("config must be a mapping of sections".into()))?;

        for (section, items) in sections {
            let section = section
                .as_str()
                .ok_or_else(|| ConfigError::Invalid(format!("section name {section:?} is not a string")))?;
            let Some(items) = items.as_mapping() else {
                return Err(ConfigError::Invalid(format!(
                    "section '{section}' must be a mapping"
                )));
            };
            for (key, value) in items {
                let key = key.as_str().ok_or_else(|| {
                    ConfigError::Invalid(format!("key {key:?} in section '{section}' is not a string"))
                })?;
                let value: Scalar = serde_yaml::from_value(value.clone()).map_err(|_| {
                    ConfigError::Invalid(format!("{section}.{key} must be a scalar"))
                })?;
                config.set(section, key, value.into_string());
            }
        }
        Ok(config)
    }

    /// Parses a `section.key=value` override, as given on the command line.
    pub fn set_item(&mut self, item: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::Invalid(format!("malformed config item '{item}'"));
        let (name, value) = item.split_once('=').ok_or_else(invalid)?;
        let (section, key) = name.split_once('.').ok_or_else(invalid)?;
        if section.is_empty() || key.is_empty() {
            return Err(invalid());
        }
        self.set(section, key, value);
        Ok(())
    }

    /// Sets `section.key`, replacing an existing value in place.
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        let value = value.into();
        let items = self.sections.entry(section.to_string()).or_default();
        match items.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => items.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_or<'a>(&'a self, section: &str, key: &str, default: &'a str) -> &'a str {
        self.get(section, key).unwrap_or(default)
    }

    /// Interprets `section.key` as a boolean; unset or unparsable yields `None`.
    pub fn get_bool(&self, section: &str, key: &str) -> Option<bool> {
        self.get(section, key).and_then(parse_bool)
    }

    /// Splits `section.key` on whitespace and commas.
    pub fn list(&self, section: &str, key: &str) -> Vec<String> {
        self.get(section, key).map(split_list).unwrap_or_default()
    }

    /// All items of `section`, in the order they were set.
    pub fn items<'a>(&'a self, section: &str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.sections
            .get(section)
            .into_iter()
            .flatten()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Splits a list value on whitespace and commas, dropping empty entries.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a boolean option: `1 yes true on always` or `0 no false off never`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" | "always" => Some(true),
        "0" | "no" | "false" | "off" | "never" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_bool() {
        for v in ["1", "yes", "TRUE", "on", "Always"] {
            assert_eq!(parse_bool(v), Some(true), "{v}");
        }
        for v in ["0", "no", "false", "OFF", "never"] {
            assert_eq!(parse_bool(v), Some(false), "{v}");
        }
        assert_eq!(parse_bool("auto"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut config = Config::new();
        config.set("color", "mode", "ansi");
        config.set("color", "diff.inserted", "green");
        config.set("color", "mode", "terminfo");

        let items: Vec<_> = config.items("color").collect();
        assert_eq!(items, vec![("mode", "terminfo"), ("diff.inserted", "green")]);
    }

    #[test]
    fn test_get_or() {
        let config = Config::new();
        assert_eq!(config.get_or("color", "mode", "auto"), "auto");
        assert_eq!(config.get("color", "mode"), None);
        assert_eq!(config.items("color").count(), 0);
    }

    #[test]
    fn test_list_splits_on_commas_and_whitespace() {
        let mut config = Config::new();
        config.set("color", "status.modified", "blue, bold\tunderline,,red_background");
        assert_eq!(
            config.list("color", "status.modified"),
            ["blue", "bold", "underline", "red_background"]
        );
        assert!(config.list("color", "missing").is_empty());
    }

    #[test]
    fn test_from_yaml() {
        let config = Config::from_yaml_str(
            r#"
color:
  mode: terminfo
  status.modified: blue bold
  color.orange: 202
  changeset.secret:
  pager: false
"#,
        )
        .unwrap();

        assert_eq!(config.get("color", "mode"), Some("terminfo"));
        assert_eq!(config.get("color", "status.modified"), Some("blue bold"));
        assert_eq!(config.get("color", "color.orange"), Some("202"));
        assert_eq!(config.get("color", "changeset.secret"), Some(""));
        assert_eq!(config.get_bool("color", "pager"), Some(false));

        let keys: Vec<_> = config.items("color").map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            ["mode", "status.modified", "color.orange", "changeset.secret", "pager"]
        );
    }

    #[test]
    fn test_from_yaml_rejects_nested_values() {
        let err = Config::from_yaml_str("color:\n  mode: [a, b]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Config::from_yaml_str("- a\n- b\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_from_yaml_syntax_error() {
        let err = Config::from_yaml_str("color: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_empty_yaml() {
        assert_eq!(Config::from_yaml_str("  \n").unwrap(), Config::new());
    }

    #[test]
    fn test_set_item() {
        let mut config = Config::new();
        config.set_item("color.status.added=green bold").unwrap();
        config.set_item("color.mode=").unwrap();
        assert_eq!(config.get("color", "status.added"), Some("green bold"));
        assert_eq!(config.get("color", "mode"), Some(""));

        assert!(config.set_item("color").is_err());
        assert!(config.set_item("nosection=1").is_err());
        assert!(config.set_item(".key=1").is_err());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "color:\n  mode: ansi").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.get("color", "mode"), Some("ansi"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("nope.yaml"));
    }
}
