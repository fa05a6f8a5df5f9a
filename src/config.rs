//! Runtime configuration (tayozanx.yaml).
//!
//! Every field is optional; a missing file or an empty file yields the
//! defaults:
//!
//! ```yaml
//! aliases:
//!   print: show
//!   let: set
//! extensions: [".tzx", ".tasx"]
//! strict: false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;

/// Name of the config file looked up next to scripts.
pub const CONFIG_FILE: &str = "tayozanx.yaml";

/// Source file suffixes accepted by default.
pub const DEFAULT_EXTENSIONS: [&str; 2] = [".tzx", ".tasx"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Keyword rewrites applied before parsing: old keyword -> canonical keyword.
    pub aliases: IndexMap<String, String>,
    /// Accepted script file suffixes.
    pub extensions: Vec<String>,
    /// Reject unrecognized lines instead of skipping them.
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        let mut aliases = IndexMap::new();
        aliases.insert("print".to_string(), "show".to_string());
        aliases.insert("let".to_string(), "set".to_string());

        Self {
            aliases,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            strict: false,
        }
    }
}

impl Config {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate YAML config content.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Find tayozanx.yaml in the given directory or its parents.
    pub fn discover(start: &Path) -> Option<PathBuf> {
        let mut current = Some(start);
        while let Some(dir) = current {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }
            current = dir.parent();
        }
        None
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (from, to) in &self.aliases {
            if !is_word(from) || !is_word(to) {
                return Err(ConfigError::InvalidAlias {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
        }
        for ext in &self.extensions {
            if !ext.starts_with('.') || ext.len() < 2 {
                return Err(ConfigError::InvalidExtension(ext.clone()));
            }
        }
        Ok(())
    }

    /// Check a script path against the accepted suffixes.
    pub fn has_valid_extension(&self, path: &Path) -> bool {
        let name = path.to_string_lossy();
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }
}

fn is_word(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.aliases.get("print").map(String::as_str), Some("show"));
        assert_eq!(config.aliases.get("let").map(String::as_str), Some("set"));
        assert!(!config.strict);
        assert!(config.has_valid_extension(Path::new("game.tzx")));
        assert!(config.has_valid_extension(Path::new("dir/game.tasx")));
        assert!(!config.has_valid_extension(Path::new("game.py")));
        assert!(!config.has_valid_extension(Path::new("tzx")));
    }

    #[test]
    fn test_parse_partial_config() {
        let config = Config::parse("strict: true\naliases:\n  say: show\n").unwrap();
        assert!(config.strict);
        assert_eq!(config.aliases.len(), 1);
        assert_eq!(config.extensions, vec![".tzx", ".tasx"]);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::parse("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_rejects_multi_word_alias() {
        let err = Config::parse("aliases:\n  \"say it\": show\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAlias { .. }));
    }

    #[test]
    fn test_rejects_unknown_field() {
        assert!(matches!(
            Config::parse("colour: blue\n"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_rejects_bad_extension() {
        assert!(matches!(
            Config::parse("extensions: [tzx]\n"),
            Err(ConfigError::InvalidExtension(_))
        ));
    }

    #[test]
    fn test_discover_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "strict: true\n").unwrap();

        let found = Config::discover(&nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILE));
        assert!(Config::load(&found).unwrap().strict);
    }
}
