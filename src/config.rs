use crate::compiler::parser::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "conflang.toml";

/// Translator settings, read from `conflang.toml`:
///
/// ```toml
/// max_depth = 64
/// max_nodes = 100000
/// escape_strings = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranslatorConfig {
    /// How many objects/arrays may be nested inside each other.
    pub max_depth: usize,
    /// How many nodes the output may contain with references expanded.
    pub max_nodes: usize,
    /// Encode strings per RFC 8259 instead of copying them verbatim.
    pub escape_strings: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        TranslatorConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
            escape_strings: false,
        }
    }
}

impl TranslatorConfig {
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Invalid configuration: {}", e))
    }

    /// Reads an explicitly requested config file. Missing file is an error.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
        Self::from_toml(&content)
    }

    /// Reads `path` if it exists, otherwise falls back to the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, String> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(TranslatorConfig::from_toml("").unwrap(), TranslatorConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = TranslatorConfig::from_toml("escape_strings = true").unwrap();
        assert!(config.escape_strings);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.max_nodes, DEFAULT_MAX_NODES);
    }

    #[test]
    fn node_limit_is_read() {
        let config = TranslatorConfig::from_toml("max_nodes = 500").unwrap();
        assert_eq!(config.max_nodes, 500);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = TranslatorConfig::from_toml("max_dept = 3").unwrap_err();
        assert!(err.starts_with("Invalid configuration"));
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(TranslatorConfig::from_toml("max_depth = \"deep\"").is_err());
    }

    #[test]
    fn missing_default_file_falls_back() {
        let path = Path::new("definitely/not/here/conflang.toml");
        assert_eq!(TranslatorConfig::load_or_default(path).unwrap(), TranslatorConfig::default());
        assert!(TranslatorConfig::load(path).is_err());
    }
}
