use crate::table::{DefinitionTable, TableError};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Name of the dictionary used when the caller does not pick one.
pub const DEFAULT_DICTIONARY: &str = "base64";

/// A single dictionary as loaded from TOML.
///
/// The padding is kept as a string here so a malformed file surfaces a
/// validation error from [`DictionaryConfig::to_table`] rather than a
/// deserialization failure.
#[derive(Debug, Deserialize, Clone)]
pub struct DictionaryConfig {
    /// The padding character
    pub padding: String,
    /// Map of binary keys to representations
    pub mappings: HashMap<String, String>,
}

impl DictionaryConfig {
    /// Parses a standalone dictionary file: a `padding` key plus a
    /// `[mappings]` table, the format the generator writes.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads a standalone dictionary from a file path.
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    /// Validates this configuration into a usable table.
    pub fn to_table(&self) -> Result<DefinitionTable, TableError> {
        DefinitionTable::new(&self.mappings, &self.padding)
    }
}

/// Collection of named dictionaries loaded from TOML files.
#[derive(Debug, Deserialize)]
pub struct DictionaryRegistry {
    /// Map of dictionary names to their configurations
    pub dictionaries: HashMap<String, DictionaryConfig>,
}

impl DictionaryRegistry {
    /// Parses a registry from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads the built-in dictionaries compiled into the binary.
    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        let content = include_str!("../dictionaries.toml");
        Ok(Self::from_toml(content)?)
    }

    /// Loads a registry from a custom file path.
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    /// Loads the built-in registry with user overrides layered on top:
    /// first `~/.config/base-k/dictionaries.toml`, then
    /// `./dictionaries.toml` from the current directory.
    pub fn load_with_overrides() -> Result<Self, Box<dyn std::error::Error>> {
        let mut registry = Self::load_default()?;

        if let Some(config_dir) = dirs::config_dir() {
            let user_path = config_dir.join("base-k").join("dictionaries.toml");
            if user_path.exists() {
                match Self::load_from_file(&user_path) {
                    Ok(user_registry) => registry.merge(user_registry),
                    Err(e) => {
                        eprintln!(
                            "Warning: Failed to load user dictionaries from {:?}: {}",
                            user_path, e
                        );
                    }
                }
            }
        }

        let local_path = Path::new("dictionaries.toml");
        if local_path.exists() {
            match Self::load_from_file(local_path) {
                Ok(local_registry) => registry.merge(local_registry),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to load local dictionaries from {:?}: {}",
                        local_path, e
                    );
                }
            }
        }

        Ok(registry)
    }

    /// Merges another registry into this one, overriding entries by name.
    pub fn merge(&mut self, other: DictionaryRegistry) {
        for (name, dictionary) in other.dictionaries {
            self.dictionaries.insert(name, dictionary);
        }
    }

    pub fn get_dictionary(&self, name: &str) -> Option<&DictionaryConfig> {
        self.dictionaries.get(name)
    }

    /// Dictionary names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.dictionaries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_registry() {
        let registry = DictionaryRegistry::load_default().unwrap();
        assert!(registry.dictionaries.contains_key(DEFAULT_DICTIONARY));
    }

    #[test]
    fn test_default_base64_shape() {
        let registry = DictionaryRegistry::load_default().unwrap();
        let base64 = registry.get_dictionary("base64").unwrap();
        assert_eq!(base64.padding, "=");
        assert_eq!(base64.mappings.len(), 64);
        assert_eq!(base64.mappings.get("000000").map(String::as_str), Some("A"));
        assert_eq!(base64.mappings.get("111111").map(String::as_str), Some("/"));
    }

    #[test]
    fn test_default_base64_validates() {
        let registry = DictionaryRegistry::load_default().unwrap();
        let table = registry
            .get_dictionary("base64")
            .unwrap()
            .to_table()
            .unwrap();
        assert_eq!(table.key_length(), 6);
        assert_eq!(table.value_length(), 1);
        assert!(table.even_key_length());
        assert_eq!(table.padding(), '=');
    }

    #[test]
    fn test_parse_standalone_dictionary() {
        let content = r#"
padding = "/"

[mappings]
"0" = "a"
"1" = "b"
"#;
        let config = DictionaryConfig::from_toml(content).unwrap();
        assert_eq!(config.padding, "/");
        let table = config.to_table().unwrap();
        assert_eq!(table.key_length(), 1);
    }

    #[test]
    fn test_malformed_padding_fails_validation_not_parsing() {
        let content = r#"
padding = "ab"

[mappings]
"0" = "x"
"1" = "y"
"#;
        let config = DictionaryConfig::from_toml(content).unwrap();
        assert!(matches!(
            config.to_table().unwrap_err(),
            TableError::PaddingNotSingleChar { .. }
        ));
    }

    #[test]
    fn test_merge_overrides_by_name() {
        let mut first = DictionaryRegistry::from_toml(
            r#"
[dictionaries.alpha]
padding = "="
[dictionaries.alpha.mappings]
"0" = "a"
"1" = "b"
"#,
        )
        .unwrap();
        let second = DictionaryRegistry::from_toml(
            r#"
[dictionaries.alpha]
padding = "="
[dictionaries.alpha.mappings]
"0" = "c"
"1" = "d"

[dictionaries.beta]
padding = "="
[dictionaries.beta.mappings]
"0" = "e"
"1" = "f"
"#,
        )
        .unwrap();

        first.merge(second);

        assert_eq!(first.dictionaries.len(), 2);
        assert_eq!(
            first
                .get_dictionary("alpha")
                .unwrap()
                .mappings
                .get("0")
                .map(String::as_str),
            Some("c")
        );
        assert_eq!(first.names(), vec!["alpha", "beta"]);
    }
}
