//! Host configuration for a generation run.
//!
//! A run can be configured from a TOML or YAML file; command-line flags
//! override whatever the file sets.
//!
//! ```toml
//! output_dir = "generated"
//! files = ["types.rs", "client.rs", "README.md"]
//! exclude_operations = ["deleteShelf"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// Settings for one generation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory generated files are written into
    pub output_dir: Option<PathBuf>,
    /// Output files to generate, in order
    pub files: Vec<String>,
    /// Operations to keep (empty keeps all)
    pub include_operations: Vec<String>,
    /// Operations to drop
    pub exclude_operations: Vec<String>,
}

impl Config {
    /// Load a configuration file, picking the format from its extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Err(Error::config(format!(
                "unsupported configuration format: {}",
                path.display()
            ))),
        }
    }

    /// Overlay command-line values on top of this configuration.
    pub fn merge_cli(mut self, output_dir: Option<PathBuf>, files: Vec<String>) -> Self {
        if output_dir.is_some() {
            self.output_dir = output_dir;
        }
        if !files.is_empty() {
            self.files = files;
        }
        self
    }

    /// Output directory, defaulting to the current directory.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_from_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("servicegen.toml");
        fs::write(
            &path,
            "output_dir = \"out\"\nfiles = [\"types.rs\", \"README.md\"]\nexclude_operations = [\"deleteShelf\"]\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.output_dir, Some(PathBuf::from("out")));
        assert_eq!(config.files, vec!["types.rs", "README.md"]);
        assert!(config.include_operations.is_empty());
        assert_eq!(config.exclude_operations, vec!["deleteShelf"]);
    }

    #[test]
    fn test_config_from_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("servicegen.yml");
        fs::write(&path, "files:\n  - client.rs\ninclude_operations:\n  - listShelves\n")
            .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.files, vec!["client.rs"]);
        assert_eq!(config.include_operations, vec!["listShelves"]);
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_config_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("servicegen.ini");
        fs::write(&path, "files = types.rs").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_merge_cli_overrides_file_values() {
        let config = Config {
            output_dir: Some(PathBuf::from("from-file")),
            files: vec!["types.rs".to_string()],
            ..Default::default()
        };

        let merged = config
            .clone()
            .merge_cli(Some(PathBuf::from("from-cli")), vec![]);
        assert_eq!(merged.output_dir(), PathBuf::from("from-cli"));
        assert_eq!(merged.files, vec!["types.rs"]);

        let merged = config.merge_cli(None, vec!["server.rs".to_string()]);
        assert_eq!(merged.output_dir(), PathBuf::from("from-file"));
        assert_eq!(merged.files, vec!["server.rs"]);
    }
}
