//! File-based service model loader
//!
//! The model is normally produced by an upstream API parser; the host tool
//! reads it back from a JSON or YAML file.

use std::path::Path;

use tokio::fs;
use tracing::debug;

use super::ServiceModel;
use crate::core::error::{Error, Result};

impl ServiceModel {
    /// Read a service model from a JSON or YAML file.
    ///
    /// The format is picked from the extension; files with any other
    /// extension are tried as JSON first, then YAML.
    pub async fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        debug!(path = %path.display(), bytes = content.len(), "Loaded service model file");

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            _ => Self::parse(&content),
        }
    }

    /// Parse a model from JSON or YAML text.
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .or_else(|_| serde_yaml::from_str(content))
            .map_err(|e| Error::model(format!("Failed to parse service model: {e}")))
    }
}
