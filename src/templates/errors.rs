//! Template loading errors

use thiserror::Error;

/// Errors raised while building the compiled template table.
///
/// Both variants are fatal to renderer construction.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to decode template '{name}': {message}")]
    Decode { name: String, message: String },

    #[error("failed to compile template '{name}': {message}")]
    Compile { name: String, message: String },
}

impl TemplateError {
    /// Name of the template that failed
    pub fn template_name(&self) -> &str {
        match self {
            TemplateError::Decode { name, .. } | TemplateError::Compile { name, .. } => name,
        }
    }
}
