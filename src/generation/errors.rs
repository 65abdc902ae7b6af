//! Error types for the generation domain

use thiserror::Error;

/// Errors that can occur while producing one output file.
///
/// These never abort a run: the renderer records them against the file and
/// moves on to the next one.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("unknown file '{0}': no generator or template produces it")]
    UnknownFile(String),

    #[error("template '{name}' failed to render: {message}")]
    TemplateExecution { name: String, message: String },

    #[error("generator failed: {0}")]
    Generator(String),

    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl GenerationError {
    /// Create a new generator error
    pub fn generator<S: Into<String>>(msg: S) -> Self {
        Self::Generator(msg.into())
    }
}

/// Errors raised while normalizing generated text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("syntax error in {file} at line {line}, column {column}: {message}")]
    Syntax {
        file: String,
        message: String,
        line: usize,
        column: usize,
    },

    #[error("{file} is not valid UTF-8")]
    Encoding { file: String },
}
