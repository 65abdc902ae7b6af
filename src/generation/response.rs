//! Result envelope of a generation run

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// One generated output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl GeneratedFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// File contents as text, lossily decoded
    pub fn contents(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

/// Files and errors accumulated by [`Renderer::generate`](crate::Renderer::generate).
///
/// `files` keeps the order in which names were requested. `errors` holds one
/// human-readable message per failed file and is the authoritative record of
/// what went wrong.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub files: Vec<GeneratedFile>,
    pub errors: Vec<String>,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a generated file by name
    pub fn file(&self, name: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.name == name)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
