//! Template sources, embedded at build time.
//!
//! Every file under `templates/` named `<output>.tera` is compiled into the
//! binary with `rust-embed` and serves the output file `<output>`. A
//! [`TemplateSet`] maps output names to their encoded source; nothing is
//! decoded until the engine loads the set.

use std::collections::BTreeMap;

use base64::prelude::*;
use rust_embed::RustEmbed;
use tracing::debug;

use super::TemplateError;

/// Suffix marking a template source file
pub const TEMPLATE_SUFFIX: &str = ".tera";

#[derive(RustEmbed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

/// At-rest encoding of a template source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateEncoding {
    /// Standard base64 of UTF-8 text
    Base64,
    /// Raw UTF-8 bytes
    Utf8,
}

/// A template source as stored, before decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedTemplate {
    encoding: TemplateEncoding,
    data: Vec<u8>,
}

impl EncodedTemplate {
    /// A base64-encoded template source
    pub fn base64(encoded: impl Into<String>) -> Self {
        Self {
            encoding: TemplateEncoding::Base64,
            data: encoded.into().into_bytes(),
        }
    }

    /// A raw UTF-8 template source
    pub fn utf8(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            encoding: TemplateEncoding::Utf8,
            data: bytes.into(),
        }
    }

    pub fn encoding(&self) -> TemplateEncoding {
        self.encoding
    }

    /// Decode to template text.
    pub fn decode(&self) -> Result<String, String> {
        let bytes = match self.encoding {
            TemplateEncoding::Base64 => BASE64_STANDARD
                .decode(self.data.trim_ascii())
                .map_err(|e| format!("invalid base64: {e}"))?,
            TemplateEncoding::Utf8 => self.data.clone(),
        };
        String::from_utf8(bytes).map_err(|e| format!("invalid UTF-8: {e}"))
    }
}

/// Named template sources, keyed by the output file they produce
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSet {
    entries: BTreeMap<String, EncodedTemplate>,
}

impl TemplateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The templates compiled into this binary.
    pub fn embedded() -> Self {
        let mut set = Self::new();
        for path in EmbeddedTemplates::iter() {
            let Some(name) = path.strip_suffix(TEMPLATE_SUFFIX) else {
                continue;
            };
            if let Some(file) = EmbeddedTemplates::get(&path) {
                debug!(template = %name, bytes = file.data.len(), "Found embedded template");
                set.insert(name, EncodedTemplate::utf8(file.data.into_owned()));
            }
        }
        set
    }

    /// Add or replace a template source.
    pub fn insert(&mut self, name: impl Into<String>, template: EncodedTemplate) {
        self.entries.insert(name.into(), template);
    }

    /// Builder form of [`insert`](Self::insert) for a base64 source.
    pub fn with_base64(mut self, name: impl Into<String>, encoded: impl Into<String>) -> Self {
        self.insert(name, EncodedTemplate::base64(encoded));
        self
    }

    /// Builder form of [`insert`](Self::insert) for a plain-text source.
    pub fn with_text(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, EncodedTemplate::utf8(text.into().into_bytes()));
        self
    }

    /// Decode every entry, stopping at the first failure.
    pub fn decode_all(&self) -> Result<Vec<(String, String)>, TemplateError> {
        self.entries
            .iter()
            .map(|(name, template)| {
                template
                    .decode()
                    .map(|text| (name.clone(), text))
                    .map_err(|message| TemplateError::Decode {
                        name: name.clone(),
                        message,
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_templates_available() {
        let set = TemplateSet::embedded();
        let names: Vec<&str> = set.entries.keys().map(String::as_str).collect();

        assert!(names.contains(&"README.md"));
        assert!(names.contains(&"Cargo.toml"));
        assert!(names.contains(&"lib.rs"));
        assert!(names.contains(&"routes.md"));
        assert!(names.iter().all(|n| !n.ends_with(TEMPLATE_SUFFIX)));
    }

    #[test]
    fn test_base64_template_decodes() {
        let template = EncodedTemplate::base64(BASE64_STANDARD.encode("# {{ model.name }}\n"));
        assert_eq!(template.encoding(), TemplateEncoding::Base64);
        assert_eq!(template.decode().unwrap(), "# {{ model.name }}\n");
    }

    #[test]
    fn test_base64_decode_tolerates_surrounding_whitespace() {
        let encoded = format!("  {}\n", BASE64_STANDARD.encode("hello"));
        assert_eq!(EncodedTemplate::base64(encoded).decode().unwrap(), "hello");
    }

    #[test]
    fn test_invalid_base64_is_reported() {
        let err = EncodedTemplate::base64("not*base64!").decode().unwrap_err();
        assert!(err.contains("invalid base64"));
    }

    #[test]
    fn test_invalid_utf8_is_reported() {
        let err = EncodedTemplate::utf8(vec![0xff, 0xfe]).decode().unwrap_err();
        assert!(err.contains("invalid UTF-8"));
    }

    #[test]
    fn test_decode_all_fails_fast_with_template_name() {
        let set = TemplateSet::new()
            .with_text("a.md", "fine")
            .with_base64("b.md", "%%%");

        let err = set.decode_all().unwrap_err();
        assert!(matches!(err, TemplateError::Decode { .. }));
        assert_eq!(err.template_name(), "b.md");
    }

    #[test]
    fn test_decode_all_returns_every_entry() {
        let set = TemplateSet::new()
            .with_text("a.md", "A")
            .with_base64("b.md", BASE64_STANDARD.encode("B"));

        let decoded = set.decode_all().unwrap();
        assert_eq!(
            decoded,
            vec![
                ("a.md".to_string(), "A".to_string()),
                ("b.md".to_string(), "B".to_string())
            ]
        );
    }
}
