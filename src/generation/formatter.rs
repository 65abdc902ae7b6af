//! Normalization of generated text.
//!
//! Every file has its generation markers stripped. Rust sources are then
//! parsed with `syn` and re-emitted by `prettyplease`; the parse is the only
//! check standing between a broken template and the caller, so it is never
//! skipped. Regular `//` comments do not survive formatting; doc comments do.

use std::path::Path;

use tracing::debug;

use crate::generation::FormatError;

/// Lines starting with this sentinel exist only during generation
pub const GENERATION_MARKER: &str = "//-";

/// Extension of files that get canonical formatting
pub const SOURCE_EXTENSION: &str = "rs";

/// Strip markers and, for Rust sources, format canonically.
///
/// Non-source files that are not UTF-8 pass through untouched.
pub fn normalize(filename: &str, raw: &[u8]) -> Result<Vec<u8>, FormatError> {
    let source_file = is_source_file(filename);
    let text = match std::str::from_utf8(raw) {
        Ok(text) => text,
        Err(_) if !source_file => return Ok(raw.to_vec()),
        Err(_) => {
            return Err(FormatError::Encoding {
                file: filename.to_string(),
            });
        }
    };

    let stripped = strip_markers(text);
    if !source_file {
        return Ok(stripped.into_bytes());
    }

    debug!(file = %filename, "Formatting generated source");
    format_source(filename, &stripped).map(String::into_bytes)
}

/// Whether `filename` is a Rust source file
pub fn is_source_file(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// Remove every line whose first non-blank text is the generation marker.
pub fn strip_markers(text: &str) -> String {
    text.split_inclusive('\n')
        .filter(|line| !line.trim_start().starts_with(GENERATION_MARKER))
        .collect()
}

/// Parse and pretty-print a Rust source file.
pub fn format_source(filename: &str, source: &str) -> Result<String, FormatError> {
    let syntax_error = |message: String, start: proc_macro2::LineColumn| FormatError::Syntax {
        file: filename.to_string(),
        message,
        line: start.line,
        column: start.column + 1,
    };

    // Tokenizing fails before parsing can report a location-specific error
    let tokens: proc_macro2::TokenStream = source.parse().map_err(|e: proc_macro2::LexError| {
        syntax_error(
            format!("unbalanced delimiter or unterminated literal ({e})"),
            e.span().start(),
        )
    })?;
    let file = syn::parse2::<syn::File>(tokens)
        .map_err(|e| syntax_error(e.to_string(), e.span().start()))?;
    Ok(prettyplease::unparse(&file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markers_removes_marker_lines_only() {
        let text = "//- generated by servicegen\nline one\n    //- indented marker\nline two // keep\n";
        assert_eq!(strip_markers(text), "line one\nline two // keep\n");
    }

    #[test]
    fn test_strip_markers_handles_last_line_without_newline() {
        assert_eq!(strip_markers("keep\n//- drop"), "keep\n");
        assert_eq!(strip_markers(""), "");
    }

    #[test]
    fn test_is_source_file() {
        assert!(is_source_file("types.rs"));
        assert!(is_source_file("src/lib.rs"));
        assert!(!is_source_file("README.md"));
        assert!(!is_source_file("Cargo.toml"));
        assert!(!is_source_file("rs"));
    }

    #[test]
    fn test_normalize_formats_rust_source() {
        let raw = b"//- marker\npub struct   Shelf{pub name:String,}";
        let formatted = normalize("types.rs", raw).unwrap();
        assert_eq!(
            String::from_utf8(formatted).unwrap(),
            "pub struct Shelf {\n    pub name: String,\n}\n"
        );
    }

    #[test]
    fn test_normalize_passes_other_files_after_stripping() {
        let raw = b"//- marker\n#  Title   \n{ not rust\n";
        let normalized = normalize("README.md", raw).unwrap();
        assert_eq!(normalized, b"#  Title   \n{ not rust\n");
    }

    #[test]
    fn test_normalize_reports_syntax_error_for_file() {
        let err = normalize("server.rs", b"pub fn serve() {\n    let x = 1;\n").unwrap_err();
        match err {
            FormatError::Syntax {
                file,
                message,
                line,
                ..
            } => {
                assert_eq!(file, "server.rs");
                assert!(message.contains("unbalanced delimiter"), "{message}");
                assert!(line >= 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_keeps_location() {
        let err = format_source("types.rs", "pub struct Shelf {}\npub fn (\n) {}\n").unwrap_err();
        match err {
            FormatError::Syntax { message, line, .. } => {
                assert!(!message.contains("unbalanced delimiter"), "{message}");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_normalize_rejects_non_utf8_source() {
        let err = normalize("types.rs", &[0xff, 0x00]).unwrap_err();
        assert_eq!(
            err,
            FormatError::Encoding {
                file: "types.rs".to_string()
            }
        );
    }

    #[test]
    fn test_normalize_passes_non_utf8_other_files() {
        let raw = [0x89, b'P', b'N', b'G'];
        assert_eq!(normalize("logo.png", &raw).unwrap(), raw.to_vec());
    }

    #[test]
    fn test_formatting_is_deterministic_and_stable() {
        let raw = "pub fn add(a:i32,b:i32)->i32{a+b}\n/// Doc\npub const X:u8=1;";
        let first = format_source("lib.rs", raw).unwrap();
        let second = format_source("lib.rs", raw).unwrap();
        assert_eq!(first, second);

        let again = format_source("lib.rs", &first).unwrap();
        assert_eq!(first, again);
    }
}
