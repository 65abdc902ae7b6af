//! Identifier transformation utilities for code generation
//!
//! These functions are shared by the template helper set and the programmatic
//! generators, so both strategies name things identically.

/// Converts a string to snake_case format for Rust identifiers.
///
/// This function handles various input formats including camelCase, PascalCase,
/// kebab-case, and space-separated strings, converting them all to snake_case.
///
/// # Examples
/// ```
/// use servicegen::core::utils::to_snake_case;
///
/// assert_eq!(to_snake_case("findPetsByStatus"), "find_pets_by_status");
/// assert_eq!(to_snake_case("FindPetsByStatus"), "find_pets_by_status");
/// assert_eq!(to_snake_case("find-pets-by-status"), "find_pets_by_status");
/// assert_eq!(to_snake_case("get HTTP Response"), "get_http_response");
/// assert_eq!(to_snake_case("HTTPResponse"), "http_response");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::new();
    let mut prev_is_lowercase = false;
    let mut prev_is_uppercase = false;

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            // Word boundary on lower -> upper, and before the last capital of
            // an acronym that runs into a capitalized word (`HTTPResponse`)
            let next_is_lowercase = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if prev_is_lowercase || (prev_is_uppercase && next_is_lowercase) {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
            prev_is_lowercase = false;
            prev_is_uppercase = true;
        } else if ch.is_alphanumeric() {
            result.push(ch);
            prev_is_lowercase = ch.is_lowercase() || ch.is_ascii_digit();
            prev_is_uppercase = false;
        } else if matches!(ch, '-' | '_' | ' ' | '.' | '/') {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            prev_is_lowercase = false;
            prev_is_uppercase = false;
        }
    }

    result.trim_matches('_').to_string()
}

/// Converts a string to UpperCamelCase (PascalCase) for Rust type names.
///
/// The input is normalized through [`to_snake_case`] first.
///
/// ```
/// use servicegen::core::utils::to_proper_case;
///
/// assert_eq!(to_proper_case("find_pets_by_status"), "FindPetsByStatus");
/// assert_eq!(to_proper_case("http_response"), "HttpResponse");
/// ```
pub fn to_proper_case(s: &str) -> String {
    to_snake_case(s)
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}

/// Converts a string to lowerCamelCase.
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_proper_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Returns the English plural of a (singular) noun.
///
/// Only the regular suffix rules are applied; irregular nouns are not
/// special-cased.
///
/// ```
/// use servicegen::core::utils::pluralize;
///
/// assert_eq!(pluralize("shelf"), "shelfs");
/// assert_eq!(pluralize("box"), "boxes");
/// assert_eq!(pluralize("category"), "categories");
/// ```
pub fn pluralize(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    let lower = s.to_lowercase();
    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return format!("{s}es");
    }
    if let Some(stem) = s.strip_suffix('y').or_else(|| s.strip_suffix('Y')) {
        let before_y = stem.chars().last();
        if before_y.is_some_and(|c| !"aeiouAEIOU".contains(c)) {
            return format!("{stem}ies");
        }
    }
    format!("{s}s")
}

/// Rust keywords that cannot be used as plain identifiers.
const RUST_KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for",
    "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
    "self", "Self", "static", "struct", "super", "trait", "true", "type", "unsafe", "use", "where",
    "while", "async", "await", "dyn", "abstract", "become", "box", "do", "final", "macro",
    "override", "priv", "typeof", "unsized", "virtual", "yield", "try", "gen",
];

/// Sanitizes a string to be a valid Rust field or function name.
///
/// The result is snake_case; keywords get a trailing underscore and names
/// starting with a digit get a leading one.
///
/// ```
/// use servicegen::core::utils::sanitize_rust_field_name;
///
/// assert_eq!(sanitize_rust_field_name("type"), "type_");
/// assert_eq!(sanitize_rust_field_name("firstName"), "first_name");
/// ```
pub fn sanitize_rust_field_name(s: &str) -> String {
    let snake_case = to_snake_case(s);
    if RUST_KEYWORDS.contains(&snake_case.as_str()) {
        format!("{snake_case}_")
    } else if snake_case.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{snake_case}")
    } else {
        snake_case
    }
}
