//! Mapping of model field types to Rust types.
//!
//! Shared by the `rust_type` template helper and the programmatic
//! generators so both produce the same type names.
//!
//! | model type | format  | Rust type           |
//! |------------|---------|---------------------|
//! | `string`   |         | `String`            |
//! | `integer`  |         | `i32`               |
//! | `integer`  | `int64` | `i64`               |
//! | `number`   |         | `f64`               |
//! | `number`   | `float` | `f32`               |
//! | `boolean`  |         | `bool`              |
//! | `object`   |         | `serde_json::Value` |
//! | other      |         | PascalCase name     |

use crate::core::utils::to_proper_case;
use crate::model::ServiceField;

/// Rust type for a bare model type name.
pub fn scalar_rust_type(type_name: &str, format: Option<&str>) -> String {
    match (type_name, format) {
        ("string", _) => "String".to_string(),
        ("integer", Some("int64")) => "i64".to_string(),
        ("integer", _) => "i32".to_string(),
        ("number", Some("float")) => "f32".to_string(),
        ("number", _) => "f64".to_string(),
        ("boolean", _) => "bool".to_string(),
        ("object", _) | ("any", _) => "serde_json::Value".to_string(),
        (other, _) => to_proper_case(other),
    }
}

/// Full Rust type for a field, including `Vec` and `Option` wrappers.
pub fn field_rust_type(field: &ServiceField) -> String {
    let mut rust_type = scalar_rust_type(&field.type_name, field.format.as_deref());
    if field.repeated {
        rust_type = format!("Vec<{rust_type}>");
    }
    if field.optional {
        rust_type = format!("Option<{rust_type}>");
    }
    rust_type
}
