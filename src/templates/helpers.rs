//! Helper functions available inside every template.
//!
//! Helpers are registered as tera filters. Templates depend on this exact
//! set, so names are part of the template contract:
//!
//! ```text
//! {{ method.name | snake_case }}         list_shelves
//! {{ method.name | camel_case }}         listShelves
//! {{ type.name | pascal_case }}          Shelf
//! {{ "shelf" | plural }}                 shelfs
//! {{ field.name | field_name }}          type_
//! {{ field | rust_type }}                Option<Vec<Book>>
//! {{ "integer" | rust_type(format="int64") }}  i64
//! {{ method.http_method | http_method }} GET
//! ```
//!
//! Every helper is a pure function of its input and arguments.

use std::collections::HashMap;

use tera::{Tera, Value};

use crate::core::utils::{
    pluralize, sanitize_rust_field_name, to_camel_case, to_proper_case, to_snake_case,
};
use crate::generators::type_map::{field_rust_type, scalar_rust_type};
use crate::model::ServiceField;

/// Names of the registered helpers
pub const HELPER_NAMES: &[&str] = &[
    "snake_case",
    "camel_case",
    "pascal_case",
    "plural",
    "field_name",
    "rust_type",
    "http_method",
];

/// Register the helper set on a tera instance.
pub fn register_helpers(tera: &mut Tera) {
    tera.register_filter("snake_case", snake_case);
    tera.register_filter("camel_case", camel_case);
    tera.register_filter("pascal_case", pascal_case);
    tera.register_filter("plural", plural);
    tera.register_filter("field_name", field_name);
    tera.register_filter("rust_type", rust_type);
    tera.register_filter("http_method", http_method);
}

fn string_input<'a>(filter: &str, value: &'a Value) -> tera::Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("filter `{filter}` expects a string, got {value}")))
}

fn snake_case(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(to_snake_case(string_input("snake_case", value)?)))
}

fn camel_case(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(to_camel_case(string_input("camel_case", value)?)))
}

fn pascal_case(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(to_proper_case(string_input("pascal_case", value)?)))
}

fn plural(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(pluralize(string_input("plural", value)?)))
}

fn field_name(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(sanitize_rust_field_name(string_input(
        "field_name",
        value,
    )?)))
}

/// Accepts either a model field object or a bare type name with an optional
/// `format` argument.
fn rust_type(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let rust_type = match value {
        Value::String(type_name) => {
            let format = args.get("format").and_then(Value::as_str);
            scalar_rust_type(type_name, format)
        }
        Value::Object(_) => {
            let field: ServiceField = serde_json::from_value(value.clone()).map_err(|e| {
                tera::Error::msg(format!("filter `rust_type` expects a model field: {e}"))
            })?;
            field_rust_type(&field)
        }
        other => {
            return Err(tera::Error::msg(format!(
                "filter `rust_type` expects a field or type name, got {other}"
            )));
        }
    };
    Ok(Value::String(rust_type))
}

fn http_method(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(
        string_input("http_method", value)?.trim().to_uppercase(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tera::Context;

    fn render(template: &str, context: &Context) -> tera::Result<String> {
        let mut tera = Tera::default();
        register_helpers(&mut tera);
        tera.add_raw_template("test", template)?;
        tera.render("test", context)
    }

    #[test]
    fn test_case_helpers() {
        let mut context = Context::new();
        context.insert("name", "ListShelves");

        let rendered = render(
            "{{ name | snake_case }} {{ name | camel_case }} {{ name | pascal_case }}",
            &context,
        )
        .unwrap();
        assert_eq!(rendered, "list_shelves listShelves ListShelves");
    }

    #[test]
    fn test_plural_and_field_name() {
        let mut context = Context::new();
        context.insert("noun", "category");
        context.insert("field", "type");

        let rendered = render("{{ noun | plural }} {{ field | field_name }}", &context).unwrap();
        assert_eq!(rendered, "categories type_");
    }

    #[test]
    fn test_rust_type_from_field_object() {
        let mut context = Context::new();
        context.insert(
            "field",
            &json!({"name": "books", "type_name": "book", "repeated": true, "optional": true}),
        );

        let rendered = render("{{ field | rust_type }}", &context).unwrap();
        assert_eq!(rendered, "Option<Vec<Book>>");
    }

    #[test]
    fn test_rust_type_from_name_with_format() {
        let rendered = render(
            r#"{{ "integer" | rust_type(format="int64") }} {{ "string" | rust_type }}"#,
            &Context::new(),
        )
        .unwrap();
        assert_eq!(rendered, "i64 String");
    }

    #[test]
    fn test_http_method_upper_cases() {
        let mut context = Context::new();
        context.insert("verb", " post ");
        assert_eq!(render("{{ verb | http_method }}", &context).unwrap(), "POST");
    }

    #[test]
    fn test_helper_rejects_non_string() {
        let mut context = Context::new();
        context.insert("count", &3);
        assert!(render("{{ count | snake_case }}", &context).is_err());
    }

    #[test]
    fn test_helper_names_are_all_registered() {
        let mut context = Context::new();
        context.insert("value", "Shelf");
        for helper in HELPER_NAMES {
            let template = format!("{{{{ value | {helper} }}}}");
            assert!(
                render(&template, &context).is_ok(),
                "helper `{helper}` failed"
            );
        }
    }
}
