//! Service model types
//!
//! The model is produced upstream from an API description and handed to the
//! renderer fully populated. Field names serialize in snake_case, which is
//! also how templates address them (`model.methods[0].http_method`).

use serde::{Deserialize, Serialize};

/// A complete service description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceModel {
    /// Service name as written in the API description (e.g. "Bookstore")
    pub name: String,
    /// Package (crate) name for generated code
    pub package: String,
    /// API version
    #[serde(default)]
    pub version: String,
    /// Free-form service description
    #[serde(default)]
    pub description: Option<String>,
    /// Path prefix shared by every method
    #[serde(default)]
    pub base_path: String,
    /// Named data types
    #[serde(default)]
    pub types: Vec<ServiceType>,
    /// Service operations
    #[serde(default)]
    pub methods: Vec<ServiceMethod>,
}

/// A named record type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceType {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<ServiceField>,
}

/// One field of a [`ServiceType`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceField {
    /// Field name as written in the API description
    pub name: String,
    /// Schema type (`string`, `integer`, ...) or the name of another type
    #[serde(alias = "type")]
    pub type_name: String,
    /// Schema format qualifier (`int64`, `float`, ...)
    #[serde(default)]
    pub format: Option<String>,
    /// Field holds a list of `type_name`
    #[serde(default)]
    pub repeated: bool,
    /// Field may be absent
    #[serde(default)]
    pub optional: bool,
    /// Where the field travels in a request
    #[serde(default)]
    pub position: FieldPosition,
    /// Wire name when it differs from `name`
    #[serde(default)]
    pub json_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ServiceField {
    /// Name used on the wire
    pub fn wire_name(&self) -> &str {
        self.json_name.as_deref().unwrap_or(&self.name)
    }
}

/// Request location of a parameter field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPosition {
    #[default]
    Body,
    Header,
    Query,
    Path,
    #[serde(alias = "formdata")]
    FormData,
}

/// A single service operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceMethod {
    /// Operation name (e.g. "ListShelves")
    pub name: String,
    /// Path template relative to `base_path` (e.g. "/shelves/{shelf}")
    pub path: String,
    /// HTTP verb
    #[serde(alias = "method")]
    pub http_method: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Name of the type carrying the request parameters
    #[serde(default)]
    pub parameters_type: Option<String>,
    /// Name of the type carrying the response
    #[serde(default)]
    pub responses_type: Option<String>,
}

impl ServiceMethod {
    /// Names of the `{placeholders}` in the path, in order.
    pub fn path_parameters(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut rest = self.path.as_str();
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            names.push(&rest[start + 1..start + len]);
            rest = &rest[start + len + 1..];
        }
        names
    }
}
