//! `client.rs`: an HTTP client with one async method per operation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use super::common::{
    HttpVerb, doc_attrs, field_ident, field_values, fields_at, into_bytes, module_doc,
    operation_idents, parameters_type, path_field, responses_type, type_ident,
};
use crate::generation::GenerationError;
use crate::model::{FieldPosition, ServiceMethod, ServiceModel, ServiceType};

/// Associated functions `Client` defines besides the operations
const CLIENT_FUNCTIONS: &[&str] = &["new", "with_http_client"];

pub fn generate_client(model: &ServiceModel) -> Result<Vec<u8>, GenerationError> {
    let module_doc = module_doc(&format!("HTTP client for the {} service.", model.name));
    let names = operation_idents(model, CLIENT_FUNCTIONS)?;
    let methods = model
        .methods
        .iter()
        .zip(&names)
        .map(|(method, fn_name)| client_method(model, method, fn_name))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(into_bytes(quote! {
        #module_doc

        #[allow(unused_imports)]
        use crate::types::*;

        /// Errors returned by [`Client`]
        #[derive(Debug, thiserror::Error)]
        pub enum ClientError {
            #[error("request failed: {0}")]
            Transport(#[from] reqwest::Error),
            #[error("unexpected status {status}: {body}")]
            Status { status: u16, body: String },
        }

        /// Client for the service API
        #[derive(Debug, Clone)]
        pub struct Client {
            base_url: String,
            http: reqwest::Client,
        }

        impl Client {
            /// Create a client for the server at `base_url`
            pub fn new(base_url: impl Into<String>) -> Self {
                Self::with_http_client(base_url, reqwest::Client::new())
            }

            /// Create a client sharing an existing HTTP client
            pub fn with_http_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
                let base_url = base_url.into().trim_end_matches('/').to_string();
                Self { base_url, http }
            }

            #(#methods)*
        }

        async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::Status { status: status.as_u16(), body })
        }
    }))
}

fn client_method(
    model: &ServiceModel,
    method: &ServiceMethod,
    fn_name: &Ident,
) -> Result<TokenStream, GenerationError> {
    let verb = HttpVerb::of(method)?.constant();
    let docs = doc_attrs(method.description.as_deref());
    let params = parameters_type(model, method)?;
    let output = responses_type(method)?;

    let receiver = quote! { parameters };
    let url = request_url(model, method, params, &receiver)?;
    let arguments = match params {
        Some(ty) => {
            let ty = type_ident(&ty.name)?;
            quote! { , parameters: &#ty }
        }
        None => quote! {},
    };
    let request_parts = match params {
        Some(ty) => request_parts(ty, &receiver)?,
        None => quote! {},
    };
    let result = match method.responses_type {
        Some(_) => quote! { Ok(response.json().await?) },
        None => quote! { Ok(()) },
    };

    Ok(quote! {
        #docs
        pub async fn #fn_name(&self #arguments) -> Result<#output, ClientError> {
            let url = #url;
            #[allow(unused_mut)]
            let mut request = self.http.request(reqwest::Method::#verb, url);
            #request_parts
            let response = check_status(request.send().await?).await?;
            #result
        }
    })
}

/// `format!` expression building the request URL with path parameters
/// substituted in order.
fn request_url(
    model: &ServiceModel,
    method: &ServiceMethod,
    params: Option<&ServiceType>,
    receiver: &TokenStream,
) -> Result<TokenStream, GenerationError> {
    let mut template = String::from("{}");
    template.push_str(&escape_braces(&model.base_path));

    let mut arguments = Vec::new();
    let mut rest = method.path.as_str();
    for placeholder in method.path_parameters() {
        let marker = format!("{{{placeholder}}}");
        let Some(index) = rest.find(&marker) else {
            continue;
        };
        template.push_str(&escape_braces(&rest[..index]));
        template.push_str("{}");
        rest = &rest[index + marker.len()..];

        let field = path_field(method, params, placeholder)?;
        let name = field_ident(&field.name)?;
        arguments.push(if field.optional {
            quote! { #receiver.#name.as_ref().map(ToString::to_string).unwrap_or_default() }
        } else {
            quote! { #receiver.#name }
        });
    }
    template.push_str(&escape_braces(rest));

    Ok(quote! { format!(#template, self.base_url #(, #arguments)*) })
}

fn escape_braces(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

/// Statements attaching query, header, form and body fields to `request`.
fn request_parts(ty: &ServiceType, receiver: &TokenStream) -> Result<TokenStream, GenerationError> {
    let mut parts = Vec::new();

    for field in fields_at(ty, FieldPosition::Query) {
        let wire_name = field.wire_name();
        let values = field_values(receiver, field)?;
        parts.push(quote! {
            for value in #values {
                request = request.query(&[(#wire_name, value.to_string())]);
            }
        });
    }

    for field in fields_at(ty, FieldPosition::Header) {
        let wire_name = field.wire_name();
        let values = field_values(receiver, field)?;
        parts.push(quote! {
            for value in #values {
                request = request.header(#wire_name, value.to_string());
            }
        });
    }

    let form_fields = fields_at(ty, FieldPosition::FormData);
    if !form_fields.is_empty() {
        let mut pushes = Vec::new();
        for field in form_fields {
            let wire_name = field.wire_name();
            let values = field_values(receiver, field)?;
            pushes.push(quote! {
                for value in #values {
                    form.push((#wire_name, value.to_string()));
                }
            });
        }
        parts.push(quote! {
            let mut form: Vec<(&str, String)> = Vec::new();
            #(#pushes)*
            request = request.form(&form);
        });
    }

    let body_fields = fields_at(ty, FieldPosition::Body);
    match body_fields.as_slice() {
        [] => {}
        [field] => {
            let name = field_ident(&field.name)?;
            parts.push(quote! { request = request.json(&#receiver.#name); });
        }
        fields => {
            let mut entries = Vec::new();
            for field in fields {
                let wire_name = field.wire_name();
                let name = field_ident(&field.name)?;
                entries.push(quote! { #wire_name: &#receiver.#name });
            }
            parts.push(quote! {
                request = request.json(&serde_json::json!({ #(#entries),* }));
            });
        }
    }

    Ok(quote! { #(#parts)* })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::formatter::format_source;
    use crate::model::ServiceField;

    fn field(name: &str, type_name: &str, position: FieldPosition) -> ServiceField {
        ServiceField {
            name: name.to_string(),
            type_name: type_name.to_string(),
            position,
            ..Default::default()
        }
    }

    fn model() -> ServiceModel {
        ServiceModel {
            name: "Bookstore".to_string(),
            package: "bookstore".to_string(),
            base_path: "/v1".to_string(),
            types: vec![
                ServiceType {
                    name: "GetBookParameters".to_string(),
                    fields: vec![
                        field("shelf", "integer", FieldPosition::Path),
                        field("book", "integer", FieldPosition::Path),
                        ServiceField {
                            optional: true,
                            ..field("view", "string", FieldPosition::Query)
                        },
                        field("x-request-id", "string", FieldPosition::Header),
                    ],
                    ..Default::default()
                },
                ServiceType {
                    name: "CreateShelfParameters".to_string(),
                    fields: vec![field("shelf", "Shelf", FieldPosition::Body)],
                    ..Default::default()
                },
                ServiceType {
                    name: "Book".to_string(),
                    ..Default::default()
                },
            ],
            methods: vec![
                ServiceMethod {
                    name: "GetBook".to_string(),
                    path: "/shelves/{shelf}/books/{book}".to_string(),
                    http_method: "GET".to_string(),
                    description: Some("Fetch one book".to_string()),
                    parameters_type: Some("GetBookParameters".to_string()),
                    responses_type: Some("Book".to_string()),
                },
                ServiceMethod {
                    name: "CreateShelf".to_string(),
                    path: "/shelves".to_string(),
                    http_method: "post".to_string(),
                    parameters_type: Some("CreateShelfParameters".to_string()),
                    ..Default::default()
                },
                ServiceMethod {
                    name: "Ping".to_string(),
                    path: "/ping".to_string(),
                    http_method: "HEAD".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    fn generate(model: &ServiceModel) -> String {
        let raw = String::from_utf8(generate_client(model).unwrap()).unwrap();
        format_source("client.rs", &raw).unwrap()
    }

    #[test]
    fn test_method_per_operation() {
        let source = generate(&model());

        assert!(source.contains("pub struct Client {"));
        assert!(source.contains("pub enum ClientError {"));
        assert!(source.contains("/// Fetch one book"));
        assert!(source.contains("pub async fn get_book("));
        assert!(source.contains("pub async fn create_shelf("));
        assert!(source.contains("pub async fn ping(&self) -> Result<(), ClientError>"));
    }

    #[test]
    fn test_path_parameters_substituted_in_order() {
        let source = generate(&model());
        let url = source.find("\"{}/v1/shelves/{}/books/{}\"").unwrap();
        let shelf = source[url..].find("parameters.shelf").unwrap();
        let book = source[url..].find("parameters.book").unwrap();
        assert!(shelf < book);
        assert!(source.contains("format!(\"{}/v1/ping\", self.base_url)"));
    }

    #[test]
    fn test_query_header_and_body_fields() {
        let source = generate(&model());

        assert!(source.contains("for value in parameters.view.iter()"));
        assert!(source.contains("request.query(&[(\"view\", value.to_string())])"));
        assert!(source.contains("request.header(\"x-request-id\", value.to_string())"));
        assert!(source.contains("request = request.json(&parameters.shelf);"));
        assert!(source.contains("reqwest::Method::POST"));
    }

    #[test]
    fn test_missing_path_field_is_an_error() {
        let mut model = model();
        model.methods[0].path = "/shelves/{shelf}/books/{volume}".to_string();

        let err = generate_client(&model).unwrap_err();
        assert!(err.to_string().contains("volume"));
    }

    #[test]
    fn test_unknown_parameters_type_is_an_error() {
        let mut model = model();
        model.methods[1].parameters_type = Some("Missing".to_string());

        let err = generate_client(&model).unwrap_err();
        assert!(err.to_string().contains("unknown type `Missing`"));
    }

    #[test]
    fn test_placeholder_matches_sanitized_field_name() {
        let mut model = model();
        model.methods[0].path = "/shelves/{shelf_id}/books/{book}".to_string();
        model.types[0].fields[0].name = "shelfId".to_string();

        let source = generate(&model);
        assert!(source.contains("parameters.shelf_id"));
    }

    #[test]
    fn test_method_colliding_with_constructor_is_an_error() {
        let mut model = model();
        model.methods[2].name = "New".to_string();

        let err = generate_client(&model).unwrap_err();
        assert!(err.to_string().contains("`New` maps to `new`"));
    }

    #[test]
    fn test_methods_with_same_snake_case_name_are_an_error() {
        let mut model = model();
        model.methods[2].name = "get_book".to_string();

        let err = generate_client(&model).unwrap_err();
        assert!(err.to_string().contains("both map to `get_book`"));
    }

    #[test]
    fn test_repeated_path_field_is_an_error() {
        let mut model = model();
        model.types[0].fields[1].repeated = true;

        let err = generate_client(&model).unwrap_err();
        assert!(err.to_string().contains("`book` of method `GetBook` cannot be repeated"));
    }

    #[test]
    fn test_escape_braces() {
        assert_eq!(escape_braces("/a{b}"), "/a{{b}}");
    }
}
