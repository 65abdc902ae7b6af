//! `server.rs`: an axum router dispatching requests to a `Provider`.
//!
//! Each handler gathers the request's path, query, header and body values
//! into one JSON object keyed by wire name and deserializes the parameters
//! type from it. String-typed fields keep raw text; other fields are parsed
//! as JSON first so numbers and booleans arrive typed.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use super::common::{
    HttpVerb, fields_at, into_bytes, module_doc, operation_idents, parameters_type, path_field,
    type_ident,
};
use super::type_map::scalar_rust_type;
use crate::generation::GenerationError;
use crate::model::{FieldPosition, ServiceField, ServiceMethod, ServiceModel, ServiceType};

/// Free functions the generated server defines besides the handlers
const SERVER_FUNCTIONS: &[&str] = &[
    "router",
    "field_value",
    "insert_values",
    "decode_parameters",
    "error_response",
];

pub fn generate_server(model: &ServiceModel) -> Result<Vec<u8>, GenerationError> {
    let module_doc = module_doc(&format!("HTTP server for the {} service.", model.name));
    let names = operation_idents(model, SERVER_FUNCTIONS)?;
    let routes = routes(model, &names)?;
    let handlers = model
        .methods
        .iter()
        .zip(&names)
        .map(|(method, fn_name)| handler(model, method, fn_name))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(into_bytes(quote! {
        #module_doc

        use std::sync::Arc;

        use axum::Router;
        use axum::extract::State;
        use axum::http::StatusCode;
        use axum::response::{IntoResponse, Response};

        use crate::provider::{Provider, ProviderError};
        #[allow(unused_imports)]
        use crate::types::*;

        #[allow(dead_code)]
        type Object = serde_json::Map<String, serde_json::Value>;

        /// Build a router serving every operation of `provider`
        pub fn router<P: Provider + 'static>(provider: Arc<P>) -> Router {
            Router::new()
                #(#routes)*
                .with_state(provider)
        }

        #(#handlers)*

        #[allow(dead_code)]
        fn field_value(raw: &str, string: bool) -> serde_json::Value {
            if string {
                return serde_json::Value::String(raw.to_string());
            }
            serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
        }

        #[allow(dead_code)]
        fn insert_values(object: &mut Object, name: &str, values: &[&str], string: bool, repeated: bool) {
            let mut values = values.iter().map(|raw| field_value(raw, string));
            if repeated {
                object.insert(name.to_string(), serde_json::Value::Array(values.collect()));
            } else if let Some(value) = values.next() {
                object.insert(name.to_string(), value);
            }
        }

        #[allow(dead_code)]
        fn decode_parameters<T: serde::de::DeserializeOwned>(object: Object) -> Result<T, ProviderError> {
            serde_json::from_value(serde_json::Value::Object(object))
                .map_err(|err| ProviderError::InvalidRequest(err.to_string()))
        }

        fn error_response(err: ProviderError) -> Response {
            let status = match &err {
                ProviderError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                ProviderError::NotFound(_) => StatusCode::NOT_FOUND,
                ProviderError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, err.to_string()).into_response()
        }
    }))
}

/// `.route(...)` calls, one per distinct path in first-seen order.
fn routes(model: &ServiceModel, names: &[Ident]) -> Result<Vec<TokenStream>, GenerationError> {
    let mut grouped: Vec<(String, Vec<(HttpVerb, &ServiceMethod, &Ident)>)> = Vec::new();
    for (method, handler) in model.methods.iter().zip(names) {
        let path = format!("{}{}", model.base_path, method.path);
        let verb = HttpVerb::of(method)?;
        let index = match grouped.iter().position(|(p, _)| *p == path) {
            Some(index) => index,
            None => {
                grouped.push((path.clone(), Vec::new()));
                grouped.len() - 1
            }
        };
        let entries = &mut grouped[index].1;
        if let Some((_, existing, _)) = entries.iter().find(|(v, _, _)| *v == verb) {
            return Err(GenerationError::generator(format!(
                "methods `{}` and `{}` both route {} {path}",
                existing.name,
                method.name,
                verb.constant()
            )));
        }
        entries.push((verb, method, handler));
    }

    let routes = grouped
        .into_iter()
        .map(|(path, entries)| {
            let chain = entries.iter().enumerate().map(|(i, (verb, _, handler))| {
                let routing = verb.routing_fn();
                if i == 0 {
                    quote! { axum::routing::#routing(#handler::<P>) }
                } else {
                    quote! { .#routing(#handler::<P>) }
                }
            });
            quote! { .route(#path, #(#chain)*) }
        })
        .collect();
    Ok(routes)
}

fn handler(
    model: &ServiceModel,
    method: &ServiceMethod,
    fn_name: &Ident,
) -> Result<TokenStream, GenerationError> {
    let params = parameters_type(model, method)?;

    let (extractors, call) = match params {
        Some(ty) => {
            let (extractors, assembly) = request_assembly(method, ty)?;
            let ty_name = type_ident(&ty.name)?;
            let call = quote! {
                let mut object = Object::new();
                #assembly
                let parameters: #ty_name = match decode_parameters(object) {
                    Ok(parameters) => parameters,
                    Err(err) => return error_response(err),
                };
                let result = provider.#fn_name(parameters).await;
            };
            (extractors, call)
        }
        None => (
            Vec::new(),
            quote! { let result = provider.#fn_name().await; },
        ),
    };

    let success = match method.responses_type {
        Some(_) => quote! { Ok(output) => axum::Json(output).into_response(), },
        None => quote! { Ok(()) => StatusCode::NO_CONTENT.into_response(), },
    };

    Ok(quote! {
        async fn #fn_name<P: Provider + 'static>(
            State(provider): State<Arc<P>>,
            #(#extractors,)*
        ) -> Response {
            #call
            match result {
                #success
                Err(err) => error_response(err),
            }
        }
    })
}

/// Extractor arguments and statements filling `object` from the request.
fn request_assembly(
    method: &ServiceMethod,
    ty: &ServiceType,
) -> Result<(Vec<TokenStream>, TokenStream), GenerationError> {
    let mut extractors = Vec::new();
    let mut statements = Vec::new();

    let body_fields = fields_at(ty, FieldPosition::Body);
    let form_fields = fields_at(ty, FieldPosition::FormData);
    if !body_fields.is_empty() && !form_fields.is_empty() {
        return Err(GenerationError::generator(format!(
            "method `{}` mixes body and form data parameters",
            method.name
        )));
    }

    // Body values go in first so explicit path, query and header values win.
    match body_fields.as_slice() {
        [] => {}
        [field] => {
            let wire_name = field.wire_name();
            statements.push(quote! {
                if let Some(axum::Json(value)) = body {
                    object.insert(#wire_name.to_string(), value);
                }
            });
        }
        _ => statements.push(quote! {
            if let Some(axum::Json(serde_json::Value::Object(fields))) = body {
                object.extend(fields);
            }
        }),
    }

    let path_parameters = method.path_parameters();
    if !path_parameters.is_empty() {
        extractors.push(quote! {
            axum::extract::Path(path): axum::extract::Path<std::collections::HashMap<String, String>>
        });
        for placeholder in path_parameters {
            let field = path_field(method, Some(ty), placeholder)?;
            let wire_name = field.wire_name();
            let string = is_string(field);
            statements.push(quote! {
                if let Some(raw) = path.get(#placeholder) {
                    insert_values(&mut object, #wire_name, &[raw.as_str()], #string, false);
                }
            });
        }
    }

    let query_fields = fields_at(ty, FieldPosition::Query);
    if !query_fields.is_empty() {
        extractors.push(quote! {
            axum::extract::Query(query): axum::extract::Query<Vec<(String, String)>>
        });
        statements.extend(query_fields.into_iter().map(|field| {
            let wire_name = field.wire_name();
            let (string, repeated) = (is_string(field), field.repeated);
            quote! {
                let values: Vec<&str> = query
                    .iter()
                    .filter(|(name, _)| name == #wire_name)
                    .map(|(_, value)| value.as_str())
                    .collect();
                insert_values(&mut object, #wire_name, &values, #string, #repeated);
            }
        }));
    }

    let header_fields = fields_at(ty, FieldPosition::Header);
    if !header_fields.is_empty() {
        extractors.push(quote! { headers: axum::http::HeaderMap });
        statements.extend(header_fields.into_iter().map(|field| {
            let wire_name = field.wire_name();
            let (string, repeated) = (is_string(field), field.repeated);
            quote! {
                let values: Vec<&str> = headers
                    .get_all(#wire_name)
                    .iter()
                    .filter_map(|value| value.to_str().ok())
                    .collect();
                insert_values(&mut object, #wire_name, &values, #string, #repeated);
            }
        }));
    }

    if !form_fields.is_empty() {
        extractors.push(quote! {
            axum::Form(form): axum::Form<Vec<(String, String)>>
        });
        statements.extend(form_fields.into_iter().map(|field| {
            let wire_name = field.wire_name();
            let (string, repeated) = (is_string(field), field.repeated);
            quote! {
                let values: Vec<&str> = form
                    .iter()
                    .filter(|(name, _)| name == #wire_name)
                    .map(|(_, value)| value.as_str())
                    .collect();
                insert_values(&mut object, #wire_name, &values, #string, #repeated);
            }
        }));
    } else if !body_fields.is_empty() {
        // The body extractor consumes the request, so it goes last.
        extractors.push(quote! {
            body: Option<axum::Json<serde_json::Value>>
        });
    }

    Ok((extractors, quote! { #(#statements)* }))
}

fn is_string(field: &ServiceField) -> bool {
    scalar_rust_type(&field.type_name, field.format.as_deref()) == "String"
}
