//! `provider.rs`: the trait a service implementation provides to the server.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use super::common::{
    doc_attrs, into_bytes, module_doc, operation_idents, parameters_type, responses_type,
    type_ident,
};
use crate::generation::GenerationError;
use crate::model::{ServiceMethod, ServiceModel};

pub fn generate_provider(model: &ServiceModel) -> Result<Vec<u8>, GenerationError> {
    let module_doc = module_doc(&format!(
        "Provider interface implemented by the {} service.",
        model.name
    ));
    let names = operation_idents(model, &[])?;
    let operations = model
        .methods
        .iter()
        .zip(&names)
        .map(|(method, fn_name)| provider_method(model, method, fn_name))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(into_bytes(quote! {
        #module_doc

        #[allow(unused_imports)]
        use crate::types::*;

        /// Errors a provider reports back to the server
        #[derive(Debug, thiserror::Error)]
        pub enum ProviderError {
            #[error("invalid request: {0}")]
            InvalidRequest(String),
            #[error("not found: {0}")]
            NotFound(String),
            #[error("internal error: {0}")]
            Internal(String),
        }

        /// Service operations, one method per API call
        #[async_trait::async_trait]
        pub trait Provider: Send + Sync {
            #(#operations)*
        }
    }))
}

fn provider_method(
    model: &ServiceModel,
    method: &ServiceMethod,
    fn_name: &Ident,
) -> Result<TokenStream, GenerationError> {
    let docs = doc_attrs(method.description.as_deref());
    let output = responses_type(method)?;
    let arguments = match parameters_type(model, method)? {
        Some(ty) => {
            let ty = type_ident(&ty.name)?;
            quote! { , parameters: #ty }
        }
        None => quote! {},
    };

    Ok(quote! {
        #docs
        async fn #fn_name(&self #arguments) -> Result<#output, ProviderError>;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::formatter::format_source;
    use crate::model::ServiceType;

    fn model() -> ServiceModel {
        ServiceModel {
            name: "Bookstore".to_string(),
            types: vec![
                ServiceType {
                    name: "ListShelvesResponse".to_string(),
                    ..Default::default()
                },
                ServiceType {
                    name: "DeleteShelfParameters".to_string(),
                    ..Default::default()
                },
            ],
            methods: vec![
                ServiceMethod {
                    name: "ListShelves".to_string(),
                    path: "/shelves".to_string(),
                    http_method: "GET".to_string(),
                    description: Some("List all shelves".to_string()),
                    responses_type: Some("ListShelvesResponse".to_string()),
                    ..Default::default()
                },
                ServiceMethod {
                    name: "DeleteShelf".to_string(),
                    path: "/shelves/{shelf}".to_string(),
                    http_method: "DELETE".to_string(),
                    parameters_type: Some("DeleteShelfParameters".to_string()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_trait_method_per_operation() {
        let raw = String::from_utf8(generate_provider(&model()).unwrap()).unwrap();
        let source = format_source("provider.rs", &raw).unwrap();

        assert!(source.contains("pub trait Provider: Send + Sync {"));
        assert!(source.contains("/// List all shelves"));
        assert!(source.contains(
            "async fn list_shelves(&self) -> Result<ListShelvesResponse, ProviderError>;"
        ));
        assert!(source.contains("async fn delete_shelf("));
        assert!(source.contains("parameters: DeleteShelfParameters"));
        assert!(source.contains("Result<(), ProviderError>;"));
    }

    #[test]
    fn test_error_enum_is_emitted() {
        let raw = String::from_utf8(generate_provider(&ServiceModel::default()).unwrap()).unwrap();
        let source = format_source("provider.rs", &raw).unwrap();

        assert!(source.contains("pub enum ProviderError {"));
        assert!(source.contains("NotFound(String)"));
    }

    #[test]
    fn test_methods_with_same_trait_name_are_an_error() {
        let mut model = model();
        model.methods[1].name = "listShelves".to_string();

        let err = generate_provider(&model).unwrap_err();
        assert!(err.to_string().contains("both map to `list_shelves`"));
    }
}
