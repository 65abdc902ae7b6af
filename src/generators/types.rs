//! `types.rs`: one serde struct per model type.

use proc_macro2::TokenStream;
use quote::quote;

use super::common::{doc_attrs, field_ident, field_type, into_bytes, module_doc, type_ident};
use crate::generation::GenerationError;
use crate::model::{ServiceField, ServiceModel, ServiceType};

pub fn generate_types(model: &ServiceModel) -> Result<Vec<u8>, GenerationError> {
    let module_doc = module_doc(&format!("Data types for the {} service.", model.name));
    let definitions = model
        .types
        .iter()
        .map(type_definition)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(into_bytes(quote! {
        #module_doc

        use serde::{Deserialize, Serialize};

        #(#definitions)*
    }))
}

fn type_definition(ty: &ServiceType) -> Result<TokenStream, GenerationError> {
    let name = type_ident(&ty.name)?;
    let docs = doc_attrs(ty.description.as_deref());
    let fields = ty
        .fields
        .iter()
        .map(field_definition)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(quote! {
        #docs
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct #name {
            #(#fields),*
        }
    })
}

fn field_definition(field: &ServiceField) -> Result<TokenStream, GenerationError> {
    let name = field_ident(&field.name)?;
    let rust_type = field_type(field)?;
    let docs = doc_attrs(field.description.as_deref());

    let wire_name = field.wire_name();
    let rename = (name != wire_name).then(|| quote! { #[serde(rename = #wire_name)] });
    let optional = field
        .optional
        .then(|| quote! { #[serde(default, skip_serializing_if = "Option::is_none")] });

    Ok(quote! {
        #docs
        #rename
        #optional
        pub #name: #rust_type
    })
}
