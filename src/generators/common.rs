//! Building blocks shared by the programmatic generators.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use crate::core::utils::{sanitize_rust_field_name, to_proper_case};
use crate::generation::GenerationError;
use crate::generators::type_map::field_rust_type;
use crate::model::{FieldPosition, ServiceField, ServiceMethod, ServiceModel, ServiceType};

/// Parse `name` as an identifier, rejecting keywords and malformed names.
pub(crate) fn ident(name: &str) -> Result<Ident, GenerationError> {
    syn::parse_str::<Ident>(name).map_err(|_| GenerationError::InvalidIdentifier(name.to_string()))
}

/// PascalCase type identifier
pub(crate) fn type_ident(name: &str) -> Result<Ident, GenerationError> {
    ident(&to_proper_case(name))
}

/// snake_case field or function identifier
pub(crate) fn field_ident(name: &str) -> Result<Ident, GenerationError> {
    ident(&sanitize_rust_field_name(name))
}

/// Rust type of a model field
pub(crate) fn field_type(field: &ServiceField) -> Result<syn::Type, GenerationError> {
    let rust_type = field_rust_type(field);
    syn::parse_str::<syn::Type>(&rust_type).map_err(|_| {
        GenerationError::generator(format!(
            "field `{}` has unusable type `{}`",
            field.name, field.type_name
        ))
    })
}

/// `#[doc]` attributes for an optional description, one per line
pub(crate) fn doc_attrs(text: Option<&str>) -> TokenStream {
    let lines = text
        .into_iter()
        .flat_map(str::lines)
        .map(|line| format!(" {}", line.trim_end()));
    quote! { #(#[doc = #lines])* }
}

/// Module-level doc attribute
pub(crate) fn module_doc(text: &str) -> TokenStream {
    let text = format!(" {text}");
    quote! { #![doc = #text] }
}

/// Parameters type of a method, if it declares one
pub(crate) fn parameters_type<'a>(
    model: &'a ServiceModel,
    method: &ServiceMethod,
) -> Result<Option<&'a ServiceType>, GenerationError> {
    method
        .parameters_type
        .as_deref()
        .map(|name| lookup_type(model, method, name))
        .transpose()
}

fn lookup_type<'a>(
    model: &'a ServiceModel,
    method: &ServiceMethod,
    name: &str,
) -> Result<&'a ServiceType, GenerationError> {
    model.find_type(name).ok_or_else(|| {
        GenerationError::generator(format!(
            "method `{}` references unknown type `{name}`",
            method.name
        ))
    })
}

/// Return type of a method: its responses type, or `()`
pub(crate) fn responses_type(method: &ServiceMethod) -> Result<TokenStream, GenerationError> {
    match method.responses_type.as_deref() {
        Some(name) => {
            let ty = type_ident(name)?;
            Ok(quote! { #ty })
        }
        None => Ok(quote! { () }),
    }
}

/// Fields of `ty` travelling at `position`
pub(crate) fn fields_at(ty: &ServiceType, position: FieldPosition) -> Vec<&ServiceField> {
    ty.fields.iter().filter(|f| f.position == position).collect()
}

/// Field bound to a `{placeholder}` in a method path
pub(crate) fn path_field<'a>(
    method: &ServiceMethod,
    params: Option<&'a ServiceType>,
    placeholder: &str,
) -> Result<&'a ServiceField, GenerationError> {
    let field = params
        .and_then(|ty| {
            ty.fields.iter().find(|f| {
                f.name == placeholder
                    || f.wire_name() == placeholder
                    || sanitize_rust_field_name(&f.name) == sanitize_rust_field_name(placeholder)
            })
        })
        .ok_or_else(|| {
            GenerationError::generator(format!(
                "path parameter `{placeholder}` of method `{}` has no matching parameter field",
                method.name
            ))
        })?;

    if field.repeated {
        return Err(GenerationError::generator(format!(
            "path parameter `{placeholder}` of method `{}` cannot be repeated",
            method.name
        )));
    }
    Ok(field)
}

/// Function identifiers for every method, in model order.
///
/// Two methods mapping to the same identifier, or a method colliding with
/// one of the `reserved` names the generated file defines itself, is an error.
pub(crate) fn operation_idents(
    model: &ServiceModel,
    reserved: &[&str],
) -> Result<Vec<Ident>, GenerationError> {
    let mut idents: Vec<Ident> = Vec::with_capacity(model.methods.len());
    for (index, method) in model.methods.iter().enumerate() {
        let name = field_ident(&method.name)?;
        if reserved.iter().any(|r| name == *r) {
            return Err(GenerationError::generator(format!(
                "method `{}` maps to `{name}`, which is already defined by the generated code",
                method.name
            )));
        }
        if let Some(earlier) = idents.iter().position(|i| *i == name) {
            return Err(GenerationError::generator(format!(
                "methods `{}` and `{}` both map to `{name}`",
                model.methods[earlier].name, model.methods[index].name
            )));
        }
        idents.push(name);
    }
    Ok(idents)
}

/// Iterator expression over the present values of a field, so optional and
/// repeated fields can be handled uniformly.
pub(crate) fn field_values(receiver: &TokenStream, field: &ServiceField) -> Result<TokenStream, GenerationError> {
    let name = field_ident(&field.name)?;
    Ok(match (field.repeated, field.optional) {
        (false, false) => quote! { std::iter::once(&#receiver.#name) },
        (true, true) => quote! { #receiver.#name.iter().flatten() },
        _ => quote! { #receiver.#name.iter() },
    })
}

/// HTTP verbs the generated client and server support
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HttpVerb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
}

impl HttpVerb {
    pub(crate) fn of(method: &ServiceMethod) -> Result<Self, GenerationError> {
        match method.http_method.trim().to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            "TRACE" => Ok(Self::Trace),
            other => Err(GenerationError::generator(format!(
                "method `{}` uses unsupported HTTP verb `{other}`",
                method.name
            ))),
        }
    }

    /// Upper-case constant name (`reqwest::Method::GET`)
    pub(crate) fn constant(self) -> Ident {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
        };
        Ident::new(name, proc_macro2::Span::call_site())
    }

    /// Lower-case routing function name (`axum::routing::get`)
    pub(crate) fn routing_fn(self) -> Ident {
        let name = self.constant().to_string().to_lowercase();
        Ident::new(&name, proc_macro2::Span::call_site())
    }
}

/// Serialize generated tokens for the formatter
pub(crate) fn into_bytes(tokens: TokenStream) -> Vec<u8> {
    tokens.to_string().into_bytes()
}
