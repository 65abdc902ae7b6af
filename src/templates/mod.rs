//! Template store and engine.
//!
//! Templates are embedded at build time ([`TemplateSet::embedded`]), decoded
//! and compiled once into a [`TemplateEngine`], then executed against the
//! service model with the fixed [`helpers`] set.

pub mod engine;
pub mod errors;
pub mod helpers;
pub mod store;

pub use engine::TemplateEngine;
pub use errors::TemplateError;
pub use store::{EncodedTemplate, TemplateEncoding, TemplateSet};
