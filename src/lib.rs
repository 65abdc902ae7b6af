//! servicegen: renders Rust clients, data types, provider traits and servers
//! from a normalized service model.
//!
//! ```no_run
//! use servicegen::{Renderer, Response, ServiceModel};
//!
//! # fn run(model: ServiceModel) -> Result<(), Box<dyn std::error::Error>> {
//! let renderer = Renderer::new(model)?;
//! let mut response = Response::new();
//! // Per-file failures land in `response.errors`
//! let _ = renderer.generate(&mut response, &["types.rs", "client.rs", "README.md"]);
//! # Ok(())
//! # }
//! ```
#![deny(unsafe_code)]

pub mod core;
pub mod generation;
pub mod generators;
pub mod model;
pub mod templates;

pub use generation::{
    FileGenerator, FormatError, GeneratedFile, GenerationError, Renderer, Response, Strategy,
};
pub use model::ServiceModel;
pub use templates::{TemplateError, TemplateSet};
