//! Adapters bridging other layers into the generation domain

pub mod template_generator;

pub use template_generator::TemplateGenerator;
