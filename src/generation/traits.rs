//! Port interfaces for the generation domain

use std::fmt;

use crate::generation::GenerationError;
use crate::model::ServiceModel;

/// How a file generator produces its output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Hand-written code builds the file
    Programmatic,
    /// A compiled template renders the file
    Template,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Programmatic => write!(f, "programmatic"),
            Strategy::Template => write!(f, "template"),
        }
    }
}

/// Produces the raw, unformatted bytes of one output file from the model.
///
/// Any function or closure with the matching signature is a programmatic
/// generator.
pub trait FileGenerator: Send + Sync {
    fn generate(&self, model: &ServiceModel) -> Result<Vec<u8>, GenerationError>;

    fn strategy(&self) -> Strategy {
        Strategy::Programmatic
    }
}

impl<F> FileGenerator for F
where
    F: Fn(&ServiceModel) -> Result<Vec<u8>, GenerationError> + Send + Sync,
{
    fn generate(&self, model: &ServiceModel) -> Result<Vec<u8>, GenerationError> {
        self(model)
    }
}
