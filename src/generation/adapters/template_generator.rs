//! Adapter exposing one compiled template as a [`FileGenerator`]

use std::sync::Arc;

use crate::core::error::error_chain;
use crate::generation::{FileGenerator, GenerationError, Strategy};
use crate::model::ServiceModel;
use crate::templates::TemplateEngine;

/// Renders a single named template from a shared engine
pub struct TemplateGenerator {
    engine: Arc<TemplateEngine>,
    name: String,
}

impl TemplateGenerator {
    pub fn new(engine: Arc<TemplateEngine>, name: impl Into<String>) -> Self {
        Self {
            engine,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FileGenerator for TemplateGenerator {
    fn generate(&self, model: &ServiceModel) -> Result<Vec<u8>, GenerationError> {
        self.engine
            .render(&self.name, model)
            .map(String::into_bytes)
            .map_err(|e| GenerationError::TemplateExecution {
                name: self.name.clone(),
                message: error_chain(&e),
            })
    }

    fn strategy(&self) -> Strategy {
        Strategy::Template
    }
}
