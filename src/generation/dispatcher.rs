//! Routing of file names to the generator that produces them

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::generation::{FileGenerator, GenerationError, Strategy, TemplateGenerator};
use crate::generators::BUILTIN_GENERATORS;
use crate::model::ServiceModel;
use crate::templates::TemplateEngine;

/// Maps every producible file name to exactly one generator.
///
/// Templates are registered first and the built-in programmatic generators
/// after them, so a template can never shadow a reserved name.
pub struct Dispatcher {
    generators: BTreeMap<String, Box<dyn FileGenerator>>,
}

impl Dispatcher {
    /// Create a dispatcher over `engine`'s templates and the built-ins
    pub fn new(engine: Arc<TemplateEngine>) -> Self {
        let mut dispatcher = Self {
            generators: BTreeMap::new(),
        };

        for name in engine.template_names() {
            let generator = TemplateGenerator::new(Arc::clone(&engine), name.clone());
            dispatcher.register(name, generator);
        }
        for &(name, generator) in &BUILTIN_GENERATORS {
            if dispatcher.generators.contains_key(name) {
                debug!(file = %name, "Built-in generator replaces template of the same name");
            }
            dispatcher.register(name, generator);
        }

        dispatcher
    }

    /// Register a generator, replacing any previous one for `name`
    pub fn register(&mut self, name: impl Into<String>, generator: impl FileGenerator + 'static) {
        self.generators.insert(name.into(), Box::new(generator));
    }

    /// Produce the raw bytes of `filename`
    pub fn render(&self, filename: &str, model: &ServiceModel) -> Result<Vec<u8>, GenerationError> {
        let generator = self
            .generators
            .get(filename)
            .ok_or_else(|| GenerationError::UnknownFile(filename.to_string()))?;

        debug!(file = %filename, strategy = %generator.strategy(), "Rendering file");
        generator.generate(model)
    }

    /// Every file name this dispatcher can produce, sorted
    pub fn file_names(&self) -> Vec<&str> {
        self.generators.keys().map(String::as_str).collect()
    }

    pub fn strategy_for(&self, filename: &str) -> Option<Strategy> {
        self.generators.get(filename).map(|g| g.strategy())
    }
}
