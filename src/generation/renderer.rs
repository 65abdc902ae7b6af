//! Top-level entry point turning a service model into output files

use std::sync::Arc;

use tracing::{info, warn};

use crate::generation::{
    Dispatcher, FileGenerator, GeneratedFile, GenerationError, Response, formatter,
};
use crate::model::ServiceModel;
use crate::templates::{TemplateEngine, TemplateError, TemplateSet};

/// Produces generated files for one service model.
///
/// Templates are compiled once at construction; a renderer can then serve
/// any number of [`generate`](Self::generate) calls.
pub struct Renderer {
    model: ServiceModel,
    dispatcher: Dispatcher,
}

impl Renderer {
    /// Create a renderer using the embedded template set
    pub fn new(model: ServiceModel) -> Result<Self, TemplateError> {
        Self::with_templates(model, &TemplateSet::embedded())
    }

    /// Create a renderer using a caller-supplied template set
    pub fn with_templates(model: ServiceModel, templates: &TemplateSet) -> Result<Self, TemplateError> {
        let engine = Arc::new(TemplateEngine::load(templates)?);
        Ok(Self {
            model,
            dispatcher: Dispatcher::new(engine),
        })
    }

    /// Add or replace the generator serving `name`
    pub fn register_generator(&mut self, name: impl Into<String>, generator: impl FileGenerator + 'static) {
        self.dispatcher.register(name, generator);
    }

    /// Every file name this renderer can produce, sorted
    pub fn available_files(&self) -> Vec<&str> {
        self.dispatcher.file_names()
    }

    pub fn model(&self) -> &ServiceModel {
        &self.model
    }

    /// Generate and normalize a single file
    pub fn render_file(&self, filename: &str) -> Result<GeneratedFile, GenerationError> {
        let raw = self.dispatcher.render(filename, &self.model)?;
        let data = formatter::normalize(filename, &raw)?;
        Ok(GeneratedFile::new(filename, data))
    }

    /// Generate every requested file into `response`.
    ///
    /// Each name yields exactly one entry: a file in `response.files` or a
    /// message in `response.errors`. A failure never stops the remaining
    /// files. The last error seen is returned, but `response.errors` is the
    /// complete record.
    pub fn generate<S: AsRef<str>>(&self, response: &mut Response, files: &[S]) -> Result<(), GenerationError> {
        let mut last_error = None;

        for filename in files {
            let filename = filename.as_ref();
            match self.render_file(filename) {
                Ok(file) => {
                    info!(file = %filename, bytes = file.data.len(), "Generated file");
                    response.files.push(file);
                }
                Err(err) => {
                    warn!(file = %filename, error = %err, "Failed to generate file");
                    response.errors.push(format!("ERROR {filename}: {err}"));
                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
