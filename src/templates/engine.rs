//! Compiled template table.

use tera::{Context, Tera};
use tracing::{debug, info};

use super::{TemplateError, TemplateSet, helpers::register_helpers};
use crate::core::error::error_chain;
use crate::model::ServiceModel;

/// Every template of a [`TemplateSet`], compiled and bound to the helper set.
///
/// Built once, read-only afterwards. Templates are addressed by the exact
/// output file name they produce.
#[derive(Debug)]
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Decode and compile a template set.
    ///
    /// Any undecodable or uncompilable entry fails the whole load.
    pub fn load(templates: &TemplateSet) -> Result<Self, TemplateError> {
        let decoded = templates.decode_all()?;

        let mut tera = Tera::default();
        // Output is source text, never HTML
        tera.autoescape_on(vec![]);
        register_helpers(&mut tera);

        for (name, source) in &decoded {
            tera.add_raw_template(name, source)
                .map_err(|e| TemplateError::Compile {
                    name: name.clone(),
                    message: error_chain(&e),
                })?;
            debug!(template = %name, "Compiled template");
        }

        info!(count = decoded.len(), "Loaded templates");
        Ok(Self { tera })
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Names of all compiled templates, sorted
    pub fn template_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tera.get_template_names().map(String::from).collect();
        names.sort();
        names
    }

    /// Execute a template with the model bound as `model`.
    pub fn render(&self, name: &str, model: &ServiceModel) -> tera::Result<String> {
        let mut context = Context::new();
        context.insert("model", model);
        self.tera.render(name, &context)
    }
}
