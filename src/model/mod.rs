//! The service model consumed by every generator.
//!
//! A [`ServiceModel`] is read-only once built: the renderer borrows it for
//! every file it generates and never changes it. Narrowing a model (for
//! example to a subset of operations) produces a new model.

mod loader;
mod types;

pub use types::*;

impl ServiceModel {
    /// Look up a type by name.
    pub fn find_type(&self, name: &str) -> Option<&ServiceType> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Copy of this model restricted to the selected operations.
    ///
    /// A non-empty `include` keeps only the named methods; `exclude` then
    /// removes methods by name. Types are kept as-is.
    pub fn filter_methods(&self, include: &[String], exclude: &[String]) -> ServiceModel {
        let methods = self
            .methods
            .iter()
            .filter(|m| include.is_empty() || include.contains(&m.name))
            .filter(|m| !exclude.contains(&m.name))
            .cloned()
            .collect();

        ServiceModel {
            methods,
            ..self.clone()
        }
    }
}
