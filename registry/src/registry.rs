//! The Registry - immutable model metadata lookup.

use crate::ModelDef;
use modelspec_core::ModelId;
use std::collections::HashMap;

/// The Registry provides lookup of declared model metadata.
/// It is immutable after construction.
#[derive(Debug, Default)]
pub struct Registry {
    /// Model definitions by ID.
    models: HashMap<ModelId, ModelDef>,
    /// Model ID lookup by name.
    model_names: HashMap<String, ModelId>,
}

impl Registry {
    /// Create a registry (use RegistryBuilder for construction).
    pub(crate) fn new(
        models: HashMap<ModelId, ModelDef>,
        model_names: HashMap<String, ModelId>,
    ) -> Self {
        Self {
            models,
            model_names,
        }
    }

    /// Get a model definition by name.
    pub fn model(&self, name: &str) -> Option<&ModelDef> {
        self.model_names.get(name).and_then(|id| self.models.get(id))
    }

    /// Get a model definition by ID.
    pub fn get_model(&self, id: ModelId) -> Option<&ModelDef> {
        self.models.get(&id)
    }

    /// Get a model ID by name.
    pub fn get_model_id(&self, name: &str) -> Option<ModelId> {
        self.model_names.get(name).copied()
    }

    /// Get all model definitions, ordered by ID.
    pub fn all_models(&self) -> Vec<&ModelDef> {
        let mut models: Vec<&ModelDef> = self.models.values().collect();
        models.sort_by_key(|m| m.id);
        models
    }

    /// Get the number of models.
    pub fn model_count(&self) -> usize {
        self.models.len()
    }
}
