//! RegistryBuilder for constructing an immutable Registry.

use crate::{
    AssociationDescriptor, AssociationKind, ConstraintDescriptor, ConstraintKind, ModelDef,
    Registry,
};
use modelspec_core::{ModelId, Options, ValueError};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during registry construction.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate model name: {0}")]
    DuplicateModelName(String),

    #[error("Duplicate association {name} on model {model}")]
    DuplicateAssociation { model: String, name: String },

    #[error("{kind} validation on model {model} declares no attributes")]
    EmptyAttributeList { model: String, kind: ConstraintKind },

    #[error("Unknown constraint kind: {0}")]
    UnknownConstraintKind(String),

    #[error("Unknown association kind: {0}")]
    UnknownAssociationKind(String),

    #[error("Invalid option value: {0}")]
    InvalidValue(String),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("failed to read model file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse model file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RegistryError {
    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::InvalidValue(message.into())
    }

    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }
}

/// Result type for registry construction.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Builder for constructing an immutable Registry.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    /// Next model ID to allocate.
    next_model_id: u32,
    /// Models being built.
    models: HashMap<ModelId, ModelDef>,
    /// Model name to ID mapping.
    model_names: HashMap<String, ModelId>,
}

impl RegistryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model definition.
    pub fn add_model(&mut self, name: impl Into<String>) -> ModelBuilder<'_> {
        let name = name.into();
        let id = ModelId::new(self.next_model_id);
        self.next_model_id += 1;

        ModelBuilder {
            builder: self,
            id,
            name,
            constraints: Vec::new(),
            associations: Vec::new(),
        }
    }

    /// Get the ID of a model added so far.
    pub fn get_model_id(&self, name: &str) -> Option<ModelId> {
        self.model_names.get(name).copied()
    }

    /// Build the immutable Registry.
    pub fn build(self) -> RegistryResult<Registry> {
        debug!(models = self.models.len(), "built model registry");
        Ok(Registry::new(self.models, self.model_names))
    }
}

/// Builder for a model definition.
pub struct ModelBuilder<'a> {
    builder: &'a mut RegistryBuilder,
    id: ModelId,
    name: String,
    constraints: Vec<ConstraintDescriptor>,
    associations: Vec<AssociationDescriptor>,
}

impl<'a> ModelBuilder<'a> {
    /// Declare a validation rule of any kind over `attributes`.
    pub fn validates(mut self, kind: ConstraintKind, attributes: &[&str], options: Options) -> Self {
        self.constraints
            .push(ConstraintDescriptor::new(kind, attributes.iter().copied()).with_options(options));
        self
    }

    pub fn validates_presence_of(self, attributes: &[&str]) -> Self {
        self.validates(ConstraintKind::Presence, attributes, Options::new())
    }

    /// Declare one uniqueness rule jointly covering every attribute listed.
    pub fn validates_uniqueness_of(self, attributes: &[&str]) -> Self {
        self.validates(ConstraintKind::Uniqueness, attributes, Options::new())
    }

    pub fn validates_numericality_of(self, attributes: &[&str]) -> Self {
        self.validates(ConstraintKind::Numericality, attributes, Options::new())
    }

    pub fn validates_inclusion_of(self, attributes: &[&str], options: Options) -> Self {
        self.validates(ConstraintKind::Inclusion, attributes, options)
    }

    pub fn validates_exclusion_of(self, attributes: &[&str], options: Options) -> Self {
        self.validates(ConstraintKind::Exclusion, attributes, options)
    }

    pub fn validates_confirmation_of(self, attributes: &[&str], options: Options) -> Self {
        self.validates(ConstraintKind::Confirmation, attributes, options)
    }

    pub fn validates_length_of(self, attributes: &[&str], options: Options) -> Self {
        self.validates(ConstraintKind::Length, attributes, options)
    }

    pub fn validates_format_of(self, attributes: &[&str], options: Options) -> Self {
        self.validates(ConstraintKind::Format, attributes, options)
    }

    /// Declare an association of any kind.
    ///
    /// The target defaults to the association name; a string or symbol
    /// `class_name` option overrides it.
    pub fn association(
        mut self,
        kind: AssociationKind,
        name: impl Into<String>,
        options: Options,
    ) -> Self {
        let mut association = AssociationDescriptor::new(kind, name);
        if let Some(class_name) = options.get("class_name").and_then(|v| v.as_name()) {
            association = association.with_target(class_name);
        }
        self.associations.push(association.with_options(options));
        self
    }

    pub fn has_many(self, name: impl Into<String>, options: Options) -> Self {
        self.association(AssociationKind::HasMany, name, options)
    }

    pub fn has_one(self, name: impl Into<String>, options: Options) -> Self {
        self.association(AssociationKind::HasOne, name, options)
    }

    pub fn belongs_to(self, name: impl Into<String>, options: Options) -> Self {
        self.association(AssociationKind::BelongsTo, name, options)
    }

    pub fn has_and_belongs_to_many(self, name: impl Into<String>, options: Options) -> Self {
        self.association(AssociationKind::HasAndBelongsToMany, name, options)
    }

    /// Finish building this model.
    pub fn done(self) -> RegistryResult<ModelId> {
        // Check for duplicate name
        if self.builder.model_names.contains_key(&self.name) {
            return Err(RegistryError::DuplicateModelName(self.name));
        }

        let mut model_def = ModelDef::new(self.id, self.name.clone());

        for constraint in self.constraints {
            if constraint.attributes.is_empty() {
                return Err(RegistryError::EmptyAttributeList {
                    model: self.name,
                    kind: constraint.kind,
                });
            }
            model_def.push_constraint(constraint);
        }

        for association in self.associations {
            let name = association.name.clone();
            if !model_def.push_association(association) {
                return Err(RegistryError::DuplicateAssociation {
                    model: self.name,
                    name,
                });
            }
        }

        debug!(
            model = %self.name,
            id = %self.id,
            constraints = model_def.all_constraints().count(),
            associations = model_def.all_associations().count(),
            "registered model"
        );

        self.builder.model_names.insert(self.name, self.id);
        self.builder.models.insert(self.id, model_def);

        Ok(self.id)
    }
}
