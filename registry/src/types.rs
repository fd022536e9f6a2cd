//! Descriptor types.

use modelspec_core::{ModelId, Options};
use std::collections::HashMap;
use std::fmt;

/// Kind of a declared validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstraintKind {
    Presence,
    Absence,
    Acceptance,
    Confirmation,
    Exclusion,
    Format,
    Inclusion,
    Length,
    Numericality,
    Uniqueness,
}

impl ConstraintKind {
    /// Every kind, in declaration order.
    pub const ALL: [ConstraintKind; 10] = [
        ConstraintKind::Presence,
        ConstraintKind::Absence,
        ConstraintKind::Acceptance,
        ConstraintKind::Confirmation,
        ConstraintKind::Exclusion,
        ConstraintKind::Format,
        ConstraintKind::Inclusion,
        ConstraintKind::Length,
        ConstraintKind::Numericality,
        ConstraintKind::Uniqueness,
    ];

    /// The name used in constraint specs and model files.
    pub fn name(&self) -> &'static str {
        match self {
            ConstraintKind::Presence => "presence",
            ConstraintKind::Absence => "absence",
            ConstraintKind::Acceptance => "acceptance",
            ConstraintKind::Confirmation => "confirmation",
            ConstraintKind::Exclusion => "exclusion",
            ConstraintKind::Format => "format",
            ConstraintKind::Inclusion => "inclusion",
            ConstraintKind::Length => "length",
            ConstraintKind::Numericality => "numericality",
            ConstraintKind::Uniqueness => "uniqueness",
        }
    }

    /// Resolve a kind from its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of a declared association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssociationKind {
    HasMany,
    HasOne,
    BelongsTo,
    HasAndBelongsToMany,
}

impl AssociationKind {
    pub const ALL: [AssociationKind; 4] = [
        AssociationKind::HasMany,
        AssociationKind::HasOne,
        AssociationKind::BelongsTo,
        AssociationKind::HasAndBelongsToMany,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AssociationKind::HasMany => "has_many",
            AssociationKind::HasOne => "has_one",
            AssociationKind::BelongsTo => "belongs_to",
            AssociationKind::HasAndBelongsToMany => "has_and_belongs_to_many",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for AssociationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One declared validation rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintDescriptor {
    /// Kind of rule.
    pub kind: ConstraintKind,
    /// Every attribute the rule was declared over, in declaration order.
    pub attributes: Vec<String>,
    /// Kind-specific configuration.
    pub options: Options,
}

impl ConstraintDescriptor {
    pub fn new<I, S>(kind: ConstraintKind, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            attributes: attributes.into_iter().map(Into::into).collect(),
            options: Options::new(),
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }
}

/// One declared association.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationDescriptor {
    /// Kind of association.
    pub kind: AssociationKind,
    /// Association name on the declaring model.
    pub name: String,
    /// Name of the associated model (or the polymorphic role).
    pub target: String,
    /// Declared options (`as`, `polymorphic`, `class_name`, ...).
    pub options: Options,
}

impl AssociationDescriptor {
    pub fn new(kind: AssociationKind, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind,
            target: name.clone(),
            name,
            options: Options::new(),
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Whether the association was declared `polymorphic: true`.
    pub fn is_polymorphic(&self) -> bool {
        self.options
            .get("polymorphic")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}

/// Model definition: every constraint and association declared on one model.
#[derive(Debug, Clone)]
pub struct ModelDef {
    /// Unique identifier.
    pub id: ModelId,
    /// Model name.
    pub name: String,
    /// Constraints in declaration order.
    constraints: Vec<ConstraintDescriptor>,
    /// Constraint indices by covered attribute.
    constraints_by_attr: HashMap<String, Vec<usize>>,
    /// Associations in declaration order.
    associations: Vec<AssociationDescriptor>,
    /// Association index by name.
    association_names: HashMap<String, usize>,
}

impl ModelDef {
    pub fn new(id: ModelId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            constraints: Vec::new(),
            constraints_by_attr: HashMap::new(),
            associations: Vec::new(),
            association_names: HashMap::new(),
        }
    }

    /// Append a constraint, indexing it under each attribute it covers.
    pub(crate) fn push_constraint(&mut self, constraint: ConstraintDescriptor) {
        let index = self.constraints.len();
        for attribute in &constraint.attributes {
            let slots = self.constraints_by_attr.entry(attribute.clone()).or_default();
            // An attribute listed twice in one declaration is indexed once.
            if slots.last() != Some(&index) {
                slots.push(index);
            }
        }
        self.constraints.push(constraint);
    }

    /// Append an association. Returns false if the name is already taken.
    pub(crate) fn push_association(&mut self, association: AssociationDescriptor) -> bool {
        if self.association_names.contains_key(&association.name) {
            return false;
        }
        self.association_names
            .insert(association.name.clone(), self.associations.len());
        self.associations.push(association);
        true
    }

    /// Get the constraints declared over an attribute, in declaration order.
    pub fn get_constraints(&self, attribute: &str) -> Vec<&ConstraintDescriptor> {
        self.constraints_by_attr
            .get(attribute)
            .map(|indices| indices.iter().map(|&i| &self.constraints[i]).collect())
            .unwrap_or_default()
    }

    /// Get an association by name.
    pub fn get_association(&self, name: &str) -> Option<&AssociationDescriptor> {
        self.association_names
            .get(name)
            .map(|&i| &self.associations[i])
    }

    /// Get all constraints.
    pub fn all_constraints(&self) -> impl Iterator<Item = &ConstraintDescriptor> {
        self.constraints.iter()
    }

    /// Get all associations.
    pub fn all_associations(&self) -> impl Iterator<Item = &AssociationDescriptor> {
        self.associations.iter()
    }

    /// Check if any constraint is declared over an attribute.
    pub fn has_constraints(&self, attribute: &str) -> bool {
        self.constraints_by_attr.contains_key(attribute)
    }
}
