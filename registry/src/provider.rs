//! The metadata provider interface.

use crate::{AssociationDescriptor, ConstraintDescriptor, ModelDef};

/// Read-only access to the metadata declared on one model.
///
/// Implement this for whatever modeling layer holds the declarations;
/// [`ModelDef`] is the in-memory implementation.
pub trait ModelMetadata {
    /// Name used in assertion messages.
    fn model_name(&self) -> &str;

    /// Constraints declared over `attribute`, in declaration order.
    ///
    /// An attribute with no declarations yields an empty sequence.
    fn constraints_for(&self, attribute: &str) -> Vec<&ConstraintDescriptor>;

    /// The association declared under `name`, if any.
    fn association_for(&self, name: &str) -> Option<&AssociationDescriptor>;
}

impl ModelMetadata for ModelDef {
    fn model_name(&self) -> &str {
        &self.name
    }

    fn constraints_for(&self, attribute: &str) -> Vec<&ConstraintDescriptor> {
        self.get_constraints(attribute)
    }

    fn association_for(&self, name: &str) -> Option<&AssociationDescriptor> {
        self.get_association(name)
    }
}

impl<T: ModelMetadata + ?Sized> ModelMetadata for &T {
    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    fn constraints_for(&self, attribute: &str) -> Vec<&ConstraintDescriptor> {
        (**self).constraints_for(attribute)
    }

    fn association_for(&self, name: &str) -> Option<&AssociationDescriptor> {
        (**self).association_for(name)
    }
}
