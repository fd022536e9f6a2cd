//! Panicking assertions for use directly in `#[test]` functions.
//!
//! Each function runs one check through an [`Inspector`] backed by
//! [`PanicSink`](crate::sink::PanicSink), so a failed check panics with the
//! failure message.
//!
//! ```ignore
//! use modelspec_inspector::prelude::*;
//!
//! #[test]
//! fn user_is_validated() {
//!     let registry = Registry::load(Path::new("models.json")).unwrap();
//!     let user = registry.model("User").unwrap();
//!
//!     assert_validates_presence_of(user, "email");
//!     assert_validates_uniqueness_of(user, &["email", "username"]);
//!     assert_association(user, AssociationKind::HasMany, "likes", &options! {
//!         "as" => Value::symbol("likeable"),
//!     });
//! }
//! ```

use modelspec_core::Options;
use modelspec_registry::{AssociationKind, ModelMetadata};

use crate::inspector::Inspector;

/// Panics unless `model` declares association `name` of `kind` with every expected option.
pub fn assert_association<M: ModelMetadata + ?Sized>(
    model: &M,
    kind: AssociationKind,
    name: &str,
    expected_options: &Options,
) {
    let _ = Inspector::new().assert_association(model, kind, name, expected_options);
}

/// Panics unless `model` declares a presence rule over `attribute`.
pub fn assert_validates_presence_of<M: ModelMetadata + ?Sized>(model: &M, attribute: &str) {
    let _ = Inspector::new().assert_validates_presence_of(model, attribute);
}

/// Panics unless `model` declares a numericality rule over `attribute`.
pub fn assert_validates_numericality_of<M: ModelMetadata + ?Sized>(model: &M, attribute: &str) {
    let _ = Inspector::new().assert_validates_numericality_of(model, attribute);
}

/// Panics unless one uniqueness rule covers exactly `attributes`, in any order.
pub fn assert_validates_uniqueness_of<M: ModelMetadata + ?Sized>(model: &M, attributes: &[&str]) {
    let _ = Inspector::new().assert_validates_uniqueness_of(model, attributes);
}

/// Panics unless `model` declares an inclusion rule over `attribute` with
/// exactly `expected_options`; empty options accept any configuration.
pub fn assert_validates_inclusion_of<M: ModelMetadata + ?Sized>(
    model: &M,
    attribute: &str,
    expected_options: &Options,
) {
    let _ = Inspector::new().assert_validates_inclusion_of(model, attribute, expected_options);
}

/// Exclusion counterpart of [`assert_validates_inclusion_of`].
pub fn assert_validates_exclusion_of<M: ModelMetadata + ?Sized>(
    model: &M,
    attribute: &str,
    expected_options: &Options,
) {
    let _ = Inspector::new().assert_validates_exclusion_of(model, attribute, expected_options);
}

/// Confirmation counterpart of [`assert_validates_inclusion_of`].
pub fn assert_validates_confirmation_of<M: ModelMetadata + ?Sized>(
    model: &M,
    attribute: &str,
    expected_options: &Options,
) {
    let _ = Inspector::new().assert_validates_confirmation_of(model, attribute, expected_options);
}

/// Panics on a failed check, and also when `spec` itself is invalid.
pub fn assert_validates<M: ModelMetadata + ?Sized>(model: &M, attribute: &str, spec: &Options) {
    if let Err(e) = Inspector::new().assert_validates(model, attribute, spec) {
        panic!("invalid constraint spec: {}", e);
    }
}
