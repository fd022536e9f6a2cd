//! modelspec inspector
//!
//! Assertions over a model's declared validation and association metadata.
//! The inspector never runs a validation: it only checks what a model
//! declares, through the [`ModelMetadata`] trait.
//!
//! Checks are split in two layers:
//! - [`matcher`]: pure functions returning a [`Verdict`]
//! - [`Inspector`]: runs a matcher and reports the outcome to a
//!   [`ReportSink`], exactly one signal per assertion
//!
//! The free functions in [`assert`] panic on failure and are the usual entry
//! point from `#[test]` functions.

pub mod assert;
mod inspector;
pub mod matcher;
pub mod options;
mod sink;
mod verdict;

pub use assert::*;
pub use inspector::Inspector;
pub use sink::{Check, Collector, PanicSink, Report, ReportSink};
pub use verdict::{Failure, InspectorError, InspectorResult, Verdict};

pub use modelspec_registry::ModelMetadata;

/// Everything a test module needs to write assertions.
pub mod prelude {
    pub use crate::assert::*;
    pub use crate::{Collector, Inspector, ReportSink, Verdict};
    pub use modelspec_core::{options, Options, Value};
    pub use modelspec_registry::{AssociationKind, ConstraintKind, ModelMetadata, Registry};
}
