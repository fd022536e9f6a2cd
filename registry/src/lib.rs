//! modelspec registry
//!
//! Declared model metadata: constraint and association descriptors, the
//! `ModelMetadata` provider trait, and an in-memory `Registry` built with
//! `RegistryBuilder` or loaded from a JSON model file.

mod builder;
mod loader;
mod provider;
mod registry;
mod types;

pub use builder::{ModelBuilder, RegistryBuilder, RegistryError, RegistryResult};
pub use provider::ModelMetadata;
pub use registry::Registry;
pub use types::*;
