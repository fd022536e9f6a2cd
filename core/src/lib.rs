//! modelspec core types
//!
//! This crate provides the foundational types shared by the registry and the
//! inspector:
//! - Model identifiers (ModelId)
//! - Option values (the Value enum, Options maps, compiled Patterns)
//! - Value construction errors

mod error;
mod id;
mod value;

pub use error::*;
pub use id::*;
pub use value::*;
