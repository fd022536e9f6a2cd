//! Shared model fixtures.
//!
//! `User` and `Like` mirror a small social schema: users have polymorphic
//! likes, likes belong to a user and to whatever was liked. `Account`
//! declares one rule of every remaining kind. `UnvalidatedThing` declares
//! nothing at all.

use std::path::PathBuf;

use modelspec_core::{options, Value};
use modelspec_registry::{Registry, RegistryBuilder, RegistryResult};
use tracing_subscriber::EnvFilter;

/// Source of the email format rule declared on `Account`.
pub const EMAIL_PATTERN: &str = r"\A[^@\s]+@[^@\s]+\z";

/// Build the fixture registry in code.
pub fn registry() -> RegistryResult<Registry> {
    let mut builder = RegistryBuilder::new();

    builder
        .add_model("User")
        .has_many("likes", options! { "as" => Value::symbol("likeable") })
        .validates_presence_of(&["email"])
        .validates_uniqueness_of(&["username", "email"])
        .done()?;

    builder
        .add_model("Like")
        .belongs_to("likeable", options! { "polymorphic" => true })
        .belongs_to("user", options!())
        .validates_presence_of(&["email"])
        .validates_uniqueness_of(&["username", "email"])
        .done()?;

    builder
        .add_model("Account")
        .belongs_to("owner", options! { "class_name" => "User" })
        .has_one("profile", options!())
        .has_and_belongs_to_many("roles", options!())
        .validates_numericality_of(&["balance"])
        .validates_inclusion_of(&["admin"], options! { "in" => vec![true, false] })
        .validates_exclusion_of(&["subdomain"], options! { "in" => vec!["www", "admin"] })
        .validates_confirmation_of(&["password"], options!())
        .validates_length_of(&["password"], options! { "within" => 8..=64 })
        .validates_format_of(&["email"], options! { "with" => Value::pattern(EMAIL_PATTERN)? })
        .done()?;

    builder.add_model("UnvalidatedThing").done()?;

    builder.build()
}

/// Directory holding the fixture model files.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Install a fmt subscriber writing through the test harness.
///
/// Filtered by `RUST_LOG`; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
