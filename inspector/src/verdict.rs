//! Assertion outcomes and setup errors.

use modelspec_core::Value;
use thiserror::Error;

/// Why a declared-metadata assertion did not hold.
///
/// Failures are expected outcomes in a test run: they are reported through
/// a sink, never raised from inside the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Failure {
    /// No constraints are declared over the attribute.
    #[error("{model} does not have validations for {attribute}")]
    MissingConstraint { model: String, attribute: String },

    /// No association is declared under the name.
    #[error("{model} has no association with {name}")]
    MissingAssociation { model: String, name: String },

    /// Declarations exist but none has the expected kind.
    #[error("{model}.{subject}: expected {expected}, found {}", describe_kinds(.found))]
    KindMismatch {
        model: String,
        subject: String,
        expected: String,
        found: Vec<String>,
    },

    /// The expected kind is declared with a different configuration.
    #[error(
        "{model}.{subject}: {kind} options{} expected {expected}, found {}",
        describe_key(.key),
        describe_actual(.actual)
    )]
    OptionsMismatch {
        model: String,
        subject: String,
        kind: String,
        key: Option<String>,
        expected: Value,
        actual: Option<Value>,
    },
}

impl Failure {
    pub fn missing_constraint(model: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingConstraint {
            model: model.into(),
            attribute: attribute.into(),
        }
    }

    pub fn missing_association(model: impl Into<String>, name: impl Into<String>) -> Self {
        Self::MissingAssociation {
            model: model.into(),
            name: name.into(),
        }
    }

    pub fn kind_mismatch(
        model: impl Into<String>,
        subject: impl Into<String>,
        expected: impl Into<String>,
        found: Vec<String>,
    ) -> Self {
        Self::KindMismatch {
            model: model.into(),
            subject: subject.into(),
            expected: expected.into(),
            found,
        }
    }

    /// Short name of the failure category.
    pub fn category(&self) -> &'static str {
        match self {
            Failure::MissingConstraint { .. } => "missing constraint",
            Failure::MissingAssociation { .. } => "missing association",
            Failure::KindMismatch { .. } => "kind mismatch",
            Failure::OptionsMismatch { .. } => "options mismatch",
        }
    }
}

fn describe_kinds(found: &[String]) -> String {
    if found.is_empty() {
        "nothing".to_string()
    } else {
        found.join(", ")
    }
}

fn describe_key(key: &Option<String>) -> String {
    match key {
        Some(key) => format!(" [{}]", key),
        None => String::new(),
    }
}

fn describe_actual(actual: &Option<Value>) -> String {
    match actual {
        Some(value) => value.to_string(),
        None => "missing".to_string(),
    }
}

/// Outcome of a single assertion.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Verdict {
    Pass,
    Fail(Failure),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Verdict::Fail(_))
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Verdict::Pass => None,
            Verdict::Fail(failure) => Some(failure),
        }
    }

    pub fn into_result(self) -> Result<(), Failure> {
        match self {
            Verdict::Pass => Ok(()),
            Verdict::Fail(failure) => Err(failure),
        }
    }
}

impl From<Result<(), Failure>> for Verdict {
    fn from(result: Result<(), Failure>) -> Self {
        match result {
            Ok(()) => Verdict::Pass,
            Err(failure) => Verdict::Fail(failure),
        }
    }
}

/// Errors in the assertion itself rather than in the model under test.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InspectorError {
    /// The constraint spec names a kind with no entry in the name table.
    #[error("unknown constraint kind name: {0}")]
    UnknownKindName(String),

    /// The constraint spec is not a single `{kind: configuration}` entry.
    #[error("constraint spec must have exactly one entry, found {entries}")]
    MalformedSpec { entries: usize },
}

/// Result type for inspector setup.
pub type InspectorResult<T> = Result<T, InspectorError>;
