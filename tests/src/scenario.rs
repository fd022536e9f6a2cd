//! Scenario definition and runner.
//!
//! A scenario loads a model file (or takes a registry built in code), then
//! runs a list of steps through one [`Inspector`] backed by a [`Collector`].
//! Each step names a model, an expectation and whether it should pass.

use std::path::{Path, PathBuf};

use modelspec_core::Options;
use modelspec_inspector::{Collector, Inspector, Verdict};
use modelspec_registry::{AssociationKind, ModelDef, Registry};

use crate::error::{SuiteError, SuiteResult};
use crate::fixtures::fixtures_root;

/// What a step asserts about a model.
#[derive(Debug, Clone)]
pub enum Expectation {
    Association {
        kind: AssociationKind,
        name: String,
        options: Options,
    },
    Presence(String),
    Numericality(String),
    Uniqueness(Vec<String>),
    Inclusion {
        attribute: String,
        options: Options,
    },
    Exclusion {
        attribute: String,
        options: Options,
    },
    Confirmation {
        attribute: String,
        options: Options,
    },
    Validates {
        attribute: String,
        spec: Options,
    },
}

impl Expectation {
    pub fn association(kind: AssociationKind, name: impl Into<String>, options: Options) -> Self {
        Self::Association {
            kind,
            name: name.into(),
            options,
        }
    }

    pub fn presence(attribute: impl Into<String>) -> Self {
        Self::Presence(attribute.into())
    }

    pub fn numericality(attribute: impl Into<String>) -> Self {
        Self::Numericality(attribute.into())
    }

    pub fn uniqueness(attributes: &[&str]) -> Self {
        Self::Uniqueness(attributes.iter().map(|a| a.to_string()).collect())
    }

    pub fn inclusion(attribute: impl Into<String>, options: Options) -> Self {
        Self::Inclusion {
            attribute: attribute.into(),
            options,
        }
    }

    pub fn exclusion(attribute: impl Into<String>, options: Options) -> Self {
        Self::Exclusion {
            attribute: attribute.into(),
            options,
        }
    }

    pub fn confirmation(attribute: impl Into<String>, options: Options) -> Self {
        Self::Confirmation {
            attribute: attribute.into(),
            options,
        }
    }

    pub fn validates(attribute: impl Into<String>, spec: Options) -> Self {
        Self::Validates {
            attribute: attribute.into(),
            spec,
        }
    }
}

/// A step in a scenario.
#[derive(Debug, Clone)]
pub struct Step {
    /// Step name (for reporting).
    pub name: String,
    pub model: String,
    pub expectation: Expectation,
    /// Whether the assertion should hold.
    pub should_pass: bool,
}

enum Models {
    File(PathBuf),
    Registry(Registry),
}

/// A complete test scenario.
pub struct Scenario {
    /// Scenario name (for reporting).
    name: String,
    models: Option<Models>,
    steps: Vec<Step>,
    /// Base path for resolving relative model file paths.
    base_path: PathBuf,
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            models: None,
            steps: Vec::new(),
            base_path: fixtures_root(),
        }
    }

    /// Set the base path for resolving relative paths.
    pub fn base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = path.into();
        self
    }

    /// Load models from a JSON model file (relative to the fixtures directory).
    pub fn models(mut self, path: impl Into<PathBuf>) -> Self {
        self.models = Some(Models::File(path.into()));
        self
    }

    /// Use a registry built in code.
    pub fn registry(mut self, registry: Registry) -> Self {
        self.models = Some(Models::Registry(registry));
        self
    }

    /// Add a step that must pass.
    pub fn step(self, name: impl Into<String>, model: impl Into<String>, expectation: Expectation) -> Self {
        self.push(name.into(), model.into(), expectation, true)
    }

    /// Add a step that must fail.
    pub fn rejects(
        self,
        name: impl Into<String>,
        model: impl Into<String>,
        expectation: Expectation,
    ) -> Self {
        self.push(name.into(), model.into(), expectation, false)
    }

    fn push(mut self, name: String, model: String, expectation: Expectation, should_pass: bool) -> Self {
        self.steps.push(Step {
            name,
            model,
            expectation,
            should_pass,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run every step and return the collected reports.
    pub fn run(&self) -> SuiteResult<Collector> {
        let loaded;
        let registry = match &self.models {
            Some(Models::Registry(registry)) => registry,
            Some(Models::File(path)) => {
                let path = self.resolve_path(path);
                loaded = Registry::load(&path).map_err(|e| SuiteError::models_load(&path, e))?;
                &loaded
            }
            None => return Err(SuiteError::missing_models(&self.name)),
        };

        let mut inspector = Inspector::with_sink(Collector::new());
        for step in &self.steps {
            let model = registry
                .model(&step.model)
                .ok_or_else(|| SuiteError::model_not_found(&step.name, &step.model))?;
            let verdict = run_step(&mut inspector, model, step)?;

            match (&verdict, step.should_pass) {
                (Verdict::Pass, false) => {
                    return Err(SuiteError::unexpected_outcome(&step.name, "failure", "pass"));
                }
                (Verdict::Fail(failure), true) => {
                    return Err(SuiteError::unexpected_outcome(
                        &step.name,
                        "pass",
                        failure.to_string(),
                    ));
                }
                _ => {}
            }
        }

        let collector = inspector.into_sink();
        if collector.len() != self.steps.len() {
            return Err(SuiteError::SignalCount {
                expected: self.steps.len(),
                received: collector.len(),
            });
        }
        Ok(collector)
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }
}

fn run_step(
    inspector: &mut Inspector<Collector>,
    model: &ModelDef,
    step: &Step,
) -> SuiteResult<Verdict> {
    let verdict = match &step.expectation {
        Expectation::Association {
            kind,
            name,
            options,
        } => inspector.assert_association(model, *kind, name, options),
        Expectation::Presence(attribute) => inspector.assert_validates_presence_of(model, attribute),
        Expectation::Numericality(attribute) => {
            inspector.assert_validates_numericality_of(model, attribute)
        }
        Expectation::Uniqueness(attributes) => {
            let attributes: Vec<&str> = attributes.iter().map(String::as_str).collect();
            inspector.assert_validates_uniqueness_of(model, &attributes)
        }
        Expectation::Inclusion { attribute, options } => {
            inspector.assert_validates_inclusion_of(model, attribute, options)
        }
        Expectation::Exclusion { attribute, options } => {
            inspector.assert_validates_exclusion_of(model, attribute, options)
        }
        Expectation::Confirmation { attribute, options } => {
            inspector.assert_validates_confirmation_of(model, attribute, options)
        }
        Expectation::Validates { attribute, spec } => inspector
            .assert_validates(model, attribute, spec)
            .map_err(|e| SuiteError::invalid_spec(&step.name, e))?,
    };
    Ok(verdict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use modelspec_core::options;

    #[test]
    fn test_scenario_collects_steps() {
        let scenario = Scenario::new("collect")
            .step("presence", "User", Expectation::presence("email"))
            .rejects("missing", "User", Expectation::presence("bio"));

        assert_eq!(scenario.name(), "collect");
        assert_eq!(scenario.steps().len(), 2);
        assert!(scenario.steps()[0].should_pass);
        assert!(!scenario.steps()[1].should_pass);
    }

    #[test]
    fn test_missing_models() {
        let result = Scenario::new("empty").run();
        assert!(matches!(result, Err(SuiteError::MissingModels { .. })));
    }

    #[test]
    fn test_unexpected_pass_is_an_error() {
        let result = Scenario::new("wrong")
            .registry(fixtures::registry().unwrap())
            .rejects("presence", "User", Expectation::presence("email"))
            .run();

        assert!(matches!(
            result,
            Err(SuiteError::UnexpectedOutcome { ref step, expected: "failure", .. }) if step == "presence"
        ));
    }

    #[test]
    fn test_unknown_model() {
        let result = Scenario::new("unknown")
            .registry(fixtures::registry().unwrap())
            .step("ghost", "Ghost", Expectation::presence("email"))
            .run();

        assert!(matches!(result, Err(SuiteError::ModelNotFound { .. })));
    }

    #[test]
    fn test_invalid_spec() {
        let result = Scenario::new("spec")
            .registry(fixtures::registry().unwrap())
            .step("bad", "User", Expectation::validates("email", options! { "size" => 3 }))
            .run();

        assert!(matches!(result, Err(SuiteError::InvalidSpec { .. })));
    }
}
