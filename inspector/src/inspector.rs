//! Assertion front end.

use modelspec_core::Options;
use modelspec_registry::{AssociationKind, ModelMetadata};
use tracing::debug;

use crate::matcher;
use crate::sink::{Check, PanicSink, ReportSink};
use crate::verdict::{InspectorResult, Verdict};

/// Runs assertions against model metadata and reports each outcome to a
/// sink.
///
/// Every assertion emits exactly one signal, then hands the verdict back to
/// the caller.
#[derive(Debug, Default)]
pub struct Inspector<S = PanicSink> {
    sink: S,
}

impl Inspector<PanicSink> {
    /// Inspector that panics on the first failed assertion.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: ReportSink> Inspector<S> {
    pub fn with_sink(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn assert_association<M: ModelMetadata + ?Sized>(
        &mut self,
        model: &M,
        kind: AssociationKind,
        name: &str,
        expected_options: &Options,
    ) -> Verdict {
        let verdict = matcher::association(model, kind, name, expected_options);
        self.report(Check::Association, model, name, verdict)
    }

    pub fn assert_validates_presence_of<M: ModelMetadata + ?Sized>(
        &mut self,
        model: &M,
        attribute: &str,
    ) -> Verdict {
        let verdict = matcher::presence(model, attribute);
        self.report(Check::Presence, model, attribute, verdict)
    }

    pub fn assert_validates_numericality_of<M: ModelMetadata + ?Sized>(
        &mut self,
        model: &M,
        attribute: &str,
    ) -> Verdict {
        let verdict = matcher::numericality(model, attribute);
        self.report(Check::Numericality, model, attribute, verdict)
    }

    pub fn assert_validates_uniqueness_of<M: ModelMetadata + ?Sized>(
        &mut self,
        model: &M,
        attributes: &[&str],
    ) -> Verdict {
        let verdict = matcher::uniqueness(model, attributes);
        self.report(Check::Uniqueness, model, &attributes.join(", "), verdict)
    }

    pub fn assert_validates_inclusion_of<M: ModelMetadata + ?Sized>(
        &mut self,
        model: &M,
        attribute: &str,
        expected_options: &Options,
    ) -> Verdict {
        let verdict = matcher::inclusion(model, attribute, expected_options);
        self.report(Check::Inclusion, model, attribute, verdict)
    }

    pub fn assert_validates_exclusion_of<M: ModelMetadata + ?Sized>(
        &mut self,
        model: &M,
        attribute: &str,
        expected_options: &Options,
    ) -> Verdict {
        let verdict = matcher::exclusion(model, attribute, expected_options);
        self.report(Check::Exclusion, model, attribute, verdict)
    }

    pub fn assert_validates_confirmation_of<M: ModelMetadata + ?Sized>(
        &mut self,
        model: &M,
        attribute: &str,
        expected_options: &Options,
    ) -> Verdict {
        let verdict = matcher::confirmation(model, attribute, expected_options);
        self.report(Check::Confirmation, model, attribute, verdict)
    }

    /// Generic form taking a `{kind: configuration}` spec.
    ///
    /// An invalid spec is returned as `Err` and nothing is reported.
    pub fn assert_validates<M: ModelMetadata + ?Sized>(
        &mut self,
        model: &M,
        attribute: &str,
        spec: &Options,
    ) -> InspectorResult<Verdict> {
        let verdict = matcher::validates(model, attribute, spec)?;
        Ok(self.report(Check::Validates, model, attribute, verdict))
    }

    fn report<M: ModelMetadata + ?Sized>(
        &mut self,
        check: Check,
        model: &M,
        subject: &str,
        verdict: Verdict,
    ) -> Verdict {
        match &verdict {
            Verdict::Pass => {
                debug!(%check, model = model.model_name(), subject, passed = true, "verdict");
                self.sink.pass(check);
            }
            Verdict::Fail(failure) => {
                debug!(
                    %check,
                    model = model.model_name(),
                    subject,
                    passed = false,
                    category = failure.category(),
                    "verdict"
                );
                self.sink.fail(check, &failure.to_string());
            }
        }
        verdict
    }
}
