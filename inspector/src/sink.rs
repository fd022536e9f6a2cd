//! Reporting sinks.

use std::fmt;

/// The assertion that produced a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    Association,
    Presence,
    Uniqueness,
    Numericality,
    Inclusion,
    Exclusion,
    Confirmation,
    Validates,
}

impl Check {
    pub fn name(&self) -> &'static str {
        match self {
            Check::Association => "assert_association",
            Check::Presence => "assert_validates_presence_of",
            Check::Uniqueness => "assert_validates_uniqueness_of",
            Check::Numericality => "assert_validates_numericality_of",
            Check::Inclusion => "assert_validates_inclusion_of",
            Check::Exclusion => "assert_validates_exclusion_of",
            Check::Confirmation => "assert_validates_confirmation_of",
            Check::Validates => "assert_validates",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Receiver of assertion outcomes.
///
/// Every inspector operation emits exactly one `pass` or one `fail`.
pub trait ReportSink {
    fn pass(&mut self, check: Check);

    fn fail(&mut self, check: Check, message: &str);
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn pass(&mut self, check: Check) {
        (**self).pass(check);
    }

    fn fail(&mut self, check: Check, message: &str) {
        (**self).fail(check, message);
    }
}

/// Sink that panics on failure, for use directly inside `#[test]` functions.
#[derive(Debug, Default, Clone, Copy)]
pub struct PanicSink;

impl ReportSink for PanicSink {
    fn pass(&mut self, _check: Check) {}

    fn fail(&mut self, check: Check, message: &str) {
        panic!("{} failed: {}", check, message);
    }
}

/// A single recorded outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub check: Check,
    pub passed: bool,
    /// Failure message; `None` for passes.
    pub message: Option<String>,
}

impl Report {
    pub fn pass(check: Check) -> Self {
        Self {
            check,
            passed: true,
            message: None,
        }
    }

    pub fn fail(check: Check, message: impl Into<String>) -> Self {
        Self {
            check,
            passed: false,
            message: Some(message.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        !self.passed
    }
}

/// Sink that records every outcome for later inspection.
#[derive(Debug, Default)]
pub struct Collector {
    reports: Vec<Report>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded outcomes, in order.
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn failures(&self) -> impl Iterator<Item = &Report> {
        self.reports.iter().filter(|r| r.is_failure())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn all_passed(&self) -> bool {
        self.failure_count() == 0
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl ReportSink for Collector {
    fn pass(&mut self, check: Check) {
        self.reports.push(Report::pass(check));
    }

    fn fail(&mut self, check: Check, message: &str) {
        self.reports.push(Report::fail(check, message));
    }
}
