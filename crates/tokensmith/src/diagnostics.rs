//! Deduplicated diagnostics for tolerant conversion and resolution.
//!
//! Nothing in this crate aborts on malformed input. Problems are recorded
//! in a caller-owned [`Diagnostics`] collector instead, with two report
//! kinds:
//!
//! - [`Diagnostics::warn_once`]: non-fatal, the result is still usable
//! - [`Diagnostics::error_once`]: the offending token was dropped, the rest
//!   of the input was still processed
//!
//! Both are deduplicated by message for the lifetime of the collector, so a
//! session that reuses one collector sees each message at most once. The
//! first occurrence is also forwarded to `tracing`.

use std::collections::HashSet;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single reported problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Collector of warn-once / error-once reports.
///
/// # Example
///
/// ```rust
/// use tokensmith::Diagnostics;
///
/// let mut diagnostics = Diagnostics::new();
/// assert!(diagnostics.warn_once("deprecated token"));
/// assert!(!diagnostics.warn_once("deprecated token"));
/// assert_eq!(diagnostics.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    seen: HashSet<(Severity, String)>,
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning unless the same message was already warned about.
    ///
    /// Returns `true` when the warning was recorded.
    pub fn warn_once(&mut self, message: impl Into<String>) -> bool {
        self.report(Severity::Warning, message.into())
    }

    /// Records an error unless the same message was already reported.
    ///
    /// Returns `true` when the error was recorded.
    pub fn error_once(&mut self, message: impl Into<String>) -> bool {
        self.report(Severity::Error, message.into())
    }

    fn report(&mut self, severity: Severity, message: String) -> bool {
        if !self.seen.insert((severity, message.clone())) {
            return false;
        }
        match severity {
            Severity::Warning => tracing::warn!("{}", message),
            Severity::Error => tracing::error!("{}", message),
        }
        self.records.push(Diagnostic { severity, message });
        true
    }

    /// Records without logging; for reports already logged by another
    /// collector.
    fn record_silently(&mut self, record: Diagnostic) {
        if self.seen.insert((record.severity, record.message.clone())) {
            self.records.push(record);
        }
    }

    /// Returns every recorded diagnostic in report order.
    pub fn records(&self) -> &[Diagnostic] {
        &self.records
    }

    /// Returns the recorded warnings.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.of(Severity::Warning)
    }

    /// Returns the recorded errors.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.of(Severity::Error)
    }

    fn of(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter().filter(move |d| d.severity == severity)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Folds another collector into this one, keeping the once-only rule.
    ///
    /// Merged records were logged when first reported and are not logged
    /// again.
    pub fn merge(&mut self, other: Diagnostics) {
        for record in other.records {
            self.record_silently(record);
        }
    }

    pub fn into_records(self) -> Vec<Diagnostic> {
        self.records
    }
}

/// A best-effort value together with the diagnostics produced building it.
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    pub value: T,
    pub diagnostics: Diagnostics,
}

impl<T> Outcome<T> {
    pub fn new(value: T, diagnostics: Diagnostics) -> Self {
        Self { value, diagnostics }
    }

    /// Discards the diagnostics.
    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, Diagnostics) {
        (self.value, self.diagnostics)
    }
}
