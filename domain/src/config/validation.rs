//! Configuration issues detected at start-up.
//!
//! Validation never fails outright; it returns every detected
//! [`ConfigIssue`] so the caller can print all of them at once and decide
//! by [`Severity`] whether to abort.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigIssueCode {
    /// Model identifier is blank.
    EmptyModelName,
    /// No dataset path configured.
    MissingDatasetPath,
    /// A required text value is blank.
    EmptyValue { field: String },
    /// A count that must be positive is zero.
    ZeroValue { field: String },
    /// More selections requested than candidates generated.
    SelectExceedsCandidates { select: usize, candidates: usize },
    /// More concurrent calls allowed than calls issued per record.
    ConcurrencyExceedsCandidates { concurrency: usize, candidates: usize },
    /// Sampling temperature outside the accepted range.
    TemperatureOutOfRange { field: String, value: f32 },
    /// Raw and final logs point at the same file.
    SameOutputFile,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
