//! Error and diagnostic types for report analysis.
//!
//! The taxonomy is deliberately small. Absent data (unknown chunk id,
//! module without a size, reason without an importer) is never an error
//! anywhere in this crate; it flows through as `None` or an empty
//! collection. A report that fails to decode is fatal, but only at the
//! load boundary in [`crate::io`]. In between sit structural anomalies:
//! oddities in an accepted report that are worth surfacing but never stop
//! a computation.

use std::fmt;
use thiserror::Error;

/// Fatal errors at the report load boundary.
///
/// Once a report decodes successfully it is assumed well-formed for the
/// rest of the session; nothing downstream constructs these.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The raw bytes were not valid JSON or did not match the report
    /// structure.
    #[error("failed to decode report: {0}")]
    Decode(#[from] serde_json::Error),

    /// The report source could not be read.
    #[error("failed to read report: {0}")]
    Io(#[from] std::io::Error),
}

/// Non-fatal data-consistency findings collected during analysis.
///
/// Diagnostics are reported for operator visibility; the computation that
/// produced them continues with the first-seen value.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// The normalized module key the finding is about.
    pub key: String,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The same duplicate key was observed with two different byte sizes.
    SizeMismatch,
    /// A module size was not a whole number of bytes.
    FractionalSize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            DiagnosticKind::SizeMismatch => "size mismatch",
            DiagnosticKind::FractionalSize => "fractional size",
        };
        write!(f, "{} for {}: {}", kind, self.key, self.detail)
    }
}
