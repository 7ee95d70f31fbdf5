//! Shared types used across the batch runner.
//! Includes `Metric` (the CSV value column), `FailureKind` and `AuditFailure`
//! (per-URL failures carried as data), `AuditOutcome`, and `ResultRow`.
use serde::{Deserialize, Serialize};

/// The value column reported by a backend.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Metric {
    /// Lighthouse accessibility category, 0..=100.
    AccessibilityScore,
    /// Error count scraped from the WAVE sidebar; -1 when the counter is absent.
    WaveErrors,
}

impl Metric {
    /// Column name used in the CSV header.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::AccessibilityScore => "Accessibility_Score",
            Metric::WaveErrors => "WAVE_Errors",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum FailureKind {
    /// The audit call failed, threw, or timed out.
    Audit,
    /// The audit produced output that could not be parsed.
    Parse,
}

impl FailureKind {
    pub fn sentinel(&self) -> &'static str {
        match self {
            FailureKind::Audit => "ERROR",
            FailureKind::Parse => "PARSE_ERROR",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sentinel())
    }
}

/// A per-URL failure. Never escapes the per-URL boundary as an error.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AuditFailure {
    pub kind: FailureKind,
    pub reason: String,
}

impl AuditFailure {
    pub fn audit<R: std::fmt::Display>(reason: R) -> Self {
        Self {
            kind: FailureKind::Audit,
            reason: reason.to_string(),
        }
    }

    pub fn parse<R: std::fmt::Display>(reason: R) -> Self {
        Self {
            kind: FailureKind::Parse,
            reason: reason.to_string(),
        }
    }
}

impl std::fmt::Display for AuditFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.reason)
    }
}

/// Result of auditing one URL: the metric value, or a tagged failure.
pub type AuditOutcome = std::result::Result<i64, AuditFailure>;

/// One output row. Displays as the CSV value cell.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ResultRow<'a> {
    pub url: &'a str,
    pub outcome: AuditOutcome,
}

impl ResultRow<'_> {
    pub fn value(&self) -> String {
        match &self.outcome {
            Ok(v) => v.to_string(),
            Err(failure) => failure.kind.sentinel().to_string(),
        }
    }
}
