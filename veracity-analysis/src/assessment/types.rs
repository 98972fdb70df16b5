//! Core types for data quality assessments.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;

/// Ordered anomaly strength: info < warn < severe < critical.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Severe,
    Critical,
}

impl Severity {
    /// The confidence cap implied by an anomaly of this severity.
    pub const fn cap(&self) -> f64 {
        match self {
            Self::Info => 0.90,
            Self::Warn => 0.75,
            Self::Severe => 0.55,
            Self::Critical => 0.35,
        }
    }

    /// Severity name as string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Severe => "severe",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A detected implausible or suspicious pattern in one snapshot.
///
/// Immutable once produced. Evidence keys are ordered (`BTreeMap`) so that
/// serializing the same assessment twice yields identical bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    /// Stable identifier, e.g. `jira_worklog_too_high`.
    pub code: String,
    pub severity: Severity,
    /// Human-readable explanation.
    pub message: String,
    /// Concrete values that triggered the rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<BTreeMap<String, Value>>,
}

impl Anomaly {
    pub fn new(code: &str, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            severity,
            message: message.into(),
            evidence: None,
        }
    }

    /// Attach triggering values.
    pub fn with_evidence<I, K>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.evidence = Some(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        );
        self
    }
}

/// The combined output attached to a scoring request: anomalies, the
/// confidence cap they imply, and up to 3 explanatory reasons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQualityAssessment {
    pub anomalies: Vec<Anomaly>,
    pub confidence_cap: f64,
    pub confidence_cap_reasons: SmallVec<[String; 3]>,
}

impl DataQualityAssessment {
    /// An assessment with no anomalies and an uncapped confidence.
    pub fn clean() -> Self {
        Self {
            anomalies: Vec::new(),
            confidence_cap: 1.0,
            confidence_cap_reasons: SmallVec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }

    /// The worst severity present, if any.
    pub fn worst_severity(&self) -> Option<Severity> {
        self.anomalies.iter().map(|a| a.severity).max()
    }
}

impl Default for DataQualityAssessment {
    fn default() -> Self {
        Self::clean()
    }
}
