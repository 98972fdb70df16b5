//! Metrics snapshot — one employee-day of raw activity numbers.
//!
//! Field values stay as raw JSON so that malformed collector output reaches
//! the numeric-validity rules instead of dying in the deserializer. Only a
//! malformed *document* fails ingestion.

pub mod fields;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use veracity_core::errors::SnapshotError;

/// Classification of a raw metric field before any rule reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    /// Absent or JSON null.
    Missing,
    /// Present but not a finite number.
    NonNumeric,
    /// A finite number below zero.
    Negative(f64),
    /// A finite number, zero or greater.
    Valid(f64),
}

/// Raw named fields for one source platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceMetrics {
    #[serde(flatten)]
    fields: FxHashMap<String, Value>,
}

impl SourceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a raw field value.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        self.fields.insert(field.to_string(), value.into());
    }

    /// Builder-style `set`, for constructing snapshots in tests and callers.
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Classify a field without reading through it.
    ///
    /// JSON null counts as missing: by the time a collector payload reaches
    /// this engine, "absent" and "null" are indistinguishable upstream
    /// states. Anything else that is not a finite number is non-numeric.
    pub fn classify(&self, field: &str) -> FieldValue {
        match self.fields.get(field) {
            None | Some(Value::Null) => FieldValue::Missing,
            Some(value) => match value.as_f64() {
                Some(n) if n.is_finite() => {
                    if n < 0.0 {
                        FieldValue::Negative(n)
                    } else {
                        FieldValue::Valid(n)
                    }
                }
                _ => FieldValue::NonNumeric,
            },
        }
    }

    /// Read a field only if it is valid. Invalid fields (non-numeric or
    /// negative) read as missing so dependent rules skip them, never treat
    /// them as zero.
    pub fn numeric(&self, field: &str) -> Option<f64> {
        match self.classify(field) {
            FieldValue::Valid(n) => Some(n),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Worklog statistics derived upstream from raw time-log entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorklogStats {
    /// Total minutes covered by more than one worklog entry.
    pub overlap_minutes: f64,
    /// Overlapping minutes as a fraction of total logged minutes.
    pub overlap_ratio: f64,
    /// Count of same-start-time, large-duration entry clusters.
    pub same_start_large_count: u32,
}

/// The team's per-field daily averages for the same calendar day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamBaseline {
    #[serde(flatten)]
    averages: FxHashMap<String, f64>,
}

impl TeamBaseline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: &str, average: f64) {
        self.averages.insert(field.to_string(), average);
    }

    pub fn with(mut self, field: &str, average: f64) -> Self {
        self.set(field, average);
        self
    }

    pub fn average(&self, field: &str) -> Option<f64> {
        self.averages.get(field).copied()
    }
}

/// One employee's raw per-day activity numbers from all tracked platforms.
///
/// Assembled once per employee-day by the metrics collector and treated as
/// immutable input from then on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub employee_id: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira: Option<SourceMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<SourceMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub figma: Option<SourceMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worklog: Option<WorklogStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_baseline: Option<TeamBaseline>,
}

impl MetricsSnapshot {
    pub fn new(employee_id: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            date: date.into(),
            ..Default::default()
        }
    }

    /// Ingest a snapshot from a collector JSON document.
    pub fn from_json(value: Value) -> Result<Self, SnapshotError> {
        serde_json::from_value(value).map_err(|e| SnapshotError::Malformed {
            message: e.to_string(),
        })
    }

    /// Ingest a snapshot from raw collector JSON text.
    pub fn from_json_str(raw: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(raw).map_err(|e| SnapshotError::Malformed {
            message: e.to_string(),
        })
    }
}
