//! veracity-analysis: the data quality anomaly detection and confidence
//! capping engine.
//!
//! - Snapshot: one employee-day of raw metrics from all tracked platforms
//! - Rules: fixed ordered catalog of anomaly checks grouped by source
//! - Assessment: severity aggregation into a confidence cap with reasons
//! - Review: override validation and confidence cap resolution
//! - Engine: single-snapshot and rayon batch evaluation drivers

pub mod assessment;
pub mod engine;
pub mod review;
pub mod rules;
pub mod snapshot;

// Re-exports for convenience
pub use assessment::{aggregate, Anomaly, DataQualityAssessment, Severity};
pub use engine::{evaluate_snapshot, QualityEngine};
pub use review::{
    resolve_confidence, resolve_with_override, validate_override, ConfidenceCapOverride,
    OverrideDecision, ReviewResolution,
};
pub use rules::{Rule, RuleCatalog, RuleContext, RuleSource};
pub use snapshot::{FieldValue, MetricsSnapshot, SourceMetrics, TeamBaseline, WorklogStats};
