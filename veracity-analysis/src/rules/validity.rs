//! Numeric validity rules — run before any other rule reads a field.
//!
//! A field that fails validity is treated as missing by every dependent
//! rule, never as zero.

use serde_json::json;

use super::{codes, Rule, RuleContext, RuleSource};
use crate::assessment::{Anomaly, Severity};
use crate::snapshot::{fields, FieldValue};

/// The fields the validity rules check for a source.
pub fn required_fields(source: RuleSource) -> &'static [&'static str] {
    match source {
        RuleSource::Jira => fields::jira::REQUIRED,
        RuleSource::Github => fields::github::REQUIRED,
        RuleSource::Figma => fields::figma::REQUIRED,
        RuleSource::CrossSource => &[],
    }
}

/// Flags fields that are present but not numeric.
pub struct NonNumericRule {
    source: RuleSource,
}

impl NonNumericRule {
    pub fn new(source: RuleSource) -> Self {
        Self { source }
    }
}

impl Rule for NonNumericRule {
    fn code(&self) -> &'static str {
        codes::NON_NUMERIC_VALUE
    }

    fn source(&self) -> RuleSource {
        self.source
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Anomaly> {
        let metrics = ctx.metrics(self.source)?;
        let offending: Vec<&str> = required_fields(self.source)
            .iter()
            .copied()
            .filter(|field| matches!(metrics.classify(field), FieldValue::NonNumeric))
            .collect();
        if offending.is_empty() {
            return None;
        }
        Some(
            Anomaly::new(
                codes::NON_NUMERIC_VALUE,
                Severity::Severe,
                format!(
                    "{} reported non-numeric values for: {}",
                    self.source,
                    offending.join(", ")
                ),
            )
            .with_evidence([
                ("source", json!(self.source.name())),
                ("fields", json!(offending)),
            ]),
        )
    }
}

/// Flags fields that are numeric but negative.
pub struct NegativeValueRule {
    source: RuleSource,
}

impl NegativeValueRule {
    pub fn new(source: RuleSource) -> Self {
        Self { source }
    }
}

impl Rule for NegativeValueRule {
    fn code(&self) -> &'static str {
        codes::NEGATIVE_VALUE
    }

    fn source(&self) -> RuleSource {
        self.source
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Anomaly> {
        let metrics = ctx.metrics(self.source)?;
        let offending: Vec<(&str, f64)> = required_fields(self.source)
            .iter()
            .copied()
            .filter_map(|field| match metrics.classify(field) {
                FieldValue::Negative(value) => Some((field, value)),
                _ => None,
            })
            .collect();
        if offending.is_empty() {
            return None;
        }
        let names: Vec<&str> = offending.iter().map(|(field, _)| *field).collect();
        Some(
            Anomaly::new(
                codes::NEGATIVE_VALUE,
                Severity::Severe,
                format!(
                    "{} reported negative values for: {}",
                    self.source,
                    names.join(", ")
                ),
            )
            .with_evidence(
                offending
                    .into_iter()
                    .map(|(field, value)| (field, json!(value)))
                    .chain([("source", json!(self.source.name()))]),
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{MetricsSnapshot, SourceMetrics};
    use veracity_core::config::Thresholds;

    fn ctx_snapshot(jira: SourceMetrics) -> MetricsSnapshot {
        let mut snapshot = MetricsSnapshot::new("emp-1", "2025-06-02");
        snapshot.jira = Some(jira);
        snapshot
    }

    #[test]
    fn test_non_numeric_field_flagged() {
        let snapshot = ctx_snapshot(
            SourceMetrics::new()
                .with(fields::jira::WORKLOG_MINUTES, "480 minutes")
                .with(fields::jira::ISSUES_COMPLETED, 3),
        );
        let thresholds = Thresholds::default();
        let ctx = RuleContext {
            snapshot: &snapshot,
            thresholds: &thresholds,
        };

        let anomaly = NonNumericRule::new(RuleSource::Jira).evaluate(&ctx).unwrap();
        assert_eq!(anomaly.code, codes::NON_NUMERIC_VALUE);
        assert_eq!(anomaly.severity, Severity::Severe);
        let evidence = anomaly.evidence.unwrap();
        assert_eq!(evidence["fields"], json!(["worklog_minutes"]));
    }

    #[test]
    fn test_negative_field_flagged_with_value() {
        let snapshot =
            ctx_snapshot(SourceMetrics::new().with(fields::jira::ATTACHMENTS, -2));
        let thresholds = Thresholds::default();
        let ctx = RuleContext {
            snapshot: &snapshot,
            thresholds: &thresholds,
        };

        let anomaly = NegativeValueRule::new(RuleSource::Jira).evaluate(&ctx).unwrap();
        assert_eq!(anomaly.code, codes::NEGATIVE_VALUE);
        let evidence = anomaly.evidence.unwrap();
        assert_eq!(evidence["attachments"], json!(-2.0));
    }

    #[test]
    fn test_missing_source_yields_nothing() {
        let snapshot = MetricsSnapshot::new("emp-1", "2025-06-02");
        let thresholds = Thresholds::default();
        let ctx = RuleContext {
            snapshot: &snapshot,
            thresholds: &thresholds,
        };

        assert!(NonNumericRule::new(RuleSource::Jira).evaluate(&ctx).is_none());
        assert!(NegativeValueRule::new(RuleSource::Figma).evaluate(&ctx).is_none());
    }
}
