//! Source-control rules: diff size tiers.

use serde_json::json;

use super::{codes, Rule, RuleContext, RuleSource};
use crate::assessment::{Anomaly, Severity};
use crate::snapshot::fields::github;
use crate::snapshot::SourceMetrics;

/// Added + deleted line total, reading only valid fields. None when neither
/// side is usable.
pub(crate) fn diff_total(metrics: &SourceMetrics) -> Option<f64> {
    let added = metrics.numeric(github::ADDED_LINES);
    let deleted = metrics.numeric(github::DELETED_LINES);
    if added.is_none() && deleted.is_none() {
        return None;
    }
    Some(added.unwrap_or(0.0) + deleted.unwrap_or(0.0))
}

/// Implausibly large daily diff. Emits the single highest tier reached:
/// severe ≥ 100000 lines, warn ≥ 20000 (defaults).
pub struct DiffSizeThresholdRule;

impl Rule for DiffSizeThresholdRule {
    fn code(&self) -> &'static str {
        codes::GITHUB_DIFF_TOO_HIGH
    }

    fn source(&self) -> RuleSource {
        RuleSource::Github
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Anomaly> {
        let metrics = ctx.metrics(RuleSource::Github)?;
        let total = diff_total(metrics)?;
        let t = ctx.thresholds;
        let (severity, threshold, label) = if total >= t.github_diff_severe_lines {
            (Severity::Severe, t.github_diff_severe_lines, "severe")
        } else if total >= t.github_diff_warn_lines {
            (Severity::Warn, t.github_diff_warn_lines, "warn")
        } else {
            return None;
        };
        Some(
            Anomaly::new(
                codes::GITHUB_DIFF_TOO_HIGH,
                severity,
                format!(
                    "Diff of {total} changed lines in one day ({label} threshold: {threshold})"
                ),
            )
            .with_evidence([
                (github::ADDED_LINES, json!(metrics.numeric(github::ADDED_LINES))),
                (
                    github::DELETED_LINES,
                    json!(metrics.numeric(github::DELETED_LINES)),
                ),
                ("total", json!(total)),
            ]),
        )
    }
}
