//! Issue-tracker rules: logical consistency, worklog tiers, and worklog
//! overlap patterns.

use serde_json::json;

use super::{codes, Rule, RuleContext, RuleSource};
use crate::assessment::{Anomaly, Severity};
use crate::snapshot::fields::jira;

/// More on-time completions than completions at all.
pub struct OnTimeGtCompletedRule;

impl Rule for OnTimeGtCompletedRule {
    fn code(&self) -> &'static str {
        codes::JIRA_ON_TIME_GT_COMPLETED
    }

    fn source(&self) -> RuleSource {
        RuleSource::Jira
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Anomaly> {
        let metrics = ctx.metrics(RuleSource::Jira)?;
        let on_time = metrics.numeric(jira::ON_TIME_COUNT)?;
        let completed = metrics.numeric(jira::ISSUES_COMPLETED)?;
        if on_time <= completed {
            return None;
        }
        Some(
            Anomaly::new(
                codes::JIRA_ON_TIME_GT_COMPLETED,
                Severity::Warn,
                format!("On-time count ({on_time}) exceeds completed issues ({completed})"),
            )
            .with_evidence([
                (jira::ON_TIME_COUNT, json!(on_time)),
                (jira::ISSUES_COMPLETED, json!(completed)),
            ]),
        )
    }
}

/// Implausibly high daily logged minutes. Emits the single highest tier
/// reached: critical ≥ 1440, severe ≥ 960, warn ≥ 720 (defaults).
pub struct WorklogThresholdRule;

impl Rule for WorklogThresholdRule {
    fn code(&self) -> &'static str {
        codes::JIRA_WORKLOG_TOO_HIGH
    }

    fn source(&self) -> RuleSource {
        RuleSource::Jira
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Anomaly> {
        let minutes = ctx.metrics(RuleSource::Jira)?.numeric(jira::WORKLOG_MINUTES)?;
        let t = ctx.thresholds;
        let (severity, threshold, label) = if minutes >= t.worklog_critical_minutes {
            (Severity::Critical, t.worklog_critical_minutes, "critical")
        } else if minutes >= t.worklog_severe_minutes {
            (Severity::Severe, t.worklog_severe_minutes, "severe")
        } else if minutes >= t.worklog_warn_minutes {
            (Severity::Warn, t.worklog_warn_minutes, "warn")
        } else {
            return None;
        };
        Some(
            Anomaly::new(
                codes::JIRA_WORKLOG_TOO_HIGH,
                severity,
                format!(
                    "Logged {minutes} worklog minutes in one day ({label} threshold: {threshold})"
                ),
            )
            .with_evidence([
                (jira::WORKLOG_MINUTES, json!(minutes)),
                ("threshold", json!(threshold)),
            ]),
        )
    }
}

/// Overlapping worklog intervals — double-counted or fabricated hours.
pub struct WorklogOverlapRule;

impl Rule for WorklogOverlapRule {
    fn code(&self) -> &'static str {
        codes::JIRA_WORKLOG_OVERLAP
    }

    fn source(&self) -> RuleSource {
        RuleSource::Jira
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Anomaly> {
        let stats = ctx.snapshot.worklog.as_ref()?;
        if stats.overlap_minutes <= 0.0 {
            return None;
        }
        let t = ctx.thresholds;
        let severity = if stats.overlap_minutes >= t.overlap_severe_minutes
            || stats.overlap_ratio >= t.overlap_severe_ratio
        {
            Severity::Severe
        } else {
            Severity::Warn
        };
        Some(
            Anomaly::new(
                codes::JIRA_WORKLOG_OVERLAP,
                severity,
                format!(
                    "Worklog entries overlap by {} minutes (ratio {:.2})",
                    stats.overlap_minutes, stats.overlap_ratio
                ),
            )
            .with_evidence([
                ("overlap_minutes", json!(stats.overlap_minutes)),
                ("overlap_ratio", json!(stats.overlap_ratio)),
            ]),
        )
    }
}

/// Multiple large worklog entries sharing a start time — the signature of
/// copy-pasted time entries.
pub struct WorklogSameStartRule;

impl Rule for WorklogSameStartRule {
    fn code(&self) -> &'static str {
        codes::JIRA_WORKLOG_SAME_START_LARGE
    }

    fn source(&self) -> RuleSource {
        RuleSource::Jira
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Anomaly> {
        let stats = ctx.snapshot.worklog.as_ref()?;
        if stats.same_start_large_count == 0 {
            return None;
        }
        Some(
            Anomaly::new(
                codes::JIRA_WORKLOG_SAME_START_LARGE,
                Severity::Severe,
                format!(
                    "{} worklog entries share a start time with large durations",
                    stats.same_start_large_count
                ),
            )
            .with_evidence([(
                "same_start_large_count",
                json!(stats.same_start_large_count),
            )]),
        )
    }
}
