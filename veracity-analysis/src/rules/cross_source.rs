//! Cross-source consistency rules.

use serde_json::json;

use super::{codes, Rule, RuleContext, RuleSource};
use crate::assessment::{Anomaly, Severity};
use crate::snapshot::fields::{figma, github, jira};
use crate::snapshot::SourceMetrics;

/// Activity signal strength for one field. Missing or invalid fields count
/// as zero here: absent data cannot vouch for claimed time.
fn signal(metrics: Option<&SourceMetrics>, field: &str) -> f64 {
    metrics
        .and_then(|m| m.numeric(field))
        .unwrap_or(0.0)
}

/// Large claimed worklog time with no independently verifiable trace in any
/// tracked platform.
pub struct HighWorklogNoArtifactsRule;

impl Rule for HighWorklogNoArtifactsRule {
    fn code(&self) -> &'static str {
        codes::HIGH_WORKLOG_BUT_NO_ARTIFACTS
    }

    fn source(&self) -> RuleSource {
        RuleSource::CrossSource
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Anomaly> {
        let minutes = ctx.metrics(RuleSource::Jira)?.numeric(jira::WORKLOG_MINUTES)?;
        if minutes < ctx.thresholds.worklog_severe_minutes {
            return None;
        }

        let jira_metrics = ctx.metrics(RuleSource::Jira);
        let github_metrics = ctx.metrics(RuleSource::Github);
        let figma_metrics = ctx.metrics(RuleSource::Figma);

        let artifact_signals = [
            signal(jira_metrics, jira::ISSUES_COMPLETED),
            signal(jira_metrics, jira::STATUS_UPDATES),
            signal(jira_metrics, jira::ATTACHMENTS),
            signal(github_metrics, github::COMMITS),
            signal(github_metrics, github::PRS_OPENED),
            signal(github_metrics, github::REVIEWS),
            signal(github_metrics, github::ADDED_LINES),
            signal(github_metrics, github::DELETED_LINES),
            signal(github_metrics, github::FILES_CHANGED),
            signal(figma_metrics, figma::FILES_UPDATED),
            signal(figma_metrics, figma::NODES_CHANGED),
            signal(figma_metrics, figma::COMMENTS_ADDED),
            signal(figma_metrics, figma::COMMENTS_RESOLVED),
            signal(figma_metrics, figma::MENTIONS),
            signal(figma_metrics, figma::COMPONENTS_PUBLISHED),
            signal(figma_metrics, figma::SHARED_LINKS),
        ];
        if artifact_signals.iter().any(|&s| s > 0.0) {
            return None;
        }

        Some(
            Anomaly::new(
                codes::HIGH_WORKLOG_BUT_NO_ARTIFACTS,
                Severity::Warn,
                format!(
                    "{minutes} worklog minutes with zero verifiable activity in any tracked platform"
                ),
            )
            .with_evidence([(jira::WORKLOG_MINUTES, json!(minutes))]),
        )
    }
}
