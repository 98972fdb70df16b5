//! Anomaly rule catalog.
//!
//! Each rule implements the [`Rule`] trait and produces zero or one anomaly
//! per snapshot. [`RuleCatalog::standard`] holds the fixed, versioned
//! catalog in its evaluation order: issue tracker, source control, design
//! tool, cross-source — validity checks first within each source, outlier
//! checks last. Rules never fail: malformed input is the subject of the
//! validity rules and a panicking rule is isolated by the driver.

pub mod cross_source;
pub mod figma;
pub mod github;
pub mod jira;
pub mod outliers;
pub mod validity;

use veracity_core::config::Thresholds;

use crate::assessment::Anomaly;
use crate::snapshot::{MetricsSnapshot, SourceMetrics};

/// Stable anomaly codes surfaced to downstream consumers.
pub mod codes {
    pub const NON_NUMERIC_VALUE: &str = "non_numeric_value";
    pub const NEGATIVE_VALUE: &str = "negative_value";
    pub const JIRA_ON_TIME_GT_COMPLETED: &str = "jira_on_time_gt_completed";
    pub const JIRA_WORKLOG_TOO_HIGH: &str = "jira_worklog_too_high";
    pub const JIRA_WORKLOG_OVERLAP: &str = "jira_worklog_overlap";
    pub const JIRA_WORKLOG_SAME_START_LARGE: &str = "jira_worklog_same_start_large";
    pub const GITHUB_DIFF_TOO_HIGH: &str = "github_diff_too_high";
    pub const FIGMA_INCONSISTENT_METRICS: &str = "figma_inconsistent_metrics";
    pub const FIGMA_SHARED_LINKS_GT_FILES: &str = "figma_shared_links_gt_files";
    pub const FIGMA_FILES_UPDATED_TOO_HIGH: &str = "figma_files_updated_too_high";
    pub const FIGMA_NODES_CHANGED_TOO_HIGH: &str = "figma_nodes_changed_too_high";
    pub const FIGMA_COMMENTS_TOO_HIGH: &str = "figma_comments_too_high";
    pub const FIGMA_MENTIONS_TOO_HIGH: &str = "figma_mentions_too_high";
    pub const FIGMA_COMPONENTS_TOO_HIGH: &str = "figma_components_too_high";
    pub const FIGMA_SHARED_LINKS_TOO_HIGH: &str = "figma_shared_links_too_high";
    pub const WORKLOG_MINUTES_OUTLIER_VS_TEAM: &str = "worklog_minutes_outlier_vs_team";
    pub const GITHUB_DIFF_OUTLIER_VS_TEAM: &str = "github_diff_outlier_vs_team";
    pub const FIGMA_FILES_UPDATED_OUTLIER_VS_TEAM: &str = "figma_files_updated_outlier_vs_team";
    pub const FIGMA_NODES_CHANGED_OUTLIER_VS_TEAM: &str = "figma_nodes_changed_outlier_vs_team";
    pub const FIGMA_COMMENTS_OUTLIER_VS_TEAM: &str = "figma_comments_outlier_vs_team";
    pub const FIGMA_MENTIONS_OUTLIER_VS_TEAM: &str = "figma_mentions_outlier_vs_team";
    pub const FIGMA_COMPONENTS_OUTLIER_VS_TEAM: &str = "figma_components_outlier_vs_team";
    pub const FIGMA_SHARED_LINKS_OUTLIER_VS_TEAM: &str = "figma_shared_links_outlier_vs_team";
    pub const HIGH_WORKLOG_BUT_NO_ARTIFACTS: &str = "high_worklog_but_no_artifacts";
}

/// The source group a rule belongs to. Determines catalog ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleSource {
    Jira,
    Github,
    Figma,
    CrossSource,
}

impl RuleSource {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Jira => "jira",
            Self::Github => "github",
            Self::Figma => "figma",
            Self::CrossSource => "cross_source",
        }
    }
}

impl std::fmt::Display for RuleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a rule may read: the snapshot and the resolved thresholds.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub snapshot: &'a MetricsSnapshot,
    pub thresholds: &'a Thresholds,
}

impl<'a> RuleContext<'a> {
    /// The raw metrics for a single-platform source, if the collector
    /// reported that platform at all.
    pub fn metrics(&self, source: RuleSource) -> Option<&'a SourceMetrics> {
        match source {
            RuleSource::Jira => self.snapshot.jira.as_ref(),
            RuleSource::Github => self.snapshot.github.as_ref(),
            RuleSource::Figma => self.snapshot.figma.as_ref(),
            RuleSource::CrossSource => None,
        }
    }
}

/// One independent anomaly check. Pure: no I/O, no input mutation.
pub trait Rule: Send + Sync {
    /// Stable anomaly code this rule emits.
    fn code(&self) -> &'static str;
    /// Source group, for catalog ordering and filtering.
    fn source(&self) -> RuleSource;
    /// Inspect one snapshot; emit at most one anomaly.
    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Anomaly>;
}

/// The fixed, ordered rule catalog with its evaluation driver.
pub struct RuleCatalog {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleCatalog {
    /// The standard catalog, in evaluation order.
    pub fn standard() -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            // Issue tracker
            Box::new(validity::NonNumericRule::new(RuleSource::Jira)),
            Box::new(validity::NegativeValueRule::new(RuleSource::Jira)),
            Box::new(jira::OnTimeGtCompletedRule),
            Box::new(jira::WorklogThresholdRule),
            Box::new(jira::WorklogOverlapRule),
            Box::new(jira::WorklogSameStartRule),
            Box::new(outliers::WorklogOutlierRule),
            // Source control
            Box::new(validity::NonNumericRule::new(RuleSource::Github)),
            Box::new(validity::NegativeValueRule::new(RuleSource::Github)),
            Box::new(github::DiffSizeThresholdRule),
            Box::new(outliers::GithubDiffOutlierRule),
            // Design tool
            Box::new(validity::NonNumericRule::new(RuleSource::Figma)),
            Box::new(validity::NegativeValueRule::new(RuleSource::Figma)),
            Box::new(figma::InconsistentMetricsRule),
            Box::new(figma::SharedLinksGtFilesRule),
            Box::new(figma::FieldThresholdRule::new(figma::FigmaField::FilesUpdated)),
            Box::new(figma::FieldThresholdRule::new(figma::FigmaField::NodesChanged)),
            Box::new(figma::FieldThresholdRule::new(figma::FigmaField::Comments)),
            Box::new(figma::FieldThresholdRule::new(figma::FigmaField::Mentions)),
            Box::new(figma::FieldThresholdRule::new(figma::FigmaField::ComponentsPublished)),
            Box::new(figma::FieldThresholdRule::new(figma::FigmaField::SharedLinks)),
            Box::new(outliers::FigmaOutlierRule::new(figma::FigmaField::FilesUpdated)),
            Box::new(outliers::FigmaOutlierRule::new(figma::FigmaField::NodesChanged)),
            Box::new(outliers::FigmaOutlierRule::new(figma::FigmaField::Comments)),
            Box::new(outliers::FigmaOutlierRule::new(figma::FigmaField::Mentions)),
            Box::new(outliers::FigmaOutlierRule::new(figma::FigmaField::ComponentsPublished)),
            Box::new(outliers::FigmaOutlierRule::new(figma::FigmaField::SharedLinks)),
            // Cross-source
            Box::new(cross_source::HighWorklogNoArtifactsRule),
        ];
        Self { rules }
    }

    /// A catalog with custom rules (for testing individual rules).
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The catalog's codes in evaluation order.
    pub fn codes(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.code()).collect()
    }

    /// Run every rule against one snapshot.
    ///
    /// A rule that panics is logged and skipped; it never aborts the
    /// surrounding scoring job.
    pub fn evaluate(&self, snapshot: &MetricsSnapshot, thresholds: &Thresholds) -> Vec<Anomaly> {
        let ctx = RuleContext {
            snapshot,
            thresholds,
        };
        let mut anomalies = Vec::new();
        for rule in &self.rules {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                rule.evaluate(&ctx)
            }));
            match result {
                Ok(Some(anomaly)) => anomalies.push(anomaly),
                Ok(None) => {}
                Err(_) => {
                    tracing::error!(
                        rule_code = rule.code(),
                        "rule panicked during evaluation"
                    );
                }
            }
        }
        anomalies
    }
}
