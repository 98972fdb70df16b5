//! Team-baseline outlier rules.
//!
//! Ratio comparisons only run behind an absolute floor: the team average
//! must be strictly positive and the employee's own value must already
//! reach the field's warn threshold (or the low-volume floor). A near-zero
//! team average can otherwise turn ordinary values into huge ratios.

use serde_json::json;

use super::figma::FigmaField;
use super::github::diff_total;
use super::{codes, Rule, RuleContext, RuleSource};
use crate::assessment::{Anomaly, Severity};
use crate::snapshot::fields::{baseline, jira};

/// Floor for low-volume fields: `max(1, warn / 2)`.
fn low_volume_floor(warn: f64) -> f64 {
    (warn / 2.0).floor().max(1.0)
}

/// The shared gate-then-ratio check.
fn detect(
    code: &'static str,
    label: &str,
    value: Option<f64>,
    team_average: Option<f64>,
    floor: f64,
    ratio_threshold: f64,
) -> Option<Anomaly> {
    let value = value?;
    let team_average = team_average?;
    if team_average <= 0.0 || value < floor {
        return None;
    }
    let ratio = value / team_average;
    if ratio < ratio_threshold {
        return None;
    }
    Some(
        Anomaly::new(
            code,
            Severity::Warn,
            format!("{label} of {value} is {ratio:.1}x the team average ({team_average})"),
        )
        .with_evidence([
            ("value", json!(value)),
            ("team_average", json!(team_average)),
            ("ratio", json!(ratio)),
        ]),
    )
}

/// Logged minutes far above the team's same-day average.
pub struct WorklogOutlierRule;

impl Rule for WorklogOutlierRule {
    fn code(&self) -> &'static str {
        codes::WORKLOG_MINUTES_OUTLIER_VS_TEAM
    }

    fn source(&self) -> RuleSource {
        RuleSource::Jira
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Anomaly> {
        let team = ctx.snapshot.team_baseline.as_ref()?;
        detect(
            codes::WORKLOG_MINUTES_OUTLIER_VS_TEAM,
            jira::WORKLOG_MINUTES,
            ctx.metrics(RuleSource::Jira)?.numeric(jira::WORKLOG_MINUTES),
            team.average(baseline::WORKLOG_MINUTES),
            ctx.thresholds.worklog_warn_minutes,
            ctx.thresholds.worklog_outlier_ratio,
        )
    }
}

/// Diff size far above the team's same-day average.
pub struct GithubDiffOutlierRule;

impl Rule for GithubDiffOutlierRule {
    fn code(&self) -> &'static str {
        codes::GITHUB_DIFF_OUTLIER_VS_TEAM
    }

    fn source(&self) -> RuleSource {
        RuleSource::Github
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Anomaly> {
        let team = ctx.snapshot.team_baseline.as_ref()?;
        detect(
            codes::GITHUB_DIFF_OUTLIER_VS_TEAM,
            "diff lines",
            ctx.metrics(RuleSource::Github).and_then(diff_total),
            team.average(baseline::GITHUB_DIFF_LINES),
            ctx.thresholds.github_diff_warn_lines,
            ctx.thresholds.activity_outlier_ratio,
        )
    }
}

/// One Figma field far above the team's same-day average.
pub struct FigmaOutlierRule {
    field: FigmaField,
}

impl FigmaOutlierRule {
    pub fn new(field: FigmaField) -> Self {
        Self { field }
    }
}

impl Rule for FigmaOutlierRule {
    fn code(&self) -> &'static str {
        self.field.outlier_code()
    }

    fn source(&self) -> RuleSource {
        RuleSource::Figma
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Anomaly> {
        let team = ctx.snapshot.team_baseline.as_ref()?;
        let warn = self.field.tiers(ctx.thresholds).warn;
        let floor = if self.field.low_volume() {
            low_volume_floor(warn)
        } else {
            warn
        };
        detect(
            self.field.outlier_code(),
            self.field.label(),
            ctx.metrics(RuleSource::Figma)
                .and_then(|m| self.field.extract(m)),
            team.average(self.field.baseline_key()),
            floor,
            ctx.thresholds.activity_outlier_ratio,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::fields::figma;
    use crate::snapshot::{MetricsSnapshot, SourceMetrics, TeamBaseline};
    use veracity_core::config::Thresholds;

    fn snapshot_with_nodes(nodes: f64, team_avg: f64) -> MetricsSnapshot {
        let mut snapshot = MetricsSnapshot::new("emp-1", "2025-06-02");
        snapshot.figma = Some(SourceMetrics::new().with(figma::NODES_CHANGED, nodes));
        snapshot.team_baseline =
            Some(TeamBaseline::new().with(figma::NODES_CHANGED, team_avg));
        snapshot
    }

    #[test]
    fn test_absolute_floor_blocks_ratio_only_triggers() {
        let thresholds = Thresholds::default();
        // Ratio 7x, but 700 is far below the 10000 warn floor
        let snapshot = snapshot_with_nodes(700.0, 100.0);
        let ctx = RuleContext {
            snapshot: &snapshot,
            thresholds: &thresholds,
        };
        assert!(FigmaOutlierRule::new(FigmaField::NodesChanged)
            .evaluate(&ctx)
            .is_none());
    }

    #[test]
    fn test_fires_above_floor_and_ratio() {
        let thresholds = Thresholds::default();
        // 12000 ≥ 10000 floor, ratio 8x ≥ 6.0
        let snapshot = snapshot_with_nodes(12_000.0, 1_500.0);
        let ctx = RuleContext {
            snapshot: &snapshot,
            thresholds: &thresholds,
        };
        let anomaly = FigmaOutlierRule::new(FigmaField::NodesChanged)
            .evaluate(&ctx)
            .unwrap();
        assert_eq!(anomaly.severity, Severity::Warn);
        let evidence = anomaly.evidence.unwrap();
        assert_eq!(evidence["value"], json!(12_000.0));
        assert_eq!(evidence["team_average"], json!(1_500.0));
        assert_eq!(evidence["ratio"], json!(8.0));
    }

    #[test]
    fn test_zero_team_average_never_fires() {
        let thresholds = Thresholds::default();
        let snapshot = snapshot_with_nodes(12_000.0, 0.0);
        let ctx = RuleContext {
            snapshot: &snapshot,
            thresholds: &thresholds,
        };
        assert!(FigmaOutlierRule::new(FigmaField::NodesChanged)
            .evaluate(&ctx)
            .is_none());
    }

    #[test]
    fn test_missing_baseline_skips() {
        let thresholds = Thresholds::default();
        let mut snapshot = snapshot_with_nodes(12_000.0, 1_500.0);
        snapshot.team_baseline = None;
        let ctx = RuleContext {
            snapshot: &snapshot,
            thresholds: &thresholds,
        };
        assert!(FigmaOutlierRule::new(FigmaField::NodesChanged)
            .evaluate(&ctx)
            .is_none());
        assert!(WorklogOutlierRule.evaluate(&ctx).is_none());
        assert!(GithubDiffOutlierRule.evaluate(&ctx).is_none());
    }

    #[test]
    fn test_low_volume_floor_for_comments() {
        let thresholds = Thresholds::default();
        // comments warn is 30, low-volume floor is 15; 18 total passes the
        // floor and is 9x the team average
        let mut snapshot = MetricsSnapshot::new("emp-1", "2025-06-02");
        snapshot.figma = Some(
            SourceMetrics::new()
                .with(figma::COMMENTS_ADDED, 10)
                .with(figma::COMMENTS_RESOLVED, 8),
        );
        snapshot.team_baseline = Some(TeamBaseline::new().with(baseline::FIGMA_COMMENTS, 2.0));
        let ctx = RuleContext {
            snapshot: &snapshot,
            thresholds: &thresholds,
        };
        let anomaly = FigmaOutlierRule::new(FigmaField::Comments)
            .evaluate(&ctx)
            .unwrap();
        assert_eq!(anomaly.code, codes::FIGMA_COMMENTS_OUTLIER_VS_TEAM);
    }

    #[test]
    fn test_worklog_uses_its_own_ratio() {
        let thresholds = Thresholds::default();
        let mut snapshot = MetricsSnapshot::new("emp-1", "2025-06-02");
        snapshot.jira = Some(SourceMetrics::new().with(jira::WORKLOG_MINUTES, 750));
        // 750 / 240 = 3.125 ≥ 3.0 (worklog ratio, not the 6.0 activity ratio)
        snapshot.team_baseline =
            Some(TeamBaseline::new().with(baseline::WORKLOG_MINUTES, 240.0));
        let ctx = RuleContext {
            snapshot: &snapshot,
            thresholds: &thresholds,
        };
        let anomaly = WorklogOutlierRule.evaluate(&ctx).unwrap();
        assert_eq!(anomaly.code, codes::WORKLOG_MINUTES_OUTLIER_VS_TEAM);
    }
}
