//! End-to-end assessment tests: the documented scoring scenarios plus the
//! cap invariants.

use veracity_analysis::rules::{codes, RuleCatalog};
use veracity_analysis::snapshot::fields::{figma, github, jira};
use veracity_analysis::{
    evaluate_snapshot, MetricsSnapshot, Severity, SourceMetrics, TeamBaseline, WorklogStats,
};
use veracity_core::config::Thresholds;

fn thresholds() -> Thresholds {
    Thresholds::default()
}

fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot::new("emp-1", "2025-06-02")
}

fn has_code(assessment: &veracity_analysis::DataQualityAssessment, code: &str) -> bool {
    assessment.anomalies.iter().any(|a| a.code == code)
}

/// 1500 logged minutes is a critical worklog anomaly and caps confidence
/// at 0.35.
#[test]
fn test_critical_worklog_caps_confidence() {
    let mut s = snapshot();
    s.jira = Some(SourceMetrics::new().with(jira::WORKLOG_MINUTES, 1500));

    let assessment = evaluate_snapshot(&s, &thresholds());

    let worklog = assessment
        .anomalies
        .iter()
        .find(|a| a.code == codes::JIRA_WORKLOG_TOO_HIGH)
        .expect("worklog anomaly");
    assert_eq!(worklog.severity, Severity::Critical);
    assert_eq!(assessment.confidence_cap, 0.35);
}

/// More on-time completions than completions is a lone warn and caps
/// confidence at 0.75.
#[test]
fn test_on_time_inconsistency_is_lone_warn() {
    let mut s = snapshot();
    s.jira = Some(
        SourceMetrics::new()
            .with(jira::ON_TIME_COUNT, 5)
            .with(jira::ISSUES_COMPLETED, 3),
    );

    let assessment = evaluate_snapshot(&s, &thresholds());

    assert_eq!(assessment.anomalies.len(), 1);
    assert_eq!(assessment.anomalies[0].code, codes::JIRA_ON_TIME_GT_COMPLETED);
    assert_eq!(assessment.anomalies[0].severity, Severity::Warn);
    assert_eq!(assessment.confidence_cap, 0.75);
    assert_eq!(assessment.confidence_cap_reasons.len(), 1);
}

/// A 150000-line diff is a severe anomaly and caps confidence at 0.55.
#[test]
fn test_oversized_diff_caps_confidence() {
    let mut s = snapshot();
    s.github = Some(
        SourceMetrics::new()
            .with(github::ADDED_LINES, 110_000)
            .with(github::DELETED_LINES, 40_000),
    );

    let assessment = evaluate_snapshot(&s, &thresholds());

    assert_eq!(assessment.anomalies.len(), 1);
    assert_eq!(assessment.anomalies[0].code, codes::GITHUB_DIFF_TOO_HIGH);
    assert_eq!(assessment.anomalies[0].severity, Severity::Severe);
    assert_eq!(assessment.confidence_cap, 0.55);
}

/// Severe-level worklog with zero activity everywhere emits the
/// cross-source anomaly.
#[test]
fn test_high_worklog_with_no_artifacts() {
    let mut s = snapshot();
    s.jira = Some(
        SourceMetrics::new()
            .with(jira::WORKLOG_MINUTES, 1000)
            .with(jira::ISSUES_COMPLETED, 0)
            .with(jira::STATUS_UPDATES, 0)
            .with(jira::ATTACHMENTS, 0),
    );
    s.github = Some(
        SourceMetrics::new()
            .with(github::COMMITS, 0)
            .with(github::PRS_OPENED, 0)
            .with(github::REVIEWS, 0)
            .with(github::ADDED_LINES, 0)
            .with(github::DELETED_LINES, 0)
            .with(github::FILES_CHANGED, 0),
    );
    s.figma = Some(
        SourceMetrics::new()
            .with(figma::FILES_UPDATED, 0)
            .with(figma::NODES_CHANGED, 0)
            .with(figma::COMMENTS_ADDED, 0)
            .with(figma::COMMENTS_RESOLVED, 0)
            .with(figma::MENTIONS, 0)
            .with(figma::COMPONENTS_PUBLISHED, 0)
            .with(figma::SHARED_LINKS, 0),
    );

    let assessment = evaluate_snapshot(&s, &thresholds());

    assert!(has_code(&assessment, codes::HIGH_WORKLOG_BUT_NO_ARTIFACTS));
    // 1000 minutes also crosses the severe worklog tier on its own
    assert!(has_code(&assessment, codes::JIRA_WORKLOG_TOO_HIGH));
    assert_eq!(assessment.confidence_cap, 0.55);
}

/// A 7x team ratio does not fire the outlier rule when the value sits
/// below the absolute warn floor.
#[test]
fn test_outlier_blocked_below_absolute_floor() {
    let mut s = snapshot();
    s.figma = Some(SourceMetrics::new().with(figma::NODES_CHANGED, 700));
    s.team_baseline = Some(TeamBaseline::new().with(figma::NODES_CHANGED, 100.0));

    let assessment = evaluate_snapshot(&s, &thresholds());

    assert!(!has_code(&assessment, codes::FIGMA_NODES_CHANGED_OUTLIER_VS_TEAM));
    assert!(assessment.is_clean());
    assert_eq!(assessment.confidence_cap, 1.0);
}

/// Anomalies arrive in catalog order: issue tracker, source control, design
/// tool, cross-source.
#[test]
fn test_anomalies_follow_source_order() {
    let mut s = snapshot();
    s.jira = Some(
        SourceMetrics::new()
            .with(jira::WORKLOG_MINUTES, 1000)
            .with(jira::ON_TIME_COUNT, 5)
            .with(jira::ISSUES_COMPLETED, 3),
    );
    s.github = Some(
        SourceMetrics::new()
            .with(github::ADDED_LINES, 150_000)
            .with(github::DELETED_LINES, 0),
    );
    s.figma = Some(
        SourceMetrics::new()
            .with(figma::SHARED_LINKS, 25)
            .with(figma::FILES_UPDATED, 3),
    );

    let assessment = evaluate_snapshot(&s, &thresholds());
    let codes_in_order: Vec<&str> =
        assessment.anomalies.iter().map(|a| a.code.as_str()).collect();

    assert_eq!(
        codes_in_order,
        [
            codes::JIRA_ON_TIME_GT_COMPLETED,
            codes::JIRA_WORKLOG_TOO_HIGH,
            codes::GITHUB_DIFF_TOO_HIGH,
            codes::FIGMA_SHARED_LINKS_GT_FILES,
            codes::FIGMA_SHARED_LINKS_TOO_HIGH,
        ]
    );
}

/// Reasons lead with the worst anomalies and stop at three.
#[test]
fn test_reasons_lead_with_worst() {
    let mut s = snapshot();
    s.jira = Some(
        SourceMetrics::new()
            .with(jira::WORKLOG_MINUTES, 1500)
            .with(jira::ON_TIME_COUNT, 5)
            .with(jira::ISSUES_COMPLETED, 3),
    );
    s.github = Some(
        SourceMetrics::new()
            .with(github::ADDED_LINES, 150_000)
            .with(github::DELETED_LINES, 0),
    );

    let assessment = evaluate_snapshot(&s, &thresholds());

    assert!(assessment.confidence_cap_reasons.len() <= 3);
    // The critical worklog anomaly must be the first reason
    let worklog_message = assessment
        .anomalies
        .iter()
        .find(|a| a.code == codes::JIRA_WORKLOG_TOO_HIGH)
        .unwrap()
        .message
        .clone();
    assert_eq!(assessment.confidence_cap_reasons[0], worklog_message);
    assert_eq!(assessment.confidence_cap, 0.35);
}

/// Malformed fields become anomalies, never failures, and are invisible to
/// dependent rules.
#[test]
fn test_malformed_fields_become_anomalies() {
    let mut s = snapshot();
    s.jira = Some(
        SourceMetrics::new()
            .with(jira::WORKLOG_MINUTES, "sixteen hours")
            .with(jira::ATTACHMENTS, -4),
    );

    let assessment = evaluate_snapshot(&s, &thresholds());

    assert!(has_code(&assessment, codes::NON_NUMERIC_VALUE));
    assert!(has_code(&assessment, codes::NEGATIVE_VALUE));
    // The garbage worklog value must not reach the threshold rule
    assert!(!has_code(&assessment, codes::JIRA_WORKLOG_TOO_HIGH));
    assert_eq!(assessment.confidence_cap, 0.55);
}

/// An empty snapshot has nothing to flag.
#[test]
fn test_empty_snapshot_is_clean() {
    let assessment = evaluate_snapshot(&snapshot(), &thresholds());
    assert!(assessment.is_clean());
    assert_eq!(assessment.confidence_cap, 1.0);
    assert!(assessment.confidence_cap_reasons.is_empty());
}

/// Evaluating the same snapshot twice yields byte-identical assessments.
#[test]
fn test_evaluation_is_deterministic() {
    let mut s = snapshot();
    s.jira = Some(
        SourceMetrics::new()
            .with(jira::WORKLOG_MINUTES, 1500)
            .with(jira::ON_TIME_COUNT, 5)
            .with(jira::ISSUES_COMPLETED, 3)
            .with(jira::ATTACHMENTS, -1),
    );
    s.worklog = Some(WorklogStats {
        overlap_minutes: 130.0,
        overlap_ratio: 0.2,
        same_start_large_count: 2,
    });

    let t = thresholds();
    let first = evaluate_snapshot(&s, &t);
    let second = evaluate_snapshot(&s, &t);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

/// The standard catalog starts with issue-tracker validity and ends with
/// the cross-source check.
#[test]
fn test_standard_catalog_order() {
    let catalog = RuleCatalog::standard();
    assert_eq!(catalog.len(), 28);
    assert!(!catalog.is_empty());

    let codes_list = catalog.codes();
    assert_eq!(codes_list.first(), Some(&codes::NON_NUMERIC_VALUE));
    assert_eq!(codes_list.last(), Some(&codes::HIGH_WORKLOG_BUT_NO_ARTIFACTS));

    let jira_pos = codes_list
        .iter()
        .position(|&c| c == codes::JIRA_WORKLOG_TOO_HIGH)
        .unwrap();
    let github_pos = codes_list
        .iter()
        .position(|&c| c == codes::GITHUB_DIFF_TOO_HIGH)
        .unwrap();
    let figma_pos = codes_list
        .iter()
        .position(|&c| c == codes::FIGMA_INCONSISTENT_METRICS)
        .unwrap();
    assert!(jira_pos < github_pos && github_pos < figma_pos);
}
