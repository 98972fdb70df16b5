//! Anomaly rule thresholds.

use serde::{Deserialize, Serialize};

/// A warn/severe cutoff pair for a single metric field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierPair {
    pub warn: f64,
    pub severe: f64,
}

impl TierPair {
    pub const fn new(warn: f64, severe: f64) -> Self {
        Self { warn, severe }
    }
}

/// Resolved, immutable threshold set passed into every evaluation.
///
/// Constructed once at process start (from [`ThresholdsConfig::resolve`] or
/// `Default::default()`) and shared freely across concurrent evaluations —
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Daily logged-minutes tiers for the issue tracker.
    pub worklog_warn_minutes: f64,
    pub worklog_severe_minutes: f64,
    pub worklog_critical_minutes: f64,
    /// Source-control added+deleted line tiers.
    pub github_diff_warn_lines: f64,
    pub github_diff_severe_lines: f64,
    /// Design-tool per-field tiers.
    pub figma_files_updated: TierPair,
    pub figma_nodes_changed: TierPair,
    pub figma_comments: TierPair,
    pub figma_mentions: TierPair,
    pub figma_components_published: TierPair,
    pub figma_shared_links: TierPair,
    /// Team-baseline outlier ratios.
    pub worklog_outlier_ratio: f64,
    pub activity_outlier_ratio: f64,
    /// Worklog overlap severe gates.
    pub overlap_severe_minutes: f64,
    pub overlap_severe_ratio: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            worklog_warn_minutes: 720.0,
            worklog_severe_minutes: 960.0,
            worklog_critical_minutes: 1440.0,
            github_diff_warn_lines: 20_000.0,
            github_diff_severe_lines: 100_000.0,
            figma_files_updated: TierPair::new(20.0, 60.0),
            figma_nodes_changed: TierPair::new(10_000.0, 50_000.0),
            figma_comments: TierPair::new(30.0, 150.0),
            figma_mentions: TierPair::new(20.0, 100.0),
            figma_components_published: TierPair::new(50.0, 200.0),
            figma_shared_links: TierPair::new(20.0, 60.0),
            worklog_outlier_ratio: 3.0,
            activity_outlier_ratio: 6.0,
            overlap_severe_minutes: 120.0,
            overlap_severe_ratio: 0.3,
        }
    }
}

/// The `[thresholds]` config section. Every field is optional; unset fields
/// fall back to the compiled defaults when resolved.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ThresholdsConfig {
    pub worklog_warn_minutes: Option<f64>,
    pub worklog_severe_minutes: Option<f64>,
    pub worklog_critical_minutes: Option<f64>,
    pub github_diff_warn_lines: Option<f64>,
    pub github_diff_severe_lines: Option<f64>,
    pub figma_files_warn: Option<f64>,
    pub figma_files_severe: Option<f64>,
    pub figma_nodes_warn: Option<f64>,
    pub figma_nodes_severe: Option<f64>,
    pub figma_comments_warn: Option<f64>,
    pub figma_comments_severe: Option<f64>,
    pub figma_mentions_warn: Option<f64>,
    pub figma_mentions_severe: Option<f64>,
    pub figma_components_warn: Option<f64>,
    pub figma_components_severe: Option<f64>,
    pub figma_shared_links_warn: Option<f64>,
    pub figma_shared_links_severe: Option<f64>,
    pub worklog_outlier_ratio: Option<f64>,
    pub activity_outlier_ratio: Option<f64>,
    pub overlap_severe_minutes: Option<f64>,
    pub overlap_severe_ratio: Option<f64>,
}

impl ThresholdsConfig {
    /// Resolve into the immutable threshold set, filling unset fields from
    /// the compiled defaults.
    pub fn resolve(&self) -> Thresholds {
        let d = Thresholds::default();
        Thresholds {
            worklog_warn_minutes: self.worklog_warn_minutes.unwrap_or(d.worklog_warn_minutes),
            worklog_severe_minutes: self
                .worklog_severe_minutes
                .unwrap_or(d.worklog_severe_minutes),
            worklog_critical_minutes: self
                .worklog_critical_minutes
                .unwrap_or(d.worklog_critical_minutes),
            github_diff_warn_lines: self
                .github_diff_warn_lines
                .unwrap_or(d.github_diff_warn_lines),
            github_diff_severe_lines: self
                .github_diff_severe_lines
                .unwrap_or(d.github_diff_severe_lines),
            figma_files_updated: TierPair::new(
                self.figma_files_warn.unwrap_or(d.figma_files_updated.warn),
                self.figma_files_severe.unwrap_or(d.figma_files_updated.severe),
            ),
            figma_nodes_changed: TierPair::new(
                self.figma_nodes_warn.unwrap_or(d.figma_nodes_changed.warn),
                self.figma_nodes_severe.unwrap_or(d.figma_nodes_changed.severe),
            ),
            figma_comments: TierPair::new(
                self.figma_comments_warn.unwrap_or(d.figma_comments.warn),
                self.figma_comments_severe.unwrap_or(d.figma_comments.severe),
            ),
            figma_mentions: TierPair::new(
                self.figma_mentions_warn.unwrap_or(d.figma_mentions.warn),
                self.figma_mentions_severe.unwrap_or(d.figma_mentions.severe),
            ),
            figma_components_published: TierPair::new(
                self.figma_components_warn
                    .unwrap_or(d.figma_components_published.warn),
                self.figma_components_severe
                    .unwrap_or(d.figma_components_published.severe),
            ),
            figma_shared_links: TierPair::new(
                self.figma_shared_links_warn.unwrap_or(d.figma_shared_links.warn),
                self.figma_shared_links_severe
                    .unwrap_or(d.figma_shared_links.severe),
            ),
            worklog_outlier_ratio: self
                .worklog_outlier_ratio
                .unwrap_or(d.worklog_outlier_ratio),
            activity_outlier_ratio: self
                .activity_outlier_ratio
                .unwrap_or(d.activity_outlier_ratio),
            overlap_severe_minutes: self
                .overlap_severe_minutes
                .unwrap_or(d.overlap_severe_minutes),
            overlap_severe_ratio: self.overlap_severe_ratio.unwrap_or(d.overlap_severe_ratio),
        }
    }
}
