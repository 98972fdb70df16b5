//! Design-tool rules: logical consistency and per-field threshold tiers.

use serde_json::json;

use veracity_core::config::{Thresholds, TierPair};

use super::{codes, Rule, RuleContext, RuleSource};
use crate::assessment::{Anomaly, Severity};
use crate::snapshot::fields::{baseline, figma};
use crate::snapshot::SourceMetrics;

/// The six independently thresholded Figma fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigmaField {
    FilesUpdated,
    NodesChanged,
    /// Comments added + resolved, combined.
    Comments,
    Mentions,
    ComponentsPublished,
    SharedLinks,
}

impl FigmaField {
    pub const ALL: [FigmaField; 6] = [
        Self::FilesUpdated,
        Self::NodesChanged,
        Self::Comments,
        Self::Mentions,
        Self::ComponentsPublished,
        Self::SharedLinks,
    ];

    /// Field label used in messages and evidence.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FilesUpdated => figma::FILES_UPDATED,
            Self::NodesChanged => figma::NODES_CHANGED,
            Self::Comments => "comments",
            Self::Mentions => figma::MENTIONS,
            Self::ComponentsPublished => figma::COMPONENTS_PUBLISHED,
            Self::SharedLinks => figma::SHARED_LINKS,
        }
    }

    /// Key under which the team baseline reports this field's average.
    pub fn baseline_key(&self) -> &'static str {
        match self {
            Self::Comments => baseline::FIGMA_COMMENTS,
            _ => self.label(),
        }
    }

    pub fn tiers(&self, thresholds: &Thresholds) -> TierPair {
        match self {
            Self::FilesUpdated => thresholds.figma_files_updated,
            Self::NodesChanged => thresholds.figma_nodes_changed,
            Self::Comments => thresholds.figma_comments,
            Self::Mentions => thresholds.figma_mentions,
            Self::ComponentsPublished => thresholds.figma_components_published,
            Self::SharedLinks => thresholds.figma_shared_links,
        }
    }

    /// Low-volume fields use a relaxed absolute floor in the team outlier
    /// gate.
    pub fn low_volume(&self) -> bool {
        matches!(self, Self::Comments | Self::Mentions)
    }

    /// Read this field from the metrics, if valid.
    pub fn extract(&self, metrics: &SourceMetrics) -> Option<f64> {
        match self {
            Self::FilesUpdated => metrics.numeric(figma::FILES_UPDATED),
            Self::NodesChanged => metrics.numeric(figma::NODES_CHANGED),
            Self::Comments => {
                let added = metrics.numeric(figma::COMMENTS_ADDED);
                let resolved = metrics.numeric(figma::COMMENTS_RESOLVED);
                if added.is_none() && resolved.is_none() {
                    return None;
                }
                Some(added.unwrap_or(0.0) + resolved.unwrap_or(0.0))
            }
            Self::Mentions => metrics.numeric(figma::MENTIONS),
            Self::ComponentsPublished => metrics.numeric(figma::COMPONENTS_PUBLISHED),
            Self::SharedLinks => metrics.numeric(figma::SHARED_LINKS),
        }
    }

    pub fn threshold_code(&self) -> &'static str {
        match self {
            Self::FilesUpdated => codes::FIGMA_FILES_UPDATED_TOO_HIGH,
            Self::NodesChanged => codes::FIGMA_NODES_CHANGED_TOO_HIGH,
            Self::Comments => codes::FIGMA_COMMENTS_TOO_HIGH,
            Self::Mentions => codes::FIGMA_MENTIONS_TOO_HIGH,
            Self::ComponentsPublished => codes::FIGMA_COMPONENTS_TOO_HIGH,
            Self::SharedLinks => codes::FIGMA_SHARED_LINKS_TOO_HIGH,
        }
    }

    pub fn outlier_code(&self) -> &'static str {
        match self {
            Self::FilesUpdated => codes::FIGMA_FILES_UPDATED_OUTLIER_VS_TEAM,
            Self::NodesChanged => codes::FIGMA_NODES_CHANGED_OUTLIER_VS_TEAM,
            Self::Comments => codes::FIGMA_COMMENTS_OUTLIER_VS_TEAM,
            Self::Mentions => codes::FIGMA_MENTIONS_OUTLIER_VS_TEAM,
            Self::ComponentsPublished => codes::FIGMA_COMPONENTS_OUTLIER_VS_TEAM,
            Self::SharedLinks => codes::FIGMA_SHARED_LINKS_OUTLIER_VS_TEAM,
        }
    }
}

/// Zero updated files alongside nonzero node, component, or link activity.
pub struct InconsistentMetricsRule;

impl Rule for InconsistentMetricsRule {
    fn code(&self) -> &'static str {
        codes::FIGMA_INCONSISTENT_METRICS
    }

    fn source(&self) -> RuleSource {
        RuleSource::Figma
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Anomaly> {
        let metrics = ctx.metrics(RuleSource::Figma)?;
        let files_updated = metrics.numeric(figma::FILES_UPDATED)?;
        if files_updated != 0.0 {
            return None;
        }
        let nonzero: Vec<(&str, f64)> = [
            figma::NODES_CHANGED,
            figma::COMPONENTS_PUBLISHED,
            figma::SHARED_LINKS,
        ]
        .iter()
        .filter_map(|field| {
            let value = metrics.numeric(field)?;
            (value > 0.0).then_some((*field, value))
        })
        .collect();
        if nonzero.is_empty() {
            return None;
        }
        let names: Vec<&str> = nonzero.iter().map(|(field, _)| *field).collect();
        Some(
            Anomaly::new(
                codes::FIGMA_INCONSISTENT_METRICS,
                Severity::Warn,
                format!(
                    "Figma reports no updated files but nonzero activity ({})",
                    names.join(", ")
                ),
            )
            .with_evidence(
                nonzero
                    .into_iter()
                    .map(|(field, value)| (field, json!(value)))
                    .chain([(figma::FILES_UPDATED, json!(files_updated))]),
            ),
        )
    }
}

/// More shared links than updated files.
pub struct SharedLinksGtFilesRule;

impl Rule for SharedLinksGtFilesRule {
    fn code(&self) -> &'static str {
        codes::FIGMA_SHARED_LINKS_GT_FILES
    }

    fn source(&self) -> RuleSource {
        RuleSource::Figma
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Anomaly> {
        let metrics = ctx.metrics(RuleSource::Figma)?;
        let shared_links = metrics.numeric(figma::SHARED_LINKS)?;
        let files_updated = metrics.numeric(figma::FILES_UPDATED)?;
        if shared_links <= files_updated {
            return None;
        }
        Some(
            Anomaly::new(
                codes::FIGMA_SHARED_LINKS_GT_FILES,
                Severity::Severe,
                format!("Shared links ({shared_links}) exceed updated files ({files_updated})"),
            )
            .with_evidence([
                (figma::SHARED_LINKS, json!(shared_links)),
                (figma::FILES_UPDATED, json!(files_updated)),
            ]),
        )
    }
}

/// Per-field absolute tiers. Emits the single higher tier reached.
pub struct FieldThresholdRule {
    field: FigmaField,
}

impl FieldThresholdRule {
    pub fn new(field: FigmaField) -> Self {
        Self { field }
    }
}

impl Rule for FieldThresholdRule {
    fn code(&self) -> &'static str {
        self.field.threshold_code()
    }

    fn source(&self) -> RuleSource {
        RuleSource::Figma
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Anomaly> {
        let metrics = ctx.metrics(RuleSource::Figma)?;
        let value = self.field.extract(metrics)?;
        let tiers = self.field.tiers(ctx.thresholds);
        let (severity, threshold, label) = if value >= tiers.severe {
            (Severity::Severe, tiers.severe, "severe")
        } else if value >= tiers.warn {
            (Severity::Warn, tiers.warn, "warn")
        } else {
            return None;
        };
        Some(
            Anomaly::new(
                self.field.threshold_code(),
                severity,
                format!(
                    "Figma {} of {value} in one day ({label} threshold: {threshold})",
                    self.field.label()
                ),
            )
            .with_evidence([
                ("field", json!(self.field.label())),
                ("value", json!(value)),
                ("threshold", json!(threshold)),
            ]),
        )
    }
}
