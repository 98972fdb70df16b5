//! Evaluation drivers — single snapshot and rayon batch entry points.

use std::time::Instant;

use rayon::prelude::*;

use veracity_core::config::Thresholds;
use veracity_core::events::{
    AnomalyDetectedEvent, AssessmentComputedEvent, BatchCompleteEvent, EventDispatcher,
    OverrideAcceptedEvent, OverrideRejectedEvent, QualityEventHandler,
};

use crate::assessment::{aggregate, DataQualityAssessment};
use crate::review::{self, ConfidenceCapOverride, OverrideDecision, ReviewResolution};
use crate::rules::RuleCatalog;
use crate::snapshot::MetricsSnapshot;

/// Evaluate one snapshot with the standard catalog. The stateless entry
/// point; batch callers should hold a [`QualityEngine`] instead so the
/// catalog is built once.
pub fn evaluate_snapshot(
    snapshot: &MetricsSnapshot,
    thresholds: &Thresholds,
) -> DataQualityAssessment {
    aggregate(RuleCatalog::standard().evaluate(snapshot, thresholds))
}

/// The engine a scoring job holds for the lifetime of a run: the rule
/// catalog, the resolved thresholds, and an event dispatcher.
///
/// Evaluations share no mutable state, so one engine may be used from many
/// threads at once.
pub struct QualityEngine {
    catalog: RuleCatalog,
    thresholds: Thresholds,
    events: EventDispatcher,
}

impl QualityEngine {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            catalog: RuleCatalog::standard(),
            thresholds,
            events: EventDispatcher::new(),
        }
    }

    /// Use a custom catalog instead of the standard one.
    pub fn with_catalog(mut self, catalog: RuleCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Register an event handler.
    pub fn register_handler(&mut self, handler: std::sync::Arc<dyn QualityEventHandler>) {
        self.events.register(handler);
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Evaluate one employee-day snapshot, dispatching events.
    pub fn evaluate(&self, snapshot: &MetricsSnapshot) -> DataQualityAssessment {
        let assessment = aggregate(self.catalog.evaluate(snapshot, &self.thresholds));
        for anomaly in &assessment.anomalies {
            self.events.emit_anomaly_detected(&AnomalyDetectedEvent {
                employee_id: snapshot.employee_id.clone(),
                date: snapshot.date.clone(),
                code: anomaly.code.clone(),
                severity: anomaly.severity.name().to_string(),
                message: anomaly.message.clone(),
            });
        }
        self.events.emit_assessment_computed(&AssessmentComputedEvent {
            employee_id: snapshot.employee_id.clone(),
            date: snapshot.date.clone(),
            anomaly_count: assessment.anomalies.len(),
            confidence_cap: assessment.confidence_cap,
        });
        assessment
    }

    /// Evaluate many employee-day snapshots in parallel. Results keep the
    /// input order; evaluations are independent, so no ordering is imposed
    /// between them while running.
    pub fn evaluate_batch(&self, snapshots: &[MetricsSnapshot]) -> Vec<DataQualityAssessment> {
        let start = Instant::now();
        let assessments: Vec<DataQualityAssessment> = snapshots
            .par_iter()
            .map(|snapshot| self.evaluate(snapshot))
            .collect();
        let anomalous = assessments.iter().filter(|a| !a.is_clean()).count();
        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(
            evaluated = assessments.len(),
            anomalous,
            duration_ms,
            "batch evaluation complete"
        );
        self.events.emit_batch_complete(&BatchCompleteEvent {
            evaluated: assessments.len(),
            anomalous,
            duration_ms,
        });
        assessments
    }

    /// Review-path resolution with events for the override decision.
    pub fn resolve_review(
        &self,
        model_confidence: f64,
        assessment: &DataQualityAssessment,
        proposed: Option<&ConfidenceCapOverride>,
    ) -> ReviewResolution {
        let resolution = review::resolve_with_override(model_confidence, assessment, proposed);
        match &resolution.decision {
            Some(OverrideDecision::Accepted(cap)) => {
                self.events.emit_override_accepted(&OverrideAcceptedEvent {
                    new_cap: *cap,
                    original_cap: assessment.confidence_cap,
                });
            }
            Some(OverrideDecision::Rejected { reason }) => {
                self.events.emit_override_rejected(&OverrideRejectedEvent {
                    reason: reason.clone(),
                    fallback_cap: assessment.confidence_cap,
                });
            }
            None => {}
        }
        resolution
    }
}
