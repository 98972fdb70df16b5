//! Event handler trait with no-op defaults.

use super::types::*;

/// Receives engine events. All methods default to no-ops so a handler only
/// implements the events it cares about.
pub trait QualityEventHandler: Send + Sync {
    fn on_assessment_computed(&self, _event: &AssessmentComputedEvent) {}
    fn on_anomaly_detected(&self, _event: &AnomalyDetectedEvent) {}
    fn on_override_accepted(&self, _event: &OverrideAcceptedEvent) {}
    fn on_override_rejected(&self, _event: &OverrideRejectedEvent) {}
    fn on_batch_complete(&self, _event: &BatchCompleteEvent) {}
}
