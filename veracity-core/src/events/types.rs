//! Event payload types for the quality engine.

/// Payload for `on_assessment_computed`.
#[derive(Debug, Clone)]
pub struct AssessmentComputedEvent {
    pub employee_id: String,
    pub date: String,
    pub anomaly_count: usize,
    pub confidence_cap: f64,
}

/// Payload for `on_anomaly_detected`.
#[derive(Debug, Clone)]
pub struct AnomalyDetectedEvent {
    pub employee_id: String,
    pub date: String,
    pub code: String,
    pub severity: String,
    pub message: String,
}

/// Payload for `on_override_accepted`.
#[derive(Debug, Clone)]
pub struct OverrideAcceptedEvent {
    pub new_cap: f64,
    pub original_cap: f64,
}

/// Payload for `on_override_rejected`.
#[derive(Debug, Clone)]
pub struct OverrideRejectedEvent {
    pub reason: String,
    pub fallback_cap: f64,
}

/// Payload for `on_batch_complete`.
#[derive(Debug, Clone)]
pub struct BatchCompleteEvent {
    pub evaluated: usize,
    pub anomalous: usize,
    pub duration_ms: u64,
}
