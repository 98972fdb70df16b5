//! EventDispatcher — synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::QualityEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// When no handlers are registered, `emit` iterates over an empty Vec —
/// effectively zero cost. The compiler may optimize it away entirely.
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn QualityEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn QualityEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// Handlers that panic are caught and do not prevent subsequent handlers
    /// from receiving the event.
    fn emit<F: Fn(&dyn QualityEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::error!("event handler panicked — continuing with remaining handlers");
            }
        }
    }

    pub fn emit_assessment_computed(&self, event: &AssessmentComputedEvent) {
        self.emit(|h| h.on_assessment_computed(event));
    }

    pub fn emit_anomaly_detected(&self, event: &AnomalyDetectedEvent) {
        self.emit(|h| h.on_anomaly_detected(event));
    }

    pub fn emit_override_accepted(&self, event: &OverrideAcceptedEvent) {
        self.emit(|h| h.on_override_accepted(event));
    }

    pub fn emit_override_rejected(&self, event: &OverrideRejectedEvent) {
        self.emit(|h| h.on_override_rejected(event));
    }

    pub fn emit_batch_complete(&self, event: &BatchCompleteEvent) {
        self.emit(|h| h.on_batch_complete(event));
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
