//! Telemetry configuration.

use serde::{Deserialize, Serialize};

/// Configuration for tracing output.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Enable tracing output. Default: false.
    pub enabled: Option<bool>,
    /// Default tracing filter directive (overridden by `VERACITY_LOG`).
    pub filter: Option<String>,
}

impl TelemetryConfig {
    /// Returns whether telemetry is enabled, defaulting to false.
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }

    /// Returns the effective filter directive, defaulting to `"warn"`.
    pub fn effective_filter(&self) -> &str {
        self.filter.as_deref().unwrap_or("warn")
    }
}
