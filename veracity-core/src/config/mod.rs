//! Configuration system for Veracity.
//! TOML-based, 3-layer resolution: env > project > user > defaults.

pub mod quality_config;
pub mod telemetry_config;
pub mod thresholds_config;

pub use quality_config::QualityConfig;
pub use telemetry_config::TelemetryConfig;
pub use thresholds_config::{Thresholds, ThresholdsConfig, TierPair};
