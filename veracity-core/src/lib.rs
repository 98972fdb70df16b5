//! veracity-core: configuration, errors, events, and tracing for the
//! Veracity data quality engine.
//!
//! - Config: TOML-based layered threshold resolution (defaults < user <
//!   project < `VERACITY_*` environment), validated at load time
//! - Errors: one error enum per subsystem, `thiserror` only, zero `anyhow`
//! - Events: synchronous dispatch so the embedding scoring job can observe
//!   assessments and override decisions
//! - Telemetry: tracing bootstrap for embedding processes and tests

pub mod config;
pub mod errors;
pub mod events;
pub mod telemetry;

pub use config::{QualityConfig, TelemetryConfig, Thresholds, ThresholdsConfig, TierPair};
pub use errors::{ConfigError, SnapshotError, VeracityErrorCode};
pub use events::{EventDispatcher, QualityEventHandler};
