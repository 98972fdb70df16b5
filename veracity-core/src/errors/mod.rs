//! Error handling for Veracity.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.
//!
//! Nothing inside the evaluation engine is fatal: malformed metric fields
//! become anomalies and invalid overrides become rejections. These enums
//! exist only at the process boundary (config load, snapshot ingestion).

pub mod config_error;
pub mod error_code;
pub mod snapshot_error;

pub use config_error::ConfigError;
pub use error_code::VeracityErrorCode;
pub use snapshot_error::SnapshotError;
