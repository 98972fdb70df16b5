//! Snapshot ingestion errors.
//!
//! Only the document itself can fail ingestion. Malformed *fields* inside a
//! well-formed document are preserved as-is and converted into anomalies by
//! the numeric-validity rules.

use super::error_code::{self, VeracityErrorCode};

/// Errors that can occur while ingesting a metrics snapshot document.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Malformed snapshot document: {message}")]
    Malformed { message: String },
}

impl VeracityErrorCode for SnapshotError {
    fn error_code(&self) -> &'static str {
        error_code::SNAPSHOT_ERROR
    }
}
