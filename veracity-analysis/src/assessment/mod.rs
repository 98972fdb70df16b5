//! Data quality assessment — severity model and aggregation.
//!
//! Every confidence cap in Veracity flows through this module: rules emit
//! anomalies, [`aggregate`] reduces them to the single cap the scoring
//! model is bound by.

pub mod aggregator;
pub mod types;

pub use aggregator::aggregate;
pub use types::{Anomaly, DataQualityAssessment, Severity};
