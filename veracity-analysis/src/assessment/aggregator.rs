//! Severity aggregation — anomaly list to confidence cap and reasons.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::types::{Anomaly, DataQualityAssessment};

/// Maximum number of explanatory reasons attached to an assessment.
const MAX_REASONS: usize = 3;

/// Reduce an ordered anomaly list into an assessment.
///
/// The cap is the minimum cap implied by any anomaly present (worst case
/// governs); an empty list yields 1.0. Reasons are the messages of the
/// worst anomalies — severity descending, evaluation order within a
/// severity — de-duplicated by code, at most [`MAX_REASONS`].
pub fn aggregate(anomalies: Vec<Anomaly>) -> DataQualityAssessment {
    if anomalies.is_empty() {
        return DataQualityAssessment::clean();
    }

    let confidence_cap = anomalies
        .iter()
        .map(|a| a.severity.cap())
        .fold(1.0_f64, f64::min);

    // Stable sort keeps evaluation order within each severity.
    let mut by_severity: Vec<&Anomaly> = anomalies.iter().collect();
    by_severity.sort_by(|a, b| b.severity.cmp(&a.severity));

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut reasons: SmallVec<[String; 3]> = SmallVec::new();
    for anomaly in by_severity {
        if !seen.insert(anomaly.code.as_str()) {
            continue;
        }
        reasons.push(anomaly.message.clone());
        if reasons.len() == MAX_REASONS {
            break;
        }
    }

    DataQualityAssessment {
        anomalies,
        confidence_cap,
        confidence_cap_reasons: reasons,
    }
}
