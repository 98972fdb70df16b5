//! Review-path confidence resolution.
//!
//! Two-stage trust model: the automatic cap always applies; a reviewer
//! override may replace it only after structural validation. Rejection
//! falls back to the original cap — fail-closed for raising trust,
//! fail-open for pipeline liveness.

use serde::{Deserialize, Serialize};

use crate::assessment::DataQualityAssessment;

/// A reviewer-submitted replacement cap, produced by the re-review process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceCapOverride {
    pub new_confidence_cap: f64,
    pub justification: String,
    /// References to the evidence the reviewer consulted (ticket IDs,
    /// document links). Not interpreted by the engine.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence_refs: Vec<String>,
}

/// Outcome of validating a proposed override.
#[derive(Debug, Clone, PartialEq)]
pub enum OverrideDecision {
    Accepted(f64),
    Rejected { reason: String },
}

impl OverrideDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// The cap this decision resolves to, falling back on rejection.
    pub fn effective_cap(&self, fallback: f64) -> f64 {
        match self {
            Self::Accepted(cap) => *cap,
            Self::Rejected { .. } => fallback,
        }
    }
}

/// The resolved review outcome: bounded confidence, the cap that bounded
/// it, and the override decision if one was submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewResolution {
    pub confidence: f64,
    pub effective_cap: f64,
    pub decision: Option<OverrideDecision>,
}

/// Validate a proposed override structurally. The cap must lie in [0, 1]
/// and the justification must be non-empty; the reviewer's evidence is
/// otherwise trusted.
pub fn validate_override(proposed: &ConfidenceCapOverride) -> OverrideDecision {
    let cap = proposed.new_confidence_cap;
    if !cap.is_finite() || !(0.0..=1.0).contains(&cap) {
        return OverrideDecision::Rejected {
            reason: format!("new confidence cap {cap} outside [0.0, 1.0]"),
        };
    }
    if proposed.justification.trim().is_empty() {
        return OverrideDecision::Rejected {
            reason: "justification must not be empty".to_string(),
        };
    }
    OverrideDecision::Accepted(cap)
}

/// Daily-scoring resolution: clamp the model confidence against the
/// automatic cap.
pub fn resolve_confidence(model_confidence: f64, assessment: &DataQualityAssessment) -> f64 {
    clamp_unit(model_confidence).min(assessment.confidence_cap)
}

/// Review-path resolution: validate the override if present, then clamp
/// against whichever cap survives. A rejected override never fails the
/// scoring run.
pub fn resolve_with_override(
    model_confidence: f64,
    assessment: &DataQualityAssessment,
    proposed: Option<&ConfidenceCapOverride>,
) -> ReviewResolution {
    let decision = proposed.map(validate_override);
    let effective_cap = match &decision {
        Some(d) => {
            if let OverrideDecision::Rejected { reason } = d {
                tracing::warn!(
                    reason = %reason,
                    fallback_cap = assessment.confidence_cap,
                    "override rejected — falling back to automatic cap"
                );
            }
            d.effective_cap(assessment.confidence_cap)
        }
        None => assessment.confidence_cap,
    };
    ReviewResolution {
        confidence: clamp_unit(model_confidence).min(effective_cap),
        effective_cap,
        decision,
    }
}

/// Clamp a model-reported confidence into [0, 1]. Non-finite values degrade
/// to 0.
fn clamp_unit(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{aggregate, Anomaly, Severity};

    fn capped_assessment(severity: Severity) -> DataQualityAssessment {
        aggregate(vec![Anomaly::new("test_anomaly", severity, "test")])
    }

    #[test]
    fn test_daily_resolution_clamps_to_cap() {
        let assessment = capped_assessment(Severity::Severe);
        assert_eq!(resolve_confidence(0.9, &assessment), 0.55);
        assert_eq!(resolve_confidence(0.4, &assessment), 0.4);
    }

    #[test]
    fn test_model_confidence_clamped_to_unit_interval() {
        let clean = DataQualityAssessment::clean();
        assert_eq!(resolve_confidence(1.7, &clean), 1.0);
        assert_eq!(resolve_confidence(-0.2, &clean), 0.0);
        assert_eq!(resolve_confidence(f64::NAN, &clean), 0.0);
    }

    #[test]
    fn test_accepted_override_replaces_cap() {
        let assessment = capped_assessment(Severity::Critical);
        let proposed = ConfidenceCapOverride {
            new_confidence_cap: 0.9,
            justification: "verified with manager".into(),
            evidence_refs: vec![],
        };
        let resolution = resolve_with_override(0.95, &assessment, Some(&proposed));
        assert_eq!(resolution.effective_cap, 0.9);
        assert_eq!(resolution.confidence, 0.9);
        assert!(resolution.decision.unwrap().is_accepted());
    }

    #[test]
    fn test_rejected_override_falls_back() {
        let assessment = capped_assessment(Severity::Critical);
        let proposed = ConfidenceCapOverride {
            new_confidence_cap: 0.9,
            justification: "".into(),
            evidence_refs: vec![],
        };
        let resolution = resolve_with_override(0.95, &assessment, Some(&proposed));
        assert_eq!(resolution.effective_cap, 0.35);
        assert_eq!(resolution.confidence, 0.35);
        assert!(!resolution.decision.unwrap().is_accepted());
    }

    #[test]
    fn test_out_of_range_cap_rejected() {
        for cap in [-0.1, 1.1, f64::NAN, f64::INFINITY] {
            let proposed = ConfidenceCapOverride {
                new_confidence_cap: cap,
                justification: "looks fine".into(),
                evidence_refs: vec![],
            };
            assert!(!validate_override(&proposed).is_accepted(), "cap = {cap}");
        }
    }

    #[test]
    fn test_whitespace_justification_rejected() {
        let proposed = ConfidenceCapOverride {
            new_confidence_cap: 0.8,
            justification: "   \t".into(),
            evidence_refs: vec![],
        };
        assert!(!validate_override(&proposed).is_accepted());
    }

    #[test]
    fn test_no_override_keeps_automatic_cap() {
        let assessment = capped_assessment(Severity::Warn);
        let resolution = resolve_with_override(0.9, &assessment, None);
        assert_eq!(resolution.effective_cap, 0.75);
        assert_eq!(resolution.confidence, 0.75);
        assert!(resolution.decision.is_none());
    }

    #[test]
    fn test_override_may_lower_cap() {
        let assessment = capped_assessment(Severity::Warn);
        let proposed = ConfidenceCapOverride {
            new_confidence_cap: 0.2,
            justification: "metrics confirmed unreliable".into(),
            evidence_refs: vec!["AUDIT-42".into()],
        };
        let resolution = resolve_with_override(0.9, &assessment, Some(&proposed));
        assert_eq!(resolution.effective_cap, 0.2);
        assert_eq!(resolution.confidence, 0.2);
    }
}
