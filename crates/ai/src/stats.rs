use serde::{Deserialize, Serialize};

use crate::result::VerificationResult;

/// Aggregate view over the verification history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationStats {
    pub total_reports: usize,
    pub verified_reports: usize,
    pub rejected_reports: usize,
    /// Percentage in [0, 100]; 0 for an empty history.
    pub verification_rate: f64,
    /// Mean confidence; 0 for an empty history.
    pub average_confidence: f64,
}

impl VerificationStats {
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a VerificationResult>) -> Self {
        let (total, verified, confidence_sum) = results
            .into_iter()
            .fold((0usize, 0usize, 0.0f64), |(t, v, s), r| {
                (t + 1, v + usize::from(r.verified), s + r.confidence)
            });

        if total == 0 {
            return Self {
                total_reports: 0,
                verified_reports: 0,
                rejected_reports: 0,
                verification_rate: 0.0,
                average_confidence: 0.0,
            };
        }

        Self {
            total_reports: total,
            verified_reports: verified,
            rejected_reports: total - verified,
            verification_rate: verified as f64 / total as f64 * 100.0,
            average_confidence: confidence_sum / total as f64,
        }
    }
}
