//! Base confidence per pollution category, jitter, clamping and the single
//! Verified/Rejected decision.

use std::sync::Arc;

use waterwatch_core::{PollutionType, ReportStatus};

use crate::random::{RandomSource, ThreadRandom};

/// Lowest confidence any path may emit. Scoring is heuristic, never certain.
pub const CONFIDENCE_FLOOR: f64 = 0.1;

/// Highest confidence any path may emit.
pub const CONFIDENCE_CEILING: f64 = 0.95;

/// A report is verified iff its confidence is strictly above this value.
pub const VERIFICATION_THRESHOLD: f64 = 0.6;

/// Neutral score for categories outside the known set.
pub const DEFAULT_BASE_CONFIDENCE: f64 = 0.50;

/// Total width of the uniform jitter band (±0.15).
const JITTER_SPAN: f64 = 0.3;

/// Clamp a raw score into `[CONFIDENCE_FLOOR, CONFIDENCE_CEILING]`.
pub fn clamp_confidence(raw: f64) -> f64 {
    if raw.is_nan() {
        return CONFIDENCE_FLOOR;
    }
    raw.clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING)
}

/// The one place the verification threshold is applied.
///
/// Returns `(verified, status)`; `verified == (confidence > 0.6)`.
pub fn decide(confidence: f64) -> (bool, ReportStatus) {
    let verified = confidence > VERIFICATION_THRESHOLD;
    let status = if verified {
        ReportStatus::Verified
    } else {
        ReportStatus::Rejected
    };
    (verified, status)
}

/// Maps a pollution category to a jittered confidence score.
///
/// Oil slicks and turbidity are visually distinctive; plastic is harder to tell
/// apart from sea foam or glare. The table is a design choice, not physics.
#[derive(Debug, Clone)]
pub struct ConfidenceModel {
    random: Arc<dyn RandomSource>,
}

impl Default for ConfidenceModel {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRandom))
    }
}

impl ConfidenceModel {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    pub fn random(&self) -> &Arc<dyn RandomSource> {
        &self.random
    }

    pub fn base_confidence(pollution_type: &PollutionType) -> f64 {
        match pollution_type {
            PollutionType::Oil => 0.75,
            PollutionType::Plastic => 0.65,
            PollutionType::Sewage => 0.70,
            PollutionType::Turbidity => 0.80,
            PollutionType::Unrecognized(_) => DEFAULT_BASE_CONFIDENCE,
        }
    }

    /// `base + (U(0,1) - 0.5) * 0.3`, clamped.
    pub fn with_jitter(&self, base: f64) -> f64 {
        let u = self.random.next_unit();
        clamp_confidence(base + (u - 0.5) * JITTER_SPAN)
    }

    /// Base confidence for the category with jitter applied.
    pub fn score(&self, pollution_type: &PollutionType) -> f64 {
        self.with_jitter(Self::base_confidence(pollution_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FixedRandom, SeededRandom};
    use proptest::prelude::*;

    fn model(u: f64) -> ConfidenceModel {
        ConfidenceModel::new(Arc::new(FixedRandom(u)))
    }

    #[test]
    fn base_table_is_exact() {
        assert_eq!(ConfidenceModel::base_confidence(&PollutionType::Oil), 0.75);
        assert_eq!(ConfidenceModel::base_confidence(&PollutionType::Plastic), 0.65);
        assert_eq!(ConfidenceModel::base_confidence(&PollutionType::Sewage), 0.70);
        assert_eq!(ConfidenceModel::base_confidence(&PollutionType::Turbidity), 0.80);
        assert_eq!(ConfidenceModel::base_confidence(&PollutionType::from("foam")), 0.50);
    }

    #[test]
    fn midpoint_sample_means_no_jitter() {
        assert_eq!(model(0.5).score(&PollutionType::Oil), 0.75);
    }

    #[test]
    fn jitter_extremes_are_plus_minus_fifteen_points() {
        let low = model(0.0).with_jitter(0.5);
        assert!((low - 0.35).abs() < 1e-12);

        let high = model(0.999_999).with_jitter(0.5);
        assert!((high - 0.65).abs() < 1e-5);
    }

    #[test]
    fn jitter_is_clamped_at_the_ceiling() {
        // 0.80 + 0.15 would be 0.95 exactly; push past it with a hand-made base.
        assert_eq!(model(0.99).with_jitter(0.9), CONFIDENCE_CEILING);
    }

    #[test]
    fn decision_threshold_is_strict() {
        assert_eq!(decide(0.6), (false, ReportStatus::Rejected));
        assert_eq!(decide(0.600_001), (true, ReportStatus::Verified));
        assert_eq!(decide(CONFIDENCE_FLOOR), (false, ReportStatus::Rejected));
    }

    #[test]
    fn nan_clamps_to_floor() {
        assert_eq!(clamp_confidence(f64::NAN), CONFIDENCE_FLOOR);
    }

    proptest! {
        #[test]
        fn jittered_scores_stay_in_range(seed in any::<u64>(), kind in 0usize..5) {
            let kinds = ["oil", "plastic", "sewage", "turbidity", "unknown"];
            let model = ConfidenceModel::new(Arc::new(SeededRandom::new(seed)));
            let pt = PollutionType::from(kinds[kind]);
            for _ in 0..8 {
                let c = model.score(&pt);
                prop_assert!((CONFIDENCE_FLOOR..=CONFIDENCE_CEILING).contains(&c));
            }
        }

        #[test]
        fn clamp_is_idempotent(x in -10.0f64..10.0) {
            let once = clamp_confidence(x);
            prop_assert_eq!(clamp_confidence(once), once);
        }
    }
}
