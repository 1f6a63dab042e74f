use chrono::Utc;

use waterwatch_core::PollutionType;

use crate::confidence::{decide, ConfidenceModel};
use crate::imagery::SatelliteImage;
use crate::result::{AiError, AnalysisMethod, AnalysisRecord};

/// Simulated raster size reported by the simplified analyzer (256 x 256).
const SIMPLIFIED_PIXEL_COUNT: u32 = 256 * 256;

/// Output of a single analyzer run.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub confidence: f64,
    pub verified: bool,
    pub record: AnalysisRecord,
}

impl Analysis {
    pub fn new(confidence: f64, record: AnalysisRecord) -> Self {
        let (verified, _) = decide(confidence);
        Self {
            confidence,
            verified,
            record,
        }
    }
}

/// Seam for image-based pollution scoring.
///
/// Implementations receive the raw imagery and the reported category. They may
/// ignore the payload entirely; the orchestrator contract does not change when a
/// real image model is substituted.
pub trait PollutionAnalyzer: Send + Sync + 'static {
    fn analyze(&self, image: &SatelliteImage, pollution_type: &PollutionType) -> Result<Analysis, AiError>;
}

/// Category-table analyzer. Does not inspect pixel data.
#[derive(Debug, Clone, Default)]
pub struct SimplifiedAnalyzer {
    model: ConfidenceModel,
}

impl SimplifiedAnalyzer {
    pub fn new(model: ConfidenceModel) -> Self {
        Self { model }
    }
}

impl PollutionAnalyzer for SimplifiedAnalyzer {
    fn analyze(&self, _image: &SatelliteImage, pollution_type: &PollutionType) -> Result<Analysis, AiError> {
        let confidence = self.model.score(pollution_type);
        let record = AnalysisRecord::new(
            pollution_type.clone(),
            confidence,
            AnalysisMethod::SimplifiedAnalysis,
            Utc::now(),
        )
        .with_pixel_count(SIMPLIFIED_PIXEL_COUNT);

        Ok(Analysis::new(confidence, record))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use waterwatch_core::Coordinates;

    use super::*;
    use crate::imagery::SatelliteSource;
    use crate::random::FixedRandom;

    fn image(bytes: Vec<u8>) -> SatelliteImage {
        SatelliteImage {
            bytes,
            source: SatelliteSource::Landsat,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            coordinates: Coordinates::new(1.0, 2.0).unwrap(),
        }
    }

    #[test]
    fn payload_content_does_not_matter() {
        let analyzer = SimplifiedAnalyzer::new(ConfidenceModel::new(Arc::new(FixedRandom(0.5))));
        let a = analyzer.analyze(&image(vec![]), &PollutionType::Turbidity).unwrap();
        let b = analyzer.analyze(&image(vec![255; 4096]), &PollutionType::Turbidity).unwrap();
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(a.confidence, 0.80);
    }

    #[test]
    fn record_carries_method_and_simulated_pixel_count() {
        let analyzer = SimplifiedAnalyzer::new(ConfidenceModel::new(Arc::new(FixedRandom(0.5))));
        let a = analyzer.analyze(&image(vec![1, 2, 3]), &PollutionType::Plastic).unwrap();
        assert_eq!(a.record.method, AnalysisMethod::SimplifiedAnalysis);
        assert_eq!(a.record.pixel_count, Some(65_536));
        assert_eq!(a.record.score, a.confidence);
        assert!(a.verified);
    }

    #[test]
    fn verified_flag_follows_threshold() {
        // 0.50 base for unknown categories, no jitter -> rejected.
        let analyzer = SimplifiedAnalyzer::new(ConfidenceModel::new(Arc::new(FixedRandom(0.5))));
        let a = analyzer.analyze(&image(vec![]), &PollutionType::from("foam")).unwrap();
        assert!(!a.verified);
    }
}
