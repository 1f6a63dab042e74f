//! Per-pixel RGB pollution heuristic and an analyzer built on it.
//!
//! [`RgbSampleAnalyzer`] expects an uncompressed, interleaved 8-bit RGB payload.
//! Compressed imagery (JPEG/PNG) is not decoded here.

use chrono::Utc;

use waterwatch_core::PollutionType;

use crate::analyzer::{Analysis, PollutionAnalyzer};
use crate::confidence::{clamp_confidence, ConfidenceModel};
use crate::imagery::SatelliteImage;
use crate::result::{AiError, AnalysisMethod, AnalysisRecord};

/// Score a single pixel for the given category, in [0, 1].
pub fn pixel_score(r: u8, g: u8, b: u8, pollution_type: &PollutionType) -> f64 {
    let red = f64::from(r) / 255.0;
    let green = f64::from(g) / 255.0;
    let blue = f64::from(b) / 255.0;

    match pollution_type {
        // Dark water with a strong red component.
        PollutionType::Oil => {
            if red > 0.3 && green < 0.2 && blue < 0.2 {
                0.8
            } else if red > 0.2 && green < 0.3 && blue < 0.3 {
                0.5
            } else {
                0.0
            }
        }
        // High reflectance across all bands.
        PollutionType::Plastic => {
            if red > 0.4 && green > 0.4 && blue > 0.4 {
                0.9
            } else if red > 0.3 && green > 0.3 && blue > 0.3 {
                0.6
            } else {
                0.0
            }
        }
        PollutionType::Sewage => {
            if red < 0.3 && green < 0.3 && blue < 0.4 {
                0.7
            } else if red < 0.4 && green < 0.4 && blue < 0.5 {
                0.4
            } else {
                0.0
            }
        }
        PollutionType::Turbidity => {
            if blue > 0.4 && green > 0.3 && red < 0.3 {
                0.8
            } else if blue > 0.3 && green > 0.2 && red < 0.4 {
                0.5
            } else {
                0.0
            }
        }
        PollutionType::Unrecognized(_) => {
            if red > 0.5 || green > 0.5 || blue > 0.5 {
                0.3
            } else {
                0.0
            }
        }
    }
}

/// Averages [`pixel_score`] over every RGB triple in the payload.
///
/// Payloads with no complete pixel fall back to the category model.
#[derive(Debug, Clone, Default)]
pub struct RgbSampleAnalyzer {
    fallback: ConfidenceModel,
}

impl RgbSampleAnalyzer {
    pub fn new(fallback: ConfidenceModel) -> Self {
        Self { fallback }
    }
}

impl PollutionAnalyzer for RgbSampleAnalyzer {
    fn analyze(&self, image: &SatelliteImage, pollution_type: &PollutionType) -> Result<Analysis, AiError> {
        let pixels = image.bytes.chunks_exact(3);
        let count = pixels.len();

        if count == 0 {
            let confidence = self.fallback.score(pollution_type);
            let record = AnalysisRecord::new(
                pollution_type.clone(),
                confidence,
                AnalysisMethod::SimplifiedAnalysis,
                Utc::now(),
            )
            .with_pixel_count(0);
            return Ok(Analysis::new(confidence, record));
        }

        let pixel_count = u32::try_from(count)
            .map_err(|_| AiError::InvalidInput(format!("payload holds {count} pixels; too large to score")))?;

        let total: f64 = pixels.map(|px| pixel_score(px[0], px[1], px[2], pollution_type)).sum();
        let mean = total / count as f64;
        let confidence = clamp_confidence(mean);

        let record = AnalysisRecord::new(pollution_type.clone(), mean, AnalysisMethod::RgbSample, Utc::now())
            .with_pixel_count(pixel_count);

        Ok(Analysis::new(confidence, record))
    }
}
