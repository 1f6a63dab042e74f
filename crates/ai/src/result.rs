use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use waterwatch_core::{PollutionType, ReportId, ReportStatus};

use crate::confidence::{clamp_confidence, decide, CONFIDENCE_FLOOR};
use crate::imagery::SatelliteSource;
use crate::weather::WeatherSnapshot;

/// How an analysis score was produced.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMethod {
    /// Category table + jitter over real imagery (no pixel inspection).
    SimplifiedAnalysis,
    /// Mean per-pixel RGB heuristic over a raw RGB payload.
    RgbSample,
    /// Offline simulation; no imagery or weather was fetched.
    Simulated,
}

/// Structured record of how a confidence was reached.
///
/// Every field is always serialized (absent values as `null`) so the live and
/// simulated paths expose the same field set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub pollution_type: PollutionType,
    /// Analyzer score in [0, 1], before weather adjustment.
    pub score: f64,
    pub method: AnalysisMethod,
    pub timestamp: DateTime<Utc>,
    pub pixel_count: Option<u32>,
    pub satellite_source: Option<SatelliteSource>,
    pub satellite_date: Option<NaiveDate>,
    pub weather: Option<WeatherSnapshot>,
    pub verification_time: Option<DateTime<Utc>>,
}

impl AnalysisRecord {
    pub fn new(pollution_type: PollutionType, score: f64, method: AnalysisMethod, timestamp: DateTime<Utc>) -> Self {
        Self {
            pollution_type,
            score,
            method,
            timestamp,
            pixel_count: None,
            satellite_source: None,
            satellite_date: None,
            weather: None,
            verification_time: None,
        }
    }

    pub fn with_pixel_count(mut self, pixel_count: u32) -> Self {
        self.pixel_count = Some(pixel_count);
        self
    }

    pub fn with_satellite(mut self, source: SatelliteSource, date: Option<NaiveDate>) -> Self {
        self.satellite_source = Some(source);
        self.satellite_date = date;
        self
    }

    pub fn with_weather(mut self, weather: Option<WeatherSnapshot>) -> Self {
        self.weather = weather;
        self
    }

    pub fn with_verification_time(mut self, at: DateTime<Utc>) -> Self {
        self.verification_time = Some(at);
        self
    }
}

/// Outcome of one verification call; the unit of record in the history store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub report_id: ReportId,
    pub verified: bool,
    /// Always within [0.1, 0.95].
    pub confidence: f64,
    pub status: ReportStatus,
    pub analysis: Option<AnalysisRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VerificationResult {
    /// A completed analysis; status derives from the clamped confidence.
    pub fn decided(report_id: ReportId, confidence: f64, analysis: AnalysisRecord) -> Self {
        let confidence = clamp_confidence(confidence);
        let (verified, status) = decide(confidence);
        Self {
            report_id,
            verified,
            confidence,
            status,
            analysis: Some(analysis),
            reason: None,
            error: None,
        }
    }

    /// A fail-closed rejection at the confidence floor.
    pub fn rejected(report_id: ReportId, reason: Option<String>, error: Option<String>) -> Self {
        let (verified, status) = decide(CONFIDENCE_FLOOR);
        Self {
            report_id,
            verified,
            confidence: CONFIDENCE_FLOOR,
            status,
            analysis: None,
            reason,
            error,
        }
    }
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("invalid analysis input: {0}")]
    InvalidInput(String),

    #[error("analysis failed: {0}")]
    AnalysisFailed(String),
}
