//! `waterwatch-ai`
//!
//! **Responsibility:** heuristic verification scoring for pollution reports.
//!
//! This crate is intentionally storage- and network-agnostic:
//! - Imagery and weather are fetched by callers (infra gateways) and passed in.
//! - Scoring never fails hard; every confidence it emits is clamped to
//!   `[CONFIDENCE_FLOOR, CONFIDENCE_CEILING]`.
//! - Randomness comes from an injected [`RandomSource`] so tests can pin it.

pub mod analyzer;
pub mod confidence;
pub mod imagery;
pub mod pixel;
pub mod random;
pub mod result;
pub mod stats;
pub mod weather;

pub use analyzer::{Analysis, PollutionAnalyzer, SimplifiedAnalyzer};
pub use confidence::{
    clamp_confidence, decide, ConfidenceModel, CONFIDENCE_CEILING, CONFIDENCE_FLOOR, VERIFICATION_THRESHOLD,
};
pub use imagery::{SatelliteImage, SatelliteSource};
pub use pixel::{pixel_score, RgbSampleAnalyzer};
pub use random::{FixedRandom, RandomSource, SeededRandom, ThreadRandom};
pub use result::{AiError, AnalysisMethod, AnalysisRecord, VerificationResult};
pub use stats::VerificationStats;
pub use weather::{adjust_for_weather, WeatherSnapshot};
