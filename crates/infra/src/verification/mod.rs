//! Verification pipeline: imagery, analysis, weather adjustment, decision and
//! history, plus the offline simulation path.

use std::time::Duration;

use thiserror::Error;

use waterwatch_ai::AiError;
use waterwatch_core::{Coordinates, DomainError, DomainResult, PollutionType, Report, ReportId};

mod orchestrator;

pub use orchestrator::{analyzer_for, VerificationOrchestrator};

/// Rejection reason when every imagery source failed.
pub const NO_IMAGERY_REASON: &str = "No satellite imagery available";

/// Rejection reason when the pipeline itself failed.
pub const TECHNICAL_FAILURE_REASON: &str = "Verification failed due to technical error";

/// Internal pipeline failure. Never leaves the orchestrator: it is folded into a
/// low-confidence rejection carrying the error text.
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("invalid report: {0}")]
    InvalidReport(#[from] DomainError),

    #[error(transparent)]
    Analysis(#[from] AiError),
}

/// What the orchestrator needs to know about a report.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationRequest {
    pub report_id: ReportId,
    pub lat: f64,
    pub lng: f64,
    pub pollution_type: PollutionType,
    /// Carried for logging only; the photo itself is not analysed.
    pub photo_url: String,
}

impl VerificationRequest {
    pub fn coordinates(&self) -> DomainResult<Coordinates> {
        Coordinates::new(self.lat, self.lng)
    }
}

impl From<&Report> for VerificationRequest {
    fn from(report: &Report) -> Self {
        Self {
            report_id: report.id,
            lat: report.lat,
            lng: report.lng,
            pollution_type: report.pollution_type.clone(),
            photo_url: report.photo_url.clone(),
        }
    }
}

/// Artificial processing time of the simulate path, drawn uniformly from
/// `[min, max]`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SimulationDelay {
    pub min: Duration,
    pub max: Duration,
}

impl Default for SimulationDelay {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(2000),
            max: Duration::from_millis(5000),
        }
    }
}

impl SimulationDelay {
    /// No delay at all; handy for tests that do not care about timing.
    pub fn none() -> Self {
        Self {
            min: Duration::ZERO,
            max: Duration::ZERO,
        }
    }

    /// Map a unit sample `u` in `[0, 1)` onto the configured range. A
    /// non-finite sample yields `min`.
    pub fn sample(&self, u: f64) -> Duration {
        let u = if u.is_finite() { u.clamp(0.0, 1.0) } else { 0.0 };
        let span = self.max.saturating_sub(self.min);
        self.min + span.mul_f64(u)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn delay_samples_stay_in_range() {
        let delay = SimulationDelay::default();
        assert_eq!(delay.sample(0.0), Duration::from_millis(2000));
        assert_eq!(delay.sample(0.5), Duration::from_millis(3500));
        assert!(delay.sample(0.999_999) <= Duration::from_millis(5000));
        assert_eq!(SimulationDelay::none().sample(0.7), Duration::ZERO);
    }

    #[test]
    fn non_finite_samples_fall_back_to_min() {
        let delay = SimulationDelay::default();
        assert_eq!(delay.sample(f64::NAN), delay.min);
        assert_eq!(delay.sample(f64::INFINITY), delay.min);
        assert_eq!(delay.sample(f64::NEG_INFINITY), delay.min);
    }

    #[test]
    fn request_is_built_from_report() {
        let report = Report::submit(
            ReportId::new(),
            "https://cdn.example/x.jpg",
            Coordinates::new(12.0, 77.0).unwrap(),
            Some("Lake shore".into()),
            PollutionType::Sewage,
            Utc::now(),
        );
        let req = VerificationRequest::from(&report);
        assert_eq!(req.report_id, report.id);
        assert_eq!(req.pollution_type, PollutionType::Sewage);
        assert_eq!(req.coordinates().unwrap(), Coordinates::new(12.0, 77.0).unwrap());
    }

    #[test]
    fn out_of_range_request_has_no_coordinates() {
        let req = VerificationRequest {
            report_id: ReportId::new(),
            lat: 123.0,
            lng: 0.0,
            pollution_type: PollutionType::Oil,
            photo_url: String::new(),
        };
        assert!(matches!(req.coordinates(), Err(DomainError::Validation(_))));
    }
}
