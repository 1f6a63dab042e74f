use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use waterwatch_ai::{VerificationResult, VerificationStats};
use waterwatch_core::{Coordinates, DomainError, PollutionType, Report, ReportId};
use waterwatch_infra::{
    gateway::GatewayError, GatewayConfig, InMemoryReportStore, InMemoryVerificationHistory, ReportStore,
    VerificationOrchestrator, VerificationRequest,
};

/// Failures the HTTP layer maps onto status codes. Verification itself never
/// fails; only lookups and persistence do.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("report not found")]
    NotFound,

    #[error("failed to persist verification result: {0}")]
    Store(DomainError),
}

/// Shared application state behind every handler.
pub struct AppServices {
    reports: Arc<dyn ReportStore>,
    verifier: VerificationOrchestrator,
}

impl core::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppServices")
            .field("verifier", &self.verifier)
            .finish_non_exhaustive()
    }
}

/// Wire the in-memory stores and live gateways.
pub fn build_services(cfg: &GatewayConfig) -> Result<AppServices, GatewayError> {
    let history = Arc::new(InMemoryVerificationHistory::new());
    let verifier = VerificationOrchestrator::from_config(cfg, history)?;
    Ok(AppServices::new(Arc::new(InMemoryReportStore::new()), verifier))
}

impl AppServices {
    pub fn new(reports: Arc<dyn ReportStore>, verifier: VerificationOrchestrator) -> Self {
        Self { reports, verifier }
    }

    pub fn submit_report(
        &self,
        photo_url: String,
        coordinates: Coordinates,
        manual_location: Option<String>,
        pollution_type: PollutionType,
    ) -> ReportId {
        let report = Report::submit(
            ReportId::new(),
            photo_url,
            coordinates,
            manual_location,
            pollution_type,
            Utc::now(),
        );
        let id = report.id;
        info!(report_id = %id, pollution_type = %report.pollution_type, "report submitted");
        self.reports.insert(report);
        id
    }

    pub fn report(&self, id: &ReportId) -> Option<Report> {
        self.reports.get(id)
    }

    pub fn reports(&self) -> Vec<Report> {
        self.reports.list()
    }

    /// Live verification; the outcome is written back onto the report.
    pub async fn verify_report(&self, id: &ReportId) -> Result<VerificationResult, ServiceError> {
        let report = self.reports.get(id).ok_or(ServiceError::NotFound)?;
        let result = self.verifier.verify(&VerificationRequest::from(&report)).await;
        self.persist(&result)?;
        Ok(result)
    }

    pub async fn simulate_report(&self, id: &ReportId) -> Result<VerificationResult, ServiceError> {
        let report = self.reports.get(id).ok_or(ServiceError::NotFound)?;
        let result = self.verifier.simulate(&VerificationRequest::from(&report)).await;
        self.persist(&result)?;
        Ok(result)
    }

    /// Verify every known report among `ids`; unknown ids are skipped.
    ///
    /// Each result is persisted on its own. A failed write is logged and does not
    /// undo the writes before it.
    pub async fn batch_verify(&self, ids: &[ReportId]) -> Vec<VerificationResult> {
        let requests: Vec<VerificationRequest> = self
            .reports
            .get_many(ids)
            .iter()
            .map(VerificationRequest::from)
            .collect();

        let results = self.verifier.batch_verify(&requests).await;
        for result in &results {
            if let Err(e) = self.persist(result) {
                warn!(report_id = %result.report_id, error = %e, "batch item not persisted");
            }
        }
        results
    }

    pub fn verification(&self, id: &ReportId) -> Option<VerificationResult> {
        self.verifier.history_for(id)
    }

    pub fn stats(&self) -> VerificationStats {
        self.verifier.stats()
    }

    fn persist(&self, result: &VerificationResult) -> Result<(), ServiceError> {
        self.reports
            .update_verification(&result.report_id, result.status, result.confidence)
            .map_err(ServiceError::Store)
    }
}
