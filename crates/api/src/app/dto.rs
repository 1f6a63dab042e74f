use serde::{Deserialize, Serialize};

use waterwatch_ai::{AnalysisRecord, VerificationResult};
use waterwatch_core::{ReportId, ReportStatus};

// -------------------------
// Request DTOs
// -------------------------

/// `photo_url` must point at an already-hosted image.
#[derive(Debug, Deserialize)]
pub struct SubmitReportRequest {
    pub photo_url: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub manual_location: Option<String>,
    pub pollution_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchVerifyRequest {
    pub report_ids: Vec<String>,
}

// -------------------------
// Response DTOs
// -------------------------

pub const SUBMITTED_MESSAGE: &str = "Report Submitted. Awaiting AI Verification.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportResponse {
    pub message: &'static str,
    pub report_id: ReportId,
}

#[derive(Debug, Serialize)]
pub struct ReportStatusResponse {
    #[serde(rename = "reportId")]
    pub report_id: ReportId,
    pub status: ReportStatus,
    pub ai_confidence: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    #[serde(rename = "reportId")]
    pub report_id: ReportId,
    pub status: ReportStatus,
    pub verified: bool,
    pub ai_confidence: f64,
    pub analysis: Option<AnalysisRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub message: String,
}

impl VerifyResponse {
    pub fn from_result(result: VerificationResult, simulated: bool) -> Self {
        let message = verification_message(&result, simulated);
        Self {
            report_id: result.report_id,
            status: result.status,
            verified: result.verified,
            ai_confidence: result.confidence,
            analysis: result.analysis,
            reason: result.reason,
            message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchVerifyResponse {
    pub message: String,
    pub results: Vec<VerificationResult>,
}

impl From<Vec<VerificationResult>> for BatchVerifyResponse {
    fn from(results: Vec<VerificationResult>) -> Self {
        Self {
            message: format!("Batch verification completed for {} reports", results.len()),
            results,
        }
    }
}

/// `Report verified by AI with 75.0% confidence`.
pub fn verification_message(result: &VerificationResult, simulated: bool) -> String {
    let outcome = if result.verified { "verified" } else { "rejected" };
    let by = if simulated { "AI simulation" } else { "AI" };
    format!("Report {outcome} by {by} with {:.1}% confidence", result.confidence * 100.0)
}
