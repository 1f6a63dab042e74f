use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use waterwatch_core::{Coordinates, PollutionType, ReportId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/api/reports", post(submit_report).get(list_reports))
        .route("/api/reports/batch-verify", post(batch_verify))
        .route("/api/reports/:id/status", get(get_status))
        .route("/api/reports/:id/verification", get(get_verification))
        .route("/api/reports/:id/verify", post(verify_report))
        .route("/api/reports/:id/simulate-verify", post(simulate_verify))
}

pub async fn submit_report(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::SubmitReportRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", e.body_text()),
    };

    if body.photo_url.trim().is_empty() {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "photo_url is required");
    }
    if body.pollution_type.trim().is_empty() {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "pollution_type is required");
    }
    let coordinates = match Coordinates::new(body.lat, body.lng) {
        Ok(c) => c,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
    };

    let manual_location = body.manual_location.filter(|s| !s.trim().is_empty());
    let report_id = services.submit_report(
        body.photo_url,
        coordinates,
        manual_location,
        PollutionType::from(body.pollution_type),
    );

    (
        StatusCode::CREATED,
        Json(dto::SubmitReportResponse {
            message: dto::SUBMITTED_MESSAGE,
            report_id,
        }),
    )
        .into_response()
}

pub async fn list_reports(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    Json(services.reports()).into_response()
}

pub async fn get_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_report_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.report(&id) {
        Some(r) => Json(dto::ReportStatusResponse {
            report_id: r.id,
            status: r.status,
            ai_confidence: r.ai_confidence,
        })
        .into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "Report not found"),
    }
}

pub async fn get_verification(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_report_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.verification(&id) {
        Some(result) => Json(result).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "No verification recorded for this report"),
    }
}

pub async fn verify_report(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_report_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.verify_report(&id).await {
        Ok(result) => Json(dto::VerifyResponse::from_result(result, false)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn simulate_verify(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_report_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.simulate_report(&id).await {
        Ok(result) => Json(dto::VerifyResponse::from_result(result, true)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn batch_verify(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::BatchVerifyRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", "reportIds array is required");
        }
    };

    let ids = match body
        .report_ids
        .iter()
        .map(|s| errors::parse_report_id(s))
        .collect::<Result<Vec<ReportId>, _>>()
    {
        Ok(ids) => ids,
        Err(resp) => return resp,
    };

    let results = services.batch_verify(&ids).await;
    Json(dto::BatchVerifyResponse::from(results)).into_response()
}
