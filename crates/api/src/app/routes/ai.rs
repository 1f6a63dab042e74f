use std::sync::Arc;

use axum::{extract::Extension, Json};

use waterwatch_ai::VerificationStats;

use crate::app::services::AppServices;

pub async fn stats(Extension(services): Extension<Arc<AppServices>>) -> Json<VerificationStats> {
    Json(services.stats())
}
