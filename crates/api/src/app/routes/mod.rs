use axum::{routing::get, Router};

pub mod ai;
pub mod reports;
pub mod system;

/// Router for all `/api` endpoints.
pub fn router() -> Router {
    Router::new()
        .merge(reports::router())
        .route("/api/ai/stats", get(ai::stats))
}
