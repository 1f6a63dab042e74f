//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: stores, gateways and the verification orchestrator
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use waterwatch_infra::gateway::GatewayError;

use crate::config::ApiConfig;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router against the live gateways (used by `main.rs`).
pub fn build_app(cfg: &ApiConfig) -> Result<Router, GatewayError> {
    let services = services::build_services(&cfg.gateway)?;
    Ok(build_app_with(Arc::new(services)))
}

/// Build the router around pre-wired services (tests inject stub gateways here).
pub fn build_app_with(services: Arc<AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

pub use services::AppServices;
