//! External-service clients.
//!
//! Gateways fail open: callers see `None`, never an error. Individual providers
//! return [`GatewayError`] so the chain can log why each attempt failed.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use waterwatch_ai::{SatelliteImage, WeatherSnapshot};
use waterwatch_core::Coordinates;

pub mod satellite;
pub mod weather;

pub use satellite::{LandsatProvider, SatelliteGateway, SentinelHubProvider};
pub use weather::OpenWeatherGateway;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{provider} returned status {status}")]
    Status { provider: &'static str, status: u16 },

    #[error("{provider} returned a malformed response: {detail}")]
    Malformed { provider: &'static str, detail: String },
}

/// One remote imagery source in the fallback chain.
#[async_trait]
pub trait ImageryProvider: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    async fn fetch(&self, coordinates: Coordinates, date: NaiveDate) -> Result<SatelliteImage, GatewayError>;
}

/// Best-effort imagery lookup. `None` means every source failed.
#[async_trait]
pub trait ImageryGateway: Send + Sync + 'static {
    /// `date` defaults to today (UTC) when omitted.
    async fn fetch_image(&self, coordinates: Coordinates, date: Option<NaiveDate>) -> Option<SatelliteImage>;
}

/// Best-effort current-conditions lookup. `None` on any failure; no retry.
#[async_trait]
pub trait WeatherGateway: Send + Sync + 'static {
    async fn current(&self, coordinates: Coordinates) -> Option<WeatherSnapshot>;
}

pub(crate) fn http_client(timeout: std::time::Duration) -> Result<reqwest::Client, GatewayError> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("waterwatch/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()?;
    Ok(client)
}
