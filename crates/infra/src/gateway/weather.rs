//! Current conditions from OpenWeatherMap.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use waterwatch_ai::WeatherSnapshot;
use waterwatch_core::Coordinates;

use crate::config::GatewayConfig;
use crate::gateway::{GatewayError, WeatherGateway};

const PROVIDER: &str = "openweathermap";

#[derive(Debug, Deserialize)]
struct OwmResponse {
    main: OwmMain,
    visibility: Option<f64>,
    clouds: OwmClouds,
    wind: OwmWind,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmClouds {
    all: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

/// OpenWeatherMap omits `visibility` for some stations; the snapshot is kept.
impl From<OwmResponse> for WeatherSnapshot {
    fn from(r: OwmResponse) -> Self {
        WeatherSnapshot {
            temperature: r.main.temp,
            humidity: r.main.humidity,
            visibility: r.visibility,
            cloudiness: r.clouds.all,
            wind_speed: r.wind.speed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenWeatherGateway {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl OpenWeatherGateway {
    pub fn new(client: reqwest::Client, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(client: reqwest::Client, cfg: &GatewayConfig) -> Self {
        Self::new(client, cfg.openweather_url.clone(), cfg.openweather_api_key.clone())
    }

    async fn fetch(&self, coordinates: Coordinates) -> Result<WeatherSnapshot, GatewayError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("lat", coordinates.lat.to_string()),
                ("lon", coordinates.lng.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
            });
        }

        let body: OwmResponse = response.json().await.map_err(|e| GatewayError::Malformed {
            provider: PROVIDER,
            detail: e.to_string(),
        })?;
        Ok(body.into())
    }
}

#[async_trait]
impl WeatherGateway for OpenWeatherGateway {
    async fn current(&self, coordinates: Coordinates) -> Option<WeatherSnapshot> {
        match self.fetch(coordinates).await {
            Ok(w) => {
                debug!(cloudiness = w.cloudiness, visibility = ?w.visibility, "weather fetched");
                Some(w)
            }
            Err(e) => {
                warn!(error = %e, "weather lookup failed");
                None
            }
        }
    }
}
