//! Satellite imagery: Sentinel Hub first, NASA Landsat as fallback.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde_json::json;
use tracing::{debug, info, warn};

use waterwatch_ai::{SatelliteImage, SatelliteSource};
use waterwatch_core::Coordinates;

use crate::config::GatewayConfig;
use crate::gateway::{GatewayError, ImageryGateway, ImageryProvider};

/// Half-width of the Sentinel request bounding box, in degrees.
const SENTINEL_BBOX_HALF_DEG: f64 = 0.01;
const SENTINEL_OUTPUT_PX: u32 = 512;
/// Landsat tile width, in degrees.
const LANDSAT_DIM_DEG: f64 = 0.1;

/// Band-math script evaluated by Sentinel Hub: overlays a pollution index
/// (oil, turbidity, plastic, sewage heuristics) on true colour.
const POLLUTION_EVALSCRIPT: &str = r#"//VERSION=3
function setup() {
  return {
    input: ["B02", "B03", "B04", "B08", "B11", "B12"],
    output: { bands: 3 }
  };
}

function evaluatePixel(sample) {
  let ndvi = (sample.B08 - sample.B04) / (sample.B08 + sample.B04);
  let ndwi = (sample.B03 - sample.B08) / (sample.B03 + sample.B08);
  let ndbi = (sample.B11 - sample.B08) / (sample.B11 + sample.B08);

  let pollution = 0;
  if (ndvi < 0.1 && sample.B08 > 0.3) { pollution += 0.3; }
  if (ndwi > 0.1 && sample.B02 > 0.2 && sample.B03 > 0.2) { pollution += 0.2; }
  if (sample.B02 > 0.4 && sample.B03 > 0.4 && sample.B04 > 0.4) { pollution += 0.25; }
  if (ndvi < 0.05 && ndbi > 0.1) { pollution += 0.2; }

  return [
    Math.min(1, sample.B04 + pollution * 0.5),
    Math.min(1, sample.B03 + pollution * 0.3),
    Math.min(1, sample.B02 + pollution * 0.4)
  ];
}
"#;

/// Sentinel-2 L2A imagery through the Sentinel Hub process API.
#[derive(Debug, Clone)]
pub struct SentinelHubProvider {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl SentinelHubProvider {
    pub fn new(client: reqwest::Client, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    /// Process-API request for a single-day window around the point.
    pub fn request_body(coordinates: Coordinates, date: NaiveDate) -> serde_json::Value {
        json!({
            "input": {
                "bounds": {
                    "bbox": coordinates.bbox(SENTINEL_BBOX_HALF_DEG),
                    "properties": { "crs": "http://www.opengis.net/def/crs/EPSG/0/4326" }
                },
                "data": [{
                    "type": "sentinel-2-l2a",
                    "dataFilter": {
                        "timeRange": {
                            "from": format!("{date}T00:00:00Z"),
                            "to": format!("{date}T23:59:59Z"),
                        }
                    }
                }]
            },
            "output": {
                "width": SENTINEL_OUTPUT_PX,
                "height": SENTINEL_OUTPUT_PX,
                "responses": [{ "identifier": "default", "format": { "type": "image/jpeg" } }]
            },
            "evalscript": POLLUTION_EVALSCRIPT,
        })
    }
}

#[async_trait]
impl ImageryProvider for SentinelHubProvider {
    fn name(&self) -> &'static str {
        "sentinel-hub"
    }

    async fn fetch(&self, coordinates: Coordinates, date: NaiveDate) -> Result<SatelliteImage, GatewayError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&Self::request_body(coordinates, date))
            .send()
            .await?;

        let bytes = read_image_body(self.name(), response).await?;
        Ok(SatelliteImage {
            bytes,
            source: SatelliteSource::Sentinel,
            date,
            coordinates,
        })
    }
}

/// NASA Earth imagery (Landsat 8) through api.nasa.gov.
#[derive(Debug, Clone)]
pub struct LandsatProvider {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl LandsatProvider {
    pub fn new(client: reqwest::Client, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ImageryProvider for LandsatProvider {
    fn name(&self) -> &'static str {
        "landsat"
    }

    async fn fetch(&self, coordinates: Coordinates, date: NaiveDate) -> Result<SatelliteImage, GatewayError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("lat", coordinates.lat.to_string()),
                ("lon", coordinates.lng.to_string()),
                ("date", date.to_string()),
                ("api_key", self.api_key.clone()),
                ("dim", LANDSAT_DIM_DEG.to_string()),
            ])
            .send()
            .await?;

        let bytes = read_image_body(self.name(), response).await?;
        Ok(SatelliteImage {
            bytes,
            source: SatelliteSource::Landsat,
            date,
            coordinates,
        })
    }
}

async fn read_image_body(provider: &'static str, response: reqwest::Response) -> Result<Vec<u8>, GatewayError> {
    let status = response.status();
    if !status.is_success() {
        return Err(GatewayError::Status {
            provider,
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Err(GatewayError::Malformed {
            provider,
            detail: "empty image body".to_string(),
        });
    }
    Ok(bytes.to_vec())
}

/// Ordered chain of imagery providers; the first success wins.
#[derive(Clone)]
pub struct SatelliteGateway {
    providers: Vec<Arc<dyn ImageryProvider>>,
}

impl core::fmt::Debug for SatelliteGateway {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SatelliteGateway")
            .field("providers", &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl SatelliteGateway {
    pub fn new(providers: Vec<Arc<dyn ImageryProvider>>) -> Self {
        Self { providers }
    }

    /// Sentinel Hub, then Landsat, sharing the given HTTP client.
    pub fn from_config(client: reqwest::Client, cfg: &GatewayConfig) -> Self {
        let providers: Vec<Arc<dyn ImageryProvider>> = vec![
            Arc::new(SentinelHubProvider::new(
                client.clone(),
                cfg.sentinel_hub_url.clone(),
                cfg.sentinel_hub_api_key.clone(),
            )),
            Arc::new(LandsatProvider::new(client, cfg.landsat_url.clone(), cfg.nasa_api_key.clone())),
        ];
        Self::new(providers)
    }
}

#[async_trait]
impl ImageryGateway for SatelliteGateway {
    async fn fetch_image(&self, coordinates: Coordinates, date: Option<NaiveDate>) -> Option<SatelliteImage> {
        let date = date.unwrap_or_else(|| Utc::now().date_naive());

        for provider in &self.providers {
            match provider.fetch(coordinates, date).await {
                Ok(image) => {
                    info!(provider = provider.name(), %date, bytes = image.bytes.len(), "satellite imagery fetched");
                    return Some(image);
                }
                Err(e) => {
                    warn!(provider = provider.name(), %date, error = %e, "satellite imagery provider failed");
                }
            }
        }

        debug!(lat = coordinates.lat, lng = coordinates.lng, "no satellite imagery available");
        None
    }
}
