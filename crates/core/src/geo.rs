//! Geographic coordinates (WGS84 degrees).

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A validated latitude/longitude pair.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> DomainResult<Self> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(DomainError::validation("coordinates must be finite numbers"));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::validation(format!("latitude {lat} out of range [-90, 90]")));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(DomainError::validation(format!("longitude {lng} out of range [-180, 180]")));
        }
        Ok(Self { lat, lng })
    }

    /// Square bounding box `[min_lng, min_lat, max_lng, max_lat]` around the point.
    pub fn bbox(&self, half_side_deg: f64) -> [f64; 4] {
        [
            self.lng - half_side_deg,
            self.lat - half_side_deg,
            self.lng + half_side_deg,
            self.lat + half_side_deg,
        ]
    }
}
