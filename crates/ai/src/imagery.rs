//! Satellite imagery as handed to analyzers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use waterwatch_core::Coordinates;

/// Where a satellite payload came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SatelliteSource {
    Sentinel,
    Landsat,
    Simulated,
}

impl SatelliteSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SatelliteSource::Sentinel => "sentinel",
            SatelliteSource::Landsat => "landsat",
            SatelliteSource::Simulated => "simulated",
        }
    }
}

impl core::fmt::Display for SatelliteSource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque imagery payload. Ephemeral: fed to the analyzer, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteImage {
    pub bytes: Vec<u8>,
    pub source: SatelliteSource,
    pub date: NaiveDate,
    pub coordinates: Coordinates,
}
