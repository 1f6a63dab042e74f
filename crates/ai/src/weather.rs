//! Weather snapshot and the weather-based confidence adjustment.

use serde::{Deserialize, Serialize};

use crate::confidence::clamp_confidence;
use crate::random::RandomSource;

/// Current conditions at a report location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
    /// Meters. Some providers omit it; the visibility rules are then skipped.
    pub visibility: Option<f64>,
    /// Cloud cover, percent.
    pub cloudiness: f64,
    /// Meters per second.
    pub wind_speed: f64,
}

impl WeatherSnapshot {
    /// Independently randomised fields for the offline simulation path.
    ///
    /// The fields are not correlated with each other; the snapshot is cosmetic.
    pub fn synthetic(random: &dyn RandomSource) -> Self {
        Self {
            temperature: 20.0 + random.next_unit() * 15.0,
            humidity: 60.0 + random.next_unit() * 30.0,
            visibility: Some(5000.0 + random.next_unit() * 5000.0),
            cloudiness: random.next_unit() * 100.0,
            wind_speed: random.next_unit() * 10.0,
        }
    }
}

/// Adjust a base confidence for imaging conditions.
///
/// Rule groups are additive; within the cloud and visibility groups the first
/// matching branch wins. Without a snapshot the base is returned untouched.
pub fn adjust_for_weather(base_confidence: f64, weather: Option<&WeatherSnapshot>) -> f64 {
    let Some(w) = weather else {
        return base_confidence;
    };

    let mut adjustment = 0.0;

    // Occlusion.
    if w.cloudiness > 80.0 {
        adjustment -= 0.20;
    } else if w.cloudiness > 50.0 {
        adjustment -= 0.10;
    }

    match w.visibility {
        Some(v) if v < 1000.0 => adjustment -= 0.15,
        Some(v) if v > 10_000.0 => adjustment += 0.05,
        _ => {}
    }

    // Dispersion.
    if w.wind_speed > 10.0 {
        adjustment -= 0.10;
    }

    if w.humidity > 90.0 {
        adjustment -= 0.05;
    }

    clamp_confidence(base_confidence + adjustment)
}
