//! Gateway configuration loading and representation.

use std::time::Duration;

use thiserror::Error;

/// Placeholder credential used when a provider key is not configured.
///
/// Real providers reject it, which exercises the fallback/null paths.
pub const DEMO_API_KEY: &str = "demo-key";

pub const DEFAULT_SENTINEL_HUB_URL: &str = "https://services.sentinel-hub.com/api/v1/process";
pub const DEFAULT_LANDSAT_URL: &str = "https://api.nasa.gov/planetary/earth/imagery";
pub const DEFAULT_OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Which [`waterwatch_ai::PollutionAnalyzer`] to wire in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum AnalyzerKind {
    #[default]
    Simplified,
    RgbSample,
}

impl std::str::FromStr for AnalyzerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simplified" => Ok(AnalyzerKind::Simplified),
            "rgb_sample" => Ok(AnalyzerKind::RgbSample),
            other => Err(format!("unknown analyzer {other:?}; expected simplified or rgb_sample")),
        }
    }
}

/// Endpoints, credentials and limits for the external gateways.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub sentinel_hub_url: String,
    pub sentinel_hub_api_key: String,
    pub landsat_url: String,
    pub nasa_api_key: String,
    pub openweather_url: String,
    pub openweather_api_key: String,
    /// Upper bound on every external call.
    pub timeout: Duration,
    pub analyzer: AnalyzerKind,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            sentinel_hub_url: DEFAULT_SENTINEL_HUB_URL.to_string(),
            sentinel_hub_api_key: DEMO_API_KEY.to_string(),
            landsat_url: DEFAULT_LANDSAT_URL.to_string(),
            nasa_api_key: DEMO_API_KEY.to_string(),
            openweather_url: DEFAULT_OPENWEATHER_URL.to_string(),
            openweather_api_key: DEMO_API_KEY.to_string(),
            timeout: Duration::from_secs(8),
            analyzer: AnalyzerKind::Simplified,
        }
    }
}

impl GatewayConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (tests pass a map here).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |key: &str, default: String| lookup(key).filter(|v| !v.is_empty()).unwrap_or(default);

        let timeout = match lookup("GATEWAY_TIMEOUT_SECS") {
            None => defaults.timeout,
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                    key: "GATEWAY_TIMEOUT_SECS",
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        key: "GATEWAY_TIMEOUT_SECS",
                        value: raw,
                        reason: "must be at least 1".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
        };

        let analyzer = match lookup("WATERWATCH_ANALYZER") {
            None => defaults.analyzer,
            Some(raw) => raw.parse().map_err(|reason| ConfigError::Invalid {
                key: "WATERWATCH_ANALYZER",
                value: raw,
                reason,
            })?,
        };

        Ok(Self {
            sentinel_hub_url: get("SENTINEL_HUB_URL", defaults.sentinel_hub_url),
            sentinel_hub_api_key: get("SENTINEL_HUB_API_KEY", defaults.sentinel_hub_api_key),
            landsat_url: get("LANDSAT_URL", defaults.landsat_url),
            nasa_api_key: get("NASA_API_KEY", defaults.nasa_api_key),
            openweather_url: get("OPENWEATHER_URL", defaults.openweather_url),
            openweather_api_key: get("OPENWEATHER_API_KEY", defaults.openweather_api_key),
            timeout,
            analyzer,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<GatewayConfig, ConfigError> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        GatewayConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn missing_keys_fall_back_to_demo_key() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg, GatewayConfig::default());
        assert_eq!(cfg.nasa_api_key, DEMO_API_KEY);
        assert_eq!(cfg.timeout, Duration::from_secs(8));
    }

    #[test]
    fn empty_values_count_as_missing() {
        let cfg = load(&[("OPENWEATHER_API_KEY", "")]).unwrap();
        assert_eq!(cfg.openweather_api_key, DEMO_API_KEY);
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = load(&[
            ("SENTINEL_HUB_API_KEY", "s3cret"),
            ("LANDSAT_URL", "http://127.0.0.1:9/landsat"),
            ("GATEWAY_TIMEOUT_SECS", "3"),
            ("WATERWATCH_ANALYZER", "rgb_sample"),
        ])
        .unwrap();
        assert_eq!(cfg.sentinel_hub_api_key, "s3cret");
        assert_eq!(cfg.landsat_url, "http://127.0.0.1:9/landsat");
        assert_eq!(cfg.timeout, Duration::from_secs(3));
        assert_eq!(cfg.analyzer, AnalyzerKind::RgbSample);
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let err = load(&[("GATEWAY_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "GATEWAY_TIMEOUT_SECS", .. }));
        assert!(load(&[("GATEWAY_TIMEOUT_SECS", "0")]).is_err());
    }

    #[test]
    fn unknown_analyzer_is_rejected() {
        assert!(load(&[("WATERWATCH_ANALYZER", "cnn")]).is_err());
    }
}
