//! Server configuration from the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

use waterwatch_infra::GatewayConfig;

pub const DEFAULT_PORT: u16 = 4000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Gateway(#[from] waterwatch_infra::ConfigError),

    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub gateway: GatewayConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            gateway: GatewayConfig::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("PORT").filter(|v| !v.is_empty()) {
            None => defaults.port,
            Some(raw) => raw.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                key: "PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
        };

        let bind_addr = match lookup("BIND_ADDR").filter(|v| !v.is_empty()) {
            None => defaults.bind_addr,
            Some(raw) => raw.trim().parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "BIND_ADDR",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
        };

        Ok(Self {
            bind_addr,
            port,
            gateway: GatewayConfig::from_lookup(&lookup)?,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ApiConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_listen_on_port_4000() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.socket_addr(), "0.0.0.0:4000".parse().unwrap());
        assert_eq!(cfg.gateway, GatewayConfig::default());
    }

    #[test]
    fn reads_port_and_bind_addr() {
        let cfg = load(&[("PORT", "8081"), ("BIND_ADDR", "127.0.0.1")]).unwrap();
        assert_eq!(cfg.socket_addr(), "127.0.0.1:8081".parse().unwrap());
    }

    #[test]
    fn malformed_port_is_rejected() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn gateway_errors_pass_through() {
        let err = load(&[("GATEWAY_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Gateway(_)));
    }
}
