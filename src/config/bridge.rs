//! Bridge server configuration

use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};

use super::error::ValidationError;

/// Bridge server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    /// Loopback address to bind to; the port is always chosen by the OS
    #[serde(default = "default_host")]
    pub host: String,

    /// URL scheme rendering surfaces use to connect; only plain `ws` is served
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Queue size for frames pushed to a single client
    #[serde(default = "default_outbound_capacity")]
    pub outbound_capacity: usize,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl BridgeConfig {
    /// Address to bind: the configured host with an ephemeral port.
    ///
    /// Falls back to IPv4 loopback if the host does not parse or is not a
    /// loopback address; `validate` rejects such hosts up front.
    pub fn bind_addr(&self) -> SocketAddr {
        let ip = self
            .host
            .parse::<IpAddr>()
            .ok()
            .filter(IpAddr::is_loopback)
            .unwrap_or(IpAddr::from([127, 0, 0, 1]));
        SocketAddr::new(ip, 0)
    }

    /// Validate bridge configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ValidationError::InvalidHost(self.host.clone()))?;
        if !ip.is_loopback() {
            return Err(ValidationError::HostNotLoopback(self.host.clone()));
        }
        if self.outbound_capacity == 0 {
            return Err(ValidationError::InvalidCapacity);
        }
        if self.scheme.is_empty() {
            return Err(ValidationError::MissingRequired("bridge.scheme"));
        }
        if self.scheme != "ws" {
            return Err(ValidationError::UnsupportedScheme(self.scheme.clone()));
        }
        Ok(())
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            scheme: default_scheme(),
            outbound_capacity: default_outbound_capacity(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_scheme() -> String {
    "ws".to_string()
}

fn default_outbound_capacity() -> usize {
    32
}

fn default_log_level() -> String {
    "info,preview_sync=debug".to_string()
}
