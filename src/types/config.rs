//! Configuration structures.
//!
//! Configuration is loaded from a JSON file named by `WIZARD_EVENTS_CONFIG`,
//! falling back to defaults for anything not specified.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use super::errors::{Error, Result};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "WIZARD_EVENTS_CONFIG";

/// Global configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// RPC transport configuration.
    #[serde(default)]
    pub rpc: RpcConfig,
}

impl Config {
    /// Load from the file named by `WIZARD_EVENTS_CONFIG`, or defaults when unset.
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }

    /// Parse a JSON config file and validate it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("cannot read {}: {}", path.display(), e)))?;
        let config: Config = serde_json::from_str(&raw)
            .map_err(|e| Error::config(format!("cannot parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the transport cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.listen_socket_addr()?;
        self.rpc.validate()
    }

    /// Parsed `server.listen_addr`.
    pub fn listen_socket_addr(&self) -> Result<SocketAddr> {
        self.server.listen_addr.parse().map_err(|e| {
            Error::validation(format!(
                "server.listen_addr '{}' is not a socket address: {}",
                self.server.listen_addr, e
            ))
        })
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the frontend connects to (TCP).
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8081".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// RPC transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    /// Maximum accepted inbound frame size in bytes.
    pub max_frame_bytes: u32,

    /// Invocations buffered per session before `invoke` reports backpressure.
    pub outbound_queue_capacity: usize,

    /// Maximum concurrent frontend connections. Connections beyond this
    /// limit are dropped on accept.
    pub max_connections: usize,

    /// Per-frame write timeout. Frontends that cannot accept a frame within
    /// this window are disconnected.
    #[serde(with = "humantime_serde")]
    pub write_timeout: Duration,
}

impl RpcConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_frame_bytes == 0 {
            return Err(Error::validation("rpc.max_frame_bytes must be positive"));
        }
        if self.outbound_queue_capacity == 0 {
            return Err(Error::validation(
                "rpc.outbound_queue_capacity must be positive",
            ));
        }
        if self.max_connections == 0 {
            return Err(Error::validation("rpc.max_connections must be positive"));
        }
        Ok(())
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            max_frame_bytes: 5 * 1024 * 1024,
            outbound_queue_capacity: 256,
            max_connections: 64,
            write_timeout: Duration::from_secs(10),
        }
    }
}
