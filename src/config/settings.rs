// Configuration structs

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::constants::{DEFAULT_HTTP_ADDR, DEFAULT_MAX_BODY_BYTES};
use super::provider::ProviderEntry;

/// Feature flags configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeaturesConfig {
    /// Route the analytical endpoints (/tips, /income-analysis, ...)
    #[serde(default)]
    pub insights_enabled: bool,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8000")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Largest accepted request body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_bind_address() -> String {
    DEFAULT_HTTP_ADDR.to_string()
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Feature flags (optional behaviors)
    pub features: FeaturesConfig,

    /// Completion provider
    pub provider: ProviderEntry,
}

impl Config {
    /// Config with defaults for everything but the provider
    pub fn with_provider(provider: ProviderEntry) -> Self {
        Self {
            server: ServerConfig::default(),
            features: FeaturesConfig::default(),
            provider,
        }
    }

    /// Parsed bind address
    pub fn bind_addr(&self) -> Result<SocketAddr, String> {
        self.server
            .bind_address
            .parse()
            .map_err(|e| format!("invalid bind address '{}': {}", self.server.bind_address, e))
    }

    pub fn validate(&self) -> Result<(), String> {
        self.bind_addr()?;
        if self.server.max_body_bytes == 0 {
            return Err("server.max_body_bytes must be greater than zero".to_string());
        }
        self.provider.validate()
    }
}
