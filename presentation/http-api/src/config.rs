//! Configuration for the TwinScale-Lite API server

use crate::HttpApiConfig;
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use twinscale_core::errors::CoreError;

/// Server configuration, loaded from file and environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the server binds to
    pub bind_address: String,
    /// Enable permissive CORS
    pub enable_cors: bool,
    /// Request timeout in seconds
    pub request_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            enable_cors: true,
            request_timeout: 30,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the first `twinscale.yaml` found and the
    /// environment (variables prefixed with `TWINSCALE_`)
    pub fn load() -> Result<Self, CoreError> {
        let mut figment = Figment::from(Serialized::defaults(ServerConfig::default()));

        let default_config_paths = [
            "twinscale.yaml",
            "twinscale.yml",
            ".twinscale.yaml",
            ".twinscale.yml",
        ];
        for path in &default_config_paths {
            if Path::new(path).exists() {
                figment = figment.merge(Yaml::file(path));
                break;
            }
        }

        figment = figment.merge(Env::prefixed("TWINSCALE_"));

        figment
            .extract()
            .map_err(|e| CoreError::Configuration(format!("Failed to parse configuration: {}", e)))
    }

    /// Convert into the adapter configuration
    pub fn api_config(&self) -> Result<HttpApiConfig, CoreError> {
        let bind_address: SocketAddr = self.bind_address.parse().map_err(|e| {
            CoreError::Configuration(format!("Invalid bind address {}: {}", self.bind_address, e))
        })?;
        Ok(HttpApiConfig {
            bind_address,
            enable_cors: self.enable_cors,
            request_timeout: self.request_timeout,
        })
    }
}
