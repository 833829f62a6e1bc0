//! API Server Configuration
//!
//! Bind address and the shared-secret API key, loadable from the
//! environment.

use serde::{Deserialize, Serialize};

use crate::errors::{ApiError, ApiResult};

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Expected value of the X-API-KEY header
    pub api_key: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl ApiConfig {
    /// Build a config from `BIND_HOST`, `BIND_PORT` and `API_KEY`.
    ///
    /// `API_KEY` is required and must be non-empty; host and port fall back
    /// to defaults. Any malformed value is an environment-load failure.
    pub fn from_env() -> ApiResult<Self> {
        let api_key = std::env::var("API_KEY").map_err(|_| ApiError::EnvLoad)?;
        if api_key.is_empty() {
            return Err(ApiError::EnvLoad);
        }

        let host = std::env::var("BIND_HOST").unwrap_or_else(|_| default_host());
        let port = match std::env::var("BIND_PORT") {
            Ok(raw) => raw.parse().map_err(|_| ApiError::EnvLoad)?,
            Err(_) => default_port(),
        };

        Ok(Self {
            host,
            port,
            api_key,
        })
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
