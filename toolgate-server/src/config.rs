// Copyright 2025 Toolgate Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Server configuration (TOML file with serde defaults).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Toolgate server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: HttpServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpServerConfig {
    /// HTTP listen address (e.g., "0.0.0.0:8000")
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Enable CORS (allow-all, for the browser frontend)
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,

    /// Allowed CORS origins (empty = allow all)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Path to the SQLite config store
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    /// Base URI of the experiment-tracking sink; unset disables telemetry
    #[serde(default)]
    pub tracking_uri: Option<String>,

    /// Experiment name attached to every record
    #[serde(default = "default_experiment")]
    pub experiment: String,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_enable_cors() -> bool {
    true
}

fn default_store_path() -> PathBuf {
    PathBuf::from("mcp_config.db")
}

fn default_experiment() -> String {
    "LLM Interactions".to_string()
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            enable_cors: default_enable_cors(),
            cors_origins: Vec::new(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            tracking_uri: None,
            experiment: default_experiment(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: HttpServerConfig::default(),
            store: StoreConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file, or defaults when no path given.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("failed to parse config file {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.server
            .listen_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid listen address: {}", self.server.listen_addr))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.listen_addr, "0.0.0.0:8000");
        assert!(config.server.enable_cors);
        assert_eq!(config.store.path, PathBuf::from("mcp_config.db"));
        assert!(config.telemetry.tracking_uri.is_none());
    }

    #[test]
    fn invalid_listen_addr_is_rejected() {
        let mut config = ServerConfig::default();
        config.server.listen_addr = "not-an-addr".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            [server]
            listen_addr = "127.0.0.1:9000"

            [telemetry]
            tracking_uri = "http://localhost:5001"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.listen_addr, "127.0.0.1:9000");
        assert!(config.server.enable_cors);
        assert_eq!(
            config.telemetry.tracking_uri.as_deref(),
            Some("http://localhost:5001")
        );
        assert_eq!(config.telemetry.experiment, "LLM Interactions");
    }
}
