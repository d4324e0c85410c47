//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default timeout for explorer requests, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Upstream explorer API configuration.
    pub explorer: ExplorerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the Blockscout REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Raw API base URL as configured; normalized to `/v2/` by the client.
    /// If None, every tool call fails until it is set.
    pub api_url: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// An environment setting that was missing or unusable.
///
/// Configuration is read before logging is set up, so these are handed
/// back to the caller to report once a subscriber is installed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigWarning {
    #[error("BLOCKSCOUT_API_URL not set - tool calls will fail until it is configured")]
    MissingApiUrl,

    #[error("Ignoring invalid BLOCKSCOUT_TIMEOUT_SECS '{0}', using {default}s", default = DEFAULT_TIMEOUT_SECS)]
    InvalidTimeout(String),
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "blockscout-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            explorer: ExplorerConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Configuration pointing at the given explorer API, defaults elsewhere.
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.explorer.api_url = Some(api_url.into());
        config
    }

    /// Load configuration from environment variables.
    ///
    /// The explorer is configured through `BLOCKSCOUT_API_URL` and
    /// `BLOCKSCOUT_TIMEOUT_SECS`; server settings use the `MCP_` prefix,
    /// for example `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> (Self, Vec<ConfigWarning>) {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        let mut warnings = Vec::new();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        match std::env::var("BLOCKSCOUT_API_URL") {
            Ok(url) if !url.trim().is_empty() => config.explorer.api_url = Some(url),
            _ => warnings.push(ConfigWarning::MissingApiUrl),
        }

        if let Ok(timeout) = std::env::var("BLOCKSCOUT_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => config.explorer.timeout_secs = secs,
                _ => warnings.push(ConfigWarning::InvalidTimeout(timeout)),
            }
        }

        (config, warnings)
    }
}
