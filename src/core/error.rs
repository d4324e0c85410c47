//! Error types and handling for the MCP server.
//!
//! This module defines the start-up level error type. Per-call failures
//! never reach it: they are turned into error results by the tools domain.

use thiserror::Error;

use super::transport::TransportError;
use crate::domains::explorer::ApiError;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The explorer client could not be built (bad base URL, TLS setup, ...).
    #[error("Explorer client error: {0}")]
    Explorer(#[from] ApiError),

    /// The transport failed to start or terminated abnormally.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
