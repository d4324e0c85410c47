//! Blockscout MCP Server Library
//!
//! This crate exposes the Blockscout explorer REST API as a catalog of
//! Model Context Protocol (MCP) tools. Each tool call is validated, mapped
//! onto one `/api/v2` endpoint, executed, and the JSON answer is rendered
//! back as text.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: tool catalog, validation, endpoint table, formatting, dispatch
//!   - **explorer**: base URL normalization and the HTTP client
//!
//! # Example
//!
//! ```rust,no_run
//! use blockscout_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::with_api_url("https://eth.blockscout.com/api");
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use crate::core::{Config, Error, McpServer, Result};
