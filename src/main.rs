//! MCP Server Entry Point
//!
//! Initializes logging, loads configuration, builds the server and runs it
//! on the configured transport. Any start-up failure terminates the
//! process with a non-zero status.

use anyhow::{Context, Result};
use tracing::{Level, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use blockscout_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let (config, warnings) = Config::from_env();

    // Initialize logging
    init_logging(&config.logging.level);
    for warning in &warnings {
        warn!("{}", warning);
    }

    info!("Starting {} v{}", config.server.name, config.server.version);

    let server = McpServer::new(config.clone()).map_err(|e| {
        error!("Failed to initialize server: {}", e);
        e
    })?;

    info!("Server initialized with {} tools", server.tools().len());

    let transport = TransportService::new(config.transport);
    if let Err(e) = transport.run(server).await {
        error!("Fatal transport error: {}", e);
        return Err(e).context("transport failed");
    }

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs are written to stderr so they never interleave with MCP messages
/// on stdout. `RUST_LOG` directives are honored on top of the level.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();
}
