//! MCP Server Entry Point
//!
//! Initializes logging to stderr, loads configuration, and serves the catalog
//! tools on the configured transport.

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use nusmods_mcp_server::core::config::LoggingConfig;
use nusmods_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    // Subscriber first, so warnings from the config loaders are emitted.
    init_logging(&LoggingConfig::from_env().level);
    let config = Config::from_env();

    info!("Starting {} v{}", config.server.name, config.server.version);

    let server = McpServer::new(config.clone())?;

    info!("Server initialized");

    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout carries the STDIO protocol. `RUST_LOG`
/// directives are honoured on top of the configured level.
fn init_logging(level: &str) {
    let level = level.trim().parse::<Level>().unwrap_or(Level::INFO);

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
