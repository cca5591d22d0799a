//! NUSMods MCP Server Library
//!
//! A Model Context Protocol (MCP) server that answers questions about the
//! National University of Singapore course catalog. Every tool is a read-only
//! query against the public NUSMods API, rendered as plain text.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server and its transports
//! - **domains**: business logic organized by bounded contexts
//!   - **catalog**: typed models and the HTTP client for the catalog API
//!   - **tools**: tool definitions, query dispatch and text rendering
//!
//! # Example
//!
//! ```rust,no_run
//! use nusmods_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
