//! Tools domain module.
//!
//! The catalog tools exposed to MCP clients. Each tool call flows through
//! the same path: parse the argument object, fetch from the catalog, render
//! a plain-text report.
//!
//! ## Architecture
//!
//! - `definitions.rs` - Tool names, descriptions and input schemas
//! - `params.rs` - Typed argument objects
//! - `dispatcher.rs` - Per-tool query logic and the error-to-text boundary
//! - `format.rs` - Text renderers for catalog entities
//! - `router.rs` - Dynamic ToolRouter builder for STDIO transport
//! - `registry.rs` - Central tool registry shared by all transports
//! - `error.rs` - Tool-specific error types

pub mod definitions;
pub mod dispatcher;
mod error;
pub mod format;
pub mod params;
mod registry;
pub mod router;

pub use definitions::ToolKind;
pub use dispatcher::{Arguments, QueryDispatcher};
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
