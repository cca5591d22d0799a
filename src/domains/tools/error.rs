//! Tool-specific error types.

use thiserror::Error;

use crate::domains::catalog::CatalogError;

/// Errors that end a tool invocation.
///
/// None of these reach the host as protocol faults: the dispatcher renders
/// them as an `Error: <message>` text payload.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The call carried no argument object.
    #[error("Missing arguments")]
    MissingArguments,

    /// The argument object does not fit the tool's parameters.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A catalog fetch failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}
