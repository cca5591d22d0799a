//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol. The server only offers tools; each one is a read-only query
//! against the NUSMods catalog.
//!
//! The ToolRouter is built in `domains/tools/router.rs` from the same
//! registry the HTTP transport dispatches through.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::tool::{ToolCallContext, ToolRouter},
    model::*,
    service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error as server_error;
use crate::domains::catalog::{CatalogApi, CatalogClient};
use crate::domains::tools::{QueryDispatcher, ToolKind, ToolRegistry, build_tool_router};

/// Instructions advertised to clients on initialize.
pub const SERVER_INSTRUCTIONS: &str = "This server answers questions about the National \
University of Singapore course catalog (NUSMods): module search, module details, timetables, \
prerequisites, departments, venues, availability, workload and conflicts. Every tool returns \
plain text; failures are reported as text starting with \"Error:\".";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp. It is cheap
/// to clone and shares one catalog client across all clones.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registry dispatching tool calls to the catalog.
    registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server backed by the NUSMods HTTP API.
    pub fn new(config: Config) -> server_error::Result<Self> {
        if config.catalog.base_url.trim().is_empty() {
            return Err(server_error::Error::config("catalog base URL must not be empty"));
        }

        let client = CatalogClient::new(&config.catalog)?;
        info!(
            "Catalog: {} (default year {})",
            config.catalog.base_url, config.catalog.acad_year
        );

        Ok(Self::with_catalog(config, Arc::new(client)))
    }

    /// Create a server on top of any catalog implementation.
    pub fn with_catalog(config: Config, catalog: Arc<dyn CatalogApi>) -> Self {
        let config = Arc::new(config);
        let dispatcher = QueryDispatcher::new(catalog, config.catalog.clone());
        let registry = Arc::new(ToolRegistry::new(Arc::new(dispatcher)));

        Self {
            tool_router: build_tool_router::<Self>(registry.clone()),
            config,
            registry,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// A missing or non-object `arguments` value is treated as no arguments.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<serde_json::Value>,
    ) -> server_error::Result<serde_json::Value> {
        let arguments = match arguments {
            Some(serde_json::Value::Object(map)) => Some(map),
            _ => None,
        };

        let result = self.registry.call_tool(name, arguments).await;
        Ok(serde_json::to_value(result)?)
    }
}

/// ServerHandler implementation.
///
/// Registered tools run through the router; any other name goes straight to
/// the registry so an unknown tool is answered with text, not a fault.
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        if ToolKind::from_name(&request.name).is_some() {
            let ctx = ToolCallContext::new(self, request, context);
            return self.tool_router.call(ctx).await;
        }

        Ok(self
            .registry
            .call_tool(&request.name, request.arguments)
            .await)
    }
}
