//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - Tool metadata for listing
//! - Dispatch of a tool call to the query dispatcher, shared by every transport

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, Tool};

use super::definitions::ToolKind;
use super::dispatcher::{Arguments, QueryDispatcher};

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    dispatcher: Arc<QueryDispatcher>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(dispatcher: Arc<QueryDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        ToolKind::ALL.into_iter().map(ToolKind::name).collect()
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    pub fn get_all_tools() -> Vec<Tool> {
        ToolKind::ALL.into_iter().map(ToolKind::to_tool).collect()
    }

    /// Run a tool call.
    ///
    /// The result is always a successful single-text payload; failures are
    /// carried in the text as `Error: <message>`.
    pub async fn call_tool(&self, name: &str, arguments: Option<Arguments>) -> CallToolResult {
        let text = self.dispatcher.call(name, arguments).await;
        CallToolResult::success(vec![Content::text(text)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CatalogConfig;
    use crate::domains::catalog::testing::StaticCatalog;
    use rmcp::model::RawContent;

    fn test_registry() -> ToolRegistry {
        let dispatcher = QueryDispatcher::new(
            Arc::new(StaticCatalog::sample()),
            CatalogConfig::default(),
        );
        ToolRegistry::new(Arc::new(dispatcher))
    }

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[test]
    fn test_registry_tool_names() {
        let names = test_registry().tool_names();
        assert_eq!(names.len(), 10);
        assert!(names.contains(&"search_modules"));
        assert!(names.contains(&"get_module_info"));
        assert!(names.contains(&"get_module_timetable"));
        assert!(names.contains(&"get_module_prerequisites"));
        assert!(names.contains(&"list_modules_by_department"));
        assert!(names.contains(&"get_venue_schedule"));
        assert!(names.contains(&"list_all_venues"));
        assert!(names.contains(&"check_module_availability"));
        assert!(names.contains(&"get_module_workload"));
        assert!(names.contains(&"find_conflicting_modules"));
    }

    #[test]
    fn test_every_tool_has_metadata() {
        for tool in ToolRegistry::get_all_tools() {
            assert!(tool.description.is_some(), "{} has no description", tool.name);
            assert_eq!(tool.input_schema["type"], "object");
        }
    }

    #[tokio::test]
    async fn test_registry_call_returns_single_text() {
        let registry = test_registry();
        let mut arguments = Arguments::new();
        arguments.insert("moduleCode".into(), "CS1010S".into());

        let result = registry.call_tool("get_module_info", Some(arguments)).await;
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.content.len(), 1);
        assert!(text_of(&result).starts_with("**CS1010S: Programming Methodology**"));
    }

    #[tokio::test]
    async fn test_registry_call_unknown_is_not_a_fault() {
        let registry = test_registry();
        let result = registry.call_tool("unknown", Some(Arguments::new())).await;
        assert_eq!(result.is_error, Some(false));
        assert_eq!(text_of(&result), "Error: Unknown tool: unknown");
    }
}
