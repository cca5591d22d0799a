//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Every tool gets a dynamic route that hands its raw argument object to the
//! registry, so STDIO and HTTP share one dispatch path.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter};

use super::definitions::ToolKind;
use super::registry::ToolRegistry;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: Arc<ToolRegistry>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolKind::ALL
        .into_iter()
        .fold(ToolRouter::new(), |router, kind| {
            router.with_route(create_route(kind, registry.clone()))
        })
}

fn create_route<S>(kind: ToolKind, registry: Arc<ToolRegistry>) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    ToolRoute::new_dyn(kind.to_tool(), move |ctx: ToolCallContext<'_, S>| {
        let arguments = ctx.arguments.clone();
        let registry = registry.clone();
        async move { Ok(registry.call_tool(kind.name(), arguments).await) }.boxed()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CatalogConfig;
    use crate::domains::catalog::testing::StaticCatalog;
    use crate::domains::tools::dispatcher::QueryDispatcher;

    struct TestServer {}

    fn test_registry() -> Arc<ToolRegistry> {
        let dispatcher =
            QueryDispatcher::new(Arc::new(StaticCatalog::sample()), CatalogConfig::default());
        Arc::new(ToolRegistry::new(Arc::new(dispatcher)))
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_registry());
        let tools = router.list_all();
        assert_eq!(tools.len(), 10);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"search_modules"));
        assert!(names.contains(&"get_venue_schedule"));
        assert!(names.contains(&"find_conflicting_modules"));
    }

    #[test]
    fn test_registry_matches_router() {
        let registry = test_registry();
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(registry);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
