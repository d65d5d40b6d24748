//! Content search tools

pub mod advanced;
pub mod grep;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all content search tools with the registry
pub fn register_search_tools(registry: &mut ToolRegistry) {
    registry.register(grep::SearchInFilesTool::new());
    registry.register(advanced::SearchAdvancedTool::new());
}
