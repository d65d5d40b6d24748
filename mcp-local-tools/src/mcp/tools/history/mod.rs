//! Edit history tools
//!
//! The history lives in memory only and holds the most recent
//! `max_edit_history` edits made through this server.

pub mod clear;
pub mod export;
pub mod recent;
pub mod show;
pub mod stats;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all edit history tools with the registry
pub fn register_history_tools(registry: &mut ToolRegistry) {
    registry.register(show::GetEditHistoryTool::new());
    registry.register(stats::GetHistoryStatsTool::new());
    registry.register(export::ExportEditHistoryTool::new());
    registry.register(clear::ClearEditHistoryTool::new());
    registry.register(recent::GetRecentFilesTool::new());
}
