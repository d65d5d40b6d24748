//! Line-oriented editing tools
//!
//! Every tool here backs the target file up before changing it and appends a
//! record to the edit history. Line numbers are 1-based and ranges inclusive.
//! Line endings of untouched lines are preserved byte for byte.

pub mod delete;
pub mod diff;
pub mod insert;
pub mod lines;
pub mod replace;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all editing tools with the registry
pub fn register_edit_tools(registry: &mut ToolRegistry) {
    registry.register(lines::EditFileLinesTool::new());
    registry.register(insert::InsertLinesTool::new());
    registry.register(delete::DeleteLinesTool::new());
    registry.register(replace::ReplaceInFileTool::new());
    registry.register(diff::GetFileDiffTool::new());
}
