//! Reading, writing, and inspecting individual files and directories
//!
//! - `list_files`: directory listing, directories first
//! - `read_file`: whole-file read with the size limit applied
//! - `write_file`: backed-up whole-file write
//! - `get_file_lines`: numbered line range
//! - `get_file_info`: metadata report

pub mod info;
pub mod lines;
pub mod list;
pub mod read;
pub mod write;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all file tools with the registry
pub fn register_file_tools(registry: &mut ToolRegistry) {
    registry.register(list::ListFilesTool::new());
    registry.register(read::ReadFileTool::new());
    registry.register(write::WriteFileTool::new());
    registry.register(lines::GetFileLinesTool::new());
    registry.register(info::GetFileInfoTool::new());
}
