//! Backup management tools
//!
//! Backups are plain copies named `{file}_{YYYYMMDD_HHMMSS}.backup` in the
//! configured backup directory. They are only removed on request.

pub mod delete;
pub mod list;
pub mod restore;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all backup tools with the registry
pub fn register_backup_tools(registry: &mut ToolRegistry) {
    registry.register(list::ListBackupsTool::new());
    registry.register(restore::RestoreBackupTool::new());
    registry.register(delete::DeleteBackupTool::new());
}
