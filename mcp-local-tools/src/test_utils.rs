//! Test utilities for MCP tools

use crate::mcp::tool_registry::{McpTool, ToolContext};
use mcp_local_config::Settings;
use rmcp::model::CallToolResult;
use std::path::PathBuf;

/// Creates a tool context over a unique backup directory
///
/// Each call gets its own directory under the system temp dir, so parallel
/// tests never see each other's backups.
pub async fn create_test_context() -> ToolContext {
    ToolContext::new(test_settings()).unwrap()
}

/// Default settings with a unique per-test backup directory
pub fn test_settings() -> Settings {
    Settings {
        backup_dir: unique_backup_dir(),
        ..Default::default()
    }
}

fn unique_backup_dir() -> PathBuf {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let unique_id = format!(
        "{}_{}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    );
    std::env::temp_dir()
        .join("mcp_local_test_backups")
        .join(unique_id)
}

/// Execute `tool` with JSON arguments, panicking on protocol errors
pub async fn call(
    tool: &dyn McpTool,
    context: &ToolContext,
    arguments: serde_json::Value,
) -> CallToolResult {
    let arguments = match arguments {
        serde_json::Value::Object(map) => map,
        other => panic!("tool arguments must be an object, got {other}"),
    };
    tool.execute(arguments, context).await.unwrap()
}

/// Text of the first content item
pub fn text_of(result: &CallToolResult) -> String {
    result.content[0]
        .as_text()
        .map(|t| t.text.clone())
        .unwrap_or_default()
}

/// Whether the result is flagged as an error
pub fn is_error(result: &CallToolResult) -> bool {
    result.is_error == Some(true)
}
