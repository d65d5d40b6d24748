//! Edit history reset tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use tracing::info;

/// Tool for clearing the edit history
#[derive(Default)]
pub struct ClearEditHistoryTool;

impl ClearEditHistoryTool {
    /// Creates a new instance of the ClearEditHistoryTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ClearEditHistoryTool {
    fn name(&self) -> &'static str {
        "clear_edit_history"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(
        &self,
        _arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let mut editor = context.editor.lock().await;
        let removed = editor.history().len();
        editor.history_mut().clear();
        info!(removed, "Cleared edit history");
        Ok(BaseToolImpl::create_success_response(format!(
            "Edit history cleared ({removed} entries removed)"
        )))
    }
}
