//! Edit history statistics tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;

/// Tool for summarizing the edit history
#[derive(Default)]
pub struct GetHistoryStatsTool;

impl GetHistoryStatsTool {
    /// Creates a new instance of the GetHistoryStatsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetHistoryStatsTool {
    fn name(&self) -> &'static str {
        "get_history_stats"
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
        let stats = context.editor.lock().await.history().stats();
        match serde_json::to_string_pretty(&stats) {
            Ok(json) => Ok(BaseToolImpl::create_success_response(json)),
            Err(e) => Ok(BaseToolImpl::failure("Error getting history stats", e)),
        }
    }
}
