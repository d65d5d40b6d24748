//! Edit history export tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;

/// Tool for exporting the edit history
#[derive(Default)]
pub struct ExportEditHistoryTool;

impl ExportEditHistoryTool {
    /// Creates a new instance of the ExportEditHistoryTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ExportEditHistoryTool {
    fn name(&self) -> &'static str {
        "export_edit_history"
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
        let export = context.editor.lock().await.history().export();
        match serde_json::to_string_pretty(&export) {
            Ok(json) => Ok(BaseToolImpl::create_success_response(json)),
            Err(e) => Ok(BaseToolImpl::failure("Error exporting edit history", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{call, create_test_context, text_of};
    use serde_json::{json, Value};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_export_contains_records() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("exported.txt");
        let context = create_test_context().await;
        {
            let mut editor = context.editor.lock().await;
            editor.write_file(path.to_str().unwrap(), "x\n").unwrap();
            editor
                .insert_lines(path.to_str().unwrap(), 1, "header")
                .unwrap();
        }

        let result = call(&ExportEditHistoryTool::new(), &context, json!({})).await;
        let export: Value = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(export["total_entries"], 2);
        assert!(export["export_time"].is_string());
        let history = export["history"].as_array().unwrap();
        assert_eq!(history[0]["action"], "write");
        assert_eq!(history[0]["details"]["content_length"], 2);
        assert_eq!(history[1]["action"], "insert_lines");
        assert_eq!(history[1]["details"]["line_number"], 1);
        assert!(history[1]["backup"].is_string());
    }
}
