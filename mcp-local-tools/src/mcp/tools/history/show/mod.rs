//! Edit history display tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use mcp_local_common::resolve_path;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

const DEFAULT_LIMIT: usize = 20;

/// Tool for showing the edit history
#[derive(Default)]
pub struct GetEditHistoryTool;

impl GetEditHistoryTool {
    /// Creates a new instance of the GetEditHistoryTool
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct GetEditHistoryRequest {
    #[serde(default = "default_limit")]
    limit: usize,
    file_path: Option<String>,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

#[async_trait]
impl McpTool for GetEditHistoryTool {
    fn name(&self) -> &'static str {
        "get_edit_history"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "limit": {
                    "type": "integer",
                    "description": "Number of most recent entries to show",
                    "default": DEFAULT_LIMIT,
                    "minimum": 1
                },
                "file_path": {
                    "type": "string",
                    "description": "Only show edits of this file"
                }
            }
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetEditHistoryRequest = BaseToolImpl::parse_arguments(arguments)?;

        let file = match request.file_path.as_deref() {
            Some(file_path) => match resolve_path(file_path) {
                Ok(path) => Some(path),
                Err(e) => return Ok(BaseToolImpl::domain_error("Error getting edit history", &e)),
            },
            None => None,
        };

        let editor = context.editor.lock().await;
        let records = editor
            .history()
            .query(Some(request.limit), file.as_deref());

        if records.is_empty() {
            let message = match &request.file_path {
                Some(file_path) => format!("No edit history found for '{file_path}'"),
                None => "No edit history available".to_string(),
            };
            return Ok(BaseToolImpl::create_success_response(message));
        }

        let mut output = match &request.file_path {
            Some(file_path) => format!(
                "Edit History for '{}' (last {} entries):\n\n",
                file_path,
                records.len()
            ),
            None => format!("Edit History (last {} entries):\n\n", records.len()),
        };
        for record in records {
            output.push_str(&format!("{record}\n\n"));
        }
        Ok(BaseToolImpl::create_success_response(output.trim_end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{call, create_test_context, text_of};
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_history_filters_and_limits() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("first.txt");
        let second = temp.path().join("second.txt");
        let context = create_test_context().await;

        let result = call(&GetEditHistoryTool::new(), &context, json!({})).await;
        assert_eq!(text_of(&result), "No edit history available");

        {
            let mut editor = context.editor.lock().await;
            editor.write_file(first.to_str().unwrap(), "a\nb\n").unwrap();
            editor.write_file(second.to_str().unwrap(), "c\n").unwrap();
            editor.delete_lines(first.to_str().unwrap(), 1, None).unwrap();
        }

        let result = call(&GetEditHistoryTool::new(), &context, json!({})).await;
        let text = text_of(&result);
        assert!(text.starts_with("Edit History (last 3 entries):"));
        assert!(text.contains(" - write\n  File: "));
        assert!(text.ends_with("Deleted lines: 1-1"));

        let result = call(
            &GetEditHistoryTool::new(),
            &context,
            json!({"file_path": first.to_string_lossy(), "limit": 1}),
        )
        .await;
        let text = text_of(&result);
        assert!(text.contains("(last 1 entries)"));
        assert!(text.contains("delete_lines"));
        assert!(!text.contains("second.txt"));

        let missing = temp.path().join("never.txt");
        let result = call(
            &GetEditHistoryTool::new(),
            &context,
            json!({"file_path": missing.to_string_lossy()}),
        )
        .await;
        assert!(text_of(&result).starts_with("No edit history found for '"));
    }
}
