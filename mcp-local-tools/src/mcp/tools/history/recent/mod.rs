//! Recently edited files tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

const DEFAULT_LIMIT: usize = 10;

/// Tool for listing recently edited files
#[derive(Default)]
pub struct GetRecentFilesTool;

impl GetRecentFilesTool {
    /// Creates a new instance of the GetRecentFilesTool
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct GetRecentFilesRequest {
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

#[async_trait]
impl McpTool for GetRecentFilesTool {
    fn name(&self) -> &'static str {
        "get_recent_files"
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
                    "description": "Maximum number of files",
                    "default": DEFAULT_LIMIT,
                    "minimum": 1
                }
            }
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetRecentFilesRequest = BaseToolImpl::parse_arguments(arguments)?;
        let files = context
            .editor
            .lock()
            .await
            .history()
            .recent_files(request.limit);

        if files.is_empty() {
            return Ok(BaseToolImpl::create_success_response(
                "No recently edited files",
            ));
        }

        let mut output = format!("Recently edited files ({}):\n\n", files.len());
        for (index, file) in files.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", index + 1, file.display()));
        }
        Ok(BaseToolImpl::create_success_response(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{call, create_test_context, text_of};
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_recent_files_are_distinct_and_newest_first() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.txt");
        let b = temp.path().join("b.txt");
        let context = create_test_context().await;

        let result = call(&GetRecentFilesTool::new(), &context, json!({})).await;
        assert_eq!(text_of(&result), "No recently edited files");

        {
            let mut editor = context.editor.lock().await;
            editor.write_file(a.to_str().unwrap(), "1\n").unwrap();
            editor.write_file(b.to_str().unwrap(), "1\n").unwrap();
            editor.write_file(a.to_str().unwrap(), "2\n").unwrap();
        }

        let result = call(&GetRecentFilesTool::new(), &context, json!({})).await;
        let text = text_of(&result);
        assert!(text.starts_with("Recently edited files (2):"));
        let a_at = text.find("a.txt").unwrap();
        let b_at = text.find("b.txt").unwrap();
        assert!(a_at < b_at);

        let result = call(&GetRecentFilesTool::new(), &context, json!({"limit": 1})).await;
        let text = text_of(&result);
        assert!(text.contains("1. "));
        assert!(!text.contains("b.txt"));
    }
}
