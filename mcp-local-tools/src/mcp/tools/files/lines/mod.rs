//! Numbered line range tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use mcp_local_files::file_lines;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

/// Tool for getting specific lines from a file
#[derive(Default)]
pub struct GetFileLinesTool;

impl GetFileLinesTool {
    /// Creates a new instance of the GetFileLinesTool
    pub fn new() -> Self {
        Self
    }
}

fn default_start_line() -> usize {
    1
}

#[derive(Debug, Deserialize)]
struct GetFileLinesRequest {
    file_path: String,
    #[serde(default = "default_start_line")]
    start_line: usize,
    end_line: Option<usize>,
}

#[async_trait]
impl McpTool for GetFileLinesTool {
    fn name(&self) -> &'static str {
        "get_file_lines"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Path of the file to read"
                },
                "start_line": {
                    "type": "integer",
                    "description": "First line, 1-based",
                    "minimum": 1,
                    "default": 1
                },
                "end_line": {
                    "type": "integer",
                    "description": "Last line, 1-based inclusive",
                    "minimum": 1
                }
            },
            "required": ["file_path"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetFileLinesRequest = BaseToolImpl::parse_arguments(arguments)?;

        let max_file_size = context.settings.max_file_size;
        let outcome = tokio::task::spawn_blocking(move || {
            file_lines(
                &request.file_path,
                request.start_line,
                request.end_line,
                max_file_size,
            )
        })
        .await;
        match outcome {
            Ok(Ok(lines)) => Ok(BaseToolImpl::create_success_response(format!(
                "Lines {}-{} of '{}':\n\n{}\n",
                lines.start_line,
                lines.end_line,
                lines.path.display(),
                lines.numbered()
            ))),
            Ok(Err(e)) => Ok(BaseToolImpl::domain_error("Error reading file lines", &e)),
            Err(e) => Ok(BaseToolImpl::failure("Error reading file lines", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{call, create_test_context, is_error, text_of};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_line_range_is_numbered() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("list.txt");
        fs::write(&file, "a\nb\nc\nd\n").unwrap();
        let context = create_test_context().await;

        let result = call(
            &GetFileLinesTool::new(),
            &context,
            json!({"file_path": file.to_string_lossy(), "start_line": 2, "end_line": 3}),
        )
        .await;
        let text = text_of(&result);
        assert!(text.starts_with("Lines 2-3 of '"));
        assert!(text.ends_with("\n\n   2: b\n   3: c\n"));
    }

    #[tokio::test]
    async fn test_defaults_and_clamping() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("list.txt");
        fs::write(&file, "a\nb").unwrap();
        let context = create_test_context().await;

        let result = call(
            &GetFileLinesTool::new(),
            &context,
            json!({"file_path": file.to_string_lossy(), "end_line": 99}),
        )
        .await;
        assert!(text_of(&result).ends_with("\n\n   1: a\n   2: b\n"));
    }

    #[tokio::test]
    async fn test_start_past_end_of_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("list.txt");
        fs::write(&file, "a\nb\n").unwrap();
        let context = create_test_context().await;

        let result = call(
            &GetFileLinesTool::new(),
            &context,
            json!({"file_path": file.to_string_lossy(), "start_line": 5}),
        )
        .await;
        assert!(is_error(&result));
        assert_eq!(
            text_of(&result),
            "Error reading file lines: Start line 5 exceeds file length (2 lines)"
        );
    }
}
