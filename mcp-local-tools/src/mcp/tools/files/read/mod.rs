//! Whole-file read tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use mcp_local_files::read_file;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;
use tracing::debug;

/// Tool for reading file contents from the local filesystem
#[derive(Default)]
pub struct ReadFileTool;

impl ReadFileTool {
    /// Creates a new instance of the ReadFileTool
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct ReadFileRequest {
    file_path: String,
}

#[async_trait]
impl McpTool for ReadFileTool {
    fn name(&self) -> &'static str {
        "read_file"
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
        let request: ReadFileRequest = BaseToolImpl::parse_arguments(arguments)?;

        let max_file_size = context.settings.max_file_size;
        let outcome =
            tokio::task::spawn_blocking(move || read_file(&request.file_path, max_file_size))
                .await;
        match outcome {
            Ok(Ok((path, content))) => {
                debug!(path = %path.display(), content_length = content.len(), "Read file");
                Ok(BaseToolImpl::create_success_response(format!(
                    "Contents of '{}':\n\n{}",
                    path.display(),
                    content
                )))
            }
            Ok(Err(e)) => Ok(BaseToolImpl::domain_error("Error reading file", &e)),
            Err(e) => Ok(BaseToolImpl::failure("Error reading file", e)),
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
    async fn test_read_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("notes.txt");
        fs::write(&file, "first\nsecond\n").unwrap();
        let context = create_test_context().await;

        let result = call(
            &ReadFileTool::new(),
            &context,
            json!({"file_path": file.to_string_lossy()}),
        )
        .await;
        assert!(!is_error(&result));
        let text = text_of(&result);
        assert!(text.starts_with("Contents of '"));
        assert!(text.ends_with("notes.txt':\n\nfirst\nsecond\n"));
    }

    #[tokio::test]
    async fn test_read_rejects_binary_and_missing() {
        let temp = TempDir::new().unwrap();
        let binary = temp.path().join("blob.bin");
        fs::write(&binary, [0xffu8, 0xfe, 0x00, 0x80]).unwrap();
        let context = create_test_context().await;

        let result = call(
            &ReadFileTool::new(),
            &context,
            json!({"file_path": binary.to_string_lossy()}),
        )
        .await;
        assert!(is_error(&result));
        assert!(text_of(&result).contains("Cannot decode file"));

        let result = call(
            &ReadFileTool::new(),
            &context,
            json!({"file_path": temp.path().join("nope.txt").to_string_lossy()}),
        )
        .await;
        assert!(is_error(&result));
        assert!(text_of(&result).starts_with("Error reading file: File '"));
    }

    #[tokio::test]
    async fn test_missing_argument_is_protocol_error() {
        let context = create_test_context().await;
        let err = ReadFileTool::new()
            .execute(serde_json::Map::new(), &context)
            .await
            .unwrap_err();
        assert!(err.message.contains("Invalid arguments"));
    }
}
