//! Backed-up whole-file write tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

/// Tool for writing file contents
#[derive(Default)]
pub struct WriteFileTool;

impl WriteFileTool {
    /// Creates a new instance of the WriteFileTool
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct WriteFileRequest {
    file_path: String,
    content: String,
}

#[async_trait]
impl McpTool for WriteFileTool {
    fn name(&self) -> &'static str {
        "write_file"
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
                    "description": "Path of the file to write"
                },
                "content": {
                    "type": "string",
                    "description": "Complete new content of the file"
                }
            },
            "required": ["file_path", "content"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: WriteFileRequest = BaseToolImpl::parse_arguments(arguments)?;

        let outcome = context
            .with_editor(move |editor| editor.write_file(&request.file_path, &request.content))
            .await;
        match outcome {
            Ok(Ok(outcome)) => Ok(BaseToolImpl::create_success_response(format!(
                "Successfully wrote {} characters to '{}'",
                outcome.characters,
                outcome.path.display()
            ))),
            Ok(Err(e)) => Ok(BaseToolImpl::domain_error("Error writing file", &e)),
            Err(e) => Ok(BaseToolImpl::failure("Error writing file", e)),
        }
    }
}
