//! Line range deletion tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

/// Tool for deleting lines from a file
#[derive(Default)]
pub struct DeleteLinesTool;

impl DeleteLinesTool {
    /// Creates a new instance of the DeleteLinesTool
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct DeleteLinesRequest {
    file_path: String,
    start_line: usize,
    end_line: Option<usize>,
}

#[async_trait]
impl McpTool for DeleteLinesTool {
    fn name(&self) -> &'static str {
        "delete_lines"
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
                    "description": "Path of the file to edit"
                },
                "start_line": {
                    "type": "integer",
                    "description": "First line to delete, 1-based",
                    "minimum": 1
                },
                "end_line": {
                    "type": "integer",
                    "description": "Last line to delete, inclusive (defaults to start_line)",
                    "minimum": 1
                }
            },
            "required": ["file_path", "start_line"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: DeleteLinesRequest = BaseToolImpl::parse_arguments(arguments)?;

        let outcome = context
            .with_editor(move |editor| {
                editor.delete_lines(&request.file_path, request.start_line, request.end_line)
            })
            .await;
        match outcome {
            Ok(Ok(outcome)) => Ok(BaseToolImpl::create_success_response(format!(
                "Successfully deleted lines {}-{} from '{}'",
                outcome.start_line,
                outcome.end_line,
                outcome.path.display()
            ))),
            Ok(Err(e)) => Ok(BaseToolImpl::domain_error("Error deleting lines", &e)),
            Err(e) => Ok(BaseToolImpl::failure("Error deleting lines", e)),
        }
    }
}
