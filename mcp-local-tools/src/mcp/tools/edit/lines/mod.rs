//! Line range replacement tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

/// Tool for replacing specific lines in a file
#[derive(Default)]
pub struct EditFileLinesTool;

impl EditFileLinesTool {
    /// Creates a new instance of the EditFileLinesTool
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct EditFileLinesRequest {
    file_path: String,
    start_line: usize,
    new_content: String,
    end_line: Option<usize>,
}

#[async_trait]
impl McpTool for EditFileLinesTool {
    fn name(&self) -> &'static str {
        "edit_file_lines"
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
                    "description": "First line to replace, 1-based",
                    "minimum": 1
                },
                "new_content": {
                    "type": "string",
                    "description": "Replacement text"
                },
                "end_line": {
                    "type": "integer",
                    "description": "Last line to replace, inclusive (defaults to start_line)",
                    "minimum": 1
                }
            },
            "required": ["file_path", "start_line", "new_content"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: EditFileLinesRequest = BaseToolImpl::parse_arguments(arguments)?;

        let outcome = context
            .with_editor(move |editor| {
                editor.edit_lines(
                    &request.file_path,
                    request.start_line,
                    &request.new_content,
                    request.end_line,
                )
            })
            .await;
        match outcome {
            Ok(Ok(outcome)) => Ok(BaseToolImpl::create_success_response(format!(
                "Successfully edited lines {}-{} in '{}'",
                outcome.start_line,
                outcome.end_line,
                outcome.path.display()
            ))),
            Ok(Err(e)) => Ok(BaseToolImpl::domain_error("Error editing file lines", &e)),
            Err(e) => Ok(BaseToolImpl::failure("Error editing file lines", e)),
        }
    }
}
