//! Find and replace tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

/// Tool for find and replace in a file
#[derive(Default)]
pub struct ReplaceInFileTool;

impl ReplaceInFileTool {
    /// Creates a new instance of the ReplaceInFileTool
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct ReplaceInFileRequest {
    file_path: String,
    search_pattern: String,
    replace_with: String,
    #[serde(default)]
    use_regex: bool,
}

#[async_trait]
impl McpTool for ReplaceInFileTool {
    fn name(&self) -> &'static str {
        "replace_in_file"
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
                "search_pattern": {
                    "type": "string",
                    "description": "Text or regular expression to find"
                },
                "replace_with": {
                    "type": "string",
                    "description": "Replacement text"
                },
                "use_regex": {
                    "type": "boolean",
                    "description": "Treat search_pattern as a regular expression",
                    "default": false
                }
            },
            "required": ["file_path", "search_pattern", "replace_with"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ReplaceInFileRequest = BaseToolImpl::parse_arguments(arguments)?;

        let outcome = context
            .with_editor(move |editor| {
                editor.replace_in_file(
                    &request.file_path,
                    &request.search_pattern,
                    &request.replace_with,
                    request.use_regex,
                )
            })
            .await;
        match outcome {
            Ok(Ok(outcome)) => Ok(BaseToolImpl::create_success_response(format!(
                "Successfully made {} replacements in '{}'",
                outcome.replacements,
                outcome.path.display()
            ))),
            Ok(Err(e)) => Ok(BaseToolImpl::domain_error("Error replacing in file", &e)),
            Err(e) => Ok(BaseToolImpl::failure("Error replacing in file", e)),
        }
    }
}
