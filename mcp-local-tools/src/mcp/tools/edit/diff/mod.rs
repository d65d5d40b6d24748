//! Backup diff tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use mcp_local_files::FileDiff;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

/// Tool for showing differences between a file and its backup
#[derive(Default)]
pub struct GetFileDiffTool;

impl GetFileDiffTool {
    /// Creates a new instance of the GetFileDiffTool
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct GetFileDiffRequest {
    file_path: String,
    backup_file: Option<String>,
}

#[async_trait]
impl McpTool for GetFileDiffTool {
    fn name(&self) -> &'static str {
        "get_file_diff"
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
                    "description": "Path of the current file"
                },
                "backup_file": {
                    "type": "string",
                    "description": "Specific backup to compare against (defaults to the latest)"
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
        let request: GetFileDiffRequest = BaseToolImpl::parse_arguments(arguments)?;

        let outcome = context
            .with_editor(move |editor| {
                editor.diff(&request.file_path, request.backup_file.as_deref())
            })
            .await;
        match outcome {
            Ok(Ok(FileDiff::NoDifferences)) => Ok(BaseToolImpl::create_success_response(
                "No differences found",
            )),
            Ok(Ok(FileDiff::Changes { path, diff, .. })) => Ok(BaseToolImpl::create_success_response(
                format!("Differences for '{}':\n\n{}", path.display(), diff),
            )),
            Ok(Err(e)) => Ok(BaseToolImpl::domain_error("Error generating diff", &e)),
            Err(e) => Ok(BaseToolImpl::failure("Error generating diff", e)),
        }
    }
}
