//! Directory listing tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use mcp_local_files::list_directory;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;
use tracing::debug;

/// Tool for listing directory contents
#[derive(Default)]
pub struct ListFilesTool;

impl ListFilesTool {
    /// Creates a new instance of the ListFilesTool
    pub fn new() -> Self {
        Self
    }
}

fn default_directory() -> String {
    ".".to_string()
}

#[derive(Debug, Deserialize)]
struct ListFilesRequest {
    #[serde(default = "default_directory")]
    directory: String,
    #[serde(default)]
    show_hidden: bool,
}

#[async_trait]
impl McpTool for ListFilesTool {
    fn name(&self) -> &'static str {
        "list_files"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "directory": {
                    "type": "string",
                    "description": "Directory to list",
                    "default": "."
                },
                "show_hidden": {
                    "type": "boolean",
                    "description": "Include dot-prefixed entries",
                    "default": false
                }
            }
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        _context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ListFilesRequest = BaseToolImpl::parse_arguments(arguments)?;
        debug!(directory = %request.directory, show_hidden = request.show_hidden, "Listing directory");

        let directory = request.directory.clone();
        let show_hidden = request.show_hidden;
        let outcome =
            tokio::task::spawn_blocking(move || list_directory(&directory, show_hidden)).await;
        let entries = match outcome {
            Ok(Ok((_, entries))) => entries,
            Ok(Err(e)) => return Ok(BaseToolImpl::domain_error("Error", &e)),
            Err(e) => return Ok(BaseToolImpl::failure("Error", e)),
        };

        if entries.is_empty() {
            return Ok(BaseToolImpl::create_success_response(format!(
                "Directory '{}' is empty",
                request.directory
            )));
        }

        let mut output = format!("Contents of '{}':\n", request.directory);
        for entry in &entries {
            let icon = if entry.is_dir { "📁" } else { "📄" };
            match entry.formatted_size() {
                Some(size) => output.push_str(&format!("{icon} {} ({size})\n", entry.name)),
                None => output.push_str(&format!("{icon} {}\n", entry.name)),
            }
        }
        Ok(BaseToolImpl::create_success_response(output))
    }
}
