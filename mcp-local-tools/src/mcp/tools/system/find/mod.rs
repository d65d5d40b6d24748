//! File-name search tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use mcp_local_common::format_file_size_short;
use mcp_local_search::find_files;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

const DEFAULT_MAX_RESULTS: usize = 50;

/// Tool for finding files by name
#[derive(Default)]
pub struct FindFilesTool;

impl FindFilesTool {
    /// Creates a new instance of the FindFilesTool
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct FindFilesRequest {
    pattern: String,
    #[serde(default = "default_directory")]
    directory: String,
    #[serde(default = "default_max_results")]
    max_results: usize,
}

fn default_directory() -> String {
    ".".to_string()
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

#[async_trait]
impl McpTool for FindFilesTool {
    fn name(&self) -> &'static str {
        "find_files"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "pattern": {
                    "type": "string",
                    "description": "File name pattern"
                },
                "directory": {
                    "type": "string",
                    "description": "Directory to search",
                    "default": "."
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum number of files",
                    "default": DEFAULT_MAX_RESULTS,
                    "minimum": 1
                }
            },
            "required": ["pattern"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        _context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: FindFilesRequest = BaseToolImpl::parse_arguments(arguments)?;

        let outcome = tokio::task::spawn_blocking(move || {
            let found = find_files(&request.pattern, &request.directory, request.max_results);
            (request, found)
        })
        .await;
        let (request, found) = match outcome {
            Ok(outcome) => outcome,
            Err(e) => return Ok(BaseToolImpl::failure("Error finding files", e)),
        };
        let found = match found {
            Ok(found) => found,
            Err(e) => return Ok(BaseToolImpl::domain_error("Error finding files", &e)),
        };

        if found.is_empty() {
            return Ok(BaseToolImpl::create_success_response(format!(
                "No files found matching pattern '{}' in '{}'",
                request.pattern, request.directory
            )));
        }

        let mut output = format!(
            "Found {} files matching '{}' in '{}':\n\n",
            found.len(),
            request.pattern,
            request.directory
        );
        for file in &found {
            output.push_str(&format!(
                "{} ({})\n",
                file.path.display(),
                format_file_size_short(file.size)
            ));
        }
        Ok(BaseToolImpl::create_success_response(output))
    }
}
