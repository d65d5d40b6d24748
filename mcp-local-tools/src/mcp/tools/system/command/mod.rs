//! Shell command tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use mcp_local_common::resolve_path;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

/// Tool for running validated shell commands
#[derive(Default)]
pub struct RunCommandTool;

impl RunCommandTool {
    /// Creates a new instance of the RunCommandTool
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct RunCommandRequest {
    command: String,
    working_directory: Option<String>,
}

#[async_trait]
impl McpTool for RunCommandTool {
    fn name(&self) -> &'static str {
        "run_command"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "The command line to run"
                },
                "working_directory": {
                    "type": "string",
                    "description": "Directory to run the command in"
                }
            },
            "required": ["command"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: RunCommandRequest = BaseToolImpl::parse_arguments(arguments)?;

        let working_directory = match request.working_directory.as_deref() {
            Some(dir) if !dir.trim().is_empty() => match resolve_path(dir) {
                Ok(path) => Some(path),
                Err(e) => return Ok(BaseToolImpl::domain_error("Error", &e)),
            },
            _ => None,
        };

        match context
            .runner
            .run(&request.command, working_directory.as_deref())
            .await
        {
            Ok(output) => Ok(BaseToolImpl::create_success_response(output.render())),
            Err(e) => Ok(BaseToolImpl::failure("Error", e)),
        }
    }
}
