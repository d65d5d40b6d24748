//! Backup restore tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

/// Tool for restoring a backup over a file
#[derive(Default)]
pub struct RestoreBackupTool;

impl RestoreBackupTool {
    /// Creates a new instance of the RestoreBackupTool
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct RestoreBackupRequest {
    backup_path: String,
    target_path: String,
}

#[async_trait]
impl McpTool for RestoreBackupTool {
    fn name(&self) -> &'static str {
        "restore_backup"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "backup_path": {
                    "type": "string",
                    "description": "Backup file to restore"
                },
                "target_path": {
                    "type": "string",
                    "description": "File to overwrite"
                }
            },
            "required": ["backup_path", "target_path"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: RestoreBackupRequest = BaseToolImpl::parse_arguments(arguments)?;

        let outcome = context
            .with_editor(move |editor| {
                editor.restore_backup(&request.backup_path, &request.target_path)
            })
            .await;
        let outcome = match outcome {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => return Ok(BaseToolImpl::domain_error("Error restoring backup", &e)),
            Err(e) => return Ok(BaseToolImpl::failure("Error restoring backup", e)),
        };
        let mut output = format!(
            "Successfully restored '{}' to '{}'",
            outcome.backup.display(),
            outcome.target.display()
        );
        if let Some(previous) = &outcome.previous {
            output.push_str(&format!(
                "\nPrevious content backed up to '{}'",
                previous.display()
            ));
        }
        Ok(BaseToolImpl::create_success_response(output))
    }
}
