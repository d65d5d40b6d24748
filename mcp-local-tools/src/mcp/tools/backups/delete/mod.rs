//! Backup removal tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use mcp_local_common::resolve_path;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

/// Tool for deleting a backup
#[derive(Default)]
pub struct DeleteBackupTool;

impl DeleteBackupTool {
    /// Creates a new instance of the DeleteBackupTool
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct DeleteBackupRequest {
    backup_path: String,
}

#[async_trait]
impl McpTool for DeleteBackupTool {
    fn name(&self) -> &'static str {
        "delete_backup"
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
                    "description": "Backup file to delete"
                }
            },
            "required": ["backup_path"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: DeleteBackupRequest = BaseToolImpl::parse_arguments(arguments)?;

        let path = match resolve_path(&request.backup_path) {
            Ok(path) => path,
            Err(e) => return Ok(BaseToolImpl::domain_error("Error deleting backup", &e)),
        };
        let target = path.clone();
        let outcome = context
            .with_editor(move |editor| editor.backups().delete(&target))
            .await;
        match outcome {
            Ok(Ok(true)) => Ok(BaseToolImpl::create_success_response(format!(
                "Deleted backup '{}'",
                path.display()
            ))),
            Ok(Ok(false)) => Ok(BaseToolImpl::create_success_response(format!(
                "Backup '{}' does not exist",
                path.display()
            ))),
            Ok(Err(e)) => Ok(BaseToolImpl::domain_error("Error deleting backup", &e)),
            Err(e) => Ok(BaseToolImpl::failure("Error deleting backup", e)),
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
    async fn test_delete_backup_once() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("gone.txt");
        fs::write(&source, "x").unwrap();
        let context = create_test_context().await;
        let backup = context
            .editor
            .lock()
            .await
            .backups()
            .create_backup(&source)
            .unwrap()
            .unwrap();
        let args = json!({"backup_path": backup.to_string_lossy()});

        let result = call(&DeleteBackupTool::new(), &context, args.clone()).await;
        assert!(text_of(&result).starts_with("Deleted backup '"));
        assert!(!backup.exists());

        let result = call(&DeleteBackupTool::new(), &context, args).await;
        assert!(!is_error(&result));
        assert!(text_of(&result).ends_with("does not exist"));
    }

    #[tokio::test]
    async fn test_refuses_files_outside_backup_dir() {
        let temp = TempDir::new().unwrap();
        let victim = temp.path().join("important.backup");
        fs::write(&victim, "keep me").unwrap();
        let context = create_test_context().await;

        let result = call(
            &DeleteBackupTool::new(),
            &context,
            json!({"backup_path": victim.to_string_lossy()}),
        )
        .await;
        assert!(is_error(&result));
        assert!(victim.exists());
    }
}
