//! Backup listing tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use mcp_local_common::format_file_size;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

/// Tool for listing backups
#[derive(Default)]
pub struct ListBackupsTool;

impl ListBackupsTool {
    /// Creates a new instance of the ListBackupsTool
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct ListBackupsRequest {
    file_name: Option<String>,
}

#[async_trait]
impl McpTool for ListBackupsTool {
    fn name(&self) -> &'static str {
        "list_backups"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_name": {
                    "type": "string",
                    "description": "Only list backups of this file name"
                }
            }
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ListBackupsRequest = BaseToolImpl::parse_arguments(arguments)?;
        let file_name = request.file_name.filter(|name| !name.is_empty());

        let filter = file_name.clone();
        let outcome = context
            .with_editor(move |editor| {
                let backups = editor.backups();
                backups
                    .list_backups(filter.as_deref())
                    .map(|entries| (backups.dir().to_path_buf(), entries))
            })
            .await;
        let (dir, entries) = match outcome {
            Ok(Ok(listing)) => listing,
            Ok(Err(e)) => return Ok(BaseToolImpl::domain_error("Error listing backups", &e)),
            Err(e) => return Ok(BaseToolImpl::failure("Error listing backups", e)),
        };

        if entries.is_empty() {
            let message = match file_name {
                Some(name) => format!("No backups found for '{name}'"),
                None => "No backups found".to_string(),
            };
            return Ok(BaseToolImpl::create_success_response(message));
        }

        let mut output = format!(
            "Backups in '{}' ({} found, newest first):\n\n",
            dir.display(),
            entries.len()
        );
        for entry in &entries {
            output.push_str(&format!(
                "{} ({}, {})\n",
                entry.path.display(),
                format_file_size(entry.size),
                entry.modified.format("%Y-%m-%d %H:%M:%S")
            ));
        }
        Ok(BaseToolImpl::create_success_response(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{call, create_test_context, text_of};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_backups_filtered() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("first.txt");
        let second = temp.path().join("second.txt");
        fs::write(&first, "1").unwrap();
        fs::write(&second, "22").unwrap();
        let context = create_test_context().await;

        let result = call(&ListBackupsTool::new(), &context, json!({})).await;
        assert_eq!(text_of(&result), "No backups found");

        {
            let editor = context.editor.lock().await;
            editor.backups().create_backup(&first).unwrap();
            editor.backups().create_backup(&second).unwrap();
        }

        let result = call(&ListBackupsTool::new(), &context, json!({})).await;
        let text = text_of(&result);
        assert!(text.contains("(2 found, newest first)"));
        assert!(text.contains("first.txt_"));
        assert!(text.contains("second.txt_"));

        let result = call(
            &ListBackupsTool::new(),
            &context,
            json!({"file_name": "second.txt"}),
        )
        .await;
        let text = text_of(&result);
        assert!(text.contains("(1 found, newest first)"));
        assert!(text.contains("(2 bytes, "));
        assert!(!text.contains("first.txt_"));

        let result = call(
            &ListBackupsTool::new(),
            &context,
            json!({"file_name": "third.txt"}),
        )
        .await;
        assert_eq!(text_of(&result), "No backups found for 'third.txt'");
    }
}
