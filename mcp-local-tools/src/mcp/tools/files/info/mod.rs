//! File metadata tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use mcp_local_common::format_file_size;
use mcp_local_files::{file_info, FileInfo};
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Tool for getting file information
#[derive(Default)]
pub struct GetFileInfoTool;

impl GetFileInfoTool {
    /// Creates a new instance of the GetFileInfoTool
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct GetFileInfoRequest {
    file_path: String,
}

fn render(info: &FileInfo) -> String {
    let mut out = format!("Information for '{}':\n", info.path.display());
    out.push_str(&format!("  Name: {}\n", info.name));
    out.push_str(&format!(
        "  Size: {} ({} bytes)\n",
        format_file_size(info.size),
        info.size
    ));
    out.push_str(&format!("  Type: {}\n", info.kind_label()));
    out.push_str(&format!(
        "  Extension: {}\n",
        info.extension.as_deref().unwrap_or("None")
    ));
    out.push_str(&format!("  Permissions: {}\n", info.permissions));
    if let Some(parent) = &info.parent {
        out.push_str(&format!("  Parent: {}\n", parent.display()));
    }
    out.push_str(&format!("  Modified: {}\n", info.modified.format(TIME_FORMAT)));
    out.push_str(&format!("  Created: {}\n", info.created.format(TIME_FORMAT)));
    if info.is_file {
        out.push_str(&format!(
            "  Text: {}\n",
            if info.is_text { "yes" } else { "no" }
        ));
        if let Some(mime) = &info.mime {
            out.push_str(&format!("  MIME: {mime}\n"));
        }
    }
    if info.is_symlink {
        out.push_str("  Type: Symbolic Link\n");
    }
    out
}

#[async_trait]
impl McpTool for GetFileInfoTool {
    fn name(&self) -> &'static str {
        "get_file_info"
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
                    "description": "Path of the file or directory"
                }
            },
            "required": ["file_path"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        _context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetFileInfoRequest = BaseToolImpl::parse_arguments(arguments)?;
        match tokio::task::spawn_blocking(move || file_info(&request.file_path)).await {
            Ok(Ok(info)) => Ok(BaseToolImpl::create_success_response(render(&info))),
            Ok(Err(e)) => Ok(BaseToolImpl::domain_error("Error getting file info", &e)),
            Err(e) => Ok(BaseToolImpl::failure("Error getting file info", e)),
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
    async fn test_file_report() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("main.rs");
        fs::write(&file, "fn main() {}\n").unwrap();
        let context = create_test_context().await;

        let result = call(
            &GetFileInfoTool::new(),
            &context,
            json!({"file_path": file.to_string_lossy()}),
        )
        .await;
        let text = text_of(&result);
        assert!(!is_error(&result));
        assert!(text.contains("  Name: main.rs\n"));
        assert!(text.contains("  Size: 13 bytes (13 bytes)\n"));
        assert!(text.contains("  Type: File\n"));
        assert!(text.contains("  Extension: .rs\n"));
        assert!(text.contains("  Text: yes\n"));
        assert!(!text.contains("Symbolic Link"));
    }

    #[tokio::test]
    async fn test_directory_report() {
        let temp = TempDir::new().unwrap();
        let context = create_test_context().await;

        let result = call(
            &GetFileInfoTool::new(),
            &context,
            json!({"file_path": temp.path().to_string_lossy()}),
        )
        .await;
        let text = text_of(&result);
        assert!(text.contains("  Type: Directory\n"));
        assert!(text.contains("  Extension: None\n"));
        assert!(!text.contains("  Text:"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_flag() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("real.txt");
        fs::write(&target, "x").unwrap();
        let link = temp.path().join("link.txt");
        std::os::unix::fs::symlink(&target, &link).unwrap();
        let context = create_test_context().await;

        let result = call(
            &GetFileInfoTool::new(),
            &context,
            json!({"file_path": link.to_string_lossy()}),
        )
        .await;
        assert!(text_of(&result).contains("  Type: Symbolic Link\n"));
    }
}
