//! Line insertion tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

/// Tool for inserting lines into a file
#[derive(Default)]
pub struct InsertLinesTool;

impl InsertLinesTool {
    /// Creates a new instance of the InsertLinesTool
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct InsertLinesRequest {
    file_path: String,
    line_number: i64,
    content: String,
}

impl InsertLinesRequest {
    /// Line number with negatives clamped to the top of the file
    fn clamped_line_number(&self) -> usize {
        usize::try_from(self.line_number.max(0)).unwrap_or(usize::MAX)
    }
}

#[async_trait]
impl McpTool for InsertLinesTool {
    fn name(&self) -> &'static str {
        "insert_lines"
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
                "line_number": {
                    "type": "integer",
                    "description": "Insert before this line, 1-based; 0 or less inserts at the top, past the end appends"
                },
                "content": {
                    "type": "string",
                    "description": "Text to insert"
                }
            },
            "required": ["file_path", "line_number", "content"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: InsertLinesRequest = BaseToolImpl::parse_arguments(arguments)?;

        let line_number = request.clamped_line_number();
        let outcome = context
            .with_editor(move |editor| {
                editor.insert_lines(&request.file_path, line_number, &request.content)
            })
            .await;
        match outcome {
            Ok(Ok(outcome)) => Ok(BaseToolImpl::create_success_response(format!(
                "Successfully inserted {} lines at line {} in '{}'",
                outcome.inserted,
                outcome.line_number,
                outcome.path.display()
            ))),
            Ok(Err(e)) => Ok(BaseToolImpl::domain_error("Error inserting lines", &e)),
            Err(e) => Ok(BaseToolImpl::failure("Error inserting lines", e)),
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
    async fn test_insert_in_middle() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("list.txt");
        fs::write(&file, "a\nc\n").unwrap();
        let context = create_test_context().await;

        let result = call(
            &InsertLinesTool::new(),
            &context,
            json!({"file_path": file.to_string_lossy(), "line_number": 2, "content": "b"}),
        )
        .await;
        assert!(!is_error(&result));
        assert!(text_of(&result).starts_with("Successfully inserted 1 lines at line 2 in '"));
        assert_eq!(fs::read_to_string(&file).unwrap(), "a\nb\nc\n");
    }

    #[tokio::test]
    async fn test_insert_past_end_appends() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("list.txt");
        fs::write(&file, "a\nb").unwrap();
        let context = create_test_context().await;

        call(
            &InsertLinesTool::new(),
            &context,
            json!({"file_path": file.to_string_lossy(), "line_number": 40, "content": "c\nd\n"}),
        )
        .await;
        assert_eq!(fs::read_to_string(&file).unwrap(), "a\nb\nc\nd\n");
    }

    #[tokio::test]
    async fn test_negative_line_number_inserts_at_top() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("list.txt");
        fs::write(&file, "b\nc\n").unwrap();
        let context = create_test_context().await;

        let result = call(
            &InsertLinesTool::new(),
            &context,
            json!({"file_path": file.to_string_lossy(), "line_number": -5, "content": "a"}),
        )
        .await;
        assert!(!is_error(&result));
        assert!(text_of(&result).starts_with("Successfully inserted 1 lines at line 0 in '"));
        assert_eq!(fs::read_to_string(&file).unwrap(), "a\nb\nc\n");
    }
}
