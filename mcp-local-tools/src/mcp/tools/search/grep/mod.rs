//! Line-oriented search tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use mcp_local_common::McpLocalError;
use mcp_local_search::{search_in_files, DEFAULT_DISPLAY_LIMIT};
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

/// Tool for grep-style content search
#[derive(Default)]
pub struct SearchInFilesTool;

impl SearchInFilesTool {
    /// Creates a new instance of the SearchInFilesTool
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct SearchInFilesRequest {
    search_pattern: String,
    #[serde(default = "default_directory")]
    directory: String,
    #[serde(default = "default_file_pattern")]
    file_pattern: String,
    #[serde(default)]
    use_regex: bool,
    #[serde(default = "default_max_results")]
    max_results: usize,
}

fn default_directory() -> String {
    ".".to_string()
}

fn default_file_pattern() -> String {
    "*".to_string()
}

fn default_max_results() -> usize {
    DEFAULT_DISPLAY_LIMIT
}

#[async_trait]
impl McpTool for SearchInFilesTool {
    fn name(&self) -> &'static str {
        "search_in_files"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "search_pattern": {
                    "type": "string",
                    "description": "Text or regular expression to find"
                },
                "directory": {
                    "type": "string",
                    "description": "Directory to search",
                    "default": "."
                },
                "file_pattern": {
                    "type": "string",
                    "description": "Glob matched against file paths",
                    "default": "*"
                },
                "use_regex": {
                    "type": "boolean",
                    "description": "Treat the pattern as a regular expression",
                    "default": false
                },
                "max_results": {
                    "type": "integer",
                    "description": "Number of matching lines to show; the rest are counted",
                    "default": DEFAULT_DISPLAY_LIMIT,
                    "minimum": 1
                }
            },
            "required": ["search_pattern"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        _context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: SearchInFilesRequest = BaseToolImpl::parse_arguments(arguments)?;
        if request.max_results == 0 {
            return Ok(BaseToolImpl::domain_error(
                "Error searching files",
                &McpLocalError::validation("max_results must be greater than 0"),
            ));
        }

        let outcome = tokio::task::spawn_blocking(move || {
            let results = search_in_files(
                &request.search_pattern,
                &request.directory,
                &request.file_pattern,
                request.use_regex,
            );
            (request, results)
        })
        .await;

        let (request, results) = match outcome {
            Ok(outcome) => outcome,
            Err(e) => return Ok(BaseToolImpl::failure("Error searching files", e)),
        };
        match results {
            Ok(results) if results.matches.is_empty() => {
                Ok(BaseToolImpl::create_success_response(format!(
                    "No matches found for '{}' in {}",
                    request.search_pattern, request.directory
                )))
            }
            Ok(results) => Ok(BaseToolImpl::create_success_response(
                results.render(request.max_results),
            )),
            Err(e) => Ok(BaseToolImpl::domain_error("Error searching files", &e)),
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
    async fn test_reports_matching_lines() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("notes.txt"), "alpha\nbeta alpha\ngamma\n").unwrap();
        fs::write(temp.path().join("skip.md"), "alpha\n").unwrap();
        let context = create_test_context().await;

        let result = call(
            &SearchInFilesTool::new(),
            &context,
            json!({
                "search_pattern": "alpha",
                "directory": temp.path().to_string_lossy(),
                "file_pattern": "*.txt"
            }),
        )
        .await;
        let text = text_of(&result);
        assert!(text.starts_with("Found 2 matches for 'alpha':"));
        assert!(text.contains("notes.txt:2: beta alpha"));
        assert!(!text.contains("skip.md"));
    }

    #[tokio::test]
    async fn test_no_matches_and_bad_regex() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "nothing here\n").unwrap();
        let context = create_test_context().await;
        let directory = temp.path().to_string_lossy().to_string();

        let result = call(
            &SearchInFilesTool::new(),
            &context,
            json!({"search_pattern": "zzz", "directory": directory}),
        )
        .await;
        assert_eq!(
            text_of(&result),
            format!("No matches found for 'zzz' in {directory}")
        );

        let result = call(
            &SearchInFilesTool::new(),
            &context,
            json!({"search_pattern": "(", "directory": directory, "use_regex": true}),
        )
        .await;
        assert!(is_error(&result));
        assert!(text_of(&result).contains("Invalid pattern"));
    }

    #[tokio::test]
    async fn test_max_results_limits_shown_lines() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("hits.txt"), "hit 1\nhit 2\nhit 3\nhit 4\nhit 5\n").unwrap();
        let context = create_test_context().await;
        let directory = temp.path().to_string_lossy().to_string();

        let result = call(
            &SearchInFilesTool::new(),
            &context,
            json!({"search_pattern": "hit", "directory": directory, "max_results": 2}),
        )
        .await;
        let text = text_of(&result);
        assert!(text.starts_with("Found 5 matches for 'hit':"));
        assert_eq!(text.matches("hits.txt:").count(), 2);
        assert!(text.ends_with("... and 3 more matches"));

        let result = call(
            &SearchInFilesTool::new(),
            &context,
            json!({"search_pattern": "hit", "directory": directory, "max_results": 0}),
        )
        .await;
        assert!(is_error(&result));
        assert_eq!(
            text_of(&result),
            "Error searching files: max_results must be greater than 0"
        );
    }
}
