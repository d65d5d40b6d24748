//! Advanced search tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use mcp_local_search::{split_list, SearchEngine, SearchOptions, SearchResults};
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

/// Tool for filtered search with context lines
#[derive(Default)]
pub struct SearchAdvancedTool;

impl SearchAdvancedTool {
    /// Creates a new instance of the SearchAdvancedTool
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct SearchAdvancedRequest {
    search_term: String,
    #[serde(default = "default_search_path")]
    search_path: String,
    #[serde(default)]
    case_sensitive: bool,
    #[serde(default)]
    whole_word: bool,
    #[serde(default)]
    use_regex: bool,
    #[serde(default)]
    include_patterns: Option<String>,
    #[serde(default)]
    exclude_patterns: Option<String>,
    file_types: Option<String>,
    max_results: Option<usize>,
    context_lines: Option<usize>,
    #[serde(default)]
    show_hidden: bool,
}

fn default_search_path() -> String {
    ".".to_string()
}

impl SearchAdvancedRequest {
    fn options(&self) -> SearchOptions {
        let defaults = SearchOptions::default();
        SearchOptions {
            case_sensitive: self.case_sensitive,
            whole_word: self.whole_word,
            use_regex: self.use_regex,
            include_patterns: self
                .include_patterns
                .as_deref()
                .map(split_list)
                .unwrap_or_default(),
            exclude_patterns: self
                .exclude_patterns
                .as_deref()
                .map(split_list)
                .unwrap_or_default(),
            file_types: self.file_types.clone().unwrap_or(defaults.file_types),
            max_results: self.max_results.unwrap_or(defaults.max_results),
            context_lines: self.context_lines.unwrap_or(defaults.context_lines),
            show_hidden: self.show_hidden,
        }
    }
}

/// Render results grouped by file, each context line indented
fn render(results: &SearchResults) -> String {
    if results.matches.is_empty() {
        return format!(
            "🔍 No matches found for '{}' in {} files",
            results.term, results.files_searched
        );
    }

    let mut output = format!("🔍 **Search Results for '{}'**\n", results.term);
    output.push_str(&format!(
        "Found {} matches in {} files (searched {} files)\n\n",
        results.total_matches(),
        results.files_with_matches,
        results.files_searched
    ));

    for (file, matches) in results.grouped_by_file() {
        output.push_str(&format!("📄 **{file}** ({} matches)\n", matches.len()));
        for m in matches {
            let context: Vec<String> = m.context.iter().map(|line| format!("     {line}")).collect();
            output.push_str(&context.join("\n"));
            output.push_str("\n---\n");
        }
    }

    if results.limit_reached() {
        output.push_str(&format!(
            "\n⚠️ Results limited to {} matches. Consider refining your search.",
            results.options.max_results
        ));
    }
    output.trim().to_string()
}

#[async_trait]
impl McpTool for SearchAdvancedTool {
    fn name(&self) -> &'static str {
        "search_adv"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "search_term": {
                    "type": "string",
                    "description": "Text or regular expression to find"
                },
                "search_path": {
                    "type": "string",
                    "description": "Directory or file to search",
                    "default": "."
                },
                "case_sensitive": {
                    "type": "boolean",
                    "default": false
                },
                "whole_word": {
                    "type": "boolean",
                    "default": false
                },
                "use_regex": {
                    "type": "boolean",
                    "default": false
                },
                "include_patterns": {
                    "type": "string",
                    "description": "Comma-separated globs of files to search"
                },
                "exclude_patterns": {
                    "type": "string",
                    "description": "Comma-separated globs to exclude in addition to the defaults"
                },
                "file_types": {
                    "type": "string",
                    "description": "Preset group or comma-separated extensions",
                    "default": "all"
                },
                "max_results": {
                    "type": "integer",
                    "default": 1000,
                    "minimum": 1
                },
                "context_lines": {
                    "type": "integer",
                    "default": 2,
                    "minimum": 0
                },
                "show_hidden": {
                    "type": "boolean",
                    "default": false
                }
            },
            "required": ["search_term"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        _context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: SearchAdvancedRequest = BaseToolImpl::parse_arguments(arguments)?;
        let options = request.options();

        let outcome = tokio::task::spawn_blocking(move || {
            SearchEngine::new(&request.search_term, options)
                .and_then(|engine| engine.search(&request.search_path))
        })
        .await;

        match outcome {
            Ok(Ok(results)) => Ok(BaseToolImpl::create_success_response(render(&results))),
            Ok(Err(e)) => Ok(BaseToolImpl::domain_error("Search error", &e)),
            Err(e) => Ok(BaseToolImpl::failure("Search error", e)),
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

    fn tree(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (path, content) in files {
            let full = temp.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        temp
    }

    #[tokio::test]
    async fn test_grouped_output_with_context() {
        let temp = tree(&[
            ("src/lib.rs", "fn one() {}\nfn parse() {}\nfn two() {}\n"),
            ("node_modules/dep.rs", "fn parse() {}\n"),
        ]);
        let context = create_test_context().await;

        let result = call(
            &SearchAdvancedTool::new(),
            &context,
            json!({
                "search_term": "parse",
                "search_path": temp.path().to_string_lossy(),
                "context_lines": 1
            }),
        )
        .await;
        let text = text_of(&result);
        assert!(text.starts_with("🔍 **Search Results for 'parse'**"));
        assert!(text.contains("Found 1 matches in 1 files (searched 1 files)"));
        assert!(text.contains("📄 **src/lib.rs** (1 matches)"));
        assert!(text.contains("     >>    2: fn parse() {}"));
        assert!(text.contains("        1: fn one() {}"));
        assert!(text.ends_with("---"));
        assert!(!text.contains("node_modules"));
    }

    #[tokio::test]
    async fn test_limit_note_and_exclude_list() {
        let temp = tree(&[
            ("a.txt", "hit\nhit\nhit\n"),
            ("logs/b.log", "hit\n"),
        ]);
        let context = create_test_context().await;
        let root = temp.path().to_string_lossy().to_string();

        let result = call(
            &SearchAdvancedTool::new(),
            &context,
            json!({"search_term": "hit", "search_path": root, "max_results": 2}),
        )
        .await;
        let text = text_of(&result);
        assert!(text.contains("Found 2 matches"));
        assert!(text.ends_with("Results limited to 2 matches. Consider refining your search."));

        let result = call(
            &SearchAdvancedTool::new(),
            &context,
            json!({
                "search_term": "hit",
                "search_path": root,
                "exclude_patterns": "*.txt, logs/*"
            }),
        )
        .await;
        assert!(text_of(&result).starts_with("🔍 No matches found for 'hit' in 0 files"));
    }

    #[tokio::test]
    async fn test_errors_are_reported() {
        let temp = tree(&[("a.txt", "x\n")]);
        let context = create_test_context().await;

        let result = call(
            &SearchAdvancedTool::new(),
            &context,
            json!({
                "search_term": "(",
                "use_regex": true,
                "search_path": temp.path().to_string_lossy()
            }),
        )
        .await;
        assert!(is_error(&result));
        assert!(text_of(&result).starts_with("Search error: Invalid pattern"));

        let result = call(
            &SearchAdvancedTool::new(),
            &context,
            json!({"search_term": "x", "search_path": temp.path().join("missing").to_string_lossy()}),
        )
        .await;
        assert!(is_error(&result));
    }
}
