//! Tool registry and context for MCP operations
//!
//! Every tool implements [`McpTool`] and is stored in a [`ToolRegistry`] keyed
//! by name. The server looks tools up by name and hands each call the shared
//! [`ToolContext`].
//!
//! ## Tool Implementation Pattern
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use mcp_local_tools::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
//! use rmcp::model::CallToolResult;
//! use rmcp::ErrorData as McpError;
//!
//! #[derive(Default)]
//! pub struct ExampleTool;
//!
//! #[async_trait]
//! impl McpTool for ExampleTool {
//!     fn name(&self) -> &'static str {
//!         "example"
//!     }
//!
//!     fn description(&self) -> &'static str {
//!         include_str!("description.md")
//!     }
//!
//!     fn schema(&self) -> serde_json::Value {
//!         serde_json::json!({"type": "object", "properties": {}})
//!     }
//!
//!     async fn execute(
//!         &self,
//!         arguments: serde_json::Map<String, serde_json::Value>,
//!         context: &ToolContext,
//!     ) -> std::result::Result<CallToolResult, McpError> {
//!         Ok(BaseToolImpl::create_success_response("done"))
//!     }
//! }
//! ```
//!
//! Domain failures (missing files, invalid patterns, rejected commands) are
//! returned as `CallToolResult` values with `is_error` set, never as protocol
//! errors. Only malformed arguments and unknown tool names surface as
//! [`McpError`].

use async_trait::async_trait;
use mcp_local_common::{McpLocalError, Severity};
use mcp_local_config::Settings;
use mcp_local_files::{BackupStore, FileEditor};
use mcp_local_shell::{CommandError, CommandPolicy, CommandRunner};
use rmcp::model::{CallToolResult, Content, Tool};
use rmcp::ErrorData as McpError;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinError;
use tracing::warn;

/// Shared state handed to every tool call
///
/// The editor owns the backup store and the edit history. It sits behind a
/// single async mutex, so concurrent calls never interleave a backup with
/// another call's write, and history appends are serialized.
#[derive(Clone)]
pub struct ToolContext {
    /// Backup-before-mutate file editor and its edit history
    pub editor: Arc<Mutex<FileEditor>>,

    /// Effective settings, loaded once at startup
    pub settings: Arc<Settings>,

    /// Validating command runner for `run_command`
    pub runner: Arc<CommandRunner>,
}

impl ToolContext {
    /// Build a context from the effective settings
    pub fn new(settings: Settings) -> std::result::Result<Self, CommandError> {
        let runner = CommandRunner::new(
            CommandPolicy::with_max_command_length(settings.max_command_length),
            settings.command_timeout(),
        )?;
        let editor = FileEditor::new(
            BackupStore::new(settings.backup_dir.clone()),
            settings.max_edit_history,
            settings.max_file_size,
        );
        Ok(Self {
            editor: Arc::new(Mutex::new(editor)),
            settings: Arc::new(settings),
            runner: Arc::new(runner),
        })
    }

    /// Run `f` against the editor on the blocking thread pool
    ///
    /// The lock is held until `f` returns, so a backup and the write that
    /// follows it never interleave with another call.
    pub async fn with_editor<T, F>(&self, f: F) -> std::result::Result<T, JoinError>
    where
        F: FnOnce(&mut FileEditor) -> T + Send + 'static,
        T: Send + 'static,
    {
        let mut editor = Arc::clone(&self.editor).lock_owned().await;
        tokio::task::spawn_blocking(move || f(&mut *editor)).await
    }
}

/// Contract implemented by every MCP tool
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Unique tool name, stable across versions
    fn name(&self) -> &'static str;

    /// Human-readable description, usually `include_str!("description.md")`
    fn description(&self) -> &'static str;

    /// JSON schema of the tool's arguments
    fn schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments
    ///
    /// Returns `Err` only for protocol-level failures such as arguments that
    /// do not match the schema.
    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError>;
}

/// Registry of tools keyed by name
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn McpTool>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register<T: McpTool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Box::new(tool));
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    /// Registered tool names, sorted
    pub fn list_tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// All tools as MCP `Tool` descriptors, sorted by name
    pub fn list_tools(&self) -> Vec<Tool> {
        self.list_tool_names()
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| {
                let schema_map = match tool.schema() {
                    serde_json::Value::Object(map) => map,
                    _ => serde_json::Map::new(),
                };
                Tool::new(tool.name(), tool.description(), Arc::new(schema_map))
            })
            .collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Helpers shared by tool implementations
pub struct BaseToolImpl;

impl BaseToolImpl {
    /// Parse tool arguments from a JSON map into a typed struct
    pub fn parse_arguments<T: serde::de::DeserializeOwned>(
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> std::result::Result<T, McpError> {
        serde_json::from_value(serde_json::Value::Object(arguments))
            .map_err(|e| McpError::invalid_request(format!("Invalid arguments: {e}"), None))
    }

    /// Create a success response with text content
    pub fn create_success_response<T: Into<String>>(content: T) -> CallToolResult {
        CallToolResult::success(vec![Content::text(content.into())])
    }

    /// Create an error response, appending `details` after a colon when given
    pub fn create_error_response<T: Into<String>>(
        error: T,
        details: Option<String>,
    ) -> CallToolResult {
        let error_text = match details {
            Some(details) => format!("{}: {}", error.into(), details),
            None => error.into(),
        };
        CallToolResult::error(vec![Content::text(error_text)])
    }

    /// Render a domain error as an error response prefixed with `action`
    pub fn domain_error(action: &str, error: &McpLocalError) -> CallToolResult {
        warn!(
            kind = ?error.kind(),
            severity = ?error.severity(),
            "{action}: {error}"
        );
        Self::create_error_response(action, Some(error.to_string()))
    }

    /// Render any displayable failure as an error response
    pub fn failure(action: &str, error: impl Display) -> CallToolResult {
        warn!("{action}: {error}");
        Self::create_error_response(action, Some(error.to_string()))
    }
}

/// Register all file reading and writing tools
pub fn register_file_tools(registry: &mut ToolRegistry) {
    use super::tools::files;
    files::register_file_tools(registry);
}

/// Register all line-editing and diff tools
pub fn register_edit_tools(registry: &mut ToolRegistry) {
    use super::tools::edit;
    edit::register_edit_tools(registry);
}

/// Register all backup management tools
pub fn register_backup_tools(registry: &mut ToolRegistry) {
    use super::tools::backups;
    backups::register_backup_tools(registry);
}

/// Register all edit history tools
pub fn register_history_tools(registry: &mut ToolRegistry) {
    use super::tools::history;
    history::register_history_tools(registry);
}

/// Register all content search tools
pub fn register_search_tools(registry: &mut ToolRegistry) {
    use super::tools::search;
    search::register_search_tools(registry);
}

/// Register all command and system inspection tools
pub fn register_system_tools(registry: &mut ToolRegistry) {
    use super::tools::system;
    system::register_system_tools(registry);
}

/// Create a registry holding every tool
pub fn create_tool_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_file_tools(&mut registry);
    register_edit_tools(&mut registry);
    register_backup_tools(&mut registry);
    register_history_tools(&mut registry);
    register_search_tools(&mut registry);
    register_system_tools(&mut registry);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_context;

    struct EchoTool;

    #[async_trait]
    impl McpTool for EchoTool {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn description(&self) -> &'static str {
            "Echo the message back"
        }

        fn schema(&self) -> serde_json::Value {
            serde_json::json!({
                "type": "object",
                "properties": {"message": {"type": "string"}},
                "required": ["message"]
            })
        }

        async fn execute(
            &self,
            arguments: serde_json::Map<String, serde_json::Value>,
            _context: &ToolContext,
        ) -> std::result::Result<CallToolResult, McpError> {
            #[derive(serde::Deserialize)]
            struct EchoRequest {
                message: String,
            }
            let request: EchoRequest = BaseToolImpl::parse_arguments(arguments)?;
            Ok(BaseToolImpl::create_success_response(request.message))
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());
        registry.register(EchoTool);
        assert_eq!(registry.len(), 1);
        assert!(registry.get_tool("echo").is_some());
        assert!(registry.get_tool("missing").is_none());
    }

    #[test]
    fn test_full_registry_is_sorted_and_complete() {
        let registry = create_tool_registry();
        let names = registry.list_tool_names();
        let expected = [
            "clear_edit_history",
            "delete_backup",
            "delete_lines",
            "edit_file_lines",
            "export_edit_history",
            "find_files",
            "get_edit_history",
            "get_file_diff",
            "get_file_info",
            "get_file_lines",
            "get_history_stats",
            "get_recent_files",
            "get_running_processes",
            "get_system_info",
            "insert_lines",
            "list_backups",
            "list_files",
            "read_file",
            "replace_in_file",
            "restore_backup",
            "run_command",
            "search_adv",
            "search_in_files",
            "write_file",
        ];
        assert_eq!(names, expected);

        let tools = registry.list_tools();
        assert_eq!(tools.len(), expected.len());
        for (tool, name) in tools.iter().zip(expected) {
            assert_eq!(tool.name, name);
            assert!(tool.description.as_deref().is_some_and(|d| !d.is_empty()));
            assert_eq!(
                tool.input_schema.get("type"),
                Some(&serde_json::json!("object"))
            );
        }
    }

    #[tokio::test]
    async fn test_parse_arguments_reports_invalid_arguments() {
        let context = create_test_context().await;
        let err = EchoTool
            .execute(serde_json::Map::new(), &context)
            .await
            .unwrap_err();
        assert!(err.message.contains("Invalid arguments"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_with_editor_serializes_concurrent_edits() {
        let context = create_test_context().await;
        let temp = tempfile::TempDir::new().unwrap();
        let file = temp.path().join("shared.txt");
        std::fs::write(&file, "").unwrap();

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let context = context.clone();
                let path = file.to_string_lossy().into_owned();
                tokio::spawn(async move {
                    context
                        .with_editor(move |editor| {
                            editor.insert_lines(&path, usize::MAX, &format!("line {i}\n"))
                        })
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap().unwrap();
        }

        let content = std::fs::read_to_string(&file).unwrap();
        assert_eq!(content.lines().count(), 8);
        assert_eq!(context.editor.lock().await.history().len(), 8);
    }

    #[test]
    fn test_error_response_formatting() {
        let result = BaseToolImpl::create_error_response("Error reading file", Some("boom".into()));
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            result.content[0].as_text().unwrap().text,
            "Error reading file: boom"
        );

        let result = BaseToolImpl::domain_error(
            "Error reading file",
            &McpLocalError::not_found("/nope.txt"),
        );
        assert_eq!(
            result.content[0].as_text().unwrap().text,
            "Error reading file: File '/nope.txt' does not exist"
        );
    }
}
