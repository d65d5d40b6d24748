//! MCP server exposing the local file, search, and system tools

use rmcp::model::{
    CallToolRequestParams, CallToolResult, ListToolsResult, PaginatedRequestParams,
    ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use serde_json::Value;
use std::sync::Arc;

use mcp_local_config::Settings;
use mcp_local_shell::CommandError;

use super::tool_registry::{create_tool_registry, McpTool, ToolContext, ToolRegistry};

/// Server instructions displayed to MCP clients
const SERVER_INSTRUCTIONS: &str = "Local file management, search, and system inspection. \
Every edit backs the file up first; use list_backups and restore_backup to undo. \
Line numbers are 1-based and ranges are inclusive.";

/// MCP server over a fixed tool registry and one shared tool context
#[derive(Clone)]
pub struct McpServer {
    registry: Arc<ToolRegistry>,
    context: ToolContext,
}

impl McpServer {
    /// Create a server with every tool registered
    pub fn new(settings: Settings) -> std::result::Result<Self, CommandError> {
        Ok(Self::with_registry(
            create_tool_registry(),
            ToolContext::new(settings)?,
        ))
    }

    /// Create a server over an explicit registry and context
    pub fn with_registry(registry: ToolRegistry, context: ToolContext) -> Self {
        tracing::debug!(tools = registry.len(), "Created MCP server");
        Self {
            registry: Arc::new(registry),
            context,
        }
    }

    /// The tool registry
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// The shared tool context
    pub fn context(&self) -> &ToolContext {
        &self.context
    }

    /// Execute a tool by name, outside of an MCP session
    pub async fn execute_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> std::result::Result<CallToolResult, McpError> {
        let tool = self.lookup(name)?;
        let arguments = match arguments {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        Self::execute_tool_with_logging(tool, name, arguments, &self.context).await
    }

    fn lookup(&self, name: &str) -> std::result::Result<&dyn McpTool, McpError> {
        self.registry.get_tool(name).ok_or_else(|| {
            tracing::error!("Unknown tool requested: {}", name);
            McpError::invalid_request(format!("Unknown tool: {}", name), None)
        })
    }

    async fn execute_tool_with_logging(
        tool: &dyn McpTool,
        name: &str,
        arguments: serde_json::Map<String, Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        tracing::info!("Executing tool: {}", name);
        let result = tool.execute(arguments, context).await;
        match &result {
            Ok(output) if output.is_error == Some(true) => {
                tracing::debug!("Tool {} reported an error", name)
            }
            Ok(_) => tracing::debug!("Tool {} completed", name),
            Err(e) => tracing::warn!("Tool {} rejected the request: {}", name, e.message),
        }
        result
    }
}

impl ServerHandler for McpServer {
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.registry.list_tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        tracing::debug!(
            "call_tool() invoked for tool: {}, arguments: {:?}",
            request.name,
            request.arguments
        );

        let tool = self.lookup(&request.name)?;
        let arguments = request.arguments.unwrap_or_default();
        Self::execute_tool_with_logging(tool, &request.name, arguments, &self.context).await
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_instructions(SERVER_INSTRUCTIONS)
    }
}
