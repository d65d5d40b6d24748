//! MCP server, tool registry, and tool implementations

pub mod server;
pub mod tool_registry;
pub mod tools;

pub use server::McpServer;
pub use tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};
