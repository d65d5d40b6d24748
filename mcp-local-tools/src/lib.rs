//! # mcp-local tools
//!
//! MCP (Model Context Protocol) server and tools that let a client manipulate
//! the local filesystem with a safety net.
//!
//! Every mutating tool backs the target file up before touching it and records
//! the change in an in-memory edit history, so any edit can be diffed and
//! undone. The tool surface covers:
//!
//! - File reading, writing, listing, and metadata
//! - Line-oriented editing (replace, insert, delete, find/replace) and diffs
//! - Backup listing, restore, and removal
//! - Edit history queries, statistics, and export
//! - Content search with include/exclude filtering and context lines
//! - Guarded shell command execution and system inspection
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mcp_local_config::ConfigProvider;
//! use mcp_local_tools::McpServer;
//! use rmcp::{transport::stdio, ServiceExt};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = ConfigProvider::new().load()?;
//! let server = McpServer::new(settings)?;
//! server.serve(stdio()).await?.waiting().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Model Context Protocol (MCP) server and tools
pub mod mcp;

/// Test utilities for building tool contexts
#[cfg(test)]
pub mod test_utils;

pub use mcp::server::McpServer;
pub use mcp::tool_registry::{
    create_tool_registry, BaseToolImpl, McpTool, ToolContext, ToolRegistry,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
