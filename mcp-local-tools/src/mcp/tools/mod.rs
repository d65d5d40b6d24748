//! Tool implementations, one module per tool category
//!
//! Each tool lives in its own directory with a `mod.rs` holding the
//! [`McpTool`](crate::mcp::tool_registry::McpTool) implementation and a
//! `description.md` shown to clients in tool listings.

pub mod backups;
pub mod edit;
pub mod files;
pub mod history;
pub mod search;
pub mod system;
