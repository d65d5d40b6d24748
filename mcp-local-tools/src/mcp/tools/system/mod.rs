//! Command execution and system inspection tools

pub mod command;
pub mod find;
pub mod info;
pub mod processes;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all command and system inspection tools with the registry
pub fn register_system_tools(registry: &mut ToolRegistry) {
    registry.register(command::RunCommandTool::new());
    registry.register(info::GetSystemInfoTool::new());
    registry.register(processes::GetRunningProcessesTool::new());
    registry.register(find::FindFilesTool::new());
}

/// Round to two decimal places for reporting
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
