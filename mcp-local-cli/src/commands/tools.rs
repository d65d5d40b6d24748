use mcp_local_tools::{create_tool_registry, ToolRegistry};

/// Print every tool name with the first line of its description
pub fn handle_tools() {
    print!("{}", render_tool_list(&create_tool_registry()));
}

fn render_tool_list(registry: &ToolRegistry) -> String {
    let width = registry
        .list_tool_names()
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0);
    registry
        .list_tool_names()
        .iter()
        .filter_map(|name| registry.get_tool(name))
        .map(|tool| {
            let summary = tool.description().lines().next().unwrap_or_default();
            format!("{:<width$}  {}\n", tool.name(), summary)
        })
        .collect()
}
