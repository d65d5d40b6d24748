//! Process table tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;
use sysinfo::{ProcessesToUpdate, System, MINIMUM_CPU_UPDATE_INTERVAL};

const DEFAULT_LIMIT: usize = 10;

/// Tool for listing the busiest processes
#[derive(Default)]
pub struct GetRunningProcessesTool;

impl GetRunningProcessesTool {
    /// Creates a new instance of the GetRunningProcessesTool
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct GetRunningProcessesRequest {
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

/// One row of the process table
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRow {
    /// Process id
    pub pid: u32,
    /// Executable name
    pub name: String,
    /// CPU usage percent over the sampling interval
    pub cpu_percent: f32,
    /// Resident memory as a percent of total memory
    pub memory_percent: f64,
}

/// Sample every process and return the `limit` busiest by CPU
pub fn top_processes(limit: usize) -> Vec<ProcessRow> {
    let mut sys = System::new();
    sys.refresh_memory();
    sys.refresh_processes(ProcessesToUpdate::All, true);
    std::thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL);
    sys.refresh_processes(ProcessesToUpdate::All, true);

    let total_memory = sys.total_memory().max(1) as f64;
    let mut rows: Vec<ProcessRow> = sys
        .processes()
        .iter()
        .map(|(pid, process)| ProcessRow {
            pid: pid.as_u32(),
            name: process.name().to_string_lossy().into_owned(),
            cpu_percent: process.cpu_usage(),
            memory_percent: process.memory() as f64 / total_memory * 100.0,
        })
        .collect();
    rows.sort_by(|a, b| b.cpu_percent.total_cmp(&a.cpu_percent));
    rows.truncate(limit);
    rows
}

/// `PID NAME CPU% MEM%` table with names cut to 19 characters
pub fn render_table(limit: usize, rows: &[ProcessRow]) -> String {
    let mut output = format!("Top {limit} processes by CPU usage:\n\n");
    output.push_str(&format!(
        "{:<8} {:<20} {:<8} {:<8}\n",
        "PID", "NAME", "CPU%", "MEM%"
    ));
    output.push_str(&"-".repeat(50));
    output.push('\n');
    for row in rows {
        let name: String = row.name.chars().take(19).collect();
        output.push_str(&format!(
            "{:<8} {:<20} {:<8.1} {:<8.1}\n",
            row.pid, name, row.cpu_percent, row.memory_percent
        ));
    }
    output
}

#[async_trait]
impl McpTool for GetRunningProcessesTool {
    fn name(&self) -> &'static str {
        "get_running_processes"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "limit": {
                    "type": "integer",
                    "description": "Number of processes to show",
                    "default": DEFAULT_LIMIT,
                    "minimum": 1
                }
            }
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        _context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetRunningProcessesRequest = BaseToolImpl::parse_arguments(arguments)?;
        let limit = request.limit;
        match tokio::task::spawn_blocking(move || top_processes(limit)).await {
            Ok(rows) => Ok(BaseToolImpl::create_success_response(render_table(
                limit, &rows,
            ))),
            Err(e) => Ok(BaseToolImpl::failure("Error getting process information", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{call, create_test_context, text_of};
    use serde_json::json;
    use serial_test::serial;

    #[test]
    fn test_render_table() {
        let rows = vec![ProcessRow {
            pid: 42,
            name: "a-very-long-process-name".to_string(),
            cpu_percent: 12.345,
            memory_percent: 0.5,
        }];
        let table = render_table(5, &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Top 5 processes by CPU usage:");
        assert_eq!(lines[2], "PID      NAME                 CPU%     MEM%    ");
        assert_eq!(lines[3], "-".repeat(50));
        assert_eq!(lines[4], "42       a-very-long-process  12.3     0.5     ");
    }

    #[tokio::test]
    #[serial]
    async fn test_limit_is_respected() {
        let context = create_test_context().await;
        let result = call(
            &GetRunningProcessesTool::new(),
            &context,
            json!({"limit": 3}),
        )
        .await;
        let text = text_of(&result);
        assert!(text.starts_with("Top 3 processes by CPU usage:"));
        // header, blank, column titles, rule
        let rows = text.lines().count() - 4;
        assert!((1..=3).contains(&rows));
    }
}
