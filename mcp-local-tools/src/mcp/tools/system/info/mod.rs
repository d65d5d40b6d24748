//! System information tool

use super::round2;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde_json::{json, Value};
use std::path::Path;
use sysinfo::{Disks, Networks, ProcessesToUpdate, System, MINIMUM_CPU_UPDATE_INTERVAL};

const GB: f64 = 1024.0 * 1024.0 * 1024.0;
const MB: f64 = 1024.0 * 1024.0;

/// Tool for reporting system information
#[derive(Default)]
pub struct GetSystemInfoTool;

impl GetSystemInfoTool {
    /// Creates a new instance of the GetSystemInfoTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetSystemInfoTool {
    fn name(&self) -> &'static str {
        "get_system_info"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(
        &self,
        _arguments: serde_json::Map<String, serde_json::Value>,
        _context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let info = match tokio::task::spawn_blocking(collect_system_info).await {
            Ok(info) => info,
            Err(e) => return Ok(BaseToolImpl::failure("Error getting system info", e)),
        };
        match serde_json::to_string_pretty(&info) {
            Ok(json) => Ok(BaseToolImpl::create_success_response(json)),
            Err(e) => Ok(BaseToolImpl::failure("Error getting system info", e)),
        }
    }
}

/// Collect every section, sampling CPU usage over the minimum update interval
pub fn collect_system_info() -> Value {
    let sys = refreshed_system();
    json!({
        "system": system_section(),
        "directories": directories_section(),
        "cpu": section(cpu_section(&sys)),
        "memory": section(memory_section(&sys)),
        "disk": section(disk_section()),
        "network": section(network_section()),
        "processes": section(processes_section(&sys)),
    })
}

/// CPU usage and frequency, memory, and processes, freshly sampled
fn refreshed_system() -> System {
    let mut sys = System::new();
    sys.refresh_cpu_usage();
    std::thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL);
    sys.refresh_cpu_usage();
    sys.refresh_cpu_frequency();
    sys.refresh_memory();
    sys.refresh_processes(ProcessesToUpdate::All, true);
    sys
}

fn section(result: Result<Value, String>) -> Value {
    result.unwrap_or_else(|error| json!({ "error": error }))
}

fn system_section() -> Value {
    let unknown = || "unknown".to_string();
    json!({
        "os": System::name().unwrap_or_else(unknown),
        "os_version": System::os_version().unwrap_or_else(unknown),
        "kernel": System::kernel_version().unwrap_or_else(unknown),
        "architecture": std::env::consts::ARCH,
        "hostname": System::host_name().unwrap_or_else(unknown),
    })
}

fn directories_section() -> Value {
    let display = |path: Option<&Path>| path.map(|p| p.display().to_string());
    json!({
        "current": display(std::env::current_dir().ok().as_deref()),
        "home": display(dirs::home_dir().as_deref()),
        "temp": std::env::temp_dir().display().to_string(),
    })
}

fn cpu_section(sys: &System) -> Result<Value, String> {
    let cpus = sys.cpus();
    let first = cpus
        .first()
        .ok_or_else(|| "Unable to get CPU information".to_string())?;
    Ok(json!({
        "count_logical": cpus.len(),
        "usage_percent": round2(f64::from(sys.global_cpu_usage())),
        "frequency_mhz": first.frequency(),
    }))
}

fn memory_section(sys: &System) -> Result<Value, String> {
    let total = sys.total_memory();
    if total == 0 {
        return Err("Unable to get memory information".to_string());
    }
    let used = sys.used_memory();
    Ok(json!({
        "total_gb": round2(total as f64 / GB),
        "available_gb": round2(sys.available_memory() as f64 / GB),
        "used_gb": round2(used as f64 / GB),
        "usage_percent": round2(used as f64 / total as f64 * 100.0),
    }))
}

fn disk_section() -> Result<Value, String> {
    let disks = Disks::new_with_refreshed_list();
    let disk = disks
        .list()
        .iter()
        .find(|disk| disk.mount_point() == Path::new("/"))
        .or_else(|| disks.list().first())
        .ok_or_else(|| "Unable to get disk information".to_string())?;

    let total = disk.total_space();
    if total == 0 {
        return Err("Unable to get disk information".to_string());
    }
    let free = disk.available_space();
    let used = total.saturating_sub(free);
    Ok(json!({
        "mount_point": disk.mount_point().display().to_string(),
        "total_gb": round2(total as f64 / GB),
        "used_gb": round2(used as f64 / GB),
        "free_gb": round2(free as f64 / GB),
        "usage_percent": round2(used as f64 / total as f64 * 100.0),
    }))
}

fn network_section() -> Result<Value, String> {
    let networks = Networks::new_with_refreshed_list();
    let mut interfaces: Vec<&String> = networks.list().keys().collect();
    interfaces.sort();
    Ok(json!({
        "interfaces": interfaces,
        "interface_count": interfaces.len(),
    }))
}

fn processes_section(sys: &System) -> Result<Value, String> {
    let pid = sysinfo::get_current_pid().map_err(|e| format!("Unable to get process information: {e}"))?;
    let current = sys
        .process(pid)
        .ok_or_else(|| "Unable to get process information".to_string())?;
    Ok(json!({
        "count": sys.processes().len(),
        "current_process": {
            "pid": pid.as_u32(),
            "name": current.name().to_string_lossy(),
            "memory_mb": round2(current.memory() as f64 / MB),
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{call, create_test_context, text_of};
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_reports_every_section() {
        let context = create_test_context().await;
        let result = call(&GetSystemInfoTool::new(), &context, json!({})).await;
        let info: Value = serde_json::from_str(&text_of(&result)).unwrap();

        for key in [
            "system",
            "directories",
            "cpu",
            "memory",
            "disk",
            "network",
            "processes",
        ] {
            assert!(info[key].is_object(), "missing section {key}");
        }
        assert_eq!(info["system"]["architecture"], std::env::consts::ARCH);
        assert!(info["directories"]["temp"].is_string());
    }

    #[test]
    #[serial]
    fn test_current_process_is_reported() {
        let info = collect_system_info();
        let pid = info["processes"]["current_process"]["pid"].as_u64();
        assert_eq!(pid, Some(u64::from(std::process::id())));
    }

    #[test]
    #[serial]
    fn test_cpu_frequency_is_sampled() {
        let mut reference = System::new();
        reference.refresh_cpu_frequency();
        let available = reference.cpus().first().map_or(0, |cpu| cpu.frequency());

        let info = collect_system_info();
        let reported = info["cpu"]["frequency_mhz"].as_u64().unwrap_or(0);
        // hosts without frequency data report 0 either way
        if available > 0 {
            assert!(reported > 0);
        }
    }

    #[test]
    fn test_section_error_fallback() {
        let value = section(Err("Unable to get disk information".to_string()));
        assert_eq!(value, json!({"error": "Unable to get disk information"}));
    }
}
