use anyhow::Context;
use mcp_local_config::Settings;
use mcp_local_tools::McpServer;
use rmcp::{transport::stdio, ServiceExt};

/// Serve every tool over stdio until the client disconnects
pub async fn handle_serve(settings: Settings) -> anyhow::Result<()> {
    let backup_dir = settings.backup_dir.clone();
    let server = McpServer::new(settings).context("Failed to create MCP server")?;
    tracing::info!(
        tools = server.registry().len(),
        backup_dir = %backup_dir.display(),
        "Starting MCP server on stdio"
    );

    let service = server
        .serve(stdio())
        .await
        .context("Failed to start MCP server")?;
    let reason = service.waiting().await.context("MCP server task failed")?;
    tracing::info!("MCP server stopped: {:?}", reason);
    Ok(())
}
