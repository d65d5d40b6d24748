use mcp_local_config::Settings;

/// Print the effective settings as TOML
pub fn handle_config(settings: &Settings) -> anyhow::Result<()> {
    print!("{}", settings.to_toml()?);
    Ok(())
}
