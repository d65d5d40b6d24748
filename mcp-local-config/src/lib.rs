//! # mcp-local configuration
//!
//! Settings are layered with [figment]: built-in defaults, then the user and
//! project configuration files, then an explicit `--config` file, then
//! `MCP_`-prefixed environment variables.
//!
//! ```rust,no_run
//! use mcp_local_config::ConfigProvider;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = ConfigProvider::new().load()?;
//! println!("backups go to {}", settings.backup_dir.display());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod provider;
pub mod settings;

pub use error::{ConfigError, ConfigResult};
pub use provider::{ConfigFormat, ConfigProvider, ENV_PREFIX, PROJECT_CONFIG_FILE};
pub use settings::{
    default_backup_dir, Settings, DEFAULT_COMMAND_TIMEOUT_SECS, DEFAULT_MAX_COMMAND_LENGTH,
};
