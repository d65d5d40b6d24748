//! Effective server settings

use crate::error::{ConfigError, ConfigResult};
use mcp_local_common::constants::{
    BACKUP_DIR_NAME, DEFAULT_MAX_EDIT_HISTORY, DEFAULT_MAX_FILE_SIZE,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default wall-clock limit for `run_command`
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 30;

/// Default maximum command length in characters
pub const DEFAULT_MAX_COMMAND_LENGTH: usize = 4096;

/// Settings shared by every tool for the lifetime of the process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Largest file, in bytes, that read and edit operations will load
    pub max_file_size: u64,
    /// Capacity of the in-memory edit history
    pub max_edit_history: usize,
    /// Directory holding `{name}_{timestamp}.backup` files
    pub backup_dir: PathBuf,
    /// Seconds before a running command is killed
    pub command_timeout_secs: u64,
    /// Longest command string accepted by `run_command`
    pub max_command_length: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_edit_history: DEFAULT_MAX_EDIT_HISTORY,
            backup_dir: default_backup_dir(),
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
            max_command_length: DEFAULT_MAX_COMMAND_LENGTH,
        }
    }
}

impl Settings {
    /// Command timeout as a [`Duration`]
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    /// Reject values no tool can work with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_file_size == 0 {
            return Err(ConfigError::validation("max_file_size must be greater than 0"));
        }
        if self.max_edit_history == 0 {
            return Err(ConfigError::validation(
                "max_edit_history must be greater than 0",
            ));
        }
        if self.command_timeout_secs == 0 {
            return Err(ConfigError::validation(
                "command_timeout_secs must be greater than 0",
            ));
        }
        if self.max_command_length == 0 {
            return Err(ConfigError::validation(
                "max_command_length must be greater than 0",
            ));
        }
        if self.backup_dir.as_os_str().is_empty() {
            return Err(ConfigError::validation("backup_dir cannot be empty"));
        }
        Ok(())
    }

    /// Render the settings as TOML
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::RenderError {
            message: e.to_string(),
        })
    }
}

/// `~/.mcp_local_backups`, or a temp directory when no home is known
pub fn default_backup_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(BACKUP_DIR_NAME)
}
