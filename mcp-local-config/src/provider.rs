//! Configuration provider using Figment

use crate::error::{ConfigError, ConfigResult};
use crate::settings::Settings;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Prefix of the environment variables read by the provider
pub const ENV_PREFIX: &str = "MCP_";

/// File name of the per-project configuration file
pub const PROJECT_CONFIG_FILE: &str = ".mcp-local.toml";

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (.toml extension)
    Toml,
    /// YAML format (.yaml or .yml extensions)
    Yaml,
    /// JSON format (.json extension)
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();
        match ext.as_str() {
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat { format: ext }),
        }
    }
}

/// Loads [`Settings`] from all sources
///
/// Sources are merged in precedence order (later sources override earlier ones):
/// 1. Default values
/// 2. User configuration file (`<config_dir>/mcp-local/config.toml`)
/// 3. Project configuration file (`./.mcp-local.toml`)
/// 4. An explicitly requested file
/// 5. Environment variables with the `MCP_` prefix
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    user_config: Option<PathBuf>,
    project_config: Option<PathBuf>,
    explicit_config: Option<PathBuf>,
}

impl ConfigProvider {
    /// Create a provider over the standard file locations
    pub fn new() -> Self {
        Self {
            user_config: dirs::config_dir().map(|dir| dir.join("mcp-local").join("config.toml")),
            project_config: Some(PathBuf::from(PROJECT_CONFIG_FILE)),
            explicit_config: None,
        }
    }

    /// Create a provider that ignores the standard file locations
    pub fn isolated() -> Self {
        Self {
            user_config: None,
            project_config: None,
            explicit_config: None,
        }
    }

    /// Add an explicitly requested configuration file
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_config = Some(path.into());
        self
    }

    /// Load and validate the effective settings
    pub fn load(&self) -> ConfigResult<Settings> {
        let settings: Settings = self.build_figment()?.extract()?;
        settings.validate()?;
        debug!(
            max_file_size = settings.max_file_size,
            max_edit_history = settings.max_edit_history,
            backup_dir = %settings.backup_dir.display(),
            "Loaded settings"
        );
        Ok(settings)
    }

    fn build_figment(&self) -> ConfigResult<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));

        for path in [&self.user_config, &self.project_config].into_iter().flatten() {
            trace!("Merging optional config file {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = &self.explicit_config {
            if !path.is_file() {
                return Err(ConfigError::FileNotFound { path: path.clone() });
            }
            debug!("Merging config file {}", path.display());
            figment = match ConfigFormat::from_path(path)? {
                ConfigFormat::Toml => figment.merge(Toml::file(path)),
                ConfigFormat::Yaml => figment.merge(Yaml::file(path)),
                ConfigFormat::Json => figment.merge(Json::file(path)),
            };
        }

        Ok(figment.merge(Self::env_provider()))
    }

    /// Environment variables, with the short historical names mapped onto settings keys
    fn env_provider() -> Env {
        Env::prefixed(ENV_PREFIX).map(|key| {
            let key = key.as_str().to_lowercase();
            let renamed = match key.as_str() {
                "max_history" => Some("max_edit_history"),
                "command_timeout" => Some("command_timeout_secs"),
                _ => None,
            };
            renamed.map(str::to_string).unwrap_or(key).into()
        })
    }
}

impl Default for ConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}
