use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Verbosity of the stderr log
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive understood by `EnvFilter`
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "mcp-local")]
#[command(version)]
#[command(about = "An MCP server for safe local file editing, search, and system inspection")]
#[command(long_about = "
mcp-local is an MCP (Model Context Protocol) server that lets an assistant
read, edit, and search local files. Every edit backs the file up first, so
changes can be diffed and undone.

Settings are read from ~/.config/mcp-local/config.toml, ./.mcp-local.toml,
an explicit --config file, and MCP_* environment variables, in that order.

Example usage:
  mcp-local serve                          # Serve over stdio (default)
  mcp-local --backup-dir /tmp/bk serve     # Keep backups elsewhere
  mcp-local tools                          # List the available tools
  mcp-local config                         # Show the effective settings
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Additional configuration file (toml, yaml, or json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level written to stderr; RUST_LOG takes precedence
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Directory for file backups
    #[arg(long, global = true)]
    pub backup_dir: Option<PathBuf>,

    /// Number of edits kept in the edit history
    #[arg(long, global = true)]
    pub max_history: Option<usize>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Serve the tools over stdio until the client disconnects (default)
    Serve,
    /// List every tool with a one-line summary
    Tools,
    /// Print the effective settings as TOML
    Config,
}

impl Cli {
    /// The requested command, `serve` when none is given
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let cli = Cli::try_parse_from(["mcp-local"]).unwrap();
        assert_eq!(cli.command(), Commands::Serve);
        assert_eq!(cli.log_level, LogLevel::Info);
        assert!(cli.backup_dir.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "mcp-local",
            "config",
            "--backup-dir",
            "/tmp/backups",
            "--max-history",
            "5",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.command(), Commands::Config);
        assert_eq!(cli.backup_dir, Some(PathBuf::from("/tmp/backups")));
        assert_eq!(cli.max_history, Some(5));
        assert_eq!(cli.log_level.as_directive(), "debug");
    }

    #[test]
    fn test_rejects_unknown_level() {
        assert!(Cli::try_parse_from(["mcp-local", "--log-level", "loud"]).is_err());
    }
}
