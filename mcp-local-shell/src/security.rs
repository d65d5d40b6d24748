//! Command denylists and validation
//!
//! Commands are checked against two lists. Entries of the first list are
//! forbidden outright; the second holds shell operators and dangerous
//! utilities. Every entry matches as a substring of the lowercased command,
//! so `rmdir` is caught by `rm` and `find . -delete` by `del`. The price is
//! false positives: `date` and `cat` both contain `at`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Maximum allowed command length in characters
const MAX_COMMAND_LENGTH: usize = 4096;

/// Errors raised while validating or running a command
#[derive(Debug, Error)]
pub enum CommandError {
    /// Command matches the forbidden list
    #[error("Command not allowed for security reasons")]
    NotAllowed {
        /// The forbidden word that matched
        pattern: String,
    },

    /// Command uses a dangerous operator or utility
    #[error("Command contains potentially dangerous operations")]
    DangerousOperation {
        /// The operator or utility that matched
        pattern: String,
    },

    /// Command is empty or whitespace
    #[error("Command cannot be empty")]
    EmptyCommand,

    /// Command exceeds maximum allowed length
    #[error("Command too long: {length} characters exceeds limit of {limit}")]
    CommandTooLong {
        /// Actual command length
        length: usize,
        /// Maximum allowed length
        limit: usize,
    },

    /// Working directory is missing or not a directory
    #[error("Invalid working directory: {directory} - {reason}")]
    InvalidWorkingDirectory {
        /// Directory path
        directory: PathBuf,
        /// Reason for invalidity
        reason: String,
    },

    /// A policy entry is empty and would match every command
    #[error("Invalid command policy: {message}")]
    InvalidPolicy {
        /// Description of the bad entry
        message: String,
    },

    /// The shell could not be started
    #[error("Failed to spawn command '{command}': {source}")]
    Spawn {
        /// The command that failed to start
        command: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Waiting for the process failed
    #[error("Command '{command}' execution failed: {message}")]
    Execution {
        /// The command that failed
        command: String,
        /// Error message describing the failure
        message: String,
    },

    /// The command ran past the time limit and was killed
    #[error("Command timed out ({seconds}s limit)")]
    Timeout {
        /// The command that timed out
        command: String,
        /// Time limit in seconds
        seconds: u64,
    },
}

/// Command policy configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandPolicy {
    /// Words that make a command forbidden outright
    pub blocked_commands: Vec<String>,

    /// Shell operators that are refused anywhere in a command
    pub dangerous_operators: Vec<String>,

    /// Utilities that are refused anywhere in a command
    pub dangerous_commands: Vec<String>,

    /// Maximum allowed command length
    pub max_command_length: usize,
}

impl Default for CommandPolicy {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            blocked_commands: strings(&["rm", "del", "format", "sudo", "su", "passwd"]),
            dangerous_operators: strings(&[">>", ">", "&&", "||", "|", "&", ";"]),
            dangerous_commands: strings(&[
                // File permissions
                "chmod", "chown", "mount", "umount",
                // Process killing
                "kill", "killall", "pkill",
                // System control
                "shutdown", "reboot", "halt",
                // Disk operations
                "dd", "fdisk", "mkfs",
                // Job scheduling
                "crontab", "at",
                // Network tools
                "wget", "curl", "nc", "netcat",
            ]),
            max_command_length: MAX_COMMAND_LENGTH,
        }
    }
}

impl CommandPolicy {
    /// Default policy with a different length limit
    pub fn with_max_command_length(max_command_length: usize) -> Self {
        Self {
            max_command_length,
            ..Self::default()
        }
    }
}

/// Validator that applies a [`CommandPolicy`]
#[derive(Debug, Clone)]
pub struct CommandValidator {
    policy: CommandPolicy,
    blocked: Vec<String>,
    dangerous: Vec<String>,
}

impl CommandValidator {
    /// Create a new validator with the given policy
    pub fn new(policy: CommandPolicy) -> Result<Self, CommandError> {
        let blocked = lowercase_entries(&policy.blocked_commands)?;
        let dangerous = lowercase_entries(
            policy
                .dangerous_operators
                .iter()
                .chain(&policy.dangerous_commands),
        )?;
        Ok(Self {
            policy,
            blocked,
            dangerous,
        })
    }

    /// Create a validator with default policy
    pub fn with_default_policy() -> Result<Self, CommandError> {
        Self::new(CommandPolicy::default())
    }

    /// Validate a command against the policy
    pub fn validate_command(&self, command: &str) -> Result<(), CommandError> {
        if command.trim().is_empty() {
            return Err(CommandError::EmptyCommand);
        }

        let length = command.chars().count();
        if length > self.policy.max_command_length {
            return Err(CommandError::CommandTooLong {
                length,
                limit: self.policy.max_command_length,
            });
        }

        let lowered = command.to_lowercase();

        if let Some(word) = self.blocked.iter().find(|w| lowered.contains(w.as_str())) {
            warn!(command, pattern = %word, "Blocked forbidden command");
            return Err(CommandError::NotAllowed {
                pattern: word.clone(),
            });
        }

        if let Some(word) = self.dangerous.iter().find(|w| lowered.contains(w.as_str())) {
            warn!(command, pattern = %word, "Blocked dangerous operation");
            return Err(CommandError::DangerousOperation {
                pattern: word.clone(),
            });
        }

        Ok(())
    }

    /// Require the working directory to exist and be a directory
    pub fn validate_working_directory(&self, directory: &Path) -> Result<(), CommandError> {
        if !directory.exists() {
            return Err(CommandError::InvalidWorkingDirectory {
                directory: directory.to_path_buf(),
                reason: "does not exist".to_string(),
            });
        }
        if !directory.is_dir() {
            return Err(CommandError::InvalidWorkingDirectory {
                directory: directory.to_path_buf(),
                reason: "is not a directory".to_string(),
            });
        }
        Ok(())
    }
}

/// Lowercase every entry, refusing empty ones
fn lowercase_entries<'a>(
    entries: impl IntoIterator<Item = &'a String>,
) -> Result<Vec<String>, CommandError> {
    entries
        .into_iter()
        .map(|entry| {
            if entry.is_empty() {
                Err(CommandError::InvalidPolicy {
                    message: "policy entries cannot be empty".to_string(),
                })
            } else {
                Ok(entry.to_lowercase())
            }
        })
        .collect()
}
