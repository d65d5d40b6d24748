use crate::security::{CommandError, CommandPolicy, CommandValidator};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Captured result of a finished command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    /// The command as given
    pub command: String,
    /// Exit code, or -1 when the process was ended by a signal
    pub exit_code: i32,
    /// Standard output, lossily decoded
    pub stdout: String,
    /// Standard error, lossily decoded
    pub stderr: String,
    /// Wall-clock duration
    pub execution_time_ms: u64,
    /// Directory the command ran in
    pub working_directory: PathBuf,
}

impl CommandOutput {
    /// `Command:`/`Exit code:` header followed by the non-empty streams
    pub fn render(&self) -> String {
        let mut out = format!("Command: {}\nExit code: {}\n", self.command, self.exit_code);
        if !self.stdout.is_empty() {
            out.push_str(&format!("Output:\n{}\n", self.stdout));
        }
        if !self.stderr.is_empty() {
            out.push_str(&format!("Error:\n{}\n", self.stderr));
        }
        out
    }
}

/// Validates and runs commands through the platform shell
#[derive(Debug, Clone)]
pub struct CommandRunner {
    validator: CommandValidator,
    timeout: Duration,
}

impl CommandRunner {
    /// Create a runner over `policy` that kills commands after `timeout`
    pub fn new(policy: CommandPolicy, timeout: Duration) -> Result<Self, CommandError> {
        Ok(Self {
            validator: CommandValidator::new(policy)?,
            timeout,
        })
    }

    /// Validate and run `command`, in `working_directory` or the current directory
    pub async fn run(
        &self,
        command: &str,
        working_directory: Option<&Path>,
    ) -> Result<CommandOutput, CommandError> {
        self.validator.validate_command(command)?;

        let work_dir = match working_directory {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir().map_err(|e| CommandError::InvalidWorkingDirectory {
                directory: PathBuf::from("."),
                reason: e.to_string(),
            })?,
        };
        self.validator.validate_working_directory(&work_dir)?;

        let (program, args) = if cfg!(target_os = "windows") {
            ("cmd", ["/C", command])
        } else {
            ("sh", ["-c", command])
        };

        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(&work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(
            "Executing command: '{}' in directory: {} with timeout: {}s",
            command,
            work_dir.display(),
            self.timeout.as_secs()
        );

        let start_time = Instant::now();
        let child = cmd.spawn().map_err(|e| CommandError::Spawn {
            command: command.to_string(),
            source: e,
        })?;

        // dropping the wait future on timeout drops the child, which kills it
        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| CommandError::Execution {
                command: command.to_string(),
                message: format!("Failed to wait for process: {e}"),
            })?,
            Err(_) => {
                warn!(
                    "Command '{}' timed out after {}s",
                    command,
                    self.timeout.as_secs()
                );
                return Err(CommandError::Timeout {
                    command: command.to_string(),
                    seconds: self.timeout.as_secs(),
                });
            }
        };

        let execution_time_ms = start_time.elapsed().as_millis() as u64;
        let exit_code = output.status.code().unwrap_or(-1);
        info!(
            command,
            exit_code, execution_time_ms, "Command completed"
        );

        Ok(CommandOutput {
            command: command.to_string(),
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            execution_time_ms,
            working_directory: work_dir,
        })
    }
}
