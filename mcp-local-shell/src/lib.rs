//! # mcp-local shell
//!
//! Gatekeeping and execution for the `run_command` tool.
//!
//! ## Features
//!
//! - **Command policy**: two denylists, one of outright forbidden commands and
//!   one of dangerous operators and utilities, plus a length limit
//! - **Validation**: every command is checked before anything is spawned
//! - **Timed execution**: commands run through the platform shell and are
//!   killed when they exceed the configured wall-clock limit
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mcp_local_shell::{CommandPolicy, CommandRunner};
//! use std::time::Duration;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let runner = CommandRunner::new(CommandPolicy::default(), Duration::from_secs(30))?;
//! let output = runner.run("ls -la", None).await?;
//! println!("{}", output.render());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Command policy and validation
pub mod security;

/// Timed command execution
pub mod execute;

pub use execute::{CommandOutput, CommandRunner};
pub use security::{CommandError, CommandPolicy, CommandValidator};
