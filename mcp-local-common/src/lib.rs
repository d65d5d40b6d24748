//! # mcp-local common
//!
//! Shared building blocks for the mcp-local crates:
//!
//! - [`error`]: the error enum, error kinds, and severity classification
//! - [`path`]: resolution of caller-supplied paths (`~`, relative, `..`)
//! - [`text`]: text versus binary classification
//! - [`exclude`]: glob exclusion over a path and all of its ancestors
//! - [`constants`]: default exclude set, file-type presets, size limits
//! - [`size`]: human readable byte counts

#![warn(missing_docs)]

pub mod constants;
pub mod error;
pub mod exclude;
pub mod path;
pub mod size;
pub mod text;

pub use constants::{
    file_type_group, DEFAULT_EXCLUDE_PATTERNS, DEFAULT_MAX_EDIT_HISTORY, DEFAULT_MAX_FILE_SIZE,
    FILE_TYPE_GROUPS,
};
pub use error::{ErrorKind, ErrorSeverity, McpLocalError, Result, Severity};
pub use exclude::ExcludeMatcher;
pub use path::{expand_home, relative_display, resolve_path};
pub use size::{format_file_size, format_file_size_short};
pub use text::{is_text_file, mime_hint};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
