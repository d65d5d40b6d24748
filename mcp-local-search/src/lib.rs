//! # mcp-local search
//!
//! Read-only searches over a directory tree:
//!
//! - [`SearchEngine`]: literal or regex matching with case and whole-word
//!   options, include and exclude globs, context lines, and a hard result cap
//! - [`search_in_files`]: grep-style line search filtered by one file glob
//! - [`find_files`]: file-name search, newest first
//!
//! ```rust,no_run
//! use mcp_local_search::{SearchEngine, SearchOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = SearchOptions {
//!     whole_word: true,
//!     file_types: "code".to_string(),
//!     ..Default::default()
//! };
//! let results = SearchEngine::new("parse", options)?.search(".")?;
//! for (file, matches) in results.grouped_by_file() {
//!     println!("{file}: {} matches", matches.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod find;
pub mod options;
pub mod simple;

pub use engine::{ContextLine, SearchEngine, SearchMatch, SearchResults};
pub use find::{find_files, FoundFile};
pub use options::{split_list, SearchOptions};
pub use simple::{search_in_files, SimpleMatch, SimpleSearchResults, DEFAULT_DISPLAY_LIMIT};
