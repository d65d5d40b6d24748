//! # mcp-local files
//!
//! The file mutation engine and its supporting stores:
//!
//! - [`BackupStore`]: timestamped copies taken before every mutation
//! - [`EditHistoryLog`]: capacity-bounded, in-memory record of edits
//! - [`FileEditor`]: line-indexed replace/insert/delete, find-and-replace, diffs
//! - [`ops`]: read-only listing, reading, and inspection of files
//!
//! ```rust,no_run
//! use mcp_local_files::{BackupStore, FileEditor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut editor = FileEditor::new(BackupStore::new("/tmp/backups"), 100, 1024 * 1024);
//! let outcome = editor.edit_lines("notes.txt", 2, "replacement line", None)?;
//! println!("edited lines {}-{}", outcome.start_line, outcome.end_line);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod backup;
pub mod editor;
pub mod history;
pub mod lines;
pub mod ops;

pub use backup::{BackupEntry, BackupStore};
pub use editor::{
    FileDiff, FileEditor, InsertOutcome, LineRangeOutcome, ReplaceOutcome, RestoreOutcome,
    WriteOutcome,
};
pub use history::{
    EditAction, EditDetails, EditHistoryLog, EditRecord, HistoryExport, HistoryStats,
};
pub use ops::{
    file_info, file_lines, list_directory, read_file, read_text, DirectoryEntry, FileInfo, FileLines,
};
pub use lines::split_lines;
