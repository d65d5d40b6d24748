//! Read-only file operations: listing, reading, line slices, metadata

use chrono::{DateTime, Local};
use mcp_local_common::{
    expand_home, format_file_size, is_text_file, mime_hint, resolve_path, McpLocalError, Result,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    /// Entry name
    pub name: String,
    /// Full path of the entry
    pub path: PathBuf,
    /// Whether the entry is a directory
    pub is_dir: bool,
    /// Size in bytes, for files only
    pub size: Option<u64>,
}

impl DirectoryEntry {
    /// `N bytes` style size, or `None` for directories
    pub fn formatted_size(&self) -> Option<String> {
        self.size.map(format_file_size)
    }
}

/// Metadata reported by [`file_info`]
#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    /// Resolved absolute path
    pub path: PathBuf,
    /// Final path component
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Regular file
    pub is_file: bool,
    /// Directory
    pub is_dir: bool,
    /// The path as given is a symbolic link
    pub is_symlink: bool,
    /// Last modification time
    pub modified: DateTime<Local>,
    /// Creation time, or the modification time where the platform has none
    pub created: DateTime<Local>,
    /// Octal mode bits on Unix, `r-`/`rw` elsewhere
    pub permissions: String,
    /// Extension including the leading dot
    pub extension: Option<String>,
    /// Parent directory
    pub parent: Option<PathBuf>,
    /// Text versus binary classification
    pub is_text: bool,
    /// MIME type guessed from the extension
    pub mime: Option<String>,
}

impl FileInfo {
    /// `File`, `Directory`, or `Other`
    pub fn kind_label(&self) -> &'static str {
        if self.is_file {
            "File"
        } else if self.is_dir {
            "Directory"
        } else {
            "Other"
        }
    }
}

/// A 1-based inclusive slice of a file's lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLines {
    /// Resolved path of the file
    pub path: PathBuf,
    /// First line of the slice
    pub start_line: usize,
    /// Last line of the slice
    pub end_line: usize,
    /// Number of lines in the file
    pub total_lines: usize,
    /// The lines without terminators
    pub lines: Vec<String>,
}

impl FileLines {
    /// Lines prefixed with right-aligned line numbers
    pub fn numbered(&self) -> String {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{:4}: {line}", self.start_line + i))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Read a file as UTF-8 text, enforcing the size limit
pub fn read_text(path: &Path, max_file_size: u64) -> Result<String> {
    let metadata = fs::metadata(path).map_err(|e| McpLocalError::from_io(path, e))?;
    if metadata.is_dir() {
        return Err(McpLocalError::invalid_path(path, "is a directory, not a file"));
    }
    if metadata.len() > max_file_size {
        return Err(McpLocalError::TooLarge {
            path: path.display().to_string(),
            size: format_file_size(metadata.len()),
            limit: format_file_size(max_file_size),
        });
    }
    let bytes = fs::read(path).map_err(|e| McpLocalError::from_io(path, e))?;
    String::from_utf8(bytes).map_err(|_| {
        McpLocalError::access_denied(
            path,
            format!("Cannot decode file '{}' as text", path.display()),
        )
    })
}

/// List a directory: directories first, then files, each in case-insensitive name order
pub fn list_directory(directory: &str, show_hidden: bool) -> Result<(PathBuf, Vec<DirectoryEntry>)> {
    let dir = resolve_path(directory)?;
    if !dir.exists() {
        return Err(McpLocalError::not_found(&dir));
    }
    if !dir.is_dir() {
        return Err(McpLocalError::invalid_path(&dir, "is not a directory"));
    }

    let read_dir = fs::read_dir(&dir).map_err(|e| McpLocalError::from_io(&dir, e))?;
    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {e}", dir.display());
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        if !show_hidden && name.starts_with('.') {
            continue;
        }
        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Skipping {}: {e}", entry.path().display());
                continue;
            }
        };
        entries.push(DirectoryEntry {
            name,
            path: entry.path(),
            is_dir: metadata.is_dir(),
            size: metadata.is_file().then(|| metadata.len()),
        });
    }

    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    debug!(dir = %dir.display(), count = entries.len(), "Listed directory");
    Ok((dir, entries))
}

/// Read a whole file, returning its resolved path and content
pub fn read_file(file_path: &str, max_file_size: u64) -> Result<(PathBuf, String)> {
    let path = resolve_path(file_path)?;
    let content = read_text(&path, max_file_size)?;
    Ok((path, content))
}

/// Read lines `start_line..=end_line`; `end_line` defaults to the last line
pub fn file_lines(
    file_path: &str,
    start_line: usize,
    end_line: Option<usize>,
    max_file_size: u64,
) -> Result<FileLines> {
    if start_line == 0 {
        return Err(McpLocalError::validation("Line numbers start at 1"));
    }
    if let Some(end) = end_line {
        if end < start_line {
            return Err(McpLocalError::validation(format!(
                "End line {end} is before start line {start_line}"
            )));
        }
    }

    let (path, content) = read_file(file_path, max_file_size)?;
    let all: Vec<&str> = content.lines().collect();
    let total_lines = all.len();
    if start_line > total_lines {
        return Err(McpLocalError::validation(format!(
            "Start line {start_line} exceeds file length ({total_lines} lines)"
        )));
    }
    let end = end_line.unwrap_or(total_lines).min(total_lines);

    Ok(FileLines {
        path,
        start_line,
        end_line: end,
        total_lines,
        lines: all[start_line - 1..end]
            .iter()
            .map(|line| line.to_string())
            .collect(),
    })
}

/// Collect metadata for a file or directory
pub fn file_info(file_path: &str) -> Result<FileInfo> {
    let path = resolve_path(file_path)?;
    let metadata = fs::metadata(&path).map_err(|e| McpLocalError::from_io(&path, e))?;
    let is_symlink = expand_home(file_path)
        .ok()
        .and_then(|given| fs::symlink_metadata(given).ok())
        .is_some_and(|m| m.file_type().is_symlink());

    let modified = metadata
        .modified()
        .map(DateTime::<Local>::from)
        .map_err(|e| McpLocalError::from_io(&path, e))?;
    let created = metadata
        .created()
        .map(DateTime::<Local>::from)
        .unwrap_or(modified);

    Ok(FileInfo {
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        size: metadata.len(),
        is_file: metadata.is_file(),
        is_dir: metadata.is_dir(),
        is_symlink,
        modified,
        created,
        permissions: permission_string(&metadata),
        extension: path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy())),
        parent: path.parent().map(Path::to_path_buf),
        is_text: metadata.is_file() && is_text_file(&path),
        mime: mime_hint(&path),
        path,
    })
}

#[cfg(unix)]
fn permission_string(metadata: &fs::Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;
    format!("{:03o}", metadata.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn permission_string(metadata: &fs::Metadata) -> String {
    if metadata.permissions().readonly() {
        "r-".to_string()
    } else {
        "rw".to_string()
    }
}
