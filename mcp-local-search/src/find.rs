//! File-name search

use glob::{MatchOptions, Pattern};
use mcp_local_common::{resolve_path, McpLocalError, Result};
use std::path::PathBuf;
use std::time::SystemTime;
use tracing::debug;
use walkdir::WalkDir;

/// A file found by [`find_files`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundFile {
    /// Full path of the file
    pub path: PathBuf,
    /// Size in bytes, 0 when metadata is unavailable
    pub size: u64,
    /// Modification time, the epoch when metadata is unavailable
    pub modified: SystemTime,
}

/// Find files whose name matches `pattern`, newest first
///
/// Hidden directories are not entered. Collection stops once `max_results`
/// files have been found, and only then are the results sorted.
pub fn find_files(pattern: &str, directory: &str, max_results: usize) -> Result<Vec<FoundFile>> {
    let name_glob =
        Pattern::new(pattern).map_err(|e| McpLocalError::invalid_pattern(pattern, e))?;
    let root = resolve_path(directory)?;
    if !root.is_dir() {
        return Err(McpLocalError::not_found(&root));
    }

    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    let mut found = Vec::new();
    let walker = WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !entry.file_name().to_string_lossy().starts_with('.')
        })
        .filter_map(|entry| entry.ok());

    for entry in walker {
        if found.len() >= max_results {
            break;
        }
        if entry.file_type().is_dir() {
            continue;
        }
        if !name_glob.matches_with(&entry.file_name().to_string_lossy(), options) {
            continue;
        }
        let (size, modified) = entry
            .metadata()
            .ok()
            .map(|m| (m.len(), m.modified().unwrap_or(SystemTime::UNIX_EPOCH)))
            .unwrap_or((0, SystemTime::UNIX_EPOCH));
        found.push(FoundFile {
            path: entry.into_path(),
            size,
            modified,
        });
    }

    found.sort_by(|a, b| b.modified.cmp(&a.modified));
    debug!(pattern, root = %root.display(), count = found.len(), "Found files");
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::FileTime;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn touch(path: &Path, secs: i64) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "data").unwrap();
        filetime::set_file_mtime(path, FileTime::from_unix_time(secs, 0)).unwrap();
    }

    #[test]
    fn test_newest_first_and_hidden_dirs_skipped() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("old.rs"), 1_000);
        touch(&temp.path().join("src").join("new.rs"), 2_000);
        touch(&temp.path().join(".git").join("hook.rs"), 3_000);
        touch(&temp.path().join("readme.md"), 4_000);

        let found = find_files("*.rs", temp.path().to_str().unwrap(), 50).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["new.rs", "old.rs"]);
        assert_eq!(found[0].size, 4);
    }

    #[test]
    fn test_stops_at_max_results() {
        let temp = TempDir::new().unwrap();
        for i in 0..5 {
            touch(&temp.path().join(format!("f{i}.txt")), 1_000 + i);
        }
        let found = find_files("*.txt", temp.path().to_str().unwrap(), 2).unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_errors() {
        let temp = TempDir::new().unwrap();
        assert!(find_files("[", temp.path().to_str().unwrap(), 5).is_err());
        let missing = temp.path().join("missing");
        let err = find_files("*", missing.to_str().unwrap(), 5).unwrap_err();
        assert_eq!(err.kind(), mcp_local_common::ErrorKind::NotFound);
    }
}
