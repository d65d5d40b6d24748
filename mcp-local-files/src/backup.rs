//! Timestamped backups taken before every mutation
//!
//! A backup of `notes.txt` taken at 14:03:07 on 2024-05-01 is stored as
//! `notes.txt_20240501_140307.backup` in the backup directory. Timestamps have
//! one-second granularity, so two backups of the same file within the same
//! second share a name and the later copy replaces the earlier one.

use chrono::{DateTime, Local};
use filetime::FileTime;
use glob::{MatchOptions, Pattern};
use mcp_local_common::{McpLocalError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File extension carried by every backup
pub const BACKUP_EXTENSION: &str = "backup";

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// One backup file as reported by [`BackupStore::list_backups`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupEntry {
    /// Location of the backup file
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Modification time, which is the source file's modification time at capture
    pub modified: DateTime<Local>,
}

/// Directory of backup copies
#[derive(Debug, Clone)]
pub struct BackupStore {
    dir: PathBuf,
}

impl BackupStore {
    /// Create a store over `dir`; the directory is created on first backup
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The backup directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copy `source` into the store
    ///
    /// Returns `None` when the source does not exist. The copy keeps the
    /// source's access and modification times. Names have one-second
    /// resolution, so a second backup of the same file within that second
    /// overwrites the first.
    pub fn create_backup(&self, source: &Path) -> Result<Option<PathBuf>> {
        let metadata = match fs::metadata(source) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(McpLocalError::backup(format!(
                    "Failed to create backup of '{}': {e}",
                    source.display()
                )))
            }
        };
        if !metadata.is_file() {
            return Err(McpLocalError::backup(format!(
                "Failed to create backup: '{}' is not a file",
                source.display()
            )));
        }

        fs::create_dir_all(&self.dir).map_err(|e| {
            McpLocalError::backup(format!(
                "Failed to initialize backup directory '{}': {e}",
                self.dir.display()
            ))
        })?;

        let backup_path = self.backup_path_for(source);

        copy_with_times(source, &backup_path).map_err(|e| {
            McpLocalError::backup(format!(
                "Failed to create backup of '{}': {e}",
                source.display()
            ))
        })?;

        info!(
            source = %source.display(),
            backup = %backup_path.display(),
            "Created backup"
        );
        Ok(Some(backup_path))
    }

    /// Path a backup of `source` taken now would be written to
    pub fn backup_path_for(&self, source: &Path) -> PathBuf {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        self.dir
            .join(format!("{name}_{timestamp}.{BACKUP_EXTENSION}"))
    }

    /// Backups in the store, newest first
    ///
    /// With a file name filter only backups of that file are returned. Ties in
    /// modification time are broken by backup name, descending.
    pub fn list_backups(&self, file_name: Option<&str>) -> Result<Vec<BackupEntry>> {
        let pattern = backup_pattern(file_name)?;
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(McpLocalError::backup(format!(
                    "Failed to list backups in '{}': {e}",
                    self.dir.display()
                )))
            }
        };

        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };

        let mut entries: Vec<BackupEntry> = read_dir
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                pattern.matches_with(&entry.file_name().to_string_lossy(), options)
            })
            .filter_map(|entry| {
                let metadata = entry.metadata().ok()?;
                if !metadata.is_file() {
                    return None;
                }
                let modified = metadata.modified().ok()?;
                Some(BackupEntry {
                    path: entry.path(),
                    size: metadata.len(),
                    modified: DateTime::<Local>::from(modified),
                })
            })
            .collect();

        entries.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| b.path.file_name().cmp(&a.path.file_name()))
        });
        debug!(count = entries.len(), filter = ?file_name, "Listed backups");
        Ok(entries)
    }

    /// Most recent backup of the named file
    pub fn latest_backup(&self, file_name: &str) -> Result<Option<PathBuf>> {
        Ok(self
            .list_backups(Some(file_name))?
            .into_iter()
            .next()
            .map(|entry| entry.path))
    }

    /// Overwrite `target` with the backup's content and times
    pub fn restore(&self, backup: &Path, target: &Path) -> Result<()> {
        if !backup.is_file() {
            return Err(McpLocalError::backup(format!(
                "Backup file not found: {}",
                backup.display()
            )));
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                McpLocalError::backup(format!("Failed to restore backup: {e}"))
            })?;
        }
        copy_with_times(backup, target)
            .map_err(|e| McpLocalError::backup(format!("Failed to restore backup: {e}")))?;

        info!(
            backup = %backup.display(),
            target = %target.display(),
            "Restored backup"
        );
        Ok(())
    }

    /// Remove a backup
    ///
    /// Returns `false` when the file does not exist. Paths outside the backup
    /// directory, or without the `.backup` extension, are refused.
    pub fn delete(&self, backup: &Path) -> Result<bool> {
        if !self.contains(backup) {
            return Err(McpLocalError::validation(format!(
                "'{}' is not a backup in '{}'",
                backup.display(),
                self.dir.display()
            )));
        }
        if !backup.exists() {
            return Ok(false);
        }
        fs::remove_file(backup)
            .map_err(|e| McpLocalError::backup(format!("Failed to delete backup: {e}")))?;
        info!(backup = %backup.display(), "Deleted backup");
        Ok(true)
    }

    fn contains(&self, path: &Path) -> bool {
        let is_backup = path.extension().and_then(|e| e.to_str()) == Some(BACKUP_EXTENSION);
        let dir = self.dir.canonicalize().unwrap_or_else(|_| self.dir.clone());
        let parent = path
            .parent()
            .map(|p| p.canonicalize().unwrap_or_else(|_| p.to_path_buf()));
        is_backup && parent.as_deref() == Some(dir.as_path())
    }
}

fn backup_pattern(file_name: Option<&str>) -> Result<Pattern> {
    let source = match file_name {
        Some(name) => format!(
            "{}_{}_{}.{BACKUP_EXTENSION}",
            Pattern::escape(name),
            "[0-9]".repeat(8),
            "[0-9]".repeat(6)
        ),
        None => format!("*.{BACKUP_EXTENSION}"),
    };
    Pattern::new(&source).map_err(|e| McpLocalError::invalid_pattern(source.clone(), e))
}

fn copy_with_times(from: &Path, to: &Path) -> std::io::Result<()> {
    fs::copy(from, to)?;
    let metadata = fs::metadata(from)?;
    filetime::set_file_times(
        to,
        FileTime::from_last_access_time(&metadata),
        FileTime::from_last_modification_time(&metadata),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, BackupStore) {
        let temp = TempDir::new().unwrap();
        let store = BackupStore::new(temp.path().join("backups"));
        (temp, store)
    }

    fn set_mtime(path: &Path, secs: i64) {
        filetime::set_file_mtime(path, FileTime::from_unix_time(secs, 0)).unwrap();
    }

    #[test]
    fn test_create_backup_copies_content_and_mtime() {
        let (temp, store) = setup();
        let source = temp.path().join("notes.txt");
        fs::write(&source, "hello\n").unwrap();
        set_mtime(&source, 1_600_000_000);

        let backup = store.create_backup(&source).unwrap().unwrap();
        assert_eq!(fs::read(&backup).unwrap(), b"hello\n");
        let name = backup.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("notes.txt_"));
        assert!(name.ends_with(".backup"));
        // notes.txt_ + YYYYMMDD_HHMMSS + .backup
        assert_eq!(name.len(), "notes.txt_".len() + 15 + ".backup".len());

        let mtime = FileTime::from_last_modification_time(&fs::metadata(&backup).unwrap());
        assert_eq!(mtime.unix_seconds(), 1_600_000_000);
    }

    #[test]
    fn test_create_backup_of_missing_file_is_none() {
        let (temp, store) = setup();
        let result = store.create_backup(&temp.path().join("missing.txt")).unwrap();
        assert!(result.is_none());
        assert!(!store.dir().exists());
    }

    #[test]
    fn test_create_backup_of_directory_fails() {
        let (temp, store) = setup();
        let err = store.create_backup(temp.path()).unwrap_err();
        assert_eq!(err.kind(), mcp_local_common::ErrorKind::BackupFailure);
    }

    #[test]
    fn test_list_backups_newest_first_with_filter() {
        let (_temp, store) = setup();
        fs::create_dir_all(store.dir()).unwrap();
        let old = store.dir().join("a.txt_20240101_000000.backup");
        let new = store.dir().join("a.txt_20240102_000000.backup");
        let other = store.dir().join("b.txt_20240103_000000.backup");
        let similar_name = store.dir().join("a.txt.bak_20240103_000000.backup");
        for (path, secs) in [(&old, 100), (&new, 200), (&other, 300), (&similar_name, 400)] {
            fs::write(path, "x").unwrap();
            set_mtime(path, secs);
        }
        fs::write(store.dir().join("unrelated.txt"), "x").unwrap();

        let filtered: Vec<_> = store
            .list_backups(Some("a.txt"))
            .unwrap()
            .into_iter()
            .map(|e| e.path)
            .collect();
        assert_eq!(filtered, vec![new.clone(), old.clone()]);

        let all = store.list_backups(None).unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].path, similar_name);

        assert_eq!(store.latest_backup("a.txt").unwrap(), Some(new));
        assert_eq!(store.latest_backup("c.txt").unwrap(), None);
    }

    #[test]
    fn test_list_ties_broken_by_name_descending() {
        let (_temp, store) = setup();
        fs::create_dir_all(store.dir()).unwrap();
        let first = store.dir().join("f_20240101_000000.backup");
        let second = store.dir().join("f_20240101_000001.backup");
        for path in [&first, &second] {
            fs::write(path, "x").unwrap();
            set_mtime(path, 500);
        }
        let listed: Vec<_> = store
            .list_backups(Some("f"))
            .unwrap()
            .into_iter()
            .map(|e| e.path)
            .collect();
        assert_eq!(listed, vec![second, first]);
    }

    #[test]
    fn test_list_missing_directory_is_empty() {
        let (_temp, store) = setup();
        assert!(store.list_backups(None).unwrap().is_empty());
    }

    #[test]
    fn test_restore_to_other_path() {
        let (temp, store) = setup();
        let source = temp.path().join("src.txt");
        fs::write(&source, "original").unwrap();
        let backup = store.create_backup(&source).unwrap().unwrap();
        fs::write(&source, "changed").unwrap();

        let target = temp.path().join("nested").join("copy.txt");
        store.restore(&backup, &target).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "original");
    }

    #[test]
    fn test_restore_missing_backup_fails() {
        let (temp, store) = setup();
        let err = store
            .restore(&temp.path().join("nope.backup"), &temp.path().join("t"))
            .unwrap_err();
        assert_eq!(err.kind(), mcp_local_common::ErrorKind::BackupFailure);
        assert!(err.to_string().contains("Backup file not found"));
    }

    #[test]
    fn test_delete() {
        let (temp, store) = setup();
        let source = temp.path().join("d.txt");
        fs::write(&source, "x").unwrap();
        let backup = store.create_backup(&source).unwrap().unwrap();

        assert!(store.delete(&backup).unwrap());
        assert!(!backup.exists());
        assert!(!store.delete(&backup).unwrap());
    }

    #[test]
    fn test_delete_outside_store_is_refused() {
        let (temp, store) = setup();
        fs::create_dir_all(store.dir()).unwrap();
        let outside = temp.path().join("x.backup");
        fs::write(&outside, "x").unwrap();

        let err = store.delete(&outside).unwrap_err();
        assert_eq!(err.kind(), mcp_local_common::ErrorKind::ValidationFailure);
        assert!(outside.exists());

        let wrong_ext = store.dir().join("notes.txt");
        fs::write(&wrong_ext, "x").unwrap();
        assert!(store.delete(&wrong_ext).is_err());
    }
}
