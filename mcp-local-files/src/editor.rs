//! Line-indexed file editing
//!
//! Every mutation follows the same protocol:
//!
//! 1. validate the arguments that do not depend on file content
//! 2. resolve the path and require the file to exist
//! 3. back the file up
//! 4. read it, checking the size limit and UTF-8 decoding
//! 5. apply the edit and overwrite the file
//! 6. record the edit, with the backup path, in the history log
//!
//! The write in step 5 is a plain overwrite; only the backup protects
//! against a crash in the middle of it.

use crate::backup::BackupStore;
use crate::history::{EditDetails, EditHistoryLog};
use crate::lines::{display_lines, replacement_lines, split_lines};
use crate::ops::read_text;
use mcp_local_common::{resolve_path, McpLocalError, Result};
use regex::Regex;
use similar::TextDiff;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of [`FileEditor::write_file`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Resolved path that was written
    pub path: PathBuf,
    /// Characters written
    pub characters: usize,
    /// Backup of the previous content, if the file existed
    pub backup: Option<PathBuf>,
}

/// Result of [`FileEditor::edit_lines`] and [`FileEditor::delete_lines`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRangeOutcome {
    /// Resolved path of the edited file
    pub path: PathBuf,
    /// First affected line
    pub start_line: usize,
    /// Last affected line after clamping to the file length
    pub end_line: usize,
    /// Lines removed from the file
    pub removed: usize,
    /// Lines added to the file
    pub added: usize,
    /// Backup taken before the edit
    pub backup: Option<PathBuf>,
}

/// Result of [`FileEditor::insert_lines`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Resolved path of the edited file
    pub path: PathBuf,
    /// Requested insertion line
    pub line_number: usize,
    /// Lines inserted
    pub inserted: usize,
    /// Backup taken before the edit
    pub backup: Option<PathBuf>,
}

/// Result of [`FileEditor::replace_in_file`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOutcome {
    /// Resolved path of the edited file
    pub path: PathBuf,
    /// Matches in the content before substitution
    pub replacements: usize,
    /// Backup taken before the edit
    pub backup: Option<PathBuf>,
}

/// Result of [`FileEditor::restore_backup`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreOutcome {
    /// Backup that was restored
    pub backup: PathBuf,
    /// File that was overwritten
    pub target: PathBuf,
    /// Backup of the target's content before the restore
    pub previous: Option<PathBuf>,
}

/// Result of [`FileEditor::diff`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileDiff {
    /// Backup and current content are identical
    NoDifferences,
    /// Unified diff from backup to current content
    Changes {
        /// Resolved path of the file
        path: PathBuf,
        /// Backup compared against
        backup: PathBuf,
        /// Unified diff text
        diff: String,
    },
}

/// Applies edits to files, backing up and recording each one
#[derive(Debug)]
pub struct FileEditor {
    backups: BackupStore,
    history: EditHistoryLog,
    max_file_size: u64,
}

impl FileEditor {
    /// Create an editor with a history of `max_history` records
    pub fn new(backups: BackupStore, max_history: usize, max_file_size: u64) -> Self {
        Self {
            backups,
            history: EditHistoryLog::new(max_history),
            max_file_size,
        }
    }

    /// The backup store
    pub fn backups(&self) -> &BackupStore {
        &self.backups
    }

    /// The edit history
    pub fn history(&self) -> &EditHistoryLog {
        &self.history
    }

    /// Mutable access to the edit history
    pub fn history_mut(&mut self) -> &mut EditHistoryLog {
        &mut self.history
    }

    /// Replace the whole file, creating it and its parent directories if needed
    pub fn write_file(&mut self, file_path: &str, content: &str) -> Result<WriteOutcome> {
        let path = resolve_path(file_path)?;
        if path.is_dir() {
            return Err(McpLocalError::invalid_path(&path, "is a directory, not a file"));
        }
        let backup = self.backups.create_backup(&path)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| McpLocalError::from_io(parent, e))?;
        }
        fs::write(&path, content).map_err(|e| McpLocalError::from_io(&path, e))?;

        let characters = content.chars().count();
        info!(path = %path.display(), characters, "Wrote file");
        self.history.log(
            &path,
            EditDetails::Write {
                content_length: characters,
            },
            backup.clone(),
        );
        Ok(WriteOutcome {
            path,
            characters,
            backup,
        })
    }

    /// Replace lines `start_line..=end_line` with `new_content`
    ///
    /// `end_line` defaults to `start_line` and is clamped to the file length.
    pub fn edit_lines(
        &mut self,
        file_path: &str,
        start_line: usize,
        new_content: &str,
        end_line: Option<usize>,
    ) -> Result<LineRangeOutcome> {
        let end_line = checked_end(start_line, end_line)?;
        let (path, backup, mut lines) = self.prepare(file_path)?;
        let end = checked_range(start_line, end_line, lines.len())?;

        let new_lines = replacement_lines(new_content);
        let original: Vec<String> = lines
            .splice(start_line - 1..end, new_lines.iter().cloned())
            .collect();
        self.write_lines(&path, &lines)?;

        info!(path = %path.display(), start_line, end_line = end, "Edited lines");
        self.history.log(
            &path,
            EditDetails::EditLines {
                start_line,
                end_line: end,
                original_lines: display_lines(&original),
                new_lines: display_lines(&new_lines),
            },
            backup.clone(),
        );
        Ok(LineRangeOutcome {
            path,
            start_line,
            end_line: end,
            removed: original.len(),
            added: new_lines.len(),
            backup,
        })
    }

    /// Insert `content` before `line_number`
    ///
    /// Line numbers past the end insert at the end of the file.
    pub fn insert_lines(
        &mut self,
        file_path: &str,
        line_number: usize,
        content: &str,
    ) -> Result<InsertOutcome> {
        let (path, backup, mut lines) = self.prepare(file_path)?;

        let index = line_number.saturating_sub(1).min(lines.len());
        if index == lines.len() {
            if let Some(last) = lines.last_mut() {
                if !last.ends_with('\n') {
                    last.push('\n');
                }
            }
        }
        let new_lines = replacement_lines(content);
        lines.splice(index..index, new_lines.iter().cloned());
        self.write_lines(&path, &lines)?;

        info!(path = %path.display(), line_number, count = new_lines.len(), "Inserted lines");
        self.history.log(
            &path,
            EditDetails::InsertLines {
                line_number,
                inserted_lines: display_lines(&new_lines),
            },
            backup.clone(),
        );
        Ok(InsertOutcome {
            path,
            line_number,
            inserted: new_lines.len(),
            backup,
        })
    }

    /// Remove lines `start_line..=end_line`
    ///
    /// `end_line` defaults to `start_line` and is clamped to the file length.
    pub fn delete_lines(
        &mut self,
        file_path: &str,
        start_line: usize,
        end_line: Option<usize>,
    ) -> Result<LineRangeOutcome> {
        let end_line = checked_end(start_line, end_line)?;
        let (path, backup, mut lines) = self.prepare(file_path)?;
        let end = checked_range(start_line, end_line, lines.len())?;

        let deleted: Vec<String> = lines.drain(start_line - 1..end).collect();
        self.write_lines(&path, &lines)?;

        info!(path = %path.display(), start_line, end_line = end, "Deleted lines");
        self.history.log(
            &path,
            EditDetails::DeleteLines {
                start_line,
                end_line: end,
                deleted_lines: display_lines(&deleted),
            },
            backup.clone(),
        );
        Ok(LineRangeOutcome {
            path,
            start_line,
            end_line: end,
            removed: deleted.len(),
            added: 0,
            backup,
        })
    }

    /// Replace every occurrence of `search` with `replacement`
    ///
    /// With `use_regex`, `search` is a regular expression and `replacement`
    /// may refer to groups as `$1` or `${name}`. The reported count is the
    /// number of matches in the content before substitution.
    pub fn replace_in_file(
        &mut self,
        file_path: &str,
        search: &str,
        replacement: &str,
        use_regex: bool,
    ) -> Result<ReplaceOutcome> {
        if search.is_empty() {
            return Err(McpLocalError::validation("Search pattern cannot be empty"));
        }
        let regex = if use_regex {
            Some(Regex::new(search).map_err(|e| McpLocalError::invalid_pattern(search, e))?)
        } else {
            None
        };

        let (path, backup, lines) = self.prepare(file_path)?;
        let content = lines.concat();
        let (replaced, replacements) = match &regex {
            Some(regex) => (
                regex.replace_all(&content, replacement).into_owned(),
                regex.find_iter(&content).count(),
            ),
            None => (
                content.replace(search, replacement),
                content.matches(search).count(),
            ),
        };
        fs::write(&path, replaced).map_err(|e| McpLocalError::from_io(&path, e))?;

        info!(path = %path.display(), replacements, use_regex, "Replaced in file");
        self.history.log(
            &path,
            EditDetails::ReplaceInFile {
                search_pattern: search.to_string(),
                replace_with: replacement.to_string(),
                use_regex,
                replacements_made: replacements,
            },
            backup.clone(),
        );
        Ok(ReplaceOutcome {
            path,
            replacements,
            backup,
        })
    }

    /// Unified diff from a backup to the current content
    ///
    /// Without an explicit backup the most recent backup of the file is used.
    pub fn diff(&self, file_path: &str, backup_path: Option<&str>) -> Result<FileDiff> {
        let path = resolve_path(file_path)?;
        if !path.exists() {
            return Err(McpLocalError::not_found(&path));
        }
        let name = file_name(&path);

        let backup = match backup_path {
            Some(backup) => resolve_path(backup)?,
            None => self
                .backups
                .latest_backup(&name)?
                .ok_or_else(|| McpLocalError::no_backup(file_path))?,
        };
        if !backup.exists() {
            return Err(McpLocalError::not_found(&backup));
        }

        let current = read_text(&path, self.max_file_size)?;
        let previous = read_text(&backup, self.max_file_size)?;
        if current == previous {
            return Ok(FileDiff::NoDifferences);
        }

        let diff = TextDiff::from_lines(&previous, &current)
            .unified_diff()
            .context_radius(3)
            .header(&format!("{name} (backup)"), &format!("{name} (current)"))
            .to_string();
        debug!(path = %path.display(), backup = %backup.display(), "Generated diff");
        Ok(FileDiff::Changes { path, backup, diff })
    }

    /// Restore a backup over `target_path`, backing up the target first
    ///
    /// The target is not backed up again when that backup would land on the
    /// backup being restored, which happens within the second it was taken.
    pub fn restore_backup(&self, backup_path: &str, target_path: &str) -> Result<RestoreOutcome> {
        let backup = resolve_path(backup_path)?;
        let target = resolve_path(target_path)?;
        if !backup.is_file() {
            return Err(McpLocalError::backup(format!(
                "Backup file not found: {}",
                backup.display()
            )));
        }

        let previous = if self.backups.backup_path_for(&target) == backup {
            None
        } else {
            self.backups.create_backup(&target)?
        };
        self.backups.restore(&backup, &target)?;
        Ok(RestoreOutcome {
            backup,
            target,
            previous,
        })
    }

    /// Resolve, require existence, back up, then read the file into lines
    fn prepare(&self, file_path: &str) -> Result<(PathBuf, Option<PathBuf>, Vec<String>)> {
        let path = resolve_path(file_path)?;
        if !path.exists() {
            return Err(McpLocalError::not_found(&path));
        }
        if path.is_dir() {
            return Err(McpLocalError::invalid_path(&path, "is a directory, not a file"));
        }
        let backup = self.backups.create_backup(&path)?;
        let content = read_text(&path, self.max_file_size)?;
        Ok((path, backup, split_lines(&content)))
    }

    fn write_lines(&self, path: &Path, lines: &[String]) -> Result<()> {
        fs::write(path, lines.concat()).map_err(|e| McpLocalError::from_io(path, e))
    }
}

fn checked_end(start_line: usize, end_line: Option<usize>) -> Result<usize> {
    let end_line = end_line.unwrap_or(start_line);
    if end_line < start_line {
        return Err(McpLocalError::validation(format!(
            "End line {end_line} is before start line {start_line}"
        )));
    }
    Ok(end_line)
}

/// Validate `start_line` against the file and clamp `end_line` to it
fn checked_range(start_line: usize, end_line: usize, total: usize) -> Result<usize> {
    if start_line == 0 || start_line > total {
        return Err(McpLocalError::validation(format!(
            "Invalid line number {start_line}. File has {total} lines"
        )));
    }
    Ok(end_line.min(total))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
