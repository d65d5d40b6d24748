//! In-memory edit history
//!
//! The log holds at most `capacity` records. Appending past capacity drops
//! the oldest records first. Nothing is persisted; the log lives as long as
//! the process.

use chrono::{DateTime, Duration, Local};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Kind of mutation recorded in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditAction {
    /// Whole-file write
    Write,
    /// Replacement of a line range
    EditLines,
    /// Insertion of lines
    InsertLines,
    /// Removal of a line range
    DeleteLines,
    /// Find and replace
    ReplaceInFile,
}

impl EditAction {
    /// Name used in rendered history and statistics
    pub fn as_str(&self) -> &'static str {
        match self {
            EditAction::Write => "write",
            EditAction::EditLines => "edit_lines",
            EditAction::InsertLines => "insert_lines",
            EditAction::DeleteLines => "delete_lines",
            EditAction::ReplaceInFile => "replace_in_file",
        }
    }
}

impl fmt::Display for EditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action-specific payload of an [`EditRecord`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EditDetails {
    /// Payload of [`EditAction::Write`]
    Write {
        /// Characters written
        content_length: usize,
    },
    /// Payload of [`EditAction::EditLines`]
    EditLines {
        /// First replaced line, 1-based
        start_line: usize,
        /// Last replaced line, 1-based inclusive
        end_line: usize,
        /// Replaced lines without terminators
        original_lines: Vec<String>,
        /// Inserted lines without terminators
        new_lines: Vec<String>,
    },
    /// Payload of [`EditAction::InsertLines`]
    InsertLines {
        /// Requested insertion line, 1-based
        line_number: usize,
        /// Inserted lines without terminators
        inserted_lines: Vec<String>,
    },
    /// Payload of [`EditAction::DeleteLines`]
    DeleteLines {
        /// First removed line, 1-based
        start_line: usize,
        /// Last removed line, 1-based inclusive
        end_line: usize,
        /// Removed lines without terminators
        deleted_lines: Vec<String>,
    },
    /// Payload of [`EditAction::ReplaceInFile`]
    ReplaceInFile {
        /// Literal text or regex that was searched for
        search_pattern: String,
        /// Replacement text
        replace_with: String,
        /// Whether the pattern was a regex
        use_regex: bool,
        /// Matches found in the content before substitution
        replacements_made: usize,
    },
}

impl EditDetails {
    /// The action this payload belongs to
    pub fn action(&self) -> EditAction {
        match self {
            EditDetails::Write { .. } => EditAction::Write,
            EditDetails::EditLines { .. } => EditAction::EditLines,
            EditDetails::InsertLines { .. } => EditAction::InsertLines,
            EditDetails::DeleteLines { .. } => EditAction::DeleteLines,
            EditDetails::ReplaceInFile { .. } => EditAction::ReplaceInFile,
        }
    }

    /// One-line human readable summary
    pub fn summary(&self) -> String {
        match self {
            EditDetails::Write { content_length } => format!("Characters: {content_length}"),
            EditDetails::EditLines {
                start_line,
                end_line,
                ..
            } => format!("Lines: {start_line}-{end_line}"),
            EditDetails::InsertLines { line_number, .. } => {
                format!("Inserted at line: {line_number}")
            }
            EditDetails::DeleteLines {
                start_line,
                end_line,
                ..
            } => format!("Deleted lines: {start_line}-{end_line}"),
            EditDetails::ReplaceInFile {
                replacements_made, ..
            } => format!("Replacements: {replacements_made}"),
        }
    }
}

/// One immutable entry of the edit history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditRecord {
    timestamp: DateTime<Local>,
    action: EditAction,
    file: PathBuf,
    details: EditDetails,
    backup: Option<PathBuf>,
}

impl EditRecord {
    /// Create a record stamped with the current time
    pub fn new(file: impl Into<PathBuf>, details: EditDetails, backup: Option<PathBuf>) -> Self {
        Self::new_at(Local::now(), file, details, backup)
    }

    /// Create a record with an explicit timestamp
    pub fn new_at(
        timestamp: DateTime<Local>,
        file: impl Into<PathBuf>,
        details: EditDetails,
        backup: Option<PathBuf>,
    ) -> Self {
        Self {
            timestamp,
            action: details.action(),
            file: file.into(),
            details,
            backup,
        }
    }

    /// When the edit happened
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Kind of edit
    pub fn action(&self) -> EditAction {
        self.action
    }

    /// File that was edited
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Action-specific payload
    pub fn details(&self) -> &EditDetails {
        &self.details
    }

    /// Backup taken before the edit, if the file existed
    pub fn backup(&self) -> Option<&Path> {
        self.backup.as_deref()
    }
}

impl fmt::Display for EditRecord {
    /// `{timestamp} - {action}`, then the file and the action summary, indented
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} - {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.action
        )?;
        writeln!(f, "  File: {}", self.file.display())?;
        write!(f, "  {}", self.details.summary())
    }
}

/// Snapshot returned by [`EditHistoryLog::export`]
#[derive(Debug, Clone, Serialize)]
pub struct HistoryExport {
    /// When the snapshot was taken
    pub export_time: DateTime<Local>,
    /// Number of records in the snapshot
    pub total_entries: usize,
    /// Records, oldest first
    pub history: Vec<EditRecord>,
}

/// Aggregates returned by [`EditHistoryLog::stats`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryStats {
    /// Number of records in the log
    pub total_edits: usize,
    /// Records per action name
    pub action_counts: BTreeMap<String, usize>,
    /// Up to five files with the most records, busiest first
    pub most_edited_files: Vec<(PathBuf, usize)>,
    /// Records from the last 24 hours
    pub recent_activity: usize,
}

/// Capacity-bounded log of edits, oldest first
#[derive(Debug, Clone)]
pub struct EditHistoryLog {
    records: VecDeque<EditRecord>,
    capacity: usize,
}

impl EditHistoryLog {
    /// Create an empty log holding at most `capacity` records (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record stamped with the current time
    pub fn log(&mut self, file: impl Into<PathBuf>, details: EditDetails, backup: Option<PathBuf>) {
        self.log_record(EditRecord::new(file, details, backup));
    }

    /// Append a prepared record, evicting the oldest records past capacity
    pub fn log_record(&mut self, record: EditRecord) {
        debug!(action = %record.action, file = %record.file.display(), "Logged edit");
        self.records.push_back(record);
        while self.records.len() > self.capacity {
            self.records.pop_front();
        }
    }

    /// The last `limit` records, optionally restricted to one file, oldest first
    ///
    /// A `limit` of `None` or `Some(0)` returns every matching record.
    pub fn query(&self, limit: Option<usize>, file: Option<&Path>) -> Vec<&EditRecord> {
        let matching: Vec<&EditRecord> = self
            .records
            .iter()
            .filter(|record| file.is_none_or(|file| record.file == file))
            .collect();
        match limit {
            Some(limit) if limit > 0 && limit < matching.len() => {
                matching[matching.len() - limit..].to_vec()
            }
            _ => matching,
        }
    }

    /// Distinct edited files, most recent first
    pub fn recent_files(&self, limit: usize) -> Vec<PathBuf> {
        let mut seen = HashSet::new();
        let mut files = Vec::new();
        for record in self.records.iter().rev() {
            if files.len() >= limit {
                break;
            }
            if seen.insert(record.file.as_path()) {
                files.push(record.file.clone());
            }
        }
        files
    }

    /// Drop every record
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Snapshot of the full log
    pub fn export(&self) -> HistoryExport {
        HistoryExport {
            export_time: Local::now(),
            total_entries: self.records.len(),
            history: self.records.iter().cloned().collect(),
        }
    }

    /// Aggregate statistics relative to the current time
    pub fn stats(&self) -> HistoryStats {
        self.stats_at(Local::now())
    }

    /// Aggregate statistics relative to `now`
    pub fn stats_at(&self, now: DateTime<Local>) -> HistoryStats {
        let mut action_counts = BTreeMap::new();
        let mut file_counts: HashMap<&Path, usize> = HashMap::new();
        let mut first_seen: Vec<&Path> = Vec::new();

        for record in &self.records {
            *action_counts
                .entry(record.action.as_str().to_string())
                .or_insert(0) += 1;
            let count = file_counts.entry(record.file.as_path()).or_insert(0);
            if *count == 0 {
                first_seen.push(record.file.as_path());
            }
            *count += 1;
        }

        // stable sort keeps first-seen order among equal counts
        let mut most_edited: Vec<(PathBuf, usize)> = first_seen
            .into_iter()
            .map(|file| (file.to_path_buf(), file_counts[file]))
            .collect();
        most_edited.sort_by(|a, b| b.1.cmp(&a.1));
        most_edited.truncate(5);

        let day = Duration::hours(24);
        let recent_activity = self
            .records
            .iter()
            .filter(|record| now.signed_duration_since(record.timestamp) < day)
            .count();

        HistoryStats {
            total_edits: self.records.len(),
            action_counts,
            most_edited_files: most_edited,
            recent_activity,
        }
    }
}
