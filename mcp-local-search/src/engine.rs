//! Advanced search engine
//!
//! The walk visits a directory's files before its subdirectories, each in name
//! order, and prunes hidden and excluded directories before descending. Exclude
//! patterns are matched against paths relative to the search root.
//!
//! The scan stops as soon as `max_results` matches have been collected, so
//! `files_searched` and `files_with_matches` describe the part of the tree that
//! was actually scanned, not the whole tree.

use crate::options::SearchOptions;
use glob::Pattern;
use mcp_local_common::{
    is_text_file, relative_display, resolve_path, ExcludeMatcher, McpLocalError, Result,
};
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// A line shown around a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextLine {
    /// 1-based line number
    pub line_number: usize,
    /// Line content without the terminator
    pub text: String,
    /// Whether this is the matching line
    pub is_match: bool,
}

impl fmt::Display for ContextLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.is_match { ">> " } else { "   " };
        write!(f, "{marker}{:4}: {}", self.line_number, self.text)
    }
}

/// One match occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    /// File path relative to the search root
    pub file_path: String,
    /// 1-based line number
    pub line_number: usize,
    /// 1-based character offset of the match start
    pub column: usize,
    /// The matching line, trimmed
    pub line_content: String,
    /// The matching line with its surrounding context
    pub context: Vec<ContextLine>,
}

/// Outcome of a search
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    /// The search term as supplied
    pub term: String,
    /// Resolved search root
    pub root: PathBuf,
    /// Matches in scan order
    pub matches: Vec<SearchMatch>,
    /// Files opened for matching
    pub files_searched: usize,
    /// Files with at least one reported match
    pub files_with_matches: usize,
    /// Options the search ran with
    pub options: SearchOptions,
}

impl SearchResults {
    /// Number of matches
    pub fn total_matches(&self) -> usize {
        self.matches.len()
    }

    /// Whether the scan stopped at `max_results`
    pub fn limit_reached(&self) -> bool {
        self.matches.len() >= self.options.max_results
    }

    /// Matches grouped by file, files in first-seen order
    pub fn grouped_by_file(&self) -> Vec<(&str, Vec<&SearchMatch>)> {
        let mut groups: Vec<(&str, Vec<&SearchMatch>)> = Vec::new();
        for m in &self.matches {
            match groups.iter_mut().find(|(file, _)| *file == m.file_path) {
                Some((_, matches)) => matches.push(m),
                None => groups.push((m.file_path.as_str(), vec![m])),
            }
        }
        groups
    }
}

/// A compiled search, reusable across roots
#[derive(Debug, Clone)]
pub struct SearchEngine {
    term: String,
    pattern: Regex,
    includes: Vec<Pattern>,
    excludes: ExcludeMatcher,
    options: SearchOptions,
}

impl SearchEngine {
    /// Compile the term and the include and exclude globs
    pub fn new(term: &str, options: SearchOptions) -> Result<Self> {
        if term.is_empty() {
            return Err(McpLocalError::validation("Search term cannot be empty"));
        }
        if options.max_results == 0 {
            return Err(McpLocalError::validation(
                "max_results must be greater than 0",
            ));
        }

        let body = if options.use_regex {
            term.to_string()
        } else {
            regex::escape(term)
        };
        let source = if options.whole_word {
            format!(r"\b(?:{body})\b")
        } else {
            body
        };
        let pattern = RegexBuilder::new(&source)
            .case_insensitive(!options.case_sensitive)
            .build()
            .map_err(|e| McpLocalError::invalid_pattern(term, e))?;

        Ok(Self {
            term: term.to_string(),
            pattern,
            includes: options.compiled_includes()?,
            excludes: ExcludeMatcher::new(&options.exclude_patterns)?,
            options,
        })
    }

    /// Search a directory tree, or a single file
    pub fn search(&self, root: &str) -> Result<SearchResults> {
        let root = resolve_path(root)?;
        if !root.exists() {
            return Err(McpLocalError::not_found(&root));
        }

        let mut scan = Scan::new(self.options.max_results);
        if root.is_file() {
            if is_text_file(&root) {
                let display = root
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.search_file(&root, &display, &mut scan);
            }
        } else {
            self.search_tree(&root, &mut scan);
        }

        debug!(
            term = %self.term,
            root = %root.display(),
            matches = scan.matches.len(),
            files_searched = scan.files_searched,
            "Search complete"
        );
        Ok(SearchResults {
            term: self.term.clone(),
            root,
            matches: scan.matches,
            files_searched: scan.files_searched,
            files_with_matches: scan.files_with_matches,
            options: self.options.clone(),
        })
    }

    fn search_tree(&self, root: &Path, scan: &mut Scan) {
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by(files_before_dirs)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.prune(entry, root));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {e}");
                    continue;
                }
            };
            if !is_regular_file(&entry) {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if !self.options.show_hidden && name.starts_with('.') {
                continue;
            }
            if !self.includes.iter().any(|p| p.matches(&name)) {
                continue;
            }
            let relative = relative_display(entry.path(), root);
            if self.excludes.is_excluded(Path::new(&relative)) {
                continue;
            }
            if !is_text_file(entry.path()) {
                continue;
            }

            self.search_file(entry.path(), &relative, scan);
            if scan.is_full() {
                break;
            }
        }
    }

    /// Whether a directory is skipped without being entered
    fn prune(&self, entry: &DirEntry, root: &Path) -> bool {
        if !entry.file_type().is_dir() {
            return false;
        }
        if !self.options.show_hidden && entry.file_name().to_string_lossy().starts_with('.') {
            return true;
        }
        let relative = relative_display(entry.path(), root);
        self.excludes.is_excluded_dir(Path::new(&relative))
    }

    fn search_file(&self, path: &Path, display: &str, scan: &mut Scan) {
        scan.files_searched += 1;
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Skipping {}: {e}", path.display());
                return;
            }
        };
        let content = String::from_utf8_lossy(&bytes);
        let lines: Vec<&str> = content.lines().collect();

        let mut file_has_match = false;
        'lines: for (index, line) in lines.iter().enumerate() {
            for found in self.pattern.find_iter(line) {
                scan.matches.push(SearchMatch {
                    file_path: display.to_string(),
                    line_number: index + 1,
                    column: line[..found.start()].chars().count() + 1,
                    line_content: line.trim().to_string(),
                    context: self.context(&lines, index),
                });
                file_has_match = true;
                if scan.is_full() {
                    break 'lines;
                }
            }
        }
        if file_has_match {
            scan.files_with_matches += 1;
        }
    }

    fn context(&self, lines: &[&str], index: usize) -> Vec<ContextLine> {
        let radius = self.options.context_lines;
        let first = index.saturating_sub(radius);
        let last = index.saturating_add(radius).saturating_add(1).min(lines.len());
        (first..last)
            .map(|i| ContextLine {
                line_number: i + 1,
                text: lines[i].trim_end().to_string(),
                is_match: i == index,
            })
            .collect()
    }
}

struct Scan {
    matches: Vec<SearchMatch>,
    files_searched: usize,
    files_with_matches: usize,
    max_results: usize,
}

impl Scan {
    fn new(max_results: usize) -> Self {
        Self {
            matches: Vec::new(),
            files_searched: 0,
            files_with_matches: 0,
            max_results,
        }
    }

    fn is_full(&self) -> bool {
        self.matches.len() >= self.max_results
    }
}

fn files_before_dirs(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Regular files, and symlinks that point at regular files
fn is_regular_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}
