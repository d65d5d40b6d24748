//! Grep-style search filtered by a single file glob
//!
//! Unlike [`crate::SearchEngine`] this walks every file, hidden ones
//! included, applies no default excludes, and reports one entry per matching
//! line rather than per occurrence.

use glob::{MatchOptions, Pattern};
use mcp_local_common::{is_text_file, relative_display, resolve_path, McpLocalError, Result};
use regex::Regex;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Matches shown before the remainder is summarised
pub const DEFAULT_DISPLAY_LIMIT: usize = 50;

const PATH_MATCH: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A matching line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleMatch {
    /// Absolute path of the file
    pub path: PathBuf,
    /// 1-based line number
    pub line_number: usize,
    /// The line, trimmed
    pub line: String,
}

/// All matching lines under a root
#[derive(Debug, Clone)]
pub struct SimpleSearchResults {
    /// The search pattern as supplied
    pub pattern: String,
    /// Resolved root
    pub root: PathBuf,
    /// Every matching line, in walk order
    pub matches: Vec<SimpleMatch>,
}

impl SimpleSearchResults {
    /// `path:line: text` lines for the first `limit` matches
    pub fn render(&self, limit: usize) -> String {
        let mut out = format!(
            "Found {} matches for '{}':\n\n",
            self.matches.len(),
            self.pattern
        );
        let shown: Vec<String> = self
            .matches
            .iter()
            .take(limit)
            .map(|m| format!("{}:{}: {}", m.path.display(), m.line_number, m.line))
            .collect();
        out.push_str(&shown.join("\n"));
        if self.matches.len() > limit {
            out.push_str(&format!(
                "\n\n... and {} more matches",
                self.matches.len() - limit
            ));
        }
        out
    }
}

/// Find every line containing `pattern` in text files whose path matches `file_pattern`
///
/// `file_pattern` is matched against the path relative to the root as
/// `**/<file_pattern>`, so `*.rs` matches at any depth and `*` does not
/// cross directory separators.
pub fn search_in_files(
    pattern: &str,
    directory: &str,
    file_pattern: &str,
    use_regex: bool,
) -> Result<SimpleSearchResults> {
    if pattern.is_empty() {
        return Err(McpLocalError::validation("Search pattern cannot be empty"));
    }
    let regex = if use_regex {
        Some(Regex::new(pattern).map_err(|e| McpLocalError::invalid_pattern(pattern, e))?)
    } else {
        None
    };
    let file_pattern = if file_pattern.trim().is_empty() {
        "*"
    } else {
        file_pattern.trim()
    };
    let glob_source = format!("**/{file_pattern}");
    let file_glob = Pattern::new(&glob_source)
        .map_err(|e| McpLocalError::invalid_pattern(file_pattern, e))?;

    let root = resolve_path(directory)?;
    if !root.exists() {
        return Err(McpLocalError::not_found(&root));
    }

    let mut matches = Vec::new();
    let walker = WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {e}");
                None
            }
        });

    for entry in walker {
        if !entry.path().is_file() {
            continue;
        }
        let mut relative = relative_display(entry.path(), &root).replace('\\', "/");
        if relative.is_empty() {
            relative = entry.file_name().to_string_lossy().into_owned();
        }
        if !file_glob.matches_with(&relative, PATH_MATCH) || !is_text_file(entry.path()) {
            continue;
        }

        let bytes = match fs::read(entry.path()) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Skipping {}: {e}", entry.path().display());
                continue;
            }
        };
        let content = String::from_utf8_lossy(&bytes);
        for (index, line) in content.lines().enumerate() {
            let hit = match &regex {
                Some(regex) => regex.is_match(line),
                None => line.contains(pattern),
            };
            if hit {
                matches.push(SimpleMatch {
                    path: entry.path().to_path_buf(),
                    line_number: index + 1,
                    line: line.trim().to_string(),
                });
            }
        }
    }

    debug!(pattern, root = %root.display(), matches = matches.len(), "Simple search complete");
    Ok(SimpleSearchResults {
        pattern: pattern.to_string(),
        root,
        matches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tree(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (path, content) in files {
            let full = temp.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        temp
    }

    fn root(temp: &TempDir) -> &str {
        temp.path().to_str().unwrap()
    }

    #[test]
    fn test_literal_search_reports_lines() {
        let temp = tree(&[("a.txt", "todo: one\nnothing\n  todo todo\n")]);
        let results = search_in_files("todo", root(&temp), "*", false).unwrap();
        let lines: Vec<_> = results.matches.iter().map(|m| m.line_number).collect();
        assert_eq!(lines, vec![1, 3]);
        assert_eq!(results.matches[1].line, "todo todo");
    }

    #[test]
    fn test_file_pattern_matches_at_any_depth() {
        let temp = tree(&[
            ("top.rs", "hit\n"),
            ("src/deep/mod.rs", "hit\n"),
            ("src/notes.md", "hit\n"),
            ("node_modules/x.rs", "hit\n"),
            (".hidden.rs", "hit\n"),
        ]);
        let results = search_in_files("hit", root(&temp), "*.rs", false).unwrap();
        assert_eq!(results.matches.len(), 4);
        assert!(results
            .matches
            .iter()
            .all(|m| m.path.extension().unwrap() == "rs"));

        let scoped = search_in_files("hit", root(&temp), "src/*.md", false).unwrap();
        assert_eq!(scoped.matches.len(), 1);
    }

    #[test]
    fn test_regex_search() {
        let temp = tree(&[("r.txt", "v1.2\nv10\nversion\n")]);
        let results = search_in_files(r"v\d+\.\d+", root(&temp), "*", true).unwrap();
        assert_eq!(results.matches.len(), 1);

        let err = search_in_files("(", root(&temp), "*", true).unwrap_err();
        assert_eq!(err.kind(), mcp_local_common::ErrorKind::InvalidPattern);
    }

    #[test]
    fn test_render_caps_display() {
        let content = "x\n".repeat(60);
        let temp = tree(&[("many.txt", content.as_str())]);
        let results = search_in_files("x", root(&temp), "*", false).unwrap();
        assert_eq!(results.matches.len(), 60);

        let rendered = results.render(DEFAULT_DISPLAY_LIMIT);
        assert!(rendered.starts_with("Found 60 matches for 'x':"));
        assert!(rendered.ends_with("... and 10 more matches"));
        assert_eq!(rendered.matches("many.txt:").count(), 50);
    }

    #[test]
    fn test_missing_root() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let err = search_in_files("x", missing.to_str().unwrap(), "*", false).unwrap_err();
        assert_eq!(err.kind(), mcp_local_common::ErrorKind::NotFound);
    }
}
