//! Options accepted by the advanced search

use glob::Pattern;
use mcp_local_common::{file_type_group, McpLocalError, Result};
use serde::{Deserialize, Serialize};

/// Knobs of [`crate::SearchEngine`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Match case exactly
    pub case_sensitive: bool,
    /// Only match whole words
    pub whole_word: bool,
    /// Treat the search term as a regular expression
    pub use_regex: bool,
    /// File-name globs to include; when empty, `file_types` decides
    pub include_patterns: Vec<String>,
    /// Globs added to the default exclude set
    pub exclude_patterns: Vec<String>,
    /// Preset group name (`code`, `web`, `config`, `docs`, `data`, `all`)
    /// or a comma-separated extension list such as `py,md`
    pub file_types: String,
    /// Stop after this many matches
    pub max_results: usize,
    /// Lines of context before and after each match
    pub context_lines: usize,
    /// Descend into dot-directories and search dot-files
    pub show_hidden: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            whole_word: false,
            use_regex: false,
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            file_types: "all".to_string(),
            max_results: 1000,
            context_lines: 2,
            show_hidden: false,
        }
    }
}

impl SearchOptions {
    /// The include globs in effect
    ///
    /// Explicit include patterns win, then a preset group, then the
    /// extension list.
    pub fn include_globs(&self) -> Vec<String> {
        let explicit: Vec<String> = self
            .include_patterns
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        if !explicit.is_empty() {
            return explicit;
        }

        let file_types = self.file_types.trim();
        if let Some(group) = file_type_group(file_types) {
            return group.iter().map(|p| p.to_string()).collect();
        }

        let extensions: Vec<String> = file_types
            .split(',')
            .map(|ext| ext.trim().trim_start_matches("*.").trim_start_matches('.'))
            .filter(|ext| !ext.is_empty())
            .map(|ext| format!("*.{ext}"))
            .collect();
        if extensions.is_empty() {
            vec!["*".to_string()]
        } else {
            extensions
        }
    }

    pub(crate) fn compiled_includes(&self) -> Result<Vec<Pattern>> {
        self.include_globs()
            .iter()
            .map(|glob| Pattern::new(glob).map_err(|e| McpLocalError::invalid_pattern(glob.clone(), e)))
            .collect()
    }
}

/// Split a comma-separated argument into trimmed, non-empty items
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SearchOptions::default();
        assert_eq!(options.max_results, 1000);
        assert_eq!(options.context_lines, 2);
        assert_eq!(options.include_globs(), vec!["*"]);
    }

    #[test]
    fn test_include_precedence() {
        let options = SearchOptions {
            include_patterns: vec!["*.rs".into(), " ".into()],
            file_types: "docs".into(),
            ..Default::default()
        };
        assert_eq!(options.include_globs(), vec!["*.rs"]);

        let options = SearchOptions {
            file_types: "docs".into(),
            ..Default::default()
        };
        assert!(options.include_globs().contains(&"*.md".to_string()));

        let options = SearchOptions {
            file_types: "py, .md,*.txt".into(),
            ..Default::default()
        };
        assert_eq!(options.include_globs(), vec!["*.py", "*.md", "*.txt"]);
    }

    #[test]
    fn test_invalid_include_pattern() {
        let options = SearchOptions {
            include_patterns: vec!["[".into()],
            ..Default::default()
        };
        let err = options.compiled_includes().unwrap_err();
        assert_eq!(err.kind(), mcp_local_common::ErrorKind::InvalidPattern);
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(" a, b ,,c"), vec!["a", "b", "c"]);
        assert!(split_list("").is_empty());
    }
}
