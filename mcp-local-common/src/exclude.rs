//! Glob-based path exclusion
//!
//! A path is excluded when any pattern matches its full string form, its final
//! component, or the string form of any ancestor directory. The ancestor walk
//! covers the whole parent chain, so `node_modules/*` excludes
//! `a/b/node_modules/c/d.js` and not only direct children.
//!
//! Patterns use shell-glob semantics: `*` also crosses `/` and matching is
//! case-sensitive. A pattern that is not anchored (does not start with `/` or
//! `*`) is additionally tried as `*/<pattern>` so it can match at any depth.
//! Callers should pass paths relative to the directory being walked.

use crate::constants::DEFAULT_EXCLUDE_PATTERNS;
use crate::error::{McpLocalError, Result};
use glob::{MatchOptions, Pattern};
use std::path::Path;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone)]
struct ExcludePattern {
    source: String,
    compiled: Vec<Pattern>,
}

impl ExcludePattern {
    fn new(source: &str) -> Result<Self> {
        let mut variants = vec![source.to_string()];
        if !source.starts_with('/') && !source.starts_with('*') {
            variants.push(format!("*/{source}"));
        }
        let compiled = variants
            .iter()
            .map(|variant| {
                Pattern::new(variant).map_err(|e| McpLocalError::invalid_pattern(source, e))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            source: source.to_string(),
            compiled,
        })
    }

    fn matches(&self, candidate: &str) -> bool {
        self.compiled
            .iter()
            .any(|pattern| pattern.matches_with(candidate, MATCH_OPTIONS))
    }
}

/// Matcher over the default exclude set plus caller additions
#[derive(Debug, Clone)]
pub struct ExcludeMatcher {
    patterns: Vec<ExcludePattern>,
}

impl ExcludeMatcher {
    /// Build a matcher over the default patterns extended by `extra`
    ///
    /// Blank entries in `extra` are ignored.
    pub fn new<S: AsRef<str>>(extra: &[S]) -> Result<Self> {
        let sources = DEFAULT_EXCLUDE_PATTERNS
            .iter()
            .copied()
            .chain(extra.iter().map(|s| s.as_ref().trim()))
            .filter(|s| !s.is_empty());
        Self::from_patterns(sources)
    }

    /// Build a matcher over exactly the given patterns
    pub fn from_patterns<'a>(patterns: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let patterns = patterns
            .into_iter()
            .map(ExcludePattern::new)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// The pattern sources in evaluation order
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.source.as_str())
    }

    /// Check whether a file path is excluded
    pub fn is_excluded(&self, path: &Path) -> bool {
        let full = normalized(path);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ancestors: Vec<String> = path
            .ancestors()
            .skip(1)
            .filter(|a| !a.as_os_str().is_empty())
            .map(normalized)
            .collect();

        self.patterns.iter().any(|pattern| {
            pattern.matches(&full)
                || (!name.is_empty() && pattern.matches(&name))
                || ancestors.iter().any(|ancestor| pattern.matches(ancestor))
        })
    }

    /// Check whether a directory should be pruned before descending into it
    ///
    /// Directories are tested as files first and then with a trailing `/`,
    /// so a `dist/*` pattern prunes the `dist` directory itself.
    pub fn is_excluded_dir(&self, path: &Path) -> bool {
        if self.is_excluded(path) {
            return true;
        }
        let full = format!("{}/", normalized(path));
        let name = path
            .file_name()
            .map(|n| format!("{}/", n.to_string_lossy()))
            .unwrap_or_default();
        self.patterns
            .iter()
            .any(|pattern| pattern.matches(&full) || (!name.is_empty() && pattern.matches(&name)))
    }
}

impl Default for ExcludeMatcher {
    fn default() -> Self {
        let patterns = DEFAULT_EXCLUDE_PATTERNS
            .iter()
            .filter_map(|source| ExcludePattern::new(source).ok())
            .collect();
        Self { patterns }
    }
}

fn normalized(path: &Path) -> String {
    let text = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        text.into_owned()
    } else {
        text.replace(std::path::MAIN_SEPARATOR, "/")
    }
}
