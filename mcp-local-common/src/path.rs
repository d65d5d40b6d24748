//! Path resolution for caller-supplied paths
//!
//! Callers send paths as plain strings that may be relative or start with `~`.
//! [`resolve_path`] turns them into absolute paths with symlinks and `..`
//! segments resolved. The target does not need to exist: the longest existing
//! prefix is canonicalized and the remaining components are appended as given.

use crate::error::{McpLocalError, Result};
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Expand a leading `~` to the user's home directory
pub fn expand_home(input: &str) -> Result<PathBuf> {
    let rest = if input == "~" {
        Some("")
    } else {
        input
            .strip_prefix("~/")
            .or_else(|| input.strip_prefix("~\\"))
    };

    match rest {
        Some(rest) => {
            let home = dirs::home_dir().ok_or_else(|| {
                McpLocalError::invalid_path(input, "home directory could not be determined")
            })?;
            Ok(if rest.is_empty() { home } else { home.join(rest) })
        }
        None => Ok(PathBuf::from(input)),
    }
}

/// Resolve a caller-supplied path to an absolute, canonical path
///
/// No existence check is performed; callers decide whether a missing target
/// is an error.
pub fn resolve_path(input: &str) -> Result<PathBuf> {
    if input.is_empty() {
        return Err(McpLocalError::invalid_path(input, "path cannot be empty"));
    }
    if input.contains('\0') {
        return Err(McpLocalError::invalid_path(
            input.replace('\0', "\\0"),
            "path contains a null byte",
        ));
    }

    let expanded = expand_home(input)?;
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        let cwd = std::env::current_dir().map_err(|e| {
            McpLocalError::invalid_path(input, format!("current directory unavailable: {e}"))
        })?;
        cwd.join(expanded)
    };

    Ok(canonicalize_existing_prefix(&normalize_lexically(&absolute)))
}

/// Remove `.` segments and fold `..` segments into their parent
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(name) => out.push(name),
        }
    }
    out
}

fn canonicalize_existing_prefix(path: &Path) -> PathBuf {
    let mut prefix = path;
    let mut missing: Vec<&OsStr> = Vec::new();

    loop {
        if let Ok(mut resolved) = prefix.canonicalize() {
            for name in missing.iter().rev() {
                resolved.push(name);
            }
            return resolved;
        }
        match (prefix.parent(), prefix.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name);
                prefix = parent;
            }
            _ => return path.to_path_buf(),
        }
    }
}

/// Render `path` relative to `base`, falling back to the full path
pub fn relative_display(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}
