//! Text versus binary classification
//!
//! Decision order:
//! 1. missing or unreadable metadata is not text
//! 2. a `text/*` MIME type guessed from the extension is text
//! 3. an extension from [`TEXT_EXTENSIONS`] is text
//! 4. files above 1 MiB are treated as binary without reading them
//! 5. otherwise the first 1024 bytes are sniffed for a null byte
//!
//! Any read failure in step 5 classifies the file as binary.

use crate::constants::{TEXT_EXTENSIONS, TEXT_SNIFF_BYTES, TEXT_SNIFF_SIZE_LIMIT};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Decide whether `path` is likely a text file
pub fn is_text_file(path: &Path) -> bool {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(_) => return false,
    };

    if guessed_mime_is_text(path) || has_text_extension(path) {
        return true;
    }

    if metadata.len() > TEXT_SNIFF_SIZE_LIMIT {
        return false;
    }

    sniff_is_text(path)
}

/// Guess a MIME type from the file extension
pub fn mime_hint(path: &Path) -> Option<String> {
    mime_guess::from_path(path).first().map(|mime| mime.to_string())
}

fn guessed_mime_is_text(path: &Path) -> bool {
    mime_guess::from_path(path)
        .first()
        .is_some_and(|mime| mime.type_() == mime_guess::mime::TEXT)
}

fn has_text_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext.as_str()))
}

fn sniff_is_text(path: &Path) -> bool {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => return false,
    };
    let mut buffer = Vec::with_capacity(TEXT_SNIFF_BYTES);
    match file.by_ref().take(TEXT_SNIFF_BYTES as u64).read_to_end(&mut buffer) {
        Ok(_) => !buffer.contains(&0),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_not_text() {
        assert!(!is_text_file(Path::new("/definitely/not/here.txt")));
    }

    #[test]
    fn test_known_extension_is_text_even_with_nulls() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("weird.rs");
        std::fs::write(&path, b"fn main() {}\0").unwrap();
        assert!(is_text_file(&path));
    }

    #[test]
    fn test_uppercase_extension_matches_allowlist() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("SCRIPT.PY");
        std::fs::write(&path, b"\0\0").unwrap();
        assert!(is_text_file(&path));
    }

    #[test]
    fn test_unknown_extension_sniffs_for_nulls() {
        let dir = TempDir::new().unwrap();
        let text = dir.path().join("notes.zzz");
        let binary = dir.path().join("blob.zzz");
        std::fs::write(&text, b"plain words").unwrap();
        std::fs::write(&binary, b"abc\0def").unwrap();

        assert!(is_text_file(&text));
        assert!(!is_text_file(&binary));
    }

    #[test]
    fn test_null_after_sniff_window_is_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("late.zzz");
        let mut content = vec![b'a'; TEXT_SNIFF_BYTES];
        content.push(0);
        std::fs::write(&path, content).unwrap();
        assert!(is_text_file(&path));
    }

    #[test]
    fn test_large_unknown_file_is_binary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("huge.zzz");
        std::fs::write(&path, vec![b'a'; (TEXT_SNIFF_SIZE_LIMIT + 1) as usize]).unwrap();
        assert!(!is_text_file(&path));
    }

    #[test]
    fn test_extensionless_text_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Makefile");
        std::fs::write(&path, "all:\n\techo hi\n").unwrap();
        assert!(is_text_file(&path));
    }

    #[test]
    fn test_mime_hint() {
        assert_eq!(
            mime_hint(Path::new("index.html")).as_deref(),
            Some("text/html")
        );
        assert_eq!(mime_hint(Path::new("no_extension")), None);
    }
}
