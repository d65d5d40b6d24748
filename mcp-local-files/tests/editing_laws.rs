//! Property tests for the editing engine

use mcp_local_files::{BackupStore, FileDiff, FileEditor};
use proptest::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn editor_in(temp: &TempDir) -> (PathBuf, FileEditor) {
    let root = temp.path().canonicalize().unwrap();
    let editor = FileEditor::new(BackupStore::new(root.join("backups")), 100, 1024 * 1024);
    (root, editor)
}

fn file_content(lines: &[String]) -> String {
    lines.iter().map(|l| format!("{l}\n")).collect()
}

fn content_lines() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-z]{0,6}", 1..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn insert_past_end_matches_insert_at_end(lines in content_lines(), extra in 1usize..20) {
        let temp = TempDir::new().unwrap();
        let (root, mut editor) = editor_in(&temp);
        let a = root.join("a.txt");
        let b = root.join("b.txt");
        fs::write(&a, file_content(&lines)).unwrap();
        fs::write(&b, file_content(&lines)).unwrap();

        let total = lines.len();
        editor.insert_lines(a.to_str().unwrap(), total + 1, "tail").unwrap();
        editor.insert_lines(b.to_str().unwrap(), total + extra, "tail").unwrap();

        prop_assert_eq!(fs::read_to_string(&a).unwrap(), fs::read_to_string(&b).unwrap());
    }

    #[test]
    fn delete_then_restore_is_identity(
        lines in content_lines(),
        start_seed in 0usize..100,
        len_seed in 0usize..100,
    ) {
        let temp = TempDir::new().unwrap();
        let (root, mut editor) = editor_in(&temp);
        let file = root.join("f.txt");
        let original = file_content(&lines);
        fs::write(&file, &original).unwrap();

        let start = start_seed % lines.len() + 1;
        let end = start + len_seed % (lines.len() - start + 1);
        let outcome = editor.delete_lines(file.to_str().unwrap(), start, Some(end)).unwrap();
        let backup = outcome.backup.unwrap();

        editor
            .restore_backup(backup.to_str().unwrap(), file.to_str().unwrap())
            .unwrap();
        prop_assert_eq!(fs::read_to_string(&file).unwrap(), original);
    }

    #[test]
    fn edit_then_diff_touches_only_the_range(
        lines in proptest::collection::vec("[a-z]{1,6}", 3..12),
        start_seed in 0usize..100,
    ) {
        let temp = TempDir::new().unwrap();
        let (root, mut editor) = editor_in(&temp);
        let file = root.join("e.txt");
        fs::write(&file, file_content(&lines)).unwrap();

        let start = start_seed % lines.len() + 1;
        editor
            .edit_lines(file.to_str().unwrap(), start, "REPLACED", None)
            .unwrap();

        match editor.diff(file.to_str().unwrap(), None).unwrap() {
            FileDiff::Changes { diff, .. } => {
                let removed: Vec<&str> = diff
                    .lines()
                    .filter(|l| l.starts_with('-') && !l.starts_with("---"))
                    .collect();
                let added: Vec<&str> = diff
                    .lines()
                    .filter(|l| l.starts_with('+') && !l.starts_with("+++"))
                    .collect();
                let expected_removed = format!("-{}", lines[start - 1]);
                prop_assert_eq!(removed, vec![expected_removed.as_str()]);
                prop_assert_eq!(added, vec!["+REPLACED"]);
            }
            FileDiff::NoDifferences => prop_assert!(false, "expected a diff"),
        }
    }

    #[test]
    fn backup_then_restore_elsewhere_is_identical(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let temp = TempDir::new().unwrap();
        let store = BackupStore::new(temp.path().join("backups"));
        let source = temp.path().join("source.bin");
        fs::write(&source, &bytes).unwrap();

        let backup = store.create_backup(&source).unwrap().unwrap();
        fs::write(&source, b"mutated").unwrap();

        let copy = temp.path().join("copy.bin");
        store.restore(&backup, &copy).unwrap();
        prop_assert_eq!(fs::read(&copy).unwrap(), bytes);
    }
}
