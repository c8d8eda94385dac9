use std::fs;

use crate::engine::OutputUnits;
use crate::sync::{ExtensionFilter, OutputEncoding, OutputSynchronizer, SyncError, sync};

fn units(entries: &[(&str, &str)]) -> OutputUnits {
    entries
        .iter()
        .map(|(name, text)| (name.to_string(), text.to_string()))
        .collect()
}

fn ts() -> ExtensionFilter {
    ExtensionFilter::from_pattern("*.ts")
}

#[test]
fn creates_directory_and_writes_with_bom() {
    let root = tempfile::tempdir().unwrap();
    let out = root.path().join("Imports").join("ServerTypings");

    let report = sync(&out, &units(&[("Foo.ts", "let x;\n")]), &ts()).unwrap();

    assert_eq!(report.written, ["Foo.ts"]);
    assert_eq!(fs::read(out.join("Foo.ts")).unwrap(), b"\xEF\xBB\xBFlet x;\n");
}

#[test]
fn plain_utf8_has_no_bom() {
    let dir = tempfile::tempdir().unwrap();
    OutputSynchronizer::new(OutputEncoding::Utf8)
        .sync(dir.path(), &units(&[("Foo.ts", "é")]), &ts())
        .unwrap();
    assert_eq!(fs::read(dir.path().join("Foo.ts")).unwrap(), "é".as_bytes());
}

#[test]
fn identical_files_are_not_rewritten() {
    let dir = tempfile::tempdir().unwrap();
    let out = units(&[("A.ts", "a"), ("B.ts", "b")]);
    sync(dir.path(), &out, &ts()).unwrap();
    let before = fs::metadata(dir.path().join("A.ts")).unwrap().modified().unwrap();

    let report = sync(dir.path(), &out, &ts()).unwrap();

    assert!(report.is_noop());
    assert_eq!(report.unchanged, ["A.ts", "B.ts"]);
    let after = fs::metadata(dir.path().join("A.ts")).unwrap().modified().unwrap();
    assert_eq!(before, after);
}

#[test]
fn changed_text_is_rewritten() {
    let dir = tempfile::tempdir().unwrap();
    sync(dir.path(), &units(&[("A.ts", "old")]), &ts()).unwrap();

    let report = sync(dir.path(), &units(&[("A.ts", "new")]), &ts()).unwrap();

    assert_eq!(report.written, ["A.ts"]);
    assert_eq!(fs::read(dir.path().join("A.ts")).unwrap(), b"\xEF\xBB\xBFnew");
}

#[test]
fn file_without_bom_is_rewritten() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("A.ts"), "same").unwrap();

    let report = sync(dir.path(), &units(&[("A.ts", "same")]), &ts()).unwrap();
    assert_eq!(report.written, ["A.ts"]);
}

#[test]
fn stale_matching_files_are_removed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path();
    fs::write(path.join("Old.ts"), "stale").unwrap();
    fs::write(path.join("Keep.ts"), "x").unwrap();
    fs::write(path.join("notes.txt"), "mine").unwrap();
    fs::write(path.join("Upper.TS"), "case").unwrap();
    fs::create_dir(path.join("nested")).unwrap();
    fs::write(path.join("nested").join("Deep.ts"), "deep").unwrap();
    fs::create_dir(path.join("Dir.ts")).unwrap();

    let report = sync(path, &units(&[("Keep.ts", "x")]), &ts()).unwrap();

    assert_eq!(report.deleted, ["Old.ts"]);
    assert!(!path.join("Old.ts").exists());
    assert!(path.join("Keep.ts").exists());
    assert!(path.join("notes.txt").exists());
    assert!(path.join("Upper.TS").exists());
    assert!(path.join("nested").join("Deep.ts").exists());
    assert!(path.join("Dir.ts").is_dir());
}

#[test]
fn names_escaping_the_directory_are_rejected() {
    let root = tempfile::tempdir().unwrap();
    let out = root.path().join("out");
    let escaped = root.path().join("Escaped.ts");

    for name in ["../Escaped.ts", escaped.to_str().unwrap(), "..", "."] {
        let err = sync(&out, &units(&[("Fine.ts", "f"), (name, "x")]), &ts()).unwrap_err();
        assert!(matches!(&err, SyncError::InvalidName(n) if n == name), "{name}");
    }

    assert!(!escaped.exists());
    assert!(!out.exists());
}

#[test]
fn nested_or_empty_names_are_rejected() {
    let dir = tempfile::tempdir().unwrap();

    for name in ["Sub/Inner.ts", "Sub\\Inner.ts", ""] {
        let err = sync(dir.path(), &units(&[(name, "i")]), &ts()).unwrap_err();
        assert!(matches!(err, SyncError::InvalidName(_)), "{name:?}");
    }

    assert!(!dir.path().join("Sub").exists());
}

#[test]
fn file_dropped_from_output_is_removed_on_next_sync() {
    let dir = tempfile::tempdir().unwrap();
    sync(dir.path(), &units(&[("Inner.ts", "i")]), &ts()).unwrap();

    let report = sync(dir.path(), &units(&[("Other.ts", "o")]), &ts()).unwrap();

    assert_eq!(report.written, ["Other.ts"]);
    assert_eq!(report.deleted, ["Inner.ts"]);
    assert!(!dir.path().join("Inner.ts").exists());
}

#[test]
fn empty_output_clears_matching_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("A.ts"), "a").unwrap();
    fs::write(dir.path().join("B.ts"), "b").unwrap();

    let report = sync(dir.path(), &OutputUnits::new(), &ts()).unwrap();
    assert_eq!(report.deleted, ["A.ts", "B.ts"]);
}

#[test]
fn output_dir_blocked_by_file() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("out");
    fs::write(&blocker, "file").unwrap();

    let err = sync(&blocker, &units(&[("A.ts", "a")]), &ts()).unwrap_err();
    assert!(matches!(err, SyncError::CreateDir { .. }));
}

#[test]
fn extension_filter() {
    let filter = ExtensionFilter::from_pattern("*.ts");
    assert_eq!(filter.suffix(), ".ts");
    assert!(filter.matches("Foo.ts"));
    assert!(filter.matches("Foo.d.ts"));
    assert!(!filter.matches(".ts"));
    assert!(!filter.matches("Foo.tsx"));
    assert!(!filter.matches("Foo.TS"));
    assert_eq!(ExtensionFilter::from_pattern("ts"), filter);
}
