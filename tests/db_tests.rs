//! Baseline tests: lookup/insert contract, uniqueness, persistence across reopen.

use hashwarden::engine::{Baseline, SqliteBaseline};

#[test]
fn test_in_memory_baseline_starts_empty() {
    let baseline = SqliteBaseline::open_in_memory().unwrap();
    assert_eq!(baseline.len().unwrap(), 0);
    assert!(baseline.is_empty().unwrap());
    assert_eq!(baseline.get("dir/a.txt").unwrap(), None);
}

#[test]
fn test_insert_then_get() {
    let mut baseline = SqliteBaseline::open_in_memory().unwrap();
    baseline.insert("dir/a.txt", "abc123").unwrap();
    assert_eq!(baseline.get("dir/a.txt").unwrap(), Some("abc123".to_string()));
    assert_eq!(baseline.get("dir/b.txt").unwrap(), None);
    assert_eq!(baseline.len().unwrap(), 1);
}

#[test]
fn test_duplicate_insert_is_rejected() {
    let mut baseline = SqliteBaseline::open_in_memory().unwrap();
    baseline.insert("dir/a.txt", "first").unwrap();
    assert!(baseline.insert("dir/a.txt", "second").is_err());
    // The original entry is untouched.
    assert_eq!(baseline.get("dir/a.txt").unwrap(), Some("first".to_string()));
    assert_eq!(baseline.len().unwrap(), 1);
}

#[test]
fn test_load_all() {
    let mut baseline = SqliteBaseline::open_in_memory().unwrap();
    let rows = [("a", "1"), ("b", "2"), ("c/d", "3")];
    for (name, hash) in &rows {
        baseline.insert(name, hash).unwrap();
    }
    let map = baseline.load_all().unwrap();
    assert_eq!(map.len(), 3);
    for (name, hash) in &rows {
        assert_eq!(map.get(*name).map(String::as_str), Some(*hash));
    }
}

#[test]
fn test_file_baseline_persists_across_reopen() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("baseline.db");

    let mut baseline = SqliteBaseline::open(&db_path).unwrap();
    baseline.insert("x/a.txt", "deadbeef").unwrap();
    baseline.close().unwrap();
    assert!(db_path.exists());

    let baseline = SqliteBaseline::open(&db_path).unwrap();
    assert_eq!(baseline.get("x/a.txt").unwrap(), Some("deadbeef".to_string()));
    assert_eq!(baseline.len().unwrap(), 1);
    baseline.close().unwrap();
}

#[test]
fn test_open_on_directory_fails() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(SqliteBaseline::open(tmp.path()).is_err());
}

#[test]
fn test_open_garbage_file_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("not-a-db");
    std::fs::write(&db_path, vec![0x42u8; 4096]).unwrap();
    assert!(SqliteBaseline::open(&db_path).is_err());
}
