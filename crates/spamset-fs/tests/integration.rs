use spamset_fs::{AtomicWriteOptions, atomic_write, ensure_dir, find_by_name};
use tempfile::tempdir;

#[test]
fn test_atomic_write_replaces_existing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("existing.txt");

    std::fs::write(&path, "original").unwrap();
    atomic_write(&path, b"new content", AtomicWriteOptions::new()).unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), b"new content");
}

#[test]
fn test_ensure_dir_is_idempotent() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("a/b/c");

    ensure_dir(&nested).unwrap();
    ensure_dir(&nested).unwrap();

    assert!(nested.is_dir());
}

#[test]
fn test_find_by_name_prefers_direct_child() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("aaa")).unwrap();
    std::fs::write(dir.path().join("aaa/payload"), "nested").unwrap();
    std::fs::write(dir.path().join("payload"), "direct").unwrap();

    let found = find_by_name(dir.path(), "payload").unwrap().unwrap();
    assert_eq!(found, dir.path().join("payload"));
}

#[test]
fn test_find_by_name_walks_nested_directories() {
    let dir = tempdir().unwrap();
    let deep = dir.path().join("extract/inner");
    std::fs::create_dir_all(&deep).unwrap();
    std::fs::write(deep.join("payload"), "data").unwrap();

    let found = find_by_name(dir.path(), "payload").unwrap().unwrap();
    assert_eq!(found, deep.join("payload"));
}

#[test]
fn test_find_by_name_first_match_in_name_order() {
    let dir = tempdir().unwrap();
    for sub in ["b", "a"] {
        std::fs::create_dir_all(dir.path().join(sub)).unwrap();
        std::fs::write(dir.path().join(sub).join("payload"), sub).unwrap();
    }

    let found = find_by_name(dir.path(), "payload").unwrap().unwrap();
    assert_eq!(found, dir.path().join("a/payload"));
}

#[test]
fn test_find_by_name_requires_exact_name() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("payload.txt"), "x").unwrap();
    std::fs::create_dir_all(dir.path().join("payload")).unwrap();

    assert!(find_by_name(dir.path(), "payload").unwrap().is_none());
}
