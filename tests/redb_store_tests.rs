#![cfg(feature = "redb")]

//! Redb adapter behavior: snapshot isolation, batches mapped to one write
//! transaction, and destroy/repair.

mod common;

use sublevel_store::prelude::*;

#[test]
fn test_redb_store_creation() {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = SublevelStore::redb(temp_dir.path().join("test.redb"));
    assert!(store.is_ok());
}

#[test]
fn test_reopen_existing_database() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("test.redb");

    {
        let store = SublevelStore::redb(&db_path).unwrap();
        store.sublevel("users").put("1", "alice").unwrap();
    }

    let store = SublevelStore::redb_open(&db_path).unwrap();
    assert_eq!(
        store.view().subview("users").get("1").unwrap().as_text(),
        Some("alice")
    );
}

#[test]
fn test_open_without_create_fails_on_missing_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = OpenConfig::builder()
        .path(temp_dir.path().join("absent.redb"))
        .create_if_missing(false)
        .build();

    assert!(matches!(
        SublevelStore::redb_with(&config),
        Err(SublevelError::RedbDatabase(_))
    ));
}

#[test]
fn test_batch_applies_in_one_transaction() {
    common::init_logging();
    let temp_dir = tempfile::tempdir().unwrap();
    let store = SublevelStore::redb(temp_dir.path().join("test.redb")).unwrap();
    let users = store.sublevel("users");

    let mut batch = users.batch().unwrap();
    batch.put("1", "alice").unwrap();
    batch.put("2", "bob").unwrap();
    assert!(!users.contains("1").unwrap());
    batch.commit().unwrap();

    assert_eq!(users.get("1").unwrap().as_text(), Some("alice"));
    assert_eq!(users.get("2").unwrap().as_text(), Some("bob"));
}

#[test]
fn test_dropped_batch_writes_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = SublevelStore::redb(temp_dir.path().join("test.redb")).unwrap();
    let users = store.sublevel("users");

    {
        let mut batch = users.batch().unwrap();
        batch.put("1", "alice").unwrap();
    }

    assert!(!users.contains("1").unwrap());
}

#[test]
fn test_snapshot_does_not_observe_later_writes() {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = SublevelStore::redb(temp_dir.path().join("test.redb")).unwrap();
    let users = store.sublevel("users");
    users.put("1", "alice").unwrap();

    let snapshot = store.snapshot().unwrap().subview("users");
    users.put("2", "bob").unwrap();
    users.delete("1").unwrap();

    // The snapshot still sees the old state; the live view sees the new one.
    assert_eq!(snapshot.get("1").unwrap().as_text(), Some("alice"));
    assert!(matches!(snapshot.get("2"), Err(SublevelError::NotFound { .. })));
    assert!(store.view().subview("users").contains("2").unwrap());
}

#[test]
fn test_snapshot_range_is_pinned_too() {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = SublevelStore::redb(temp_dir.path().join("test.redb")).unwrap();
    let users = store.sublevel("users");
    users.put("1", "alice").unwrap();

    let snapshot = store.snapshot().unwrap().subview("users");
    users.put("2", "bob").unwrap();

    let pinned: Vec<_> = snapshot
        .entries()
        .unwrap()
        .collect::<SublevelResult<Vec<_>>>()
        .unwrap();
    assert_eq!(pinned.len(), 1);

    let live: Vec<_> = store
        .view()
        .subview("users")
        .entries()
        .unwrap()
        .collect::<SublevelResult<Vec<_>>>()
        .unwrap();
    assert_eq!(live.len(), 2);
}

#[test]
fn test_destroy_removes_database_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("test.redb");

    {
        let store = SublevelStore::redb(&db_path).unwrap();
        store.sublevel("users").put("1", "alice").unwrap();
    }
    assert!(db_path.exists());

    let scratch_dir = tempfile::tempdir().unwrap();
    let scratch = SublevelStore::redb(scratch_dir.path().join("scratch.redb")).unwrap();
    scratch.destroy(&db_path).unwrap();
    assert!(!db_path.exists());
}

#[test]
fn test_repair_runs_integrity_check_on_closed_database() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("test.redb");

    {
        let store = SublevelStore::redb(&db_path).unwrap();
        store.sublevel("users").put("1", "alice").unwrap();
    }

    let scratch_dir = tempfile::tempdir().unwrap();
    let scratch = SublevelStore::redb(scratch_dir.path().join("scratch.redb")).unwrap();
    scratch.repair(&db_path).unwrap();

    // Data survives the check.
    let store = SublevelStore::redb_open(&db_path).unwrap();
    assert_eq!(
        store.view().subview("users").get("1").unwrap().as_text(),
        Some("alice")
    );
}
