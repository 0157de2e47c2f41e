//! Missing-Token Policy Tests
//!
//! An update of a record that was never read carries no token. By default
//! it is written without a version predicate; with the reject policy it
//! fails before reaching the store.

use crate::*;

fn rejecting_memory_repo() -> Repository<MemoryStore> {
    init_tracing();
    Repository::builder(memory_store())
        .reject_missing_token()
        .build()
}

/// Default: unconditional update, new token stamped
#[test]
fn test_skip_predicate_updates_unconditionally() {
    for repo in each_repo() {
        let mut e = TestEntity::new(1, "stored");
        repo.insert(&mut e).unwrap();

        let mut blind = TestEntity::new(1, "blind write");
        let outcome = repo.update(&mut blind).unwrap();
        assert!(outcome.is_applied(), "{}", repo.name());
        assert!(blind.version.is_present());
        assert_ne!(blind.version, e.version);

        let stored = repo.fetch(1).unwrap().unwrap();
        assert_eq!(stored.name, "blind write");
        assert_eq!(stored.version, blind.version);
    }
}

/// Reject: error, store untouched
#[test]
fn test_reject_policy_fails_before_store() {
    let repo = rejecting_memory_repo();
    let mut e = TestEntity::new(1, "stored");
    repo.insert(&mut e).unwrap();

    let mut blind = TestEntity::new(1, "blind write");
    let err = repo.update(&mut blind).unwrap_err();
    assert!(matches!(err, Error::MissingVersion(_)));
    assert!(!blind.version.is_present());

    assert_eq!(repo.fetch::<TestEntity>(1).unwrap().unwrap(), e);
}

/// Reject policy still allows normal read-modify-write
#[test]
fn test_reject_policy_allows_versioned_updates() {
    let repo = rejecting_memory_repo();
    let mut e = TestEntity::new(1, "stored");
    repo.insert(&mut e).unwrap();

    e.name = "changed".into();
    assert!(repo.update(&mut e).unwrap().is_applied());
}

/// Policy and column loaded from TOML
#[test]
fn test_config_from_toml() {
    let config = Config::from_toml_str(
        r#"
        version_column = "version"
        missing_token_policy = "reject"
        "#,
    )
    .unwrap();
    let repo = Repository::builder(sqlite_store()).config(config).build();
    assert_eq!(repo.config().missing_token_policy, MissingTokenPolicy::Reject);

    let mut blind = TestEntity::new(1, "x");
    repo.insert(&mut TestEntity::new(1, "stored")).unwrap();
    assert!(matches!(
        repo.update(&mut blind),
        Err(Error::MissingVersion(_))
    ));
}

/// File-backed SQLite keeps tokens across reopen
#[test]
fn test_sqlite_file_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("occ.db");

    let mut e = TestEntity::new(1, "durable");
    {
        let store = SqliteStore::open(&path).unwrap();
        store.execute_batch(SCHEMA).unwrap();
        Repository::new(store).insert(&mut e).unwrap();
    }

    let repo = Repository::new(SqliteStore::open(&path).unwrap());
    let mut loaded: TestEntity = repo.fetch(1).unwrap().unwrap();
    assert_eq!(loaded.version, e.version);

    loaded.name = "changed".into();
    assert!(repo.update(&mut loaded).unwrap().is_applied());
    assert!(repo.update(&mut e).unwrap().is_conflict());
}
