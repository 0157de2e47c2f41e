//! Update Tests
//!
//! - Successful updates rotate the token
//! - Stale tokens affect zero rows and change nothing
//! - Re-reading recovers from a conflict

use crate::*;

/// Two readers of the same version; the second writer loses
#[test]
fn test_concurrency() {
    for repo in each_repo() {
        let mut e = TestEntity::new(3, "created");
        repo.insert(&mut e).unwrap();

        let mut ec = repo.fetch(3).unwrap().unwrap();
        assert_eq!(e.id, ec.id);
        assert_eq!(e.version, ec.version);

        e.name = "first name".into();
        let outcome = repo.update(&mut e).unwrap();
        assert_eq!(outcome.rows_affected(), 1, "{}", repo.name());
        assert_eq!(e.name, "first name");
        assert!(e.version.is_present());
        assert_ne!(e.version, ec.version);

        ec.name = "second time".into();
        let outcome = repo.update(&mut ec).unwrap();
        assert_eq!(outcome.rows_affected(), 0, "{}", repo.name());
        assert!(outcome.is_conflict());

        let stored = repo.fetch(3).unwrap().unwrap();
        assert_eq!(stored.name, "first name");
        assert_eq!(stored.version, e.version);
    }
}

/// The new token is visible on re-read
#[test]
fn test_update_rotates_persisted_token() {
    for repo in each_repo() {
        let mut e = TestEntity::new(1, "v1");
        repo.insert(&mut e).unwrap();

        let mut seen = vec![e.version.clone()];
        for i in 2..=5 {
            e.name = format!("v{}", i);
            assert!(repo.update(&mut e).unwrap().is_applied());
            assert!(!seen.contains(&e.version), "{}", repo.name());
            seen.push(e.version.clone());

            assert_eq!(repo.fetch(1).unwrap().unwrap(), e);
        }
    }
}

/// A conflicted record keeps its stale token
#[test]
fn test_conflict_keeps_callers_token() {
    for repo in each_repo() {
        let mut a = TestEntity::new(1, "a");
        repo.insert(&mut a).unwrap();
        let mut b = repo.fetch(1).unwrap().unwrap();
        let stale = b.version.clone();

        a.name = "a2".into();
        repo.update(&mut a).unwrap();

        b.name = "b2".into();
        assert!(repo.update(&mut b).unwrap().is_conflict());
        assert_eq!(b.version, stale);
    }
}

/// Re-read then retry succeeds
#[test]
fn test_retry_after_reread() {
    for repo in each_repo() {
        let mut a = TestEntity::new(1, "a");
        repo.insert(&mut a).unwrap();
        let mut b = repo.fetch(1).unwrap().unwrap();

        a.name = "from a".into();
        repo.update(&mut a).unwrap();

        b.name = "from b".into();
        assert!(repo.update(&mut b).unwrap().is_conflict());

        let mut fresh = repo.fetch(1).unwrap().unwrap();
        fresh.name = "from b".into();
        assert!(repo.update(&mut fresh).unwrap().is_applied());
        assert_eq!(repo.fetch(1).unwrap().unwrap().name, "from b");
    }
}

/// Updating a deleted or never-inserted row is a conflict, not an error
#[test]
fn test_update_missing_row() {
    for repo in each_repo() {
        let mut ghost = TestEntity::new(99, "ghost");
        ghost.version = VersionToken::from_value("never-stored");
        let outcome = repo.update(&mut ghost).unwrap();
        assert!(outcome.is_conflict(), "{}", repo.name());
        assert!(repo.fetch(99).unwrap().is_none());
    }
}

/// Conflict converted to an error on request
#[test]
fn test_conflict_into_result() {
    for repo in each_repo() {
        let mut a = TestEntity::new(1, "a");
        repo.insert(&mut a).unwrap();
        let mut b = repo.fetch(1).unwrap().unwrap();

        assert_eq!(repo.update(&mut a).unwrap().into_result().unwrap(), 1);

        let err = repo.update(&mut b).unwrap().into_result().unwrap_err();
        assert!(err.is_conflict());
        assert!(err.is_retryable());
    }
}
