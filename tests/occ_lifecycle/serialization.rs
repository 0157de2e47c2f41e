//! Token Representation Tests
//!
//! - JSON: string when present, null when absent
//! - Storage: Text when present, NULL when absent
//! - Malformed stored values are decoding errors

use crate::*;
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct EntityDto {
    id: i64,
    name: String,
    version: VersionToken,
}

/// A numeric column in a schemaless store is rejected, not coerced
#[test]
fn test_numeric_stored_token_is_decoding_error() {
    let store = memory_store();
    let mut stmt = InsertStatement::new(TestEntity::TABLE);
    stmt.set_column("id", 1);
    stmt.set_column("name", "a");
    stmt.set_column("version", 42);
    store.insert(&stmt).unwrap();

    let err = Repository::new(store).fetch::<TestEntity>(1).unwrap_err();
    assert!(err.is_decoding(), "{:?}", err);
}

#[test]
fn test_json_null_is_absent() {
    let dto: EntityDto =
        serde_json::from_str(r#"{"id":1,"name":"a","version":null}"#).unwrap();
    assert!(!dto.version.is_present());
    assert_eq!(VersionToken::from_json_bytes(b"null").unwrap(), VersionToken::absent());
}

#[test]
fn test_json_non_string_is_decoding_error() {
    assert!(serde_json::from_str::<EntityDto>(r#"{"id":1,"name":"a","version":7}"#).is_err());
    for input in [&b"7"[..], b"false", b"{\"v\":1}"] {
        let err = VersionToken::from_json_bytes(input).unwrap_err();
        assert!(err.is_decoding());
    }
}

#[test]
fn test_json_after_insert() {
    let repo = memory_repo();
    let mut e = TestEntity::new(1, "a");
    repo.insert(&mut e).unwrap();

    let dto = EntityDto {
        id: e.id,
        name: e.name.clone(),
        version: e.version.clone(),
    };
    let json = serde_json::to_string(&dto).unwrap();
    assert!(json.contains(&format!(r#""version":"{}""#, e.version)));

    let back: EntityDto = serde_json::from_str(&json).unwrap();
    assert_eq!(back, dto);
}

/// A version column holding non-UTF-8 bytes cannot be read as a token
#[test]
fn test_malformed_stored_token_is_decoding_error() {
    let store = sqlite_store();
    store
        .execute_batch("INSERT INTO test_entities (id, name, version) VALUES (1, 'a', X'FFFE')")
        .unwrap();
    let repo = Repository::new(store);

    let err = repo.fetch::<TestEntity>(1).unwrap_err();
    assert!(err.is_decoding(), "{:?}", err);
}

/// NULL version column reads as absent
#[test]
fn test_null_stored_token_is_absent() {
    let store = sqlite_store();
    store
        .execute_batch("INSERT INTO test_entities (id, name, version) VALUES (1, 'legacy', NULL)")
        .unwrap();
    let repo = Repository::new(store);

    let mut legacy: TestEntity = repo.fetch(1).unwrap().unwrap();
    assert!(!legacy.version.is_present());

    // Legacy rows without a version are adopted on first update.
    legacy.name = "adopted".into();
    assert!(repo.update(&mut legacy).unwrap().is_applied());
    assert!(repo.fetch::<TestEntity>(1).unwrap().unwrap().version.is_present());
}

proptest! {
    #[test]
    fn prop_storage_round_trip(value in proptest::option::of("[a-zA-Z0-9_-]{0,40}")) {
        let token = VersionToken::from(value);
        prop_assert_eq!(VersionToken::scan(&token.encode()).unwrap(), token);
    }
}
