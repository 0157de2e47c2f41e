//! Version lifecycle integration tests
//!
//! Every scenario runs against both stores through the public repository API.
//!
//! ## Modules
//!
//! - insert: token stamping on create
//! - update: token rotation and stale-token conflicts
//! - concurrency: many writers holding the same token
//! - policy: missing-token policy and configuration
//! - serialization: token JSON and storage representations

mod concurrency;
mod policy;
mod serialization;
mod update;

pub use verlock::prelude::*;
pub use verlock::{Config, InsertStatement, MissingTokenPolicy};

pub const SCHEMA: &str = "CREATE TABLE test_entities (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    version TEXT
)";

/// Record used by every test
#[derive(Debug, Clone, PartialEq)]
pub struct TestEntity {
    pub id: i64,
    pub name: String,
    pub version: VersionToken,
}

impl TestEntity {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            version: VersionToken::absent(),
        }
    }
}

impl Record for TestEntity {
    const TABLE: &'static str = "test_entities";
    const KEY_COLUMN: &'static str = "id";

    fn key(&self) -> ScalarValue {
        self.id.into()
    }

    fn columns(&self) -> Vec<(&'static str, ScalarValue)> {
        vec![("name", self.name.as_str().into())]
    }

    fn version(&self) -> &VersionToken {
        &self.version
    }

    fn version_mut(&mut self) -> &mut VersionToken {
        &mut self.version
    }

    fn from_row(row: &Row) -> verlock_core::Result<Self> {
        Ok(TestEntity {
            id: row.integer("id")?,
            name: row.text("name")?,
            version: VersionToken::absent(),
        })
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn memory_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.create_table(TestEntity::TABLE, TestEntity::KEY_COLUMN);
    store
}

pub fn sqlite_store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    store.execute_batch(SCHEMA).unwrap();
    store
}

pub fn memory_repo() -> Repository<MemoryStore> {
    init_tracing();
    Repository::new(memory_store())
}

pub fn sqlite_repo() -> Repository<SqliteStore> {
    init_tracing();
    Repository::new(sqlite_store())
}

/// One fresh repository per store
pub fn each_repo() -> Vec<AnyRepo> {
    vec![
        AnyRepo::Memory(memory_repo()),
        AnyRepo::Sqlite(sqlite_repo()),
    ]
}

/// A repository over either store
#[derive(Clone)]
pub enum AnyRepo {
    Memory(Repository<MemoryStore>),
    Sqlite(Repository<SqliteStore>),
}

impl AnyRepo {
    pub fn insert(&self, e: &mut TestEntity) -> Result<u64> {
        match self {
            AnyRepo::Memory(r) => r.insert(e),
            AnyRepo::Sqlite(r) => r.insert(e),
        }
    }

    pub fn update(&self, e: &mut TestEntity) -> Result<UpdateOutcome> {
        match self {
            AnyRepo::Memory(r) => r.update(e),
            AnyRepo::Sqlite(r) => r.update(e),
        }
    }

    pub fn fetch(&self, id: i64) -> Result<Option<TestEntity>> {
        match self {
            AnyRepo::Memory(r) => r.fetch(id),
            AnyRepo::Sqlite(r) => r.fetch(id),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnyRepo::Memory(_) => "memory",
            AnyRepo::Sqlite(_) => "sqlite",
        }
    }
}
