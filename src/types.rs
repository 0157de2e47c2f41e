//! Public types for the verlock API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// Token and values
pub use verlock_core::{Row, ScalarValue, VersionToken};

// Statements, for custom stores and hook callers
pub use verlock_core::{ColumnAssignment, InsertStatement, Predicate, TableRef, UpdateStatement};

// Binder
pub use verlock_concurrency::{
    BeforeInsert, BeforeUpdate, FieldDescriptor, HookId, MissingTokenPolicy, StatementContext,
    UpdateOutcome, VersionBinder,
};

// Stores
pub use verlock_storage::{MemoryStore, Store};

#[cfg(feature = "sqlite")]
pub use verlock_storage::SqliteStore;
