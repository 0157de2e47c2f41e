//! The persistence boundary
//!
//! A [`Store`] executes statements that the binder has already prepared. It
//! knows nothing about version tokens: the version predicate is just another
//! predicate, the new token just another assignment.
//!
//! ## Contract
//!
//! - `update` evaluates the key predicate, every extra predicate, and the
//!   assignments as ONE atomic step, and reports how many rows it changed.
//!   A separate read followed by a write would reopen the race the version
//!   predicate exists to close.
//! - Zero rows affected is a normal return, not an error.
//! - Execution failures (missing table, duplicate key, I/O) are errors and
//!   are never reported as zero rows.

use verlock_core::{InsertStatement, Predicate, Result, Row, UpdateStatement};

/// A store that can execute single-row statements
pub trait Store: Send + Sync {
    /// Insert one row, returning rows affected
    fn insert(&self, stmt: &InsertStatement) -> Result<u64>;

    /// Conditionally update one row, returning rows affected
    fn update(&self, stmt: &UpdateStatement) -> Result<u64>;

    /// Read the row matching `key`
    fn fetch(&self, table: &str, key: &Predicate) -> Result<Option<Row>>;
}

impl<S: Store + ?Sized> Store for std::sync::Arc<S> {
    fn insert(&self, stmt: &InsertStatement) -> Result<u64> {
        (**self).insert(stmt)
    }

    fn update(&self, stmt: &UpdateStatement) -> Result<u64> {
        (**self).update(stmt)
    }

    fn fetch(&self, table: &str, key: &Predicate) -> Result<Option<Row>> {
        (**self).fetch(table, key)
    }
}
