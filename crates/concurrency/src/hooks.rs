//! Lifecycle hook interfaces
//!
//! A persistence layer (or a thin adapter over one) calls these at two
//! points, after it has built a statement from a record and before it
//! executes it:
//!
//! ```text
//! insert: build InsertStatement -> before_insert -> execute
//! update: build UpdateStatement -> before_update -> execute -> rows affected
//! ```
//!
//! Hooks only edit statements and the in-memory token. They never talk to
//! the store.

use crate::context::StatementContext;
use verlock_core::{InsertStatement, Result, UpdateStatement, VersionToken};

/// Runs before an insert statement is executed
pub trait BeforeInsert {
    /// Adjust the statement and the record's token
    ///
    /// Changes to `token` are visible to the caller after the call, so the
    /// in-memory record reflects what is written.
    fn before_insert(
        &self,
        token: &mut VersionToken,
        stmt: &mut InsertStatement,
        ctx: &mut StatementContext,
    ) -> Result<()>;
}

/// Runs before an update statement is executed
pub trait BeforeUpdate {
    /// Adjust the statement given the record's current token
    ///
    /// Returns the token the statement will write. The caller installs it on
    /// the record only if the update affects a row.
    fn before_update(
        &self,
        token: &VersionToken,
        stmt: &mut UpdateStatement,
        ctx: &mut StatementContext,
    ) -> Result<VersionToken>;
}
