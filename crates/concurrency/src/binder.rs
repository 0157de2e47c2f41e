//! Version binder
//!
//! [`VersionBinder`] enforces optimistic concurrency for one version column.
//!
//! ## Insert
//!
//! 1. If the record's token is absent, mint one and store it on the record
//! 2. Write the token to the version column
//!
//! A token the caller set explicitly is written unchanged. This lets import
//! and restore paths carry versions across stores.
//!
//! ## Update
//!
//! ```text
//! UPDATE t SET ..., version = <new>
//!  WHERE t.key = <key> AND t.version = <token the caller last read>
//! ```
//!
//! 1. If the record's token is present, require the stored column to equal it
//! 2. Stage a fresh token as a column assignment of the same statement
//! 3. After execution, [`VersionBinder::finish_update`] classifies the
//!    rows-affected count and installs the staged token on success
//!
//! The predicate and the new value travel in one statement, so the store's
//! single-statement atomicity is the compare-and-swap. Nothing is read first.

use crate::context::{HookId, StatementContext};
use crate::hooks::{BeforeInsert, BeforeUpdate};
use crate::outcome::UpdateOutcome;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use verlock_core::{
    Error, InsertStatement, Predicate, Result, ScalarValue, TableRef, UpdateStatement,
    VersionToken,
};

/// Default name of the version column
pub const DEFAULT_VERSION_COLUMN: &str = "version";

/// What to do when an update carries no token
///
/// A record whose token is absent was never read from (or written to) the
/// store, so there is nothing to compare against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingTokenPolicy {
    /// Update without a version predicate; a new token is still written
    #[default]
    SkipPredicate,
    /// Refuse to build the statement
    Reject,
}

/// Describes the version column of a record type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Column name in the store
    pub column: String,
}

impl FieldDescriptor {
    /// Describe a version column
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl Default for FieldDescriptor {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION_COLUMN)
    }
}

/// Insert and update hooks for one version column
#[derive(Debug, Clone, Default)]
pub struct VersionBinder {
    field: FieldDescriptor,
    policy: MissingTokenPolicy,
}

impl VersionBinder {
    /// Create a binder for a version column
    pub fn new(field: FieldDescriptor) -> Self {
        Self {
            field,
            policy: MissingTokenPolicy::default(),
        }
    }

    /// Set the policy for updates without a token
    pub fn with_policy(mut self, policy: MissingTokenPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The version column
    pub fn field(&self) -> &FieldDescriptor {
        &self.field
    }

    /// The policy for updates without a token
    pub fn policy(&self) -> MissingTokenPolicy {
        self.policy
    }

    fn predicate_hook(&self) -> HookId {
        HookId::VersionPredicate(self.field.column.clone())
    }

    fn stage(&self, stmt: &mut UpdateStatement) -> VersionToken {
        let staged = VersionToken::generate();
        stmt.set_column(self.field.column.as_str(), staged.encode());
        staged
    }

    /// Classify an executed update and install the staged token on success
    ///
    /// On conflict the record's token is left as it was, so the caller still
    /// holds the version it read and can decide what to do.
    pub fn finish_update(
        &self,
        token: &mut VersionToken,
        staged: VersionToken,
        table: &str,
        rows_affected: u64,
    ) -> UpdateOutcome {
        let outcome = UpdateOutcome::from_rows_affected(rows_affected);
        match outcome {
            UpdateOutcome::Conflict => {
                warn!(
                    table,
                    column = %self.field.column,
                    stale = %token,
                    "optimistic lock conflict: row changed or missing"
                );
            }
            UpdateOutcome::Applied { rows } => {
                if rows > 1 {
                    warn!(table, rows, "version-guarded update affected more than one row");
                }
                *token = staged;
            }
        }
        outcome
    }
}

impl BeforeInsert for VersionBinder {
    fn before_insert(
        &self,
        token: &mut VersionToken,
        stmt: &mut InsertStatement,
        _ctx: &mut StatementContext,
    ) -> Result<()> {
        if !token.is_present() {
            *token = VersionToken::generate();
            debug!(table = %stmt.table, version = %token, "stamped version on insert");
        }
        stmt.set_column(self.field.column.as_str(), token.encode());
        Ok(())
    }
}

impl BeforeUpdate for VersionBinder {
    fn before_update(
        &self,
        token: &VersionToken,
        stmt: &mut UpdateStatement,
        ctx: &mut StatementContext,
    ) -> Result<VersionToken> {
        let hook = self.predicate_hook();
        if ctx.is_applied(&hook) {
            // Reuse the token staged by the first invocation.
            return match stmt.assignment(&self.field.column) {
                Some(value) if !value.is_null() => VersionToken::scan(value),
                _ => Ok(self.stage(stmt)),
            };
        }

        match token.as_str() {
            Some(current) => {
                stmt.add_predicate(Predicate::Eq {
                    table: TableRef::Current,
                    column: self.field.column.clone(),
                    value: ScalarValue::Text(current.to_string()),
                });
                debug!(table = %stmt.table, expected = current, "added version predicate");
            }
            None => match self.policy {
                MissingTokenPolicy::SkipPredicate => {
                    debug!(table = %stmt.table, "update without version token, no predicate");
                }
                MissingTokenPolicy::Reject => {
                    return Err(Error::MissingVersion {
                        table: stmt.table.clone(),
                        column: self.field.column.clone(),
                    });
                }
            },
        }

        let staged = self.stage(stmt);
        ctx.mark_applied(hook);
        Ok(staged)
    }
}
