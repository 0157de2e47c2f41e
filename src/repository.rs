//! Repository: records in, statements out.
//!
//! [`Repository`] turns [`Record`]s into statements, runs the version hooks on
//! them, and hands them to a [`Store`].
//!
//! # Example
//!
//! ```ignore
//! use verlock::prelude::*;
//!
//! let repo = Repository::new(store);
//!
//! let mut account = Account::new(1, "alice");
//! repo.insert(&mut account)?;              // token stamped
//!
//! account.owner = "bob".into();
//! match repo.update(&mut account)? {
//!     UpdateOutcome::Applied { .. } => {}  // token replaced
//!     UpdateOutcome::Conflict => {}        // someone else won; re-read
//! }
//! ```

use crate::config::Config;
use crate::error::{Error, Result};
use crate::record::Record;
use std::sync::Arc;
use tracing::debug;
use verlock_concurrency::{
    BeforeInsert, BeforeUpdate, FieldDescriptor, MissingTokenPolicy, StatementContext,
    UpdateOutcome, VersionBinder,
};
use verlock_core::{InsertStatement, Predicate, ScalarValue, UpdateStatement};
use verlock_storage::Store;

/// Version-enforcing access to a store.
///
/// Cloning is cheap; clones share the store.
pub struct Repository<S: Store> {
    store: Arc<S>,
    config: Config,
}

impl<S: Store> Clone for Repository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<S: Store> Repository<S> {
    /// Create a repository with default settings.
    pub fn new(store: S) -> Self {
        Self::builder(store).build()
    }

    /// Create a builder for repository configuration.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let repo = Repository::builder(store)
    ///     .reject_missing_token()
    ///     .build();
    /// ```
    pub fn builder(store: S) -> RepositoryBuilder<S> {
        RepositoryBuilder::new(Arc::new(store))
    }

    /// Create a repository over a shared store.
    pub fn with_shared(store: Arc<S>) -> Self {
        RepositoryBuilder::new(store).build()
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn version_column<R: Record>(&self) -> &str {
        self.config
            .version_column
            .as_deref()
            .unwrap_or(R::VERSION_COLUMN)
    }

    fn binder<R: Record>(&self) -> VersionBinder {
        VersionBinder::new(FieldDescriptor::new(self.version_column::<R>()))
            .with_policy(self.config.missing_token_policy)
    }

    /// Insert a record.
    ///
    /// An absent token is replaced with a fresh one before the statement
    /// runs, so the record carries the value that was written. A token the
    /// caller set is written unchanged.
    ///
    /// Returns rows affected.
    pub fn insert<R: Record>(&self, record: &mut R) -> Result<u64> {
        let mut stmt = InsertStatement::new(R::TABLE);
        stmt.set_column(R::KEY_COLUMN, record.key());
        for (column, value) in record.columns() {
            stmt.set_column(column, value);
        }

        let mut ctx = StatementContext::new();
        self.binder::<R>()
            .before_insert(record.version_mut(), &mut stmt, &mut ctx)?;

        let rows = self.store.insert(&stmt)?;
        debug!(table = R::TABLE, key = %record.key(), version = %record.version(), "inserted record");
        Ok(rows)
    }

    /// Update a record if nobody else has since its token was read.
    ///
    /// Writes every column from [`Record::columns`] plus a fresh token in one
    /// conditional statement. On [`UpdateOutcome::Applied`] the record holds
    /// the new token. On [`UpdateOutcome::Conflict`] nothing was written and
    /// the record keeps its old token; re-read with [`Repository::fetch`] to
    /// retry.
    ///
    /// Store failures are returned as errors, never as a conflict.
    pub fn update<R: Record>(&self, record: &mut R) -> Result<UpdateOutcome> {
        let binder = self.binder::<R>();
        let mut stmt = UpdateStatement::new(R::TABLE, R::KEY_COLUMN, record.key());
        for (column, value) in record.columns() {
            stmt.set_column(column, value);
        }

        let mut ctx = StatementContext::new();
        let staged = binder.before_update(record.version(), &mut stmt, &mut ctx)?;
        let rows = self.store.update(&stmt)?;
        Ok(binder.finish_update(record.version_mut(), staged, R::TABLE, rows))
    }

    /// Read a record by key, with its stored token.
    pub fn fetch<R: Record>(&self, key: impl Into<ScalarValue>) -> Result<Option<R>> {
        let key = Predicate::eq(R::KEY_COLUMN, key);
        let Some(row) = self.store.fetch(R::TABLE, &key)? else {
            return Ok(None);
        };

        let mut record = R::from_row(&row)?;
        *record.version_mut() = row.token(self.version_column::<R>())?;
        Ok(Some(record))
    }
}

/// Conflict-as-error conversion for callers that prefer `?`.
pub trait UpdateOutcomeExt {
    /// `Ok(rows)` if applied, [`Error::Conflict`] otherwise.
    fn into_result(self) -> Result<u64>;
}

impl UpdateOutcomeExt for UpdateOutcome {
    fn into_result(self) -> Result<u64> {
        match self {
            UpdateOutcome::Applied { rows } => Ok(rows),
            UpdateOutcome::Conflict => Err(Error::Conflict(
                "row was modified or deleted since it was read".to_string(),
            )),
        }
    }
}

/// Builder for repository configuration.
pub struct RepositoryBuilder<S: Store> {
    store: Arc<S>,
    config: Config,
}

impl<S: Store> RepositoryBuilder<S> {
    fn new(store: Arc<S>) -> Self {
        Self {
            store,
            config: Config::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Use one version column name for every record type.
    pub fn version_column(mut self, column: impl Into<String>) -> Self {
        self.config.version_column = Some(column.into());
        self
    }

    /// Fail updates of records that carry no token.
    pub fn reject_missing_token(mut self) -> Self {
        self.config.missing_token_policy = MissingTokenPolicy::Reject;
        self
    }

    /// Update records without a token unconditionally (default).
    pub fn skip_missing_token(mut self) -> Self {
        self.config.missing_token_policy = MissingTokenPolicy::SkipPredicate;
        self
    }

    /// Build the repository.
    pub fn build(self) -> Repository<S> {
        Repository {
            store: self.store,
            config: self.config,
        }
    }
}
