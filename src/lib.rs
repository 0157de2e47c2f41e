//! # Verlock
//!
//! Optimistic concurrency control for persisted records.
//!
//! Each version-controlled record carries an opaque [`VersionToken`]. Inserts
//! stamp a fresh token; updates are written only if the stored token still
//! equals the one the caller read, and stamp a new one in the same statement.
//! A lost race shows up as zero rows affected, reported as
//! [`UpdateOutcome::Conflict`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use verlock::prelude::*;
//!
//! let store = SqliteStore::open_in_memory()?;
//! store.execute_batch("CREATE TABLE accounts (id INTEGER PRIMARY KEY, owner TEXT, version TEXT)")?;
//! let repo = Repository::new(store);
//!
//! let mut account = Account { id: 1, owner: "alice".into(), version: VersionToken::absent() };
//! repo.insert(&mut account)?;
//!
//! account.owner = "bob".into();
//! if repo.update(&mut account)?.is_conflict() {
//!     // re-read and decide
//! }
//! ```
//!
//! ## Layers
//!
//! - `verlock-core` - tokens, scalar values, statements
//! - `verlock-concurrency` - insert/update hooks and the version binder
//! - `verlock-storage` - stores that execute statements atomically
//! - this crate - [`Record`], [`Repository`], [`Config`]

#![warn(missing_docs)]

mod config;
mod error;
mod record;
mod repository;
mod types;

pub mod prelude;

// Re-export main entry points
pub use config::Config;
pub use error::{Error, Result};
pub use record::Record;
pub use repository::{Repository, RepositoryBuilder, UpdateOutcomeExt};

// Re-export types
pub use types::*;
