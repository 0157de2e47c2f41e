//! Storage layer for verlock
//!
//! This crate implements the persistence side of the version protocol:
//! - Store: execute prepared insert/update statements, report rows affected
//! - MemoryStore: DashMap-sharded tables with lock-held conditional update
//! - SqliteStore: rusqlite-backed store, one `UPDATE ... WHERE` per update

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod store;

pub use memory::{MemoryStore, RowKey};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
pub use store::Store;
