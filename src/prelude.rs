//! Convenient imports for verlock.
//!
//! ```ignore
//! use verlock::prelude::*;
//!
//! let repo = Repository::new(MemoryStore::new());
//! ```

// Main entry point
pub use crate::repository::{Repository, RepositoryBuilder, UpdateOutcomeExt};

// Error handling
pub use crate::error::{Error, Result};

// Records and tokens
pub use crate::record::Record;
pub use crate::types::{Row, ScalarValue, UpdateOutcome, VersionToken};

// Stores
pub use crate::types::{MemoryStore, Store};

#[cfg(feature = "sqlite")]
pub use crate::types::SqliteStore;
