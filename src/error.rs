//! Unified error types for verlock.
//!
//! This module provides a clean error type that wraps internal errors
//! and presents a consistent interface to users.
//!
//! A version conflict is not produced by [`Repository::update`]; it returns
//! [`UpdateOutcome::Conflict`] instead. [`Error::Conflict`] only appears when a
//! caller opts into error-style handling with
//! [`UpdateOutcomeExt::into_result`].
//!
//! [`Repository::update`]: crate::Repository::update
//! [`UpdateOutcome::Conflict`]: crate::UpdateOutcome::Conflict
//! [`UpdateOutcomeExt::into_result`]: crate::UpdateOutcomeExt::into_result

use thiserror::Error;

/// All verlock errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A stored or serialized value could not be decoded
    #[error("decoding error: {0}")]
    Decoding(String),

    /// The store failed to execute a statement (constraint, I/O, schema)
    #[error("store error: {0}")]
    Store(String),

    /// Optimistic lock conflict surfaced as an error
    #[error("conflict: {0}")]
    Conflict(String),

    /// Update without a version token under a policy that requires one
    #[error("missing version: {0}")]
    MissingVersion(String),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type for verlock operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is retryable.
    ///
    /// Conflicts may succeed on retry after re-reading the record.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }

    /// Check if this is a conflict error.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }

    /// Check if this is a decoding error.
    pub fn is_decoding(&self) -> bool {
        matches!(self, Error::Decoding(_))
    }

    /// Check if this came from statement execution.
    pub fn is_store(&self) -> bool {
        matches!(self, Error::Store(_))
    }
}

// Convert from internal core errors
impl From<verlock_core::Error> for Error {
    fn from(e: verlock_core::Error) -> Self {
        use verlock_core::Error as CoreError;
        match e {
            CoreError::Decoding(msg) => Error::Decoding(msg),
            e @ CoreError::WrongType { .. } => Error::Decoding(e.to_string()),
            CoreError::MissingColumn(column) => {
                Error::Decoding(format!("missing column '{}'", column))
            }
            CoreError::InvalidKey(msg) => Error::Store(format!("invalid key: {}", msg)),
            CoreError::Constraint(msg) => Error::Store(format!("constraint violation: {}", msg)),
            CoreError::Store(msg) => Error::Store(msg),
            CoreError::MissingVersion { table, column } => {
                Error::MissingVersion(format!("{}.{}", table, column))
            }
            CoreError::Serialization(msg) => Error::Decoding(msg),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Configuration(e.to_string())
    }
}
