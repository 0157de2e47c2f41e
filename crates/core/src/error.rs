//! Error types for the core layer
//!
//! Every fallible operation below the facade returns [`Result`]. The variants
//! fall into three groups:
//! - decoding: a stored or wire value could not become the requested type
//! - store execution: the persistence layer rejected or failed a statement
//! - policy: the binder refused to build a statement
//!
//! A version conflict is deliberately absent here. It is reported as an
//! update that affected zero rows, not as an error.

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// A stored or serialized value could not be decoded
    #[error("decoding error: {0}")]
    Decoding(String),

    /// A column held a different scalar type than requested
    #[error("wrong type for column '{column}': expected {expected}, got {actual}")]
    WrongType {
        /// Column name
        column: String,
        /// Expected scalar type
        expected: &'static str,
        /// Scalar type found
        actual: &'static str,
    },

    /// A row did not contain a required column
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// A key value cannot address a row (null or floating point)
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The store rejected a statement (duplicate key, missing table, ...)
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// The store failed to execute a statement
    #[error("store error: {0}")]
    Store(String),

    /// An update was attempted without a version token under a policy that
    /// requires one
    #[error("update of {table} has no version token in column '{column}'")]
    MissingVersion {
        /// Target table
        table: String,
        /// Version column
        column: String,
    },

    /// Serialization failed
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a decoding error
    pub fn is_decoding(&self) -> bool {
        matches!(self, Error::Decoding(_) | Error::WrongType { .. })
    }

    /// Check if this error came from statement execution in the store
    pub fn is_store(&self) -> bool {
        matches!(self, Error::Constraint(_) | Error::Store(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        if e.is_data() || e.is_syntax() || e.is_eof() {
            Error::Decoding(e.to_string())
        } else {
            Error::Serialization(e.to_string())
        }
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        use rusqlite::Error as SqlError;
        match e {
            SqlError::FromSqlConversionFailure(_, _, inner) => Error::Decoding(inner.to_string()),
            SqlError::InvalidColumnType(_, name, ty) => Error::Decoding(format!(
                "column '{}' has unexpected type {}",
                name, ty
            )),
            SqlError::SqliteFailure(code, msg)
                if code.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Error::Constraint(msg.unwrap_or_else(|| code.to_string()))
            }
            other => Error::Store(other.to_string()),
        }
    }
}
