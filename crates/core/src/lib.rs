//! Core types for verlock
//!
//! This crate defines the types shared by every layer:
//! - [`VersionToken`]: opaque version tag stamped on records
//! - [`ScalarValue`]: column values at the store boundary
//! - [`Row`]: a record as read back from a store
//! - [`InsertStatement`] / [`UpdateStatement`]: statements hooks edit and
//!   stores execute

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod row;
pub mod statement;
pub mod token;
pub mod value;

pub use error::{Error, Result};
pub use row::Row;
pub use statement::{ColumnAssignment, InsertStatement, Predicate, TableRef, UpdateStatement};
pub use token::VersionToken;
pub use value::ScalarValue;
