//! Optimistic concurrency for version-controlled records
//!
//! This crate implements the lifecycle binding between records and statements:
//! - BeforeInsert / BeforeUpdate: hook points a persistence layer invokes
//! - VersionBinder: stamps tokens on insert, adds the version predicate and
//!   a fresh token on update
//! - StatementContext: per-statement record of hooks that already ran
//! - UpdateOutcome: applied vs. conflict, from the rows-affected count

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod binder;
pub mod context;
pub mod hooks;
pub mod outcome;

pub use binder::{FieldDescriptor, MissingTokenPolicy, VersionBinder, DEFAULT_VERSION_COLUMN};
pub use context::{HookId, StatementContext};
pub use hooks::{BeforeInsert, BeforeUpdate};
pub use outcome::UpdateOutcome;
