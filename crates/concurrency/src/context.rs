//! Statement-scoped hook bookkeeping
//!
//! A persistence layer may invoke a hook more than once while building one
//! statement (once per field, once per build phase). Hooks that must act at
//! most once record themselves in the [`StatementContext`] that travels with
//! the statement, and skip their work when they find their own [`HookId`].

use rustc_hash::FxHashSet;

/// Identifies a hook that has already modified the current statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HookId {
    /// Version predicate and new token for the named column
    VersionPredicate(String),
}

/// Per-statement context passed into every hook invocation
///
/// Create one per logical statement and drop it after execution.
#[derive(Debug, Default)]
pub struct StatementContext {
    applied: FxHashSet<HookId>,
}

impl StatementContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a hook already ran for this statement
    pub fn is_applied(&self, hook: &HookId) -> bool {
        self.applied.contains(hook)
    }

    /// Record that a hook ran
    ///
    /// Returns `false` if it was already recorded.
    pub fn mark_applied(&mut self, hook: HookId) -> bool {
        self.applied.insert(hook)
    }

    /// Number of hooks recorded
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }
}
