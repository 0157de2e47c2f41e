//! Update outcomes

/// Result of executing a version-guarded update
///
/// A conflict is an expected outcome, not an error: another writer changed
/// or deleted the row since the caller read its token, or the row never
/// existed. The caller decides whether to re-read and retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The row matched and was rewritten with the new token
    Applied {
        /// Rows reported by the store
        rows: u64,
    },
    /// No row matched the key and version predicates
    Conflict,
}

impl UpdateOutcome {
    /// Classify a rows-affected count
    pub fn from_rows_affected(rows: u64) -> Self {
        if rows == 0 {
            UpdateOutcome::Conflict
        } else {
            UpdateOutcome::Applied { rows }
        }
    }

    /// Check if the update was applied
    pub fn is_applied(&self) -> bool {
        matches!(self, UpdateOutcome::Applied { .. })
    }

    /// Check if the update hit a version conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, UpdateOutcome::Conflict)
    }

    /// Rows the store reported as affected
    pub fn rows_affected(&self) -> u64 {
        match self {
            UpdateOutcome::Applied { rows } => *rows,
            UpdateOutcome::Conflict => 0,
        }
    }
}
