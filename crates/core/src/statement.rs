//! Statement model shared by the binder and the stores
//!
//! Statements are plain data. Lifecycle hooks edit them before they are
//! handed to a store; the store renders and executes them in one step and
//! reports how many rows were affected.
//!
//! ```text
//! InsertStatement { table, assignments }
//! UpdateStatement { table, key, assignments, predicates }
//! ```
//!
//! An update matches a row only if the key predicate and every extra
//! predicate hold. That conjunction is what turns a version predicate into a
//! compare-and-swap.

use crate::value::ScalarValue;

/// Which table a predicate column belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRef {
    /// The statement's own target table
    Current,
    /// A table named explicitly
    Named(String),
}

impl TableRef {
    /// Resolve against the statement's target table
    pub fn resolve<'a>(&'a self, current: &'a str) -> &'a str {
        match self {
            TableRef::Current => current,
            TableRef::Named(name) => name,
        }
    }
}

/// `SET column = value`
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnAssignment {
    /// Column name
    pub column: String,
    /// Value written
    pub value: ScalarValue,
}

/// A filter on the target row
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `table.column = value`
    Eq {
        /// Table the column belongs to
        table: TableRef,
        /// Column name
        column: String,
        /// Value compared against
        value: ScalarValue,
    },
}

impl Predicate {
    /// Equality on a column of the current table
    pub fn eq(column: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        Predicate::Eq {
            table: TableRef::Current,
            column: column.into(),
            value: value.into(),
        }
    }

    /// Column the predicate tests
    pub fn column(&self) -> &str {
        match self {
            Predicate::Eq { column, .. } => column,
        }
    }

    /// Value the predicate compares against
    pub fn value(&self) -> &ScalarValue {
        match self {
            Predicate::Eq { value, .. } => value,
        }
    }
}

fn set_assignment(assignments: &mut Vec<ColumnAssignment>, column: String, value: ScalarValue) {
    match assignments.iter_mut().find(|a| a.column == column) {
        Some(existing) => existing.value = value,
        None => assignments.push(ColumnAssignment { column, value }),
    }
}

/// An insert of a single row
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    /// Target table
    pub table: String,
    /// Column values, in order
    pub assignments: Vec<ColumnAssignment>,
}

impl InsertStatement {
    /// Create an insert with no columns
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            assignments: Vec::new(),
        }
    }

    /// Set a column value; a second call for the same column replaces the first
    pub fn set_column(&mut self, column: impl Into<String>, value: impl Into<ScalarValue>) {
        set_assignment(&mut self.assignments, column.into(), value.into());
    }

    /// Value currently assigned to a column
    pub fn assignment(&self, column: &str) -> Option<&ScalarValue> {
        self.assignments
            .iter()
            .find(|a| a.column == column)
            .map(|a| &a.value)
    }
}

/// An update of the single row identified by `key`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    /// Target table
    pub table: String,
    /// Primary key predicate
    pub key: Predicate,
    /// Column values to write
    pub assignments: Vec<ColumnAssignment>,
    /// Extra conditions the row must satisfy
    pub predicates: Vec<Predicate>,
}

impl UpdateStatement {
    /// Create an update of the row whose `key_column` equals `key`
    pub fn new(
        table: impl Into<String>,
        key_column: impl Into<String>,
        key: impl Into<ScalarValue>,
    ) -> Self {
        Self {
            table: table.into(),
            key: Predicate::eq(key_column, key),
            assignments: Vec::new(),
            predicates: Vec::new(),
        }
    }

    /// Set a column value; a second call for the same column replaces the first
    pub fn set_column(&mut self, column: impl Into<String>, value: impl Into<ScalarValue>) {
        set_assignment(&mut self.assignments, column.into(), value.into());
    }

    /// Value currently assigned to a column
    pub fn assignment(&self, column: &str) -> Option<&ScalarValue> {
        self.assignments
            .iter()
            .find(|a| a.column == column)
            .map(|a| &a.value)
    }

    /// Add a condition the target row must satisfy
    pub fn add_predicate(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    /// Key predicate followed by every extra predicate
    pub fn all_predicates(&self) -> impl Iterator<Item = &Predicate> {
        std::iter::once(&self.key).chain(self.predicates.iter())
    }
}
