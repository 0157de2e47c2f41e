//! In-memory store
//!
//! Tables live in a DashMap keyed by table name; each table keeps its rows in
//! an FxHashMap keyed by primary key.
//!
//! # Atomicity
//!
//! `update` holds the table's shard write lock from predicate evaluation
//! through assignment, so a concurrent update of the same table cannot slip
//! between the version check and the write. Different tables in different
//! shards never contend.
//!
//! # SQL semantics kept
//!
//! - A predicate comparing against NULL never matches
//! - Duplicate primary keys on insert are a constraint violation
//! - Statements against an undeclared table fail

use crate::store::Store;
use dashmap::DashMap;
use rustc_hash::FxHashMap;
use tracing::trace;
use verlock_core::{
    Error, InsertStatement, Predicate, Result, Row, ScalarValue, TableRef, UpdateStatement,
};

/// Primary key of an in-memory row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    /// Integer key
    Integer(i64),
    /// Text key
    Text(String),
    /// Binary key
    Blob(Vec<u8>),
}

impl TryFrom<&ScalarValue> for RowKey {
    type Error = Error;

    fn try_from(value: &ScalarValue) -> Result<Self> {
        match value {
            ScalarValue::Integer(i) => Ok(RowKey::Integer(*i)),
            ScalarValue::Text(s) => Ok(RowKey::Text(s.clone())),
            ScalarValue::Blob(b) => Ok(RowKey::Blob(b.clone())),
            other => Err(Error::InvalidKey(format!(
                "{} cannot be used as a primary key",
                other.type_name()
            ))),
        }
    }
}

/// One table: key column plus rows
#[derive(Debug)]
pub struct Table {
    key_column: String,
    rows: FxHashMap<RowKey, Row>,
}

impl Table {
    fn new(key_column: impl Into<String>) -> Self {
        Self {
            key_column: key_column.into(),
            rows: FxHashMap::default(),
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn lookup_key(&self, table: &str, key: &Predicate) -> Result<RowKey> {
        check_table_ref(table, key)?;
        if key.column() != self.key_column {
            return Err(Error::Store(format!(
                "table {} is keyed by '{}', not '{}'",
                table,
                self.key_column,
                key.column()
            )));
        }
        RowKey::try_from(key.value())
    }
}

fn check_table_ref(table: &str, predicate: &Predicate) -> Result<()> {
    let Predicate::Eq { table: target, .. } = predicate;
    match target {
        TableRef::Current => Ok(()),
        TableRef::Named(name) if name == table => Ok(()),
        TableRef::Named(name) => Err(Error::Store(format!(
            "predicate on {} is not supported in an update of {}",
            name, table
        ))),
    }
}

fn matches(row: &Row, predicate: &Predicate) -> bool {
    let Predicate::Eq { column, value, .. } = predicate;
    if value.is_null() {
        return false;
    }
    row.get(column) == Some(value)
}

/// Lock-guarded in-memory tables
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: DashMap<String, Table>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a table and its primary key column
    ///
    /// Declaring an existing table is a no-op.
    pub fn create_table(&self, table: impl Into<String>, key_column: impl Into<String>) {
        self.tables
            .entry(table.into())
            .or_insert_with(|| Table::new(key_column));
    }

    /// Drop a table and its rows
    pub fn drop_table(&self, table: &str) -> bool {
        self.tables.remove(table).is_some()
    }

    /// Number of rows in a table
    pub fn row_count(&self, table: &str) -> usize {
        self.tables.get(table).map(|t| t.len()).unwrap_or(0)
    }

    /// Delete a row by key, returning rows affected
    pub fn delete(&self, table: &str, key: &Predicate) -> Result<u64> {
        let mut entry = self
            .tables
            .get_mut(table)
            .ok_or_else(|| no_such_table(table))?;
        let row_key = entry.lookup_key(table, key)?;
        Ok(entry.rows.remove(&row_key).map(|_| 1).unwrap_or(0))
    }
}

fn no_such_table(table: &str) -> Error {
    Error::Store(format!("no such table: {}", table))
}

impl Store for MemoryStore {
    fn insert(&self, stmt: &InsertStatement) -> Result<u64> {
        let mut table = self
            .tables
            .get_mut(&stmt.table)
            .ok_or_else(|| no_such_table(&stmt.table))?;

        let key_value = stmt
            .assignment(&table.key_column)
            .ok_or_else(|| Error::Constraint(format!(
                "insert into {} is missing key column '{}'",
                stmt.table, table.key_column
            )))?;
        let row_key = RowKey::try_from(key_value)?;

        if table.rows.contains_key(&row_key) {
            return Err(Error::Constraint(format!(
                "duplicate key {} in {}",
                key_value, stmt.table
            )));
        }

        let row: Row = stmt
            .assignments
            .iter()
            .map(|a| (a.column.clone(), a.value.clone()))
            .collect();
        table.rows.insert(row_key, row);
        trace!(table = %stmt.table, "inserted row");
        Ok(1)
    }

    fn update(&self, stmt: &UpdateStatement) -> Result<u64> {
        if stmt.assignments.is_empty() {
            return Err(Error::Store(format!(
                "update of {} has no column assignments",
                stmt.table
            )));
        }

        // Shard write lock held until the end of this function.
        let mut table = self
            .tables
            .get_mut(&stmt.table)
            .ok_or_else(|| no_such_table(&stmt.table))?;

        let row_key = table.lookup_key(&stmt.table, &stmt.key)?;
        for predicate in &stmt.predicates {
            check_table_ref(&stmt.table, predicate)?;
        }
        if stmt.assignment(&table.key_column).is_some() {
            return Err(Error::Store(format!(
                "key column '{}' of {} cannot be reassigned",
                table.key_column, stmt.table
            )));
        }

        let Some(row) = table.rows.get_mut(&row_key) else {
            return Ok(0);
        };
        if !stmt.predicates.iter().all(|p| matches(row, p)) {
            trace!(table = %stmt.table, "update predicates did not match");
            return Ok(0);
        }

        for assignment in &stmt.assignments {
            row.set(assignment.column.clone(), assignment.value.clone());
        }
        Ok(1)
    }

    fn fetch(&self, table: &str, key: &Predicate) -> Result<Option<Row>> {
        let entry = self.tables.get(table).ok_or_else(|| no_such_table(table))?;
        let row_key = entry.lookup_key(table, key)?;
        Ok(entry.rows.get(&row_key).cloned())
    }
}
