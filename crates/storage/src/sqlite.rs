//! SQLite store
//!
//! Renders statements to SQL and executes them through rusqlite:
//!
//! ```text
//! INSERT INTO "t" ("id", "name", "version") VALUES (?1, ?2, ?3)
//! UPDATE "t" SET "name" = ?1, "version" = ?2
//!  WHERE "t"."id" = ?3 AND "t"."version" = ?4
//! ```
//!
//! The version check and the write are one `UPDATE`, and the changes count
//! SQLite reports for it is the rows-affected signal. The connection sits
//! behind a mutex; statements from different threads are serialized.

use crate::store::Store;
use parking_lot::Mutex;
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection, OptionalExtension};
use std::path::Path;
use tracing::trace;
use verlock_core::{
    Error, InsertStatement, Predicate, Result, Row, ScalarValue, UpdateStatement,
};

/// Quote an identifier for SQLite
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

fn to_sql(value: &ScalarValue) -> SqlValue {
    match value {
        ScalarValue::Null => SqlValue::Null,
        ScalarValue::Integer(i) => SqlValue::Integer(*i),
        ScalarValue::Real(f) => SqlValue::Real(*f),
        ScalarValue::Text(s) => SqlValue::Text(s.clone()),
        ScalarValue::Blob(b) => SqlValue::Blob(b.clone()),
    }
}

fn from_sql(value: ValueRef<'_>) -> Result<ScalarValue> {
    Ok(match value {
        ValueRef::Null => ScalarValue::Null,
        ValueRef::Integer(i) => ScalarValue::Integer(i),
        ValueRef::Real(f) => ScalarValue::Real(f),
        ValueRef::Text(t) => ScalarValue::Text(
            std::str::from_utf8(t)
                .map_err(|e| Error::Decoding(e.to_string()))?
                .to_string(),
        ),
        ValueRef::Blob(b) => ScalarValue::Blob(b.to_vec()),
    })
}

fn render_predicate(table: &str, predicate: &Predicate, index: usize) -> String {
    let Predicate::Eq {
        table: target,
        column,
        ..
    } = predicate;
    format!(
        "{}.{} = ?{}",
        quote_ident(target.resolve(table)),
        quote_ident(column),
        index
    )
}

/// Render an insert and its parameters
pub fn render_insert(stmt: &InsertStatement) -> (String, Vec<SqlValue>) {
    let columns: Vec<_> = stmt
        .assignments
        .iter()
        .map(|a| quote_ident(&a.column))
        .collect();
    let placeholders: Vec<_> = (1..=stmt.assignments.len())
        .map(|i| format!("?{}", i))
        .collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(&stmt.table),
        columns.join(", "),
        placeholders.join(", ")
    );
    let params = stmt.assignments.iter().map(|a| to_sql(&a.value)).collect();
    (sql, params)
}

/// Render an update and its parameters
pub fn render_update(stmt: &UpdateStatement) -> Result<(String, Vec<SqlValue>)> {
    if stmt.assignments.is_empty() {
        return Err(Error::Store(format!(
            "update of {} has no column assignments",
            stmt.table
        )));
    }

    let mut params = Vec::with_capacity(stmt.assignments.len() + stmt.predicates.len() + 1);
    let mut sets = Vec::with_capacity(stmt.assignments.len());
    for a in &stmt.assignments {
        params.push(to_sql(&a.value));
        sets.push(format!("{} = ?{}", quote_ident(&a.column), params.len()));
    }

    let mut conditions = Vec::with_capacity(stmt.predicates.len() + 1);
    for p in stmt.all_predicates() {
        params.push(to_sql(p.value()));
        conditions.push(render_predicate(&stmt.table, p, params.len()));
    }

    let sql = format!(
        "UPDATE {} SET {} WHERE {}",
        quote_ident(&stmt.table),
        sets.join(", "),
        conditions.join(" AND ")
    );
    Ok((sql, params))
}

/// A store over one SQLite connection
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Wrap an open connection
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(Connection::open_in_memory()?))
    }

    /// Open (or create) a database file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Connection::open(path)?))
    }

    /// Run schema or maintenance SQL
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.lock().execute_batch(sql)?;
        Ok(())
    }
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

impl Store for SqliteStore {
    fn insert(&self, stmt: &InsertStatement) -> Result<u64> {
        let (sql, params) = render_insert(stmt);
        trace!(%sql, "executing insert");
        let conn = self.conn.lock();
        let changed = conn.execute(&sql, params_from_iter(params))?;
        Ok(changed as u64)
    }

    fn update(&self, stmt: &UpdateStatement) -> Result<u64> {
        let (sql, params) = render_update(stmt)?;
        trace!(%sql, "executing update");
        let conn = self.conn.lock();
        let changed = conn.execute(&sql, params_from_iter(params))?;
        Ok(changed as u64)
    }

    fn fetch(&self, table: &str, key: &Predicate) -> Result<Option<Row>> {
        let sql = format!(
            "SELECT * FROM {} WHERE {} LIMIT 1",
            quote_ident(table),
            render_predicate(table, key, 1)
        );
        trace!(%sql, "executing fetch");

        let conn = self.conn.lock();
        let mut prepared = conn.prepare(&sql)?;
        let names: Vec<String> = prepared
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let raw = prepared
            .query_row([to_sql(key.value())], |row| {
                (0..names.len())
                    .map(|i| row.get::<_, SqlValue>(i))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })
            .optional()?;

        let Some(values) = raw else {
            return Ok(None);
        };
        names
            .into_iter()
            .zip(values.iter())
            .map(|(name, value)| Ok((name, from_sql(ValueRef::from(value))?)))
            .collect::<Result<Row>>()
            .map(Some)
    }
}
