//! Rows read back from a store

use crate::error::{Error, Result};
use crate::token::VersionToken;
use crate::value::ScalarValue;

/// An ordered set of named column values
///
/// Column order is the order in which the store produced them. Lookups are
/// linear; rows hold a handful of columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, ScalarValue)>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column, replacing any existing value under the same name
    pub fn set(&mut self, column: impl Into<String>, value: ScalarValue) {
        let column = column.into();
        match self.columns.iter_mut().find(|(c, _)| *c == column) {
            Some((_, v)) => *v = value,
            None => self.columns.push((column, value)),
        }
    }

    /// Builder-style [`Row::set`]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        self.set(column, value.into());
        self
    }

    /// Get a column value
    pub fn get(&self, column: &str) -> Option<&ScalarValue> {
        self.columns
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
    }

    /// Get a column value, failing if the column is missing
    pub fn require(&self, column: &str) -> Result<&ScalarValue> {
        self.get(column)
            .ok_or_else(|| Error::MissingColumn(column.to_string()))
    }

    /// Read a text column
    pub fn text(&self, column: &str) -> Result<String> {
        match self.require(column)? {
            ScalarValue::Text(s) => Ok(s.clone()),
            other => Err(wrong_type(column, "Text", other)),
        }
    }

    /// Read a nullable text column
    pub fn optional_text(&self, column: &str) -> Result<Option<String>> {
        match self.require(column)? {
            ScalarValue::Null => Ok(None),
            ScalarValue::Text(s) => Ok(Some(s.clone())),
            other => Err(wrong_type(column, "Text", other)),
        }
    }

    /// Read an integer column
    pub fn integer(&self, column: &str) -> Result<i64> {
        match self.require(column)? {
            ScalarValue::Integer(i) => Ok(*i),
            other => Err(wrong_type(column, "Integer", other)),
        }
    }

    /// Read a version token column
    ///
    /// A missing column is an error; a `NULL` column is an absent token.
    pub fn token(&self, column: &str) -> Result<VersionToken> {
        VersionToken::scan(self.require(column)?)
    }

    /// Iterate over columns in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScalarValue)> {
        self.columns.iter().map(|(c, v)| (c.as_str(), v))
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the row has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

fn wrong_type(column: &str, expected: &'static str, actual: &ScalarValue) -> Error {
    Error::WrongType {
        column: column.to_string(),
        expected,
        actual: actual.type_name(),
    }
}

impl FromIterator<(String, ScalarValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, ScalarValue)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (c, v) in iter {
            row.set(c, v);
        }
        row
    }
}
