//! Scalar column values
//!
//! [`ScalarValue`] is the value model at the persistence boundary: whatever a
//! store can bind into a statement parameter or read back out of a column.
//! It mirrors the storage classes of SQL engines rather than a document model,
//! so there are no arrays or objects.
//!
//! ## Equality Rules
//!
//! - Different variants are never equal (no coercion)
//! - `Integer(1)` != `Real(1.0)`
//! - `Text("abc")` != `Blob([97, 98, 99])`
//! - `Real` uses IEEE-754 equality: `NaN != NaN`

use serde::{Deserialize, Serialize};

/// A single column value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalarValue {
    /// SQL NULL
    Null,
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit IEEE-754 floating point
    Real(f64),
    /// UTF-8 text
    Text(String),
    /// Arbitrary bytes (distinct from Text)
    Blob(Vec<u8>),
}

impl ScalarValue {
    /// Returns the type name (for error messages)
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarValue::Null => "Null",
            ScalarValue::Integer(_) => "Integer",
            ScalarValue::Real(_) => "Real",
            ScalarValue::Text(_) => "Text",
            ScalarValue::Blob(_) => "Blob",
        }
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    /// Try to get as i64
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ScalarValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as f64
    pub fn as_real(&self) -> Option<f64> {
        match self {
            ScalarValue::Real(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as byte slice
    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            ScalarValue::Blob(b) => Some(b),
            _ => None,
        }
    }
}

impl std::fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarValue::Null => write!(f, "NULL"),
            ScalarValue::Integer(i) => write!(f, "{}", i),
            ScalarValue::Real(r) => write!(f, "{}", r),
            ScalarValue::Text(s) => write!(f, "'{}'", s),
            ScalarValue::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl From<i64> for ScalarValue {
    fn from(i: i64) -> Self {
        ScalarValue::Integer(i)
    }
}

impl From<i32> for ScalarValue {
    fn from(i: i32) -> Self {
        ScalarValue::Integer(i as i64)
    }
}

impl From<u32> for ScalarValue {
    fn from(i: u32) -> Self {
        ScalarValue::Integer(i as i64)
    }
}

impl From<f64> for ScalarValue {
    fn from(f: f64) -> Self {
        ScalarValue::Real(f)
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        ScalarValue::Integer(b as i64)
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        ScalarValue::Text(s)
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::Text(s.to_string())
    }
}

impl From<Vec<u8>> for ScalarValue {
    fn from(b: Vec<u8>) -> Self {
        ScalarValue::Blob(b)
    }
}

impl<T: Into<ScalarValue>> From<Option<T>> for ScalarValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(ScalarValue::Null)
    }
}
