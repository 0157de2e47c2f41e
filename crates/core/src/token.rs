//! Version tokens
//!
//! A [`VersionToken`] is the opaque value stamped on a version-controlled
//! record. It is either absent (the record was built in memory and never
//! stamped) or present with a globally unique string value.
//!
//! ## Lifecycle
//!
//! ```text
//! built in memory        -> absent
//! first insert           -> present(v1)   (unless the caller supplied one)
//! each successful update -> present(vN+1)
//! ```
//!
//! ## Representations
//!
//! | Form | Absent | Present |
//! |------|--------|---------|
//! | [`ScalarValue`] | `Null` | `Text(value)` |
//! | JSON | `null` | `"value"` |
//!
//! Generated values are UUID v7 in 32-char lowercase hex. The leading bits
//! are a millisecond timestamp, so tokens sort by creation time; the
//! generator keeps a monotonic counter so two tokens minted in the same
//! millisecond are still distinct and ordered.

use crate::error::{Error, Result};
use crate::value::ScalarValue;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Opaque, nullable version tag for optimistic concurrency control
///
/// Equality: two tokens are equal iff both are absent, or both are present
/// with identical values.
///
/// # Examples
///
/// ```
/// use verlock_core::VersionToken;
///
/// let empty = VersionToken::absent();
/// assert!(!empty.is_present());
///
/// let t1 = VersionToken::generate();
/// let t2 = VersionToken::generate();
/// assert!(t1.is_present());
/// assert_ne!(t1, t2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionToken(Option<String>);

impl VersionToken {
    /// Mint a fresh, present token
    pub fn generate() -> Self {
        VersionToken(Some(Uuid::now_v7().simple().to_string()))
    }

    /// An absent token (no value set)
    pub const fn absent() -> Self {
        VersionToken(None)
    }

    /// A present token carrying an explicit value
    ///
    /// Used to restore or import records with a known version.
    pub fn from_value(value: impl Into<String>) -> Self {
        VersionToken(Some(value.into()))
    }

    /// Check if a value is set
    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// The raw value, if present
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Consume the token and return the raw value
    pub fn into_inner(self) -> Option<String> {
        self.0
    }

    /// Convert a raw store value into a token
    ///
    /// `Null` yields an absent token. `Text` yields a present one. A `Blob`
    /// is accepted if it is valid UTF-8. Numeric values are rejected rather
    /// than coerced.
    pub fn scan(value: &ScalarValue) -> Result<Self> {
        match value {
            ScalarValue::Null => Ok(VersionToken(None)),
            ScalarValue::Text(s) => Ok(VersionToken(Some(s.clone()))),
            ScalarValue::Blob(b) => std::str::from_utf8(b)
                .map(|s| VersionToken(Some(s.to_string())))
                .map_err(|e| Error::Decoding(format!("version token is not UTF-8: {}", e))),
            other => Err(Error::Decoding(format!(
                "cannot scan {} into a version token",
                other.type_name()
            ))),
        }
    }

    /// Convert the token into the value a store writes
    pub fn encode(&self) -> ScalarValue {
        match &self.0 {
            Some(s) => ScalarValue::Text(s.clone()),
            None => ScalarValue::Null,
        }
    }

    /// Serialize to JSON bytes: a string when present, `null` when absent
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserialize from JSON bytes
    ///
    /// `null` yields an absent token. Anything other than a JSON string fails
    /// with [`Error::Decoding`].
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| Error::Decoding(e.to_string()))
    }
}

impl std::fmt::Display for VersionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_deref().unwrap_or(""))
    }
}

impl From<Option<String>> for VersionToken {
    fn from(v: Option<String>) -> Self {
        VersionToken(v)
    }
}

impl From<&str> for VersionToken {
    fn from(s: &str) -> Self {
        VersionToken(Some(s.to_string()))
    }
}

impl From<String> for VersionToken {
    fn from(s: String) -> Self {
        VersionToken(Some(s))
    }
}

impl From<VersionToken> for ScalarValue {
    fn from(t: VersionToken) -> Self {
        match t.0 {
            Some(s) => ScalarValue::Text(s),
            None => ScalarValue::Null,
        }
    }
}

impl Serialize for VersionToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match &self.0 {
            Some(s) => serializer.serialize_str(s),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for VersionToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Option::<String>::deserialize(deserializer).map(VersionToken)
    }
}

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::VersionToken;
    use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

    impl ToSql for VersionToken {
        fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
            match &self.0 {
                Some(s) => Ok(ToSqlOutput::from(s.as_str())),
                None => Ok(ToSqlOutput::from(rusqlite::types::Null)),
            }
        }
    }

    impl FromSql for VersionToken {
        fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
            match value {
                ValueRef::Null => Ok(VersionToken(None)),
                ValueRef::Text(bytes) | ValueRef::Blob(bytes) => std::str::from_utf8(bytes)
                    .map(|s| VersionToken(Some(s.to_string())))
                    .map_err(|e| FromSqlError::Other(Box::new(e))),
                _ => Err(FromSqlError::InvalidType),
            }
        }
    }
}
