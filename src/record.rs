//! Version-controlled records.

use verlock_core::{Row, ScalarValue, VersionToken};

/// A persistable record carrying one version token.
///
/// Implementors map themselves to a single table row. The key column and the
/// version column are handled by the repository; [`Record::columns`] lists
/// everything else.
///
/// # Example
///
/// ```
/// use verlock::{Record, Row, ScalarValue, VersionToken};
///
/// struct Account {
///     id: i64,
///     owner: String,
///     version: VersionToken,
/// }
///
/// impl Record for Account {
///     const TABLE: &'static str = "accounts";
///     const KEY_COLUMN: &'static str = "id";
///
///     fn key(&self) -> ScalarValue {
///         self.id.into()
///     }
///
///     fn columns(&self) -> Vec<(&'static str, ScalarValue)> {
///         vec![("owner", self.owner.as_str().into())]
///     }
///
///     fn version(&self) -> &VersionToken {
///         &self.version
///     }
///
///     fn version_mut(&mut self) -> &mut VersionToken {
///         &mut self.version
///     }
///
///     fn from_row(row: &Row) -> verlock_core::Result<Self> {
///         Ok(Account {
///             id: row.integer("id")?,
///             owner: row.text("owner")?,
///             version: VersionToken::absent(),
///         })
///     }
/// }
/// ```
pub trait Record: Sized {
    /// Table name
    const TABLE: &'static str;

    /// Primary key column
    const KEY_COLUMN: &'static str;

    /// Version column
    const VERSION_COLUMN: &'static str = verlock_concurrency::DEFAULT_VERSION_COLUMN;

    /// Primary key value
    fn key(&self) -> ScalarValue;

    /// Column values other than the key and the version
    fn columns(&self) -> Vec<(&'static str, ScalarValue)>;

    /// Current in-memory token
    fn version(&self) -> &VersionToken;

    /// Mutable access to the token
    fn version_mut(&mut self) -> &mut VersionToken;

    /// Rebuild a record from a stored row.
    ///
    /// The repository sets the token from the version column afterwards, so
    /// implementations may leave it absent.
    fn from_row(row: &Row) -> verlock_core::Result<Self>;
}
