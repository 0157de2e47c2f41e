//! Repository configuration.
//!
//! ```toml
//! # Column holding the version token for every record type.
//! # Omit to use each record's VERSION_COLUMN.
//! version_column = "revision"
//!
//! # "skip_predicate" (default) or "reject"
//! missing_token_policy = "reject"
//! ```

use crate::error::Result;
use serde::Deserialize;
use verlock_concurrency::MissingTokenPolicy;

/// Repository configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Version column used for every record type, overriding
    /// [`Record::VERSION_COLUMN`](crate::Record::VERSION_COLUMN)
    pub version_column: Option<String>,

    /// What an update does when the record has no token
    pub missing_token_policy: MissingTokenPolicy,
}

impl Config {
    /// Parse configuration from TOML.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if let Some(column) = &self.version_column {
            if column.trim().is_empty() {
                return Err(crate::Error::Configuration(
                    "version_column must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
