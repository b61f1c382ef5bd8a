// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Configuration types.
//!
//! - [`ExtractorConfig`]: how struct and field names become SQL names and
//!   which column defaults apply before tags are read.
//! - [`ConnectionConfig`]: connection descriptor translated into a locator
//!   string by a [`Dialect`](crate::Dialect). Pool hints are carried for the
//!   external driver and never interpreted here.

use std::{collections::BTreeMap, time::Duration};

use crate::naming::{NameMapper, snake_case};

/// Settings applied by the [`Extractor`](crate::Extractor).
///
/// # Example
///
/// ```
/// use tablemap_core::{ExtractorConfig, naming::verbatim};
///
/// let config = ExtractorConfig::default()
///     .with_table_prefix("app_")
///     .with_not_null(true)
///     .with_name_mapper(verbatim);
/// assert_eq!(config.table_prefix, "app_");
/// ```
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Prepended to every derived table name (not to `table:` overrides).
    pub table_prefix: String,

    /// Give every column a DEFAULT clause and keep `default:VALUE` literals.
    ///
    /// When off, `default:VALUE` still enables DEFAULT for that column but
    /// the dialect's zero value is used.
    pub emit_defaults: bool,

    /// Make every column NOT NULL unless its tag says otherwise.
    pub not_null: bool,

    /// Mapping for struct and field names.
    pub name_mapper: NameMapper
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            table_prefix:  String::new(),
            emit_defaults: false,
            not_null:      false,
            name_mapper:   snake_case
        }
    }
}

impl ExtractorConfig {
    /// Set the table name prefix.
    #[must_use]
    pub fn with_table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = prefix.into();
        self
    }

    /// Set the default-emission policy.
    #[must_use]
    pub fn with_emit_defaults(mut self, emit: bool) -> Self {
        self.emit_defaults = emit;
        self
    }

    /// Set the NOT NULL policy.
    #[must_use]
    pub fn with_not_null(mut self, not_null: bool) -> Self {
        self.not_null = not_null;
        self
    }

    /// Set the name mapper.
    #[must_use]
    pub fn with_name_mapper(mut self, mapper: NameMapper) -> Self {
        self.name_mapper = mapper;
        self
    }
}

/// Connection descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConnectionConfig {
    /// Host name, dialect default when empty.
    pub host: String,

    /// Port, dialect default when zero.
    pub port: u16,

    /// Database name (file path for SQLite).
    pub db_name: String,

    /// User name.
    pub user: String,

    /// Password, only used together with a user.
    pub password: String,

    /// Maximum idle connections hint.
    pub max_idle: Option<u32>,

    /// Maximum open connections hint.
    pub max_open: Option<u32>,

    /// Maximum connection lifetime hint.
    pub max_lifetime: Option<Duration>,

    /// Driver options appended to the locator.
    pub options: BTreeMap<String, String>
}

impl ConnectionConfig {
    /// Descriptor for a database name with everything else defaulted.
    pub fn new(db_name: impl Into<String>) -> Self {
        Self {
            db_name: db_name.into(),
            ..Self::default()
        }
    }

    /// Render options as `k1=v1&k2=v2`, sorted by key.
    #[must_use]
    pub fn join_options(&self, assign: &str, separator: &str) -> String {
        self.options
            .iter()
            .map(|(k, v)| format!("{k}{assign}{v}"))
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// `?k=v&...`, or nothing when there are no options.
    pub(crate) fn query_suffix(&self) -> String {
        if self.options.is_empty() {
            String::new()
        } else {
            format!("?{}", self.join_options("=", "&"))
        }
    }

    /// `user:password@`, `user@` or nothing.
    pub(crate) fn credentials(&self) -> String {
        match (self.user.as_str(), self.password.as_str()) {
            ("", _) => String::new(),
            (user, "") => format!("{user}@"),
            (user, password) => format!("{user}:{password}@")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extractor_defaults() {
        let config = ExtractorConfig::default();
        assert!(config.table_prefix.is_empty());
        assert!(!config.emit_defaults);
        assert!(!config.not_null);
        assert_eq!((config.name_mapper)("UserID"), "user_id");
    }

    #[test]
    fn extractor_setters() {
        let config = ExtractorConfig::default()
            .with_table_prefix("t_")
            .with_emit_defaults(true)
            .with_not_null(true);
        assert_eq!(config.table_prefix, "t_");
        assert!(config.emit_defaults);
        assert!(config.not_null);
    }

    #[test]
    fn options_sorted_by_key() {
        let mut config = ConnectionConfig::new("app");
        config.options.insert("sslmode".to_string(), "disable".to_string());
        config.options.insert("application_name".to_string(), "api".to_string());
        assert_eq!(
            config.join_options("=", "&"),
            "application_name=api&sslmode=disable"
        );
        assert_eq!(config.query_suffix(), "?application_name=api&sslmode=disable");
    }

    #[test]
    fn empty_options_have_no_suffix() {
        assert_eq!(ConnectionConfig::new("app").query_suffix(), "");
    }

    #[test]
    fn credentials_forms() {
        let mut config = ConnectionConfig::default();
        assert_eq!(config.credentials(), "");
        config.password = "secret".to_string();
        assert_eq!(config.credentials(), "");
        config.user = "admin".to_string();
        assert_eq!(config.credentials(), "admin:secret@");
        config.password.clear();
        assert_eq!(config.credentials(), "admin@");
    }
}
