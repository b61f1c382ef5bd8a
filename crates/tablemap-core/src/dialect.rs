// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SQL dialects.
//!
//! A dialect translates a column's logical type into the backend's column
//! type and default literal, and builds connection locators from a
//! [`ConnectionConfig`].
//!
//! # Supported Databases
//!
//! | Dialect | Integers | Strings | Quote escaping | Locator |
//! |---------|----------|---------|----------------|---------|
//! | [`Postgres`] | SMALLINT / INTEGER / BIGINT | `VARCHAR(n)` | `E'it\'s'` | `postgres://...` |
//! | [`MySql`] | TINYINT..BIGINT, `UNSIGNED` variants | `VARCHAR(n)` | `'it''s'` | `user@tcp(host:port)/db` |
//! | [`Sqlite`] | INTEGER | TEXT | `'it''s'` | `file:db` or `:memory:` |
//!
//! # Examples
//!
//! ```
//! use tablemap_core::{Dialect, SqlDialect};
//!
//! let dialect: Dialect = "pg".parse().unwrap();
//! let ty = dialect.translate_type("string", Some("100"), Some("guest")).unwrap();
//! assert_eq!(ty.name, "VARCHAR(100)");
//! assert_eq!(ty.default, "'guest'");
//! ```

mod mysql;
mod postgres;
mod sqlite;

use std::{fmt, str::FromStr};

pub use self::{mysql::MySql, postgres::Postgres, sqlite::Sqlite};
use crate::{config::ConnectionConfig, error::Result};

/// Translated column type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlType {
    /// Column type (e.g. `VARCHAR(64)`, `BIGINT UNSIGNED`).
    pub name: String,

    /// Default literal, quoted and escaped for the dialect.
    pub default: String
}

impl SqlType {
    pub(crate) fn new(name: impl Into<String>, default: String) -> Self {
        Self {
            name: name.into(),
            default
        }
    }
}

/// Backend-specific translation rules.
pub trait SqlDialect {
    /// Dialect name used in error messages.
    fn name(&self) -> &'static str;

    /// Translate a logical type.
    ///
    /// `precision` is a length for string types and `scale,precision` for
    /// floats. `default` is the raw default literal; `None` or empty selects
    /// the zero value of the type.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`](crate::Error::UnsupportedType) when the
    /// dialect has no mapping for `ty`.
    fn translate_type(
        &self,
        ty: &str,
        precision: Option<&str>,
        default: Option<&str>
    ) -> Result<SqlType>;

    /// Build a connection locator.
    fn connection_string(&self, config: &ConnectionConfig) -> String;

    /// Quote an identifier.
    fn quote_ident(&self, name: &str) -> String {
        format!("\"{name}\"")
    }

    /// Column constraint for auto-increment columns.
    fn auto_increment(&self) -> &'static str;

    /// Whether [`auto_increment`](Self::auto_increment) already declares the
    /// primary key and is only valid on a lone integer primary key column.
    fn inline_primary_key(&self) -> bool {
        false
    }
}

/// Closed set of supported dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// PostgreSQL.
    #[default]
    Postgres,

    /// MySQL / MariaDB.
    MySql,

    /// SQLite 3.
    Sqlite
}

impl Dialect {
    fn inner(&self) -> &'static dyn SqlDialect {
        match self {
            Self::Postgres => &Postgres,
            Self::MySql => &MySql,
            Self::Sqlite => &Sqlite
        }
    }
}

impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn translate_type(
        &self,
        ty: &str,
        precision: Option<&str>,
        default: Option<&str>
    ) -> Result<SqlType> {
        self.inner().translate_type(ty, precision, default)
    }

    fn connection_string(&self, config: &ConnectionConfig) -> String {
        self.inner().connection_string(config)
    }

    fn quote_ident(&self, name: &str) -> String {
        self.inner().quote_ident(name)
    }

    fn auto_increment(&self) -> &'static str {
        self.inner().auto_increment()
    }

    fn inline_primary_key(&self) -> bool {
        self.inner().inline_primary_key()
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown dialect name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dialect: {0}")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "mysql" | "mariadb" => Ok(Self::MySql),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            _ => Err(UnknownDialect(value.to_string()))
        }
    }
}

/// Pick the given default or the type's zero value.
pub(crate) fn default_or<'a>(fallback: &'a str, value: Option<&'a str>) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => fallback
    }
}

/// `'value'` with embedded quotes doubled.
pub(crate) fn quote_doubling(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
