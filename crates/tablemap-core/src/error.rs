// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types for schema extraction and SQL generation.
//!
//! Every fallible operation in this crate returns [`Error`]. Tag grammar
//! problems carry the offending field name plus a [`TagError`] describing
//! what went wrong, so callers can match on the precise cause:
//!
//! ```rust,ignore
//! match extractor.extract::<User>() {
//!     Err(Error::Tag { field, source: TagError::InvalidForeignKey(v) }) => { /* ... */ }
//!     Err(other) => return Err(other),
//!     Ok(table) => { /* ... */ }
//! }
//! ```

use std::error::Error as StdError;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error coming from an external executor.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors produced while deriving schemas or generating statements.
#[derive(Debug, Error)]
pub enum Error {
    /// A field tag could not be parsed.
    #[error("field `{field}`: {source}")]
    Tag {
        /// Rust name of the field carrying the tag.
        field:  String,
        /// Grammar violation.
        #[source]
        source: TagError
    },

    /// A dialect has no mapping for the requested logical type.
    #[error("{dialect}: unsupported type: {ty}")]
    UnsupportedType {
        /// Dialect name (`postgres`, `mysql`, `sqlite3`).
        dialect: &'static str,
        /// Logical type as written in the schema.
        ty:      String
    },

    /// The external executor rejected a generated statement.
    #[error("{table}: {source}")]
    Execution {
        /// Table the statement was generated for.
        table:  String,
        /// Error reported by the executor, unchanged.
        #[source]
        source: BoxError
    }
}

/// Tag grammar violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// A key that requires a value was given an empty one.
    #[error("empty value for `{key}`")]
    EmptyValue {
        /// The tag key (`type`, `precision`, `dbtype`).
        key: &'static str
    },

    /// `col:` without a name.
    #[error("empty column name")]
    EmptyColumnName,

    /// `fk:` value that is not `TABLE.COLUMN`.
    #[error("invalid foreign key: {0}")]
    InvalidForeignKey(String),

    /// Unknown tag key.
    #[error("unsupported tag: {0}")]
    Unsupported(String)
}

impl Error {
    /// Wrap an executor failure with the table it concerned.
    pub fn execution(table: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Execution {
            table:  table.into(),
            source: source.into()
        }
    }

    /// Return the tag error if this is a tag grammar failure.
    #[must_use]
    pub fn as_tag(&self) -> Option<&TagError> {
        match self {
            Self::Tag {
                source, ..
            } => Some(source),
            _ => None
        }
    }
}
