// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field tag grammar.
//!
//! A tag is a whitespace-separated list of `key` or `key:value` tokens,
//! split on the first `:`.
//!
//! | Token | Effect |
//! |-------|--------|
//! | `table:NAME` | Table name (last occurrence across fields wins) |
//! | `col:NAME` | Column name, `col:-` skips the field |
//! | `type:NAME` | Logical type override (`char`, `text`, `int32`, ...) |
//! | `precision:P` | Length for strings, `scale,precision` for floats |
//! | `dbtype:TYPE` | Final database type, bypasses translation |
//! | `pk` | Primary key |
//! | `autoincr` | Auto increment |
//! | `notnull` | NOT NULL |
//! | `default[:VALUE]` | DEFAULT, `default:-` disables it |
//! | `unique[:GROUP]` | UNIQUE, grouped into a named constraint when `GROUP` is set |
//! | `fk:TABLE.COLUMN` | Foreign key |
//!
//! `pk`, `autoincr` and `notnull` are true when written bare or as
//! `key:true`; any other value makes them false.

use crate::error::TagError;

/// A single parsed tag token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEntry {
    /// `table:NAME`
    Table(String),
    /// `col:NAME`
    Column(String),
    /// `col:-`
    Skip,
    /// `type:NAME`
    Type(String),
    /// `precision:P`
    Precision(String),
    /// `dbtype:TYPE`
    DbType(String),
    /// `pk[:true]`
    PrimaryKey(bool),
    /// `autoincr[:true]`
    AutoIncrement(bool),
    /// `notnull[:true]`
    NotNull(bool),
    /// `default[:VALUE]`
    Default {
        /// False for `default:-`.
        enabled: bool,
        /// Raw literal, empty when not given.
        value:   String
    },
    /// `unique[:GROUP]`
    Unique(Option<String>),
    /// `fk:TABLE.COLUMN`
    ForeignKey {
        /// Referenced table.
        table:  String,
        /// Referenced column.
        column: String
    }
}

impl TagEntry {
    /// Parse one `key[:value]` token.
    ///
    /// # Errors
    ///
    /// Returns [`TagError`] for empty required values, malformed foreign
    /// keys and unknown keys.
    pub fn parse(token: &str) -> Result<Self, TagError> {
        let (key, value) = token.split_once(':').unwrap_or((token, ""));

        let entry = match key {
            "table" => Self::Table(value.to_string()),
            "col" => match value {
                "" => return Err(TagError::EmptyColumnName),
                "-" => Self::Skip,
                name => Self::Column(name.to_string())
            },
            "type" => Self::Type(required("type", value)?),
            "precision" => Self::Precision(required("precision", value)?),
            "dbtype" => Self::DbType(required("dbtype", value)?),
            "pk" => Self::PrimaryKey(flag(value)),
            "autoincr" => Self::AutoIncrement(flag(value)),
            "notnull" => Self::NotNull(flag(value)),
            "default" => Self::Default {
                enabled: value != "-",
                value:   value.to_string()
            },
            "unique" => Self::Unique((!value.is_empty()).then(|| value.to_string())),
            "fk" => match value.split_once('.') {
                Some((table, column)) if !table.is_empty() && !column.is_empty() => {
                    Self::ForeignKey {
                        table:  table.to_string(),
                        column: column.to_string()
                    }
                }
                _ => return Err(TagError::InvalidForeignKey(value.to_string()))
            },
            other => return Err(TagError::Unsupported(other.to_string()))
        };
        Ok(entry)
    }
}

/// Lazily parse every token of a tag.
///
/// Tokens are yielded in order so callers can stop at [`TagEntry::Skip`]
/// without validating the rest of the tag.
pub fn entries(tag: &str) -> impl Iterator<Item = Result<TagEntry, TagError>> + '_ {
    tag.split_whitespace().map(TagEntry::parse)
}

fn required(key: &'static str, value: &str) -> Result<String, TagError> {
    if value.is_empty() {
        return Err(TagError::EmptyValue {
            key
        });
    }
    Ok(value.to_string())
}

fn flag(value: &str) -> bool {
    value.is_empty() || value == "true"
}
