// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SQLite dialect.
//!
//! SQLite has storage classes rather than sized types, so every integer maps
//! to `INTEGER` and every string-like type to `TEXT`.

use super::{SqlDialect, SqlType, default_or, quote_doubling};
use crate::{
    config::ConnectionConfig,
    error::{Error, Result}
};

/// Locator used when no database name is set.
pub const IN_MEMORY: &str = ":memory:";

const NAME: &str = "sqlite3";

/// SQLite translation rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sqlite;

impl SqlDialect for Sqlite {
    fn name(&self) -> &'static str {
        NAME
    }

    fn translate_type(
        &self,
        ty: &str,
        _precision: Option<&str>,
        default: Option<&str>
    ) -> Result<SqlType> {
        let sql = match ty {
            "bool" | "int" | "int8" | "int16" | "int32" | "int64" | "uint" | "uint8"
            | "uint16" | "uint32" | "uint64" => {
                SqlType::new("INTEGER", default_or("0", default).to_string())
            }
            "float32" | "float64" | "float" => {
                SqlType::new("FLOAT", default_or("0", default).to_string())
            }
            "string" | "char" | "text" => {
                SqlType::new("TEXT", quote_doubling(default_or("", default)))
            }
            "blob" => SqlType::new("BLOB", default_or("x''", default).to_string()),
            other => {
                return Err(Error::UnsupportedType {
                    dialect: NAME,
                    ty:      other.to_string()
                });
            }
        };
        Ok(sql)
    }

    fn connection_string(&self, config: &ConnectionConfig) -> String {
        if config.db_name.is_empty() {
            return IN_MEMORY.to_string();
        }
        format!("file:{}{}", config.db_name, config.query_suffix())
    }

    fn auto_increment(&self) -> &'static str {
        "PRIMARY KEY AUTOINCREMENT"
    }

    fn inline_primary_key(&self) -> bool {
        true
    }
}
