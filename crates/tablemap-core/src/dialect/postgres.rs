// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! PostgreSQL dialect.

use super::{SqlDialect, SqlType, default_or};
use crate::{
    config::ConnectionConfig,
    error::{Error, Result}
};

/// Default `VARCHAR` / `CHAR` length.
pub const DEFAULT_STRING_LENGTH: &str = "64";

/// Default host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default port.
pub const DEFAULT_PORT: u16 = 5432;

const NAME: &str = "postgres";

/// PostgreSQL translation rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Postgres;

impl Postgres {
    /// Quote a string literal, switching to an `E'...'` escape string when
    /// the value contains a single quote.
    fn quote(value: &str) -> String {
        if value.contains('\'') {
            let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
            format!("E'{escaped}'")
        } else {
            format!("'{value}'")
        }
    }
}

impl SqlDialect for Postgres {
    fn name(&self) -> &'static str {
        NAME
    }

    fn translate_type(
        &self,
        ty: &str,
        precision: Option<&str>,
        default: Option<&str>
    ) -> Result<SqlType> {
        let number = || default_or("0", default).to_string();
        let text = || Self::quote(default_or("", default));
        let length = precision.unwrap_or(DEFAULT_STRING_LENGTH);

        let sql = match ty {
            "bool" => SqlType::new("BOOLEAN", default_or("false", default).to_string()),
            "int8" | "int16" | "uint8" => SqlType::new("SMALLINT", number()),
            "int32" | "uint16" => SqlType::new("INTEGER", number()),
            "int" | "int64" | "uint" | "uint32" | "uint64" => SqlType::new("BIGINT", number()),
            "float32" | "float64" | "float" => {
                let name = match (precision, ty) {
                    (Some(p), _) => format!("NUMERIC({p})"),
                    (None, "float32") => "REAL".to_string(),
                    (None, _) => "DOUBLE PRECISION".to_string()
                };
                SqlType::new(name, number())
            }
            "string" => SqlType::new(format!("VARCHAR({length})"), text()),
            "char" => SqlType::new(format!("CHAR({length})"), text()),
            "text" => SqlType::new("TEXT", text()),
            "blob" => SqlType::new("BYTEA", default_or(r"E'\\000'", default).to_string()),
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
        let host = if config.host.is_empty() {
            DEFAULT_HOST
        } else {
            config.host.as_str()
        };
        let port = if config.port == 0 {
            DEFAULT_PORT
        } else {
            config.port
        };
        format!(
            "postgres://{}{host}:{port}/{}{}",
            config.credentials(),
            config.db_name,
            config.query_suffix()
        )
    }

    fn auto_increment(&self) -> &'static str {
        "GENERATED BY DEFAULT AS IDENTITY"
    }
}
