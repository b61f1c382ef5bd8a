// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! MySQL dialect.

use super::{SqlDialect, SqlType, default_or, quote_doubling};
use crate::{
    config::ConnectionConfig,
    error::{Error, Result}
};

/// Default `VARCHAR` / `CHAR` length.
pub const DEFAULT_STRING_LENGTH: &str = "64";

/// Default `FLOAT` precision.
pub const DEFAULT_FLOAT32_PRECISION: &str = "32,4";

/// Default `DOUBLE` precision.
pub const DEFAULT_FLOAT64_PRECISION: &str = "64,4";

/// Default host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default port.
pub const DEFAULT_PORT: u16 = 3306;

const NAME: &str = "mysql";

/// MySQL translation rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MySql;

impl SqlDialect for MySql {
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
        let text = || quote_doubling(default_or("", default));
        let length = precision.unwrap_or(DEFAULT_STRING_LENGTH);

        let sql = match ty {
            "bool" => SqlType::new("BOOLEAN", default_or("false", default).to_string()),
            "int8" => SqlType::new("TINYINT", number()),
            "int16" => SqlType::new("SMALLINT", number()),
            "int32" => SqlType::new("INT", number()),
            "int" | "int64" => SqlType::new("BIGINT", number()),
            "uint8" => SqlType::new("TINYINT UNSIGNED", number()),
            "uint16" => SqlType::new("SMALLINT UNSIGNED", number()),
            "uint32" => SqlType::new("INT UNSIGNED", number()),
            "uint" | "uint64" => SqlType::new("BIGINT UNSIGNED", number()),
            "float32" => SqlType::new(
                format!("FLOAT({})", precision.unwrap_or(DEFAULT_FLOAT32_PRECISION)),
                number()
            ),
            "float64" | "float" => SqlType::new(
                format!("DOUBLE({})", precision.unwrap_or(DEFAULT_FLOAT64_PRECISION)),
                number()
            ),
            "string" => SqlType::new(format!("VARCHAR({length})"), text()),
            "char" => SqlType::new(format!("CHAR({length})"), text()),
            "text" => SqlType::new("MEDIUMTEXT", text()),
            "blob" => SqlType::new("MEDIUMBLOB", default_or("''", default).to_string()),
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
            "{}tcp({host}:{port})/{}{}",
            config.credentials(),
            config.db_name,
            config.query_suffix()
        )
    }

    fn quote_ident(&self, name: &str) -> String {
        format!("`{name}`")
    }

    fn auto_increment(&self) -> &'static str {
        "AUTO_INCREMENT"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(logical: &str, precision: Option<&str>, default: Option<&str>) -> (String, String) {
        let sql = MySql.translate_type(logical, precision, default).unwrap();
        (sql.name, sql.default)
    }

    #[test]
    fn signed_and_unsigned() {
        assert_eq!(ty("int8", None, None).0, "TINYINT");
        assert_eq!(ty("int32", None, None).0, "INT");
        assert_eq!(ty("uint", None, None).0, "BIGINT UNSIGNED");
        assert_eq!(ty("uint8", None, Some("3")), ("TINYINT UNSIGNED".into(), "3".into()));
        assert_eq!(ty("uint32", None, None).0, "INT UNSIGNED");
    }

    #[test]
    fn float_precision_defaults() {
        assert_eq!(ty("float32", None, None), ("FLOAT(32,4)".into(), "0".into()));
        assert_eq!(ty("float64", None, None).0, "DOUBLE(64,4)");
        assert_eq!(ty("float", Some("10,2"), None).0, "DOUBLE(10,2)");
        assert_eq!(ty("float32", Some("8,2"), None).0, "FLOAT(8,2)");
    }

    #[test]
    fn strings_double_quotes() {
        assert_eq!(ty("string", None, None), ("VARCHAR(64)".into(), "''".into()));
        assert_eq!(ty("char", Some("3"), Some("abc")), ("CHAR(3)".into(), "'abc'".into()));
        assert_eq!(ty("text", None, Some("it's")), (
            "MEDIUMTEXT".into(),
            "'it''s'".into()
        ));
    }

    #[test]
    fn blob() {
        assert_eq!(ty("blob", None, None), ("MEDIUMBLOB".into(), "''".into()));
    }

    #[test]
    fn unsupported_reports_mysql() {
        let err = MySql.translate_type("uuid", None, None).unwrap_err();
        assert_eq!(err.to_string(), "mysql: unsupported type: uuid");
    }

    #[test]
    fn connection_string_defaults() {
        assert_eq!(
            MySql.connection_string(&ConnectionConfig::new("app")),
            "tcp(localhost:3306)/app"
        );
    }

    #[test]
    fn connection_string_full() {
        let mut config = ConnectionConfig::new("app");
        config.user = "root".to_string();
        config.password = "pw".to_string();
        config.options.insert("parseTime".to_string(), "true".to_string());
        config.options.insert("charset".to_string(), "utf8mb4".to_string());
        assert_eq!(
            MySql.connection_string(&config),
            "root:pw@tcp(localhost:3306)/app?charset=utf8mb4&parseTime=true"
        );
    }
}
