// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SQL statement generation.
//!
//! [`StatementBuilder`] combines an [`Extractor`] with a [`Dialect`] and
//! renders DDL and parameterized DML for any [`Schema`] type.
//!
//! # Generated Statements
//!
//! | Method | Output |
//! |--------|--------|
//! | [`create_table`](StatementBuilder::create_table) | `CREATE TABLE IF NOT EXISTS "t" (...);` |
//! | [`query`](StatementBuilder::query) | `SELECT a, b FROM t WHERE c = :c` |
//! | [`insert`](StatementBuilder::insert) | `INSERT INTO t(a, b) VALUES(:a, :b)` |
//! | [`insert_unique`](StatementBuilder::insert_unique) | `INSERT INTO t(a, b) SELECT :a, :b WHERE NOT EXISTS(...)` |
//! | [`update`](StatementBuilder::update) | `UPDATE t SET a = :a WHERE b = :b` |
//! | [`delete`](StatementBuilder::delete) | `DELETE FROM t WHERE a = :a` |
//! | [`exists`](StatementBuilder::exists) | `SELECT EXISTS(SELECT 1 FROM t WHERE a = :a) AS alias` |
//!
//! DML uses named `:column` placeholders and plain table names; only DDL
//! quotes identifiers. Column names passed in are used verbatim and are not
//! checked against the table.

use std::{any::TypeId, panic::Location, sync::Arc};

use indexmap::IndexMap;

use crate::{
    cache::KeyedStatements,
    columns::ColumnNames,
    descriptor::Schema,
    dialect::{Dialect, SqlDialect},
    error::Result,
    extractor::Extractor,
    table::Table
};

/// Call site plus the closure type, which differs for every instantiation
/// of a generic caller.
type Site = (&'static Location<'static>, TypeId);

/// One `EXISTS(...)` term of [`StatementBuilder::multi_exists`].
#[derive(Debug, Clone)]
pub struct ExistsCheck {
    table: Arc<Table>,
    alias: String,
    conds: ColumnNames
}

impl ExistsCheck {
    /// Check for rows of `table` matching `conds`, selected as `alias`.
    pub fn new(table: Arc<Table>, alias: impl Into<String>, conds: &[&str]) -> Self {
        Self {
            table,
            alias: alias.into(),
            conds: ColumnNames::from(conds)
        }
    }

    /// Result column name.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    fn render(&self) -> String {
        format!(
            "EXISTS(SELECT 1 FROM {}{}) AS {}",
            self.table.name,
            where_clause(&self.conds),
            self.alias
        )
    }
}

/// Renders SQL for [`Schema`] types.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
///
/// use tablemap::{Dialect, Extractor, Schema, StatementBuilder};
///
/// #[derive(Schema)]
/// pub struct Model {
///     #[tablemap(tag = "pk")]
///     pub id: String,
///     pub name: String,
/// }
///
/// let builder = StatementBuilder::new(Arc::new(Extractor::default()), Dialect::Postgres);
/// assert_eq!(
///     builder.update::<Model>(&[], &["id"])?,
///     "UPDATE model SET name = :name WHERE id = :id"
/// );
/// ```
#[derive(Debug)]
pub struct StatementBuilder {
    extractor: Arc<Extractor>,
    dialect:   Dialect,
    sites:     KeyedStatements<Site>,
    indexed:   KeyedStatements<(Site, usize)>
}

impl StatementBuilder {
    /// Builder over a shared extractor.
    pub fn new(extractor: Arc<Extractor>, dialect: Dialect) -> Self {
        Self {
            extractor,
            dialect,
            sites: KeyedStatements::default(),
            indexed: KeyedStatements::default()
        }
    }

    /// Underlying extractor.
    #[must_use]
    pub fn extractor(&self) -> &Arc<Extractor> {
        &self.extractor
    }

    /// Target dialect.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Extracted table of `T`.
    ///
    /// # Errors
    ///
    /// Extraction errors, see [`Extractor::extract`].
    pub fn table<T: Schema + ?Sized>(&self) -> Result<Arc<Table>> {
        self.extractor.extract::<T>()
    }

    /// Column names of `T` without `excepts`.
    ///
    /// # Errors
    ///
    /// Extraction errors.
    pub fn table_columns<T: Schema + ?Sized>(&self, excepts: &[&str]) -> Result<ColumnNames> {
        Ok(self.table::<T>()?.column_names_except(excepts))
    }

    /// `CREATE TABLE IF NOT EXISTS` statement for a table.
    ///
    /// Column lines come first, then the primary key, grouped unique
    /// constraints in the order their groups first appear, and foreign keys.
    ///
    /// Auto-increment columns never get a DEFAULT clause. In SQLite the
    /// keyword is only valid on a lone `INTEGER` primary key, which is then
    /// declared inline; elsewhere it is left out.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`](crate::Error::UnsupportedType) when a
    /// column's logical type has no mapping in the dialect.
    pub fn create_table_sql(&self, table: &Table) -> Result<String> {
        let quote = |name: &str| self.dialect.quote_ident(name);

        let mut lines = Vec::with_capacity(table.columns.len() + 2);
        let mut primaries = Vec::new();
        let mut groups: IndexMap<&str, Vec<String>> = IndexMap::new();
        let mut foreigns = Vec::new();
        let lone_primary = table.primary_keys().count() == 1;

        for column in &table.columns {
            let sql = self.dialect.translate_type(
                &column.logical_type,
                column.precision.as_deref(),
                column.default_value.as_deref()
            )?;
            let ty = column.db_type.as_deref().unwrap_or(&sql.name);

            let mut line = format!("    {} {ty}", quote(&column.name));
            if column.unique {
                match &column.unique_group {
                    Some(group) => groups.entry(group).or_default().push(quote(&column.name)),
                    None => line.push_str(" UNIQUE")
                }
            }
            let mut inline_primary = false;
            if column.auto_increment {
                let allowed = !self.dialect.inline_primary_key()
                    || (column.primary_key && lone_primary && ty == "INTEGER");
                if allowed {
                    line.push(' ');
                    line.push_str(self.dialect.auto_increment());
                    inline_primary = self.dialect.inline_primary_key();
                }
            }
            if !column.nullable {
                line.push_str(" NOT NULL");
            }
            if column.has_default && !column.auto_increment {
                line.push_str(" DEFAULT ");
                line.push_str(&sql.default);
            }
            lines.push(line);

            if column.primary_key && !inline_primary {
                primaries.push(quote(&column.name));
            }
            if let Some(fk) = &column.foreign_key {
                foreigns.push(format!(
                    "    FOREIGN KEY({}) REFERENCES {}({})",
                    quote(&column.name),
                    fk.table,
                    fk.column
                ));
            }
        }

        if !primaries.is_empty() {
            lines.push(format!("    PRIMARY KEY ({})", primaries.join(",")));
        }
        for (group, columns) in groups {
            lines.push(format!("    CONSTRAINT {group} UNIQUE ({})", columns.join(",")));
        }
        lines.extend(foreigns);

        Ok(format!(
            "CREATE TABLE IF NOT EXISTS {} (\n{}\n);\n",
            quote(&table.name),
            lines.join(",\n")
        ))
    }

    /// `CREATE TABLE` statement for `T`.
    ///
    /// # Errors
    ///
    /// Extraction and type translation errors.
    pub fn create_table<T: Schema + ?Sized>(&self) -> Result<String> {
        let table = self.table::<T>()?;
        self.create_table_sql(&table)
    }

    /// `SELECT` by column equality.
    ///
    /// Empty `columns` selects every column not used in `conds`; `["*"]`
    /// selects every column.
    ///
    /// # Errors
    ///
    /// Extraction errors.
    pub fn query<T: Schema + ?Sized>(&self, columns: &[&str], conds: &[&str]) -> Result<String> {
        let table = self.table::<T>()?;
        let selected = match columns {
            [] => table.column_names_except(conds),
            ["*"] => table.column_names(),
            _ => ColumnNames::from(columns)
        };
        Ok(format!(
            "SELECT {} FROM {}{}",
            selected.list(),
            table.name,
            where_clause(&ColumnNames::from(conds))
        ))
    }

    /// `SELECT` with a raw `WHERE` body; empty `conds` omits the clause.
    ///
    /// Empty `columns` or `["*"]` selects every column.
    ///
    /// # Errors
    ///
    /// Extraction errors.
    pub fn query_by_conds<T: Schema + ?Sized>(
        &self,
        columns: &[&str],
        conds: &str
    ) -> Result<String> {
        let table = self.table::<T>()?;
        let selected = match columns {
            [] | ["*"] => table.column_names(),
            _ => ColumnNames::from(columns)
        };
        Ok(format!(
            "SELECT {} FROM {}{}",
            selected.list(),
            table.name,
            raw_where(conds)
        ))
    }

    /// `INSERT` of every column.
    ///
    /// # Errors
    ///
    /// Extraction errors.
    pub fn insert<T: Schema + ?Sized>(&self) -> Result<String> {
        let table = self.table::<T>()?;
        let columns = table.column_names();
        Ok(format!(
            "INSERT INTO {}({}) VALUES({})",
            table.name,
            columns.list(),
            columns.named_list()
        ))
    }

    /// `INSERT` that does nothing when a row matching `unique` exists.
    ///
    /// # Errors
    ///
    /// Extraction errors.
    pub fn insert_unique<T: Schema + ?Sized>(&self, unique: &[&str]) -> Result<String> {
        let table = self.table::<T>()?;
        let columns = table.column_names();
        Ok(format!(
            "INSERT INTO {name}({}) SELECT {} WHERE NOT EXISTS(SELECT 1 FROM {name}{})",
            columns.list(),
            columns.named_list(),
            where_clause(&ColumnNames::from(unique)),
            name = table.name
        ))
    }

    /// `UPDATE` by column equality.
    ///
    /// Empty `columns` updates every column not used in `conds`.
    ///
    /// # Errors
    ///
    /// Extraction errors.
    pub fn update<T: Schema + ?Sized>(&self, columns: &[&str], conds: &[&str]) -> Result<String> {
        let table = self.table::<T>()?;
        let updated = if columns.is_empty() {
            table.column_names_except(conds)
        } else {
            ColumnNames::from(columns)
        };
        Ok(format!(
            "UPDATE {} SET {}{}",
            table.name,
            updated.named_update(),
            where_clause(&ColumnNames::from(conds))
        ))
    }

    /// `UPDATE` with a raw `WHERE` body. Empty `columns` updates everything.
    ///
    /// # Errors
    ///
    /// Extraction errors.
    pub fn update_by_conds<T: Schema + ?Sized>(
        &self,
        columns: &[&str],
        conds: &str
    ) -> Result<String> {
        let table = self.table::<T>()?;
        let updated = if columns.is_empty() {
            table.column_names()
        } else {
            ColumnNames::from(columns)
        };
        Ok(format!(
            "UPDATE {} SET {}{}",
            table.name,
            updated.named_update(),
            raw_where(conds)
        ))
    }

    /// `DELETE` by column equality.
    ///
    /// # Errors
    ///
    /// Extraction errors.
    pub fn delete<T: Schema + ?Sized>(&self, conds: &[&str]) -> Result<String> {
        let table = self.table::<T>()?;
        Ok(format!(
            "DELETE FROM {}{}",
            table.name,
            where_clause(&ColumnNames::from(conds))
        ))
    }

    /// `DELETE` with a raw `WHERE` body.
    ///
    /// # Errors
    ///
    /// Extraction errors.
    pub fn delete_by_conds<T: Schema + ?Sized>(&self, conds: &str) -> Result<String> {
        let table = self.table::<T>()?;
        Ok(format!("DELETE FROM {}{}", table.name, raw_where(conds)))
    }

    /// `SELECT EXISTS(...) AS alias`.
    ///
    /// # Errors
    ///
    /// Extraction errors.
    pub fn exists<T: Schema + ?Sized>(&self, alias: &str, conds: &[&str]) -> Result<String> {
        Ok(self.multi_exists(&[self.exists_check::<T>(alias, conds)?]))
    }

    /// Build one term for [`multi_exists`](Self::multi_exists).
    ///
    /// # Errors
    ///
    /// Extraction errors.
    pub fn exists_check<T: Schema + ?Sized>(
        &self,
        alias: &str,
        conds: &[&str]
    ) -> Result<ExistsCheck> {
        Ok(ExistsCheck::new(self.table::<T>()?, alias, conds))
    }

    /// Several existence checks in one `SELECT`.
    #[must_use]
    pub fn multi_exists(&self, checks: &[ExistsCheck]) -> String {
        let terms: Vec<_> = checks.iter().map(ExistsCheck::render).collect();
        format!("SELECT {}", terms.join(", "))
    }

    /// Statement computed once per call site of this builder.
    ///
    /// Inside a generic function every instantiation gets its own entry. `f`
    /// must not borrow local state, since only its first result is kept.
    ///
    /// ```rust,ignore
    /// fn insert_user(builder: &StatementBuilder) -> Result<Arc<str>> {
    ///     builder.with_cache(|b| b.insert::<User>())
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// Errors of `f`; they are not cached.
    #[track_caller]
    pub fn with_cache<F>(&self, f: F) -> Result<Arc<str>>
    where
        F: FnOnce(&Self) -> Result<String> + 'static
    {
        let site = (Location::caller(), TypeId::of::<F>());
        self.sites.try_get(site, || f(self))
    }

    /// Statement computed once per call site and `index`.
    ///
    /// Indexes at or above `capacity` are never cached.
    ///
    /// # Errors
    ///
    /// Errors of `f`; they are not cached.
    #[track_caller]
    pub fn with_cache_and_index<F>(&self, f: F, index: usize, capacity: usize) -> Result<Arc<str>>
    where
        F: FnOnce(&Self, usize) -> Result<String> + 'static
    {
        if index >= capacity {
            return f(self, index).map(Arc::from);
        }
        let site = (Location::caller(), TypeId::of::<F>());
        self.indexed.try_get((site, index), || f(self, index))
    }

    /// Number of statements cached by call site.
    #[must_use]
    pub fn cached_statements(&self) -> usize {
        self.sites.len() + self.indexed.len()
    }
}

/// ` WHERE a = :a AND b = :b`, or nothing for no conditions.
fn where_clause(conds: &ColumnNames) -> String {
    if conds.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conds.named_cond("AND", "="))
    }
}

fn raw_where(conds: &str) -> String {
    if conds.is_empty() {
        String::new()
    } else {
        format!(" WHERE {conds}")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::{
        Error,
        config::ExtractorConfig,
        descriptor::{FieldDescriptor, FieldKind, StructDescriptor}
    };

    const fn field(name: &'static str, kind: FieldKind, tag: &'static str) -> FieldDescriptor {
        FieldDescriptor {
            name,
            kind,
            tag,
            exported: true
        }
    }

    struct Model;
    struct Account;
    struct Weird;
    struct Counter;

    static MODEL: StructDescriptor = StructDescriptor {
        name:    "Model",
        type_id: TypeId::of::<Model>,
        fields:  &[
            field("id", FieldKind::String, "pk"),
            field("name", FieldKind::String, ""),
            field("email", FieldKind::String, ""),
            field("password", FieldKind::String, "")
        ]
    };

    static ACCOUNT: StructDescriptor = StructDescriptor {
        name:    "Account",
        type_id: TypeId::of::<Account>,
        fields:  &[
            field("id", FieldKind::Int64, "pk autoincr"),
            field("tenant", FieldKind::Int64, "pk fk:tenant.id"),
            field("login", FieldKind::String, "unique:uq_login precision:32 notnull"),
            field("email", FieldKind::String, "unique"),
            field("domain", FieldKind::String, "unique:uq_login"),
            field("nick", FieldKind::String, "unique:uq_nick default:it's"),
            field("payload", FieldKind::String, "dbtype:JSONB"),
            field("owner", FieldKind::Int64, "fk:users.id")
        ]
    };

    static WEIRD: StructDescriptor = StructDescriptor {
        name:    "Weird",
        type_id: TypeId::of::<Weird>,
        fields:  &[field("id", FieldKind::Int64, "type:uuid")]
    };

    impl Schema for Model {
        fn descriptor() -> &'static StructDescriptor {
            &MODEL
        }
    }

    impl Schema for Account {
        fn descriptor() -> &'static StructDescriptor {
            &ACCOUNT
        }
    }

    static COUNTER: StructDescriptor = StructDescriptor {
        name:    "Counter",
        type_id: TypeId::of::<Counter>,
        fields:  &[
            field("id", FieldKind::Int64, "pk autoincr"),
            field("label", FieldKind::String, "")
        ]
    };

    impl Schema for Counter {
        fn descriptor() -> &'static StructDescriptor {
            &COUNTER
        }
    }

    impl Schema for Weird {
        fn descriptor() -> &'static StructDescriptor {
            &WEIRD
        }
    }

    fn builder() -> StatementBuilder {
        StatementBuilder::new(Arc::new(Extractor::default()), Dialect::Postgres)
    }

    fn emitting(dialect: Dialect) -> StatementBuilder {
        let config = ExtractorConfig::default().with_emit_defaults(true);
        StatementBuilder::new(Arc::new(Extractor::new(config)), dialect)
    }

    #[test]
    fn query_statements() {
        let b = builder();
        assert_eq!(b.query::<Model>(&["id"], &[]).unwrap(), "SELECT id FROM model");
        assert_eq!(
            b.query::<Model>(&["id"], &["name"]).unwrap(),
            "SELECT id FROM model WHERE name = :name"
        );
        assert_eq!(
            b.query::<Model>(&["id"], &["name", "email"]).unwrap(),
            "SELECT id FROM model WHERE name = :name AND email = :email"
        );
        assert_eq!(
            b.query::<Model>(&[], &["name", "email"]).unwrap(),
            "SELECT id, password FROM model WHERE name = :name AND email = :email"
        );
        assert_eq!(
            b.query::<Model>(&["*"], &["name", "email"]).unwrap(),
            "SELECT id, name, email, password FROM model WHERE name = :name AND email = :email"
        );
    }

    #[test]
    fn query_by_raw_conditions() {
        let b = builder();
        assert_eq!(
            b.query_by_conds::<Model>(&[], "id > :id").unwrap(),
            "SELECT id, name, email, password FROM model WHERE id > :id"
        );
        assert_eq!(
            b.query_by_conds::<Model>(&["name"], "").unwrap(),
            "SELECT name FROM model"
        );
    }

    #[test]
    fn delete_statements() {
        let b = builder();
        assert_eq!(b.delete::<Model>(&[]).unwrap(), "DELETE FROM model");
        assert_eq!(b.delete::<Model>(&["id"]).unwrap(), "DELETE FROM model WHERE id = :id");
        assert_eq!(
            b.delete::<Model>(&["name", "email"]).unwrap(),
            "DELETE FROM model WHERE name = :name AND email = :email"
        );
        assert_eq!(b.delete_by_conds::<Model>("").unwrap(), "DELETE FROM model");
        assert_eq!(
            b.delete_by_conds::<Model>("id != :id").unwrap(),
            "DELETE FROM model WHERE id != :id"
        );
    }

    #[test]
    fn insert_statements() {
        let b = builder();
        assert_eq!(
            b.insert::<Model>().unwrap(),
            "INSERT INTO model(id, name, email, password) VALUES(:id, :name, :email, :password)"
        );
        assert_eq!(
            b.insert_unique::<Model>(&["id"]).unwrap(),
            "INSERT INTO model(id, name, email, password) SELECT :id, :name, :email, :password \
             WHERE NOT EXISTS(SELECT 1 FROM model WHERE id = :id)"
        );
        assert_eq!(
            b.insert_unique::<Model>(&["name", "email"]).unwrap(),
            "INSERT INTO model(id, name, email, password) SELECT :id, :name, :email, :password \
             WHERE NOT EXISTS(SELECT 1 FROM model WHERE name = :name AND email = :email)"
        );
    }

    #[test]
    fn update_statements() {
        let b = builder();
        assert_eq!(
            b.update::<Model>(&[], &[]).unwrap(),
            "UPDATE model SET id = :id, name = :name, email = :email, password = :password"
        );
        assert_eq!(
            b.update::<Model>(&[], &["id"]).unwrap(),
            "UPDATE model SET name = :name, email = :email, password = :password WHERE id = :id"
        );
        assert_eq!(
            b.update::<Model>(&["password"], &[]).unwrap(),
            "UPDATE model SET password = :password"
        );
        assert_eq!(
            b.update::<Model>(&["password"], &["id"]).unwrap(),
            "UPDATE model SET password = :password WHERE id = :id"
        );
        assert_eq!(
            b.update_by_conds::<Model>(&["name"], "id = :id OR email = :email").unwrap(),
            "UPDATE model SET name = :name WHERE id = :id OR email = :email"
        );
    }

    #[test]
    fn exists_statements() {
        let b = builder();
        assert_eq!(
            b.exists::<Model>("exist", &[]).unwrap(),
            "SELECT EXISTS(SELECT 1 FROM model) AS exist"
        );
        assert_eq!(
            b.exists::<Model>("exist", &["id"]).unwrap(),
            "SELECT EXISTS(SELECT 1 FROM model WHERE id = :id) AS exist"
        );

        let checks = [
            b.exists_check::<Model>("name", &["name"]).unwrap(),
            b.exists_check::<Model>("email", &["email"]).unwrap()
        ];
        assert_eq!(checks[1].alias(), "email");
        assert_eq!(
            b.multi_exists(&checks),
            "SELECT EXISTS(SELECT 1 FROM model WHERE name = :name) AS name, \
             EXISTS(SELECT 1 FROM model WHERE email = :email) AS email"
        );
    }

    #[test]
    fn table_columns_except() {
        let b = builder();
        assert_eq!(
            b.table_columns::<Model>(&["password"]).unwrap().list(),
            "id, name, email"
        );
    }

    #[test]
    fn create_table_postgres() {
        let sql = builder().create_table::<Account>().unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS \"account\" (\n\
             \x20   \"id\" BIGINT GENERATED BY DEFAULT AS IDENTITY,\n\
             \x20   \"tenant\" BIGINT,\n\
             \x20   \"login\" VARCHAR(32) NOT NULL,\n\
             \x20   \"email\" VARCHAR(64) UNIQUE,\n\
             \x20   \"domain\" VARCHAR(64),\n\
             \x20   \"nick\" VARCHAR(64) DEFAULT '',\n\
             \x20   \"payload\" JSONB,\n\
             \x20   \"owner\" BIGINT,\n\
             \x20   PRIMARY KEY (\"id\",\"tenant\"),\n\
             \x20   CONSTRAINT uq_login UNIQUE (\"login\",\"domain\"),\n\
             \x20   CONSTRAINT uq_nick UNIQUE (\"nick\"),\n\
             \x20   FOREIGN KEY(\"tenant\") REFERENCES tenant(id),\n\
             \x20   FOREIGN KEY(\"owner\") REFERENCES users(id)\n\
             );\n"
        );
    }

    #[test]
    fn create_table_emitted_defaults() {
        let sql = emitting(Dialect::Postgres).create_table::<Account>().unwrap();
        assert!(sql.contains("\"nick\" VARCHAR(64) DEFAULT E'it\\'s',"));
        assert!(sql.contains("\"id\" BIGINT GENERATED BY DEFAULT AS IDENTITY,"));

        let sql = emitting(Dialect::MySql).create_table::<Account>().unwrap();
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS `account` (\n"));
        assert!(sql.contains("`nick` VARCHAR(64) DEFAULT 'it''s',"));
        assert!(sql.contains("`id` BIGINT AUTO_INCREMENT,"));
        assert!(sql.contains("PRIMARY KEY (`id`,`tenant`),"));
    }

    #[test]
    fn create_table_sqlite() {
        let b = StatementBuilder::new(Arc::new(Extractor::default()), Dialect::Sqlite);
        let sql = b.create_table::<Model>().unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS \"model\" (\n\
             \x20   \"id\" TEXT,\n\
             \x20   \"name\" TEXT,\n\
             \x20   \"email\" TEXT,\n\
             \x20   \"password\" TEXT,\n\
             \x20   PRIMARY KEY (\"id\")\n\
             );\n"
        );
    }

    #[test]
    fn create_table_sqlite_auto_increment() {
        let b = StatementBuilder::new(Arc::new(Extractor::default()), Dialect::Sqlite);
        assert_eq!(
            b.create_table::<Counter>().unwrap(),
            "CREATE TABLE IF NOT EXISTS \"counter\" (\n\
             \x20   \"id\" INTEGER PRIMARY KEY AUTOINCREMENT,\n\
             \x20   \"label\" TEXT\n\
             );\n"
        );

        let sql = b.create_table::<Account>().unwrap();
        assert!(sql.contains("    \"id\" INTEGER,\n"));
        assert!(sql.contains("    PRIMARY KEY (\"id\",\"tenant\"),\n"));
        assert!(!sql.contains("AUTOINCREMENT"));

        let sql = emitting(Dialect::Sqlite).create_table::<Counter>().unwrap();
        assert!(sql.contains("    \"id\" INTEGER PRIMARY KEY AUTOINCREMENT,\n"));
        assert!(sql.contains("    \"label\" TEXT DEFAULT ''\n"));
    }

    #[test]
    fn auto_increment_never_gets_default() {
        for dialect in [Dialect::Postgres, Dialect::MySql] {
            let sql = emitting(dialect).create_table::<Counter>().unwrap();
            let id = sql.lines().nth(1).unwrap();
            assert!(id.ends_with(&format!("{},", dialect.auto_increment())), "{id}");
            assert!(!id.contains("DEFAULT 0"));
            assert!(sql.contains("PRIMARY KEY ("));
        }
    }

    #[test]
    fn create_table_unsupported_type() {
        let err = builder().create_table::<Weird>().unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedType {
                dialect: "postgres",
                ..
            }
        ));
    }

    #[test]
    fn with_cache_runs_once_per_site() {
        static RUNS: AtomicUsize = AtomicUsize::new(0);
        let b = builder();
        for _ in 0..10 {
            let sql = b
                .with_cache(|_| {
                    RUNS.fetch_add(1, Ordering::Relaxed);
                    Ok("test".to_string())
                })
                .unwrap();
            assert_eq!(&*sql, "test");
        }
        assert_eq!(RUNS.load(Ordering::Relaxed), 1);

        let other = b.with_cache(|b| b.insert::<Model>()).unwrap();
        assert!(other.starts_with("INSERT INTO model"));
        assert_eq!(b.cached_statements(), 2);
    }

    fn insert_through<T: Schema + 'static>(b: &StatementBuilder) -> Arc<str> {
        b.with_cache(|b| b.insert::<T>()).unwrap()
    }

    fn delete_through<T: Schema + 'static>(b: &StatementBuilder, n: usize) -> Arc<str> {
        b.with_cache_and_index(|b, _| b.delete::<T>(&["id"]), n, 4)
            .unwrap()
    }

    #[test]
    fn with_cache_separates_generic_instantiations() {
        let b = builder();
        let model = insert_through::<Model>(&b);
        let account = insert_through::<Account>(&b);
        assert!(model.starts_with("INSERT INTO model("));
        assert!(account.starts_with("INSERT INTO account("));
        assert!(Arc::ptr_eq(&model, &insert_through::<Model>(&b)));

        assert_eq!(&*delete_through::<Model>(&b, 1), "DELETE FROM model WHERE id = :id");
        assert_eq!(&*delete_through::<Account>(&b, 1), "DELETE FROM account WHERE id = :id");
        assert_eq!(b.cached_statements(), 4);
    }

    #[test]
    fn with_cache_skips_errors() {
        static RUNS: AtomicUsize = AtomicUsize::new(0);
        let b = builder();
        for _ in 0..3 {
            let result = b.with_cache(|b| {
                RUNS.fetch_add(1, Ordering::Relaxed);
                b.create_table::<Weird>()
            });
            assert!(result.is_err());
        }
        assert_eq!(RUNS.load(Ordering::Relaxed), 3);
        assert_eq!(b.cached_statements(), 0);
    }

    #[test]
    fn with_cache_and_index_capacity() {
        static RUNS: AtomicUsize = AtomicUsize::new(0);
        let b = builder();
        let capacity = 5;
        for i in 0..10 {
            for j in 0..10 {
                let sql = b
                    .with_cache_and_index(
                        |_, index| {
                            RUNS.fetch_add(1, Ordering::Relaxed);
                            Ok(format!("test{index}"))
                        },
                        j,
                        capacity
                    )
                    .unwrap();
                assert_eq!(&*sql, format!("test{j}"));

                let expected = if i == 0 {
                    j + 1
                } else if j < capacity {
                    10 + 5 * (i - 1)
                } else {
                    10 + 5 * (i - 1) + (j + 1) - 5
                };
                assert_eq!(RUNS.load(Ordering::Relaxed), expected, "i = {i}, j = {j}");
            }
        }
    }
}
