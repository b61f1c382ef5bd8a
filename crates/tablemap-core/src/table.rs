// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Table and column model.
//!
//! A [`Table`] is the immutable result of schema extraction: a name plus an
//! ordered list of [`Column`]s. Column order follows field declaration order
//! after embedded structs are flattened, and is what every generated
//! statement uses.

use crate::columns::ColumnNames;

/// Referenced table and column of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Referenced table.
    pub table: String,

    /// Referenced column.
    pub column: String
}

/// One mapped field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name, unique within the table.
    pub name: String,

    /// Rust field name the column was derived from.
    pub field: &'static str,

    /// Logical type (`bool`, `int32`, `string`, `blob`, ...).
    pub logical_type: String,

    /// Dialect-defined precision: a length, or `scale,precision`.
    pub precision: Option<String>,

    /// Raw database type. Wins over the dialect translation when set.
    pub db_type: Option<String>,

    /// Part of the primary key.
    pub primary_key: bool,

    /// Auto increment.
    pub auto_increment: bool,

    /// Whether NULL is allowed.
    pub nullable: bool,

    /// Emit a DEFAULT clause.
    pub has_default: bool,

    /// Raw default literal before dialect quoting.
    ///
    /// `None` means the dialect's zero value for the type.
    pub default_value: Option<String>,

    /// UNIQUE constraint.
    pub unique: bool,

    /// Name of a multi-column UNIQUE constraint this column belongs to.
    ///
    /// Only set when [`unique`](Self::unique) is.
    pub unique_group: Option<String>,

    /// Foreign key target.
    pub foreign_key: Option<ForeignKey>
}

impl Column {
    /// Column with the given name and logical type, everything else off.
    pub fn new(name: impl Into<String>, logical_type: impl Into<String>) -> Self {
        Self {
            name:           name.into(),
            field:          "",
            logical_type:   logical_type.into(),
            precision:      None,
            db_type:        None,
            primary_key:    false,
            auto_increment: false,
            nullable:       true,
            has_default:    false,
            default_value:  None,
            unique:         false,
            unique_group:   None,
            foreign_key:    None
        }
    }
}

/// Schema of one mapped struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Table name.
    pub name: String,

    /// Rust struct name.
    pub type_name: &'static str,

    /// Columns in first-seen order.
    pub columns: Vec<Column>
}

impl Table {
    /// All column names in order.
    #[must_use]
    pub fn column_names(&self) -> ColumnNames {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Column names in order, leaving out `excepts`.
    #[must_use]
    pub fn column_names_except<S: AsRef<str>>(&self, excepts: &[S]) -> ColumnNames {
        self.columns
            .iter()
            .filter(|c| !excepts.iter().any(|e| e.as_ref() == c.name))
            .map(|c| c.name.clone())
            .collect()
    }

    /// Look up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Primary key columns in order.
    pub fn primary_keys(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.primary_key)
    }
}
