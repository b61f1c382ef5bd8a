// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Column-list formatting.
//!
//! [`ColumnNames`] renders an ordered list of column names into the SQL
//! fragments the statement builder needs. The shape of each fragment is
//! decided by a [`JoinRule`], so new statement shapes only need a new rule.
//!
//! | Method | Rule | Output for `[a, b]` |
//! |--------|------|---------------------|
//! | [`list`](ColumnNames::list) | [`AsList`] | `a, b` |
//! | [`named_list`](ColumnNames::named_list) | [`AsNamedList`] | `:a, :b` |
//! | [`update`](ColumnNames::update) | [`AsUpdate`] | `a = ?, b = ?` |
//! | [`named_update`](ColumnNames::named_update) | [`AsNamedUpdate`] | `a = :a, b = :b` |
//! | [`cond`](ColumnNames::cond) | [`AsCondition`] | `a = ? AND b = ?` |
//! | [`named_cond`](ColumnNames::named_cond) | [`AsNamedCondition`] | `a = :a AND b = :b` |
//! | [`placeholders`](ColumnNames::placeholders) | [`AsPlaceholders`] | `?, ?` |

use std::ops::Deref;

/// Separator and per-column rendering for [`ColumnNames::join`].
pub trait JoinRule {
    /// Text placed between two rendered columns.
    fn separator(&self) -> &str;

    /// Render one column into `buf`.
    fn append(&self, buf: &mut String, column: &str);
}

/// `a, b`
#[derive(Debug, Clone, Copy, Default)]
pub struct AsList;

impl JoinRule for AsList {
    fn separator(&self) -> &str {
        ", "
    }

    fn append(&self, buf: &mut String, column: &str) {
        buf.push_str(column);
    }
}

/// `:a, :b`
#[derive(Debug, Clone, Copy, Default)]
pub struct AsNamedList;

impl JoinRule for AsNamedList {
    fn separator(&self) -> &str {
        ", "
    }

    fn append(&self, buf: &mut String, column: &str) {
        buf.push(':');
        buf.push_str(column);
    }
}

/// `a = ?, b = ?`
#[derive(Debug, Clone, Copy, Default)]
pub struct AsUpdate;

impl JoinRule for AsUpdate {
    fn separator(&self) -> &str {
        ", "
    }

    fn append(&self, buf: &mut String, column: &str) {
        buf.push_str(column);
        buf.push_str(" = ?");
    }
}

/// `a = :a, b = :b`
#[derive(Debug, Clone, Copy, Default)]
pub struct AsNamedUpdate;

impl JoinRule for AsNamedUpdate {
    fn separator(&self) -> &str {
        ", "
    }

    fn append(&self, buf: &mut String, column: &str) {
        buf.push_str(column);
        buf.push_str(" = :");
        buf.push_str(column);
    }
}

/// `a <op> ? <conj> b <op> ?`
#[derive(Debug, Clone)]
pub struct AsCondition {
    separator: String,
    operator:  String
}

impl AsCondition {
    /// Conditions joined by `conjunction` (`AND`, `OR`) using `operator`.
    pub fn new(conjunction: &str, operator: &str) -> Self {
        Self {
            separator: format!(" {conjunction} "),
            operator:  operator.to_string()
        }
    }
}

impl Default for AsCondition {
    fn default() -> Self {
        Self::new("AND", "=")
    }
}

impl JoinRule for AsCondition {
    fn separator(&self) -> &str {
        &self.separator
    }

    fn append(&self, buf: &mut String, column: &str) {
        buf.push_str(column);
        buf.push(' ');
        buf.push_str(&self.operator);
        buf.push_str(" ?");
    }
}

/// `a <op> :a <conj> b <op> :b`
#[derive(Debug, Clone)]
pub struct AsNamedCondition(AsCondition);

impl AsNamedCondition {
    /// Conditions joined by `conjunction` (`AND`, `OR`) using `operator`.
    pub fn new(conjunction: &str, operator: &str) -> Self {
        Self(AsCondition::new(conjunction, operator))
    }
}

impl Default for AsNamedCondition {
    fn default() -> Self {
        Self(AsCondition::default())
    }
}

impl JoinRule for AsNamedCondition {
    fn separator(&self) -> &str {
        self.0.separator()
    }

    fn append(&self, buf: &mut String, column: &str) {
        buf.push_str(column);
        buf.push(' ');
        buf.push_str(&self.0.operator);
        buf.push_str(" :");
        buf.push_str(column);
    }
}

/// `?, ?`
#[derive(Debug, Clone, Copy, Default)]
pub struct AsPlaceholders;

impl JoinRule for AsPlaceholders {
    fn separator(&self) -> &str {
        ", "
    }

    fn append(&self, buf: &mut String, _column: &str) {
        buf.push('?');
    }
}

/// Ordered list of column names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnNames(Vec<String>);

impl ColumnNames {
    /// Empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Render every column with `rule`.
    pub fn join(&self, rule: &impl JoinRule) -> String {
        let mut buf = String::with_capacity(self.0.len() * 16);
        for (i, column) in self.0.iter().enumerate() {
            if i > 0 {
                buf.push_str(rule.separator());
            }
            rule.append(&mut buf, column);
        }
        buf
    }

    /// `a, b`
    #[must_use]
    pub fn list(&self) -> String {
        self.join(&AsList)
    }

    /// `:a, :b`
    #[must_use]
    pub fn named_list(&self) -> String {
        self.join(&AsNamedList)
    }

    /// `a = ?, b = ?`
    #[must_use]
    pub fn update(&self) -> String {
        self.join(&AsUpdate)
    }

    /// `a = :a, b = :b`
    #[must_use]
    pub fn named_update(&self) -> String {
        self.join(&AsNamedUpdate)
    }

    /// `a <op> ? <conj> b <op> ?`
    #[must_use]
    pub fn cond(&self, conjunction: &str, operator: &str) -> String {
        self.join(&AsCondition::new(conjunction, operator))
    }

    /// `a <op> :a <conj> b <op> :b`
    #[must_use]
    pub fn named_cond(&self, conjunction: &str, operator: &str) -> String {
        self.join(&AsNamedCondition::new(conjunction, operator))
    }

    /// `?, ?`
    #[must_use]
    pub fn placeholders(&self) -> String {
        self.join(&AsPlaceholders)
    }

    /// Whether `column` is in the list.
    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.0.iter().any(|c| c == column)
    }

    /// Append a column.
    pub fn push(&mut self, column: impl Into<String>) {
        self.0.push(column.into());
    }

    /// Remove `columns` in place, keeping the order of the rest.
    pub fn remove<S: AsRef<str>>(&mut self, columns: &[S]) {
        self.0.retain(|c| !columns.iter().any(|r| r.as_ref() == c));
    }

    /// Copy of the list without `columns`.
    #[must_use]
    pub fn without<S: AsRef<str>>(&self, columns: &[S]) -> Self {
        let mut copy = self.clone();
        copy.remove(columns);
        copy
    }

    /// Unwrap into the underlying vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for ColumnNames {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for ColumnNames {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: AsRef<str>> From<&[S]> for ColumnNames {
    fn from(columns: &[S]) -> Self {
        columns.iter().map(|c| c.as_ref().to_string()).collect()
    }
}

impl From<Vec<String>> for ColumnNames {
    fn from(columns: Vec<String>) -> Self {
        Self(columns)
    }
}
