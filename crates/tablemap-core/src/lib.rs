// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]

//! # Overview
//!
//! - [`Schema`]: implemented by `#[derive(Schema)]`, exposes a static
//!   [`StructDescriptor`]
//! - [`Extractor`]: turns descriptors into cached [`Table`]s
//! - [`Dialect`]: PostgreSQL, MySQL and SQLite type and locator rules
//! - [`StatementBuilder`]: DDL and named-parameter DML
//! - [`StatementCache`], [`SqlHolder`]: statement memoization
//! - [`Executor`]: seam to an external driver
//! - [`prelude`]: convenient re-exports
//!
//! Most users depend on `tablemap`, which re-exports this crate together with
//! the derive macro.

pub mod builder;
pub mod cache;
pub mod columns;
pub mod config;
pub mod descriptor;
pub mod dialect;
pub mod error;
pub mod executor;
pub mod extractor;
pub mod naming;
pub mod prelude;
pub mod table;
pub mod tag;

/// Re-export async_trait for [`Executor`] implementations.
pub use async_trait::async_trait;

pub use crate::{
    builder::{ExistsCheck, StatementBuilder},
    cache::{SqlHolder, StatementCache, StatementSlot},
    columns::{
        AsCondition, AsList, AsNamedCondition, AsNamedList, AsNamedUpdate, AsPlaceholders,
        AsUpdate, ColumnNames, JoinRule
    },
    config::{ConnectionConfig, ExtractorConfig},
    descriptor::{FieldDescriptor, FieldKind, Schema, StructDescriptor},
    dialect::{Dialect, MySql, Postgres, SqlDialect, SqlType, Sqlite, UnknownDialect},
    error::{BoxError, Error, Result, TagError},
    executor::Executor,
    extractor::Extractor,
    naming::NameMapper,
    table::{Column, ForeignKey, Table}
};
