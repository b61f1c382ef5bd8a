// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tablemap_core::prelude::*;
//! ```

pub use crate::{
    ColumnNames, Dialect, Error, Executor, Extractor, ExtractorConfig, Result, Schema,
    SqlDialect, SqlHolder, StatementBuilder, StatementCache, StatementSlot, Table, async_trait
};
