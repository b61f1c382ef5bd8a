// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! # tablemap
//!
//! One crate, everything needed. Re-exports:
//! - [`Schema`] derive macro from `tablemap-derive-impl`
//! - All types from `tablemap-core` ([`Extractor`], [`StatementBuilder`],
//!   [`Dialect`], [`StatementCache`], [`Executor`])
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use tablemap::{Dialect, Extractor, Schema, StatementBuilder};
//!
//! #[derive(Schema)]
//! pub struct User {
//!     #[tablemap(tag = "pk autoincr")]
//!     pub id: i64,
//!     #[tablemap(tag = "unique notnull")]
//!     pub email: String,
//! }
//!
//! let builder = StatementBuilder::new(Arc::new(Extractor::default()), Dialect::Postgres);
//! let ddl = builder.create_table::<User>()?;
//! let insert = builder.insert::<User>()?;
//! ```

pub use tablemap_core::*;
pub use tablemap_derive_impl::Schema;
