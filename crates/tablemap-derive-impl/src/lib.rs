// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

mod schema;

use proc_macro::TokenStream;

/// Derive a static table descriptor for a struct.
///
/// Implements `tablemap::Schema`, exposing every field together with its
/// storage kind, tag and visibility. The tag is interpreted at runtime by
/// `tablemap::Extractor`, which builds the table schema.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[tablemap(tag = "...")]` | Column tag, e.g. `"pk autoincr"`, `"col:user_name notnull"` |
/// | `#[tablemap(skip)]` | Never map the field (same as `tag = "-"`) |
/// | `#[tablemap(embed)]` | Flatten the fields of a nested `Schema` struct into this table |
///
/// # Tag Keys
///
/// | Key | Effect |
/// |-----|--------|
/// | `table:NAME` | Override the table name |
/// | `col:NAME` | Override the column name, `col:-` skips the field |
/// | `type:T` / `precision:P` / `dbtype:T` | Column type control |
/// | `pk`, `autoincr`, `notnull` | Constraints |
/// | `default[:VALUE]` | DEFAULT clause |
/// | `unique[:GROUP]` | UNIQUE, optionally grouped |
/// | `fk:TABLE.COLUMN` | Foreign key |
///
/// # Field Types
///
/// | Rust type | Logical type |
/// |-----------|--------------|
/// | `bool` | `bool` |
/// | `i8` .. `i64`, `isize` | `int8` .. `int64`, `int` |
/// | `u8` .. `u64`, `usize` | `uint8` .. `uint64`, `uint` |
/// | `f32`, `f64` | `float32`, `float64` |
/// | `String`, `Box<str>` | `string` |
/// | `Vec<u8>`, `Box<[u8]>` | `blob` |
///
/// Fields of any other type are ignored unless marked `embed`. Fields that
/// are not `pub` are ignored as well.
///
/// # Example
///
/// ```rust,ignore
/// use tablemap::Schema;
///
/// #[derive(Schema)]
/// pub struct Timestamps {
///     pub created_at: i64,
///     pub updated_at: i64,
/// }
///
/// #[derive(Schema)]
/// pub struct User {
///     #[tablemap(tag = "pk autoincr")]
///     pub id: i64,
///
///     #[tablemap(tag = "precision:128 unique notnull")]
///     pub email: String,
///
///     #[tablemap(skip)]
///     pub password_hash: String,
///
///     #[tablemap(embed)]
///     pub timestamps: Timestamps,
/// }
/// ```
///
/// # Errors
///
/// The derive fails to compile on enums, unions, tuple and unit structs,
/// generic structs, unknown attribute keys and fields combining `skip` with
/// `tag`.
#[proc_macro_derive(Schema, attributes(tablemap))]
pub fn derive_schema(input: TokenStream) -> TokenStream {
    schema::derive(input)
}
