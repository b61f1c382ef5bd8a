// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `#[derive(Schema)]` implementation.
//!
//! # Module Structure
//!
//! ```text
//! schema/
//! ├── parse.rs     # darling attribute parsing and validation
//! ├── kind.rs      # Rust type to FieldKind classification
//! ├── generate.rs  # Schema impl generation
//! └── tests.rs     # Unit tests
//! ```

mod generate;
mod kind;
mod parse;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

use self::parse::SchemaDef;

/// Main entry point for the Schema derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match SchemaDef::from_derive_input(&input) {
        Ok(schema) => generate::generate(&schema).into(),
        Err(err) => err.write_errors().into()
    }
}
