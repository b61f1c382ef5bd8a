// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing with darling.
//!
//! | Attribute | Level | Default | Description |
//! |-----------|-------|---------|-------------|
//! | `tag` | field | `""` | Raw tag string, parsed at runtime |
//! | `skip` | field | `false` | Shorthand for `tag = "-"` |
//! | `embed` | field | `false` | Flatten a nested `Schema` struct |

use darling::{FromDeriveInput, FromField, ast::Data, util::Ignored};
use syn::{DeriveInput, Ident, Type, Visibility, ext::IdentExt};

/// Tag value used for skipped fields.
pub const SKIP_TAG: &str = "-";

/// Struct-level input parsed by darling.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(tablemap), supports(struct_named))]
struct SchemaAttrs {
    ident:    Ident,
    generics: syn::Generics,
    data:     Data<Ignored, FieldAttrs>
}

/// Field-level `#[tablemap(...)]` attributes.
#[derive(Debug, FromField)]
#[darling(attributes(tablemap))]
struct FieldAttrs {
    ident: Option<Ident>,
    ty:    Type,
    vis:   Visibility,

    #[darling(default)]
    tag: Option<String>,

    #[darling(default)]
    skip: bool,

    #[darling(default)]
    embed: bool
}

/// A parsed field ready for generation.
#[derive(Debug)]
pub struct FieldDef {
    /// Field name without the `r#` prefix.
    pub name:     String,
    /// Declared type.
    pub ty:       Type,
    /// Tag string, `-` when skipped.
    pub tag:      String,
    /// Declared `pub`.
    pub exported: bool,
    /// Marked `embed`.
    pub embed:    bool
}

/// A parsed struct ready for generation.
#[derive(Debug)]
pub struct SchemaDef {
    /// Struct identifier.
    pub ident:  Ident,
    /// Named fields in declaration order.
    pub fields: Vec<FieldDef>
}

impl SchemaDef {
    /// Parse and validate a derive input.
    ///
    /// # Errors
    ///
    /// - not a struct with named fields
    /// - generic parameters
    /// - unknown attribute keys
    /// - `skip` combined with `tag`
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = SchemaAttrs::from_derive_input(input)?;

        if !attrs.generics.params.is_empty() {
            return Err(darling::Error::custom(
                "Schema cannot be derived for generic structs"
            )
            .with_span(&attrs.generics));
        }

        let fields = attrs
            .data
            .take_struct()
            .ok_or_else(|| {
                darling::Error::custom("expected a structure with named fields")
                    .with_span(&attrs.ident)
            })?
            .fields;

        let mut errors = darling::Error::accumulator();
        let fields = fields
            .into_iter()
            .filter_map(|field| errors.handle(FieldDef::try_from(field)))
            .collect();
        errors.finish()?;

        Ok(Self {
            ident: attrs.ident,
            fields
        })
    }
}

impl TryFrom<FieldAttrs> for FieldDef {
    type Error = darling::Error;

    fn try_from(field: FieldAttrs) -> darling::Result<Self> {
        let ident = field
            .ident
            .ok_or_else(|| darling::Error::custom("expected a named field").with_span(&field.ty))?;

        if field.skip && field.tag.is_some() {
            return Err(
                darling::Error::custom("`skip` and `tag` are mutually exclusive").with_span(&ident)
            );
        }

        let tag = if field.skip {
            SKIP_TAG.to_string()
        } else {
            field.tag.unwrap_or_default()
        };

        Ok(Self {
            name: ident.unraw().to_string(),
            ty: field.ty,
            tag,
            exported: matches!(field.vis, Visibility::Public(_)),
            embed: field.embed
        })
    }
}
