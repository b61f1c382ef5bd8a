// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `Schema` impl generation.
//!
//! The descriptor is a `static` inside `descriptor()`, so every call returns
//! the same address and nothing is allocated at runtime.

use proc_macro2::TokenStream;
use quote::quote;

use super::{
    kind::Kind,
    parse::{FieldDef, SchemaDef}
};

/// Generate `impl ::tablemap::Schema`.
pub fn generate(schema: &SchemaDef) -> TokenStream {
    let ident = &schema.ident;
    let name = ident.to_string();
    let fields = schema.fields.iter().map(field_descriptor);

    quote! {
        #[automatically_derived]
        impl ::tablemap::Schema for #ident {
            fn descriptor() -> &'static ::tablemap::StructDescriptor {
                static DESCRIPTOR: ::tablemap::StructDescriptor = ::tablemap::StructDescriptor {
                    name: #name,
                    type_id: ::core::any::TypeId::of::<#ident>,
                    fields: &[#(#fields),*],
                };
                &DESCRIPTOR
            }
        }
    }
}

fn field_descriptor(field: &FieldDef) -> TokenStream {
    let FieldDef {
        name,
        ty,
        tag,
        exported,
        embed
    } = field;

    let kind = if *embed {
        quote!(::tablemap::FieldKind::Embedded(<#ty as ::tablemap::Schema>::descriptor))
    } else {
        let kind = Kind::of(ty);
        quote!(#kind)
    };

    quote! {
        ::tablemap::FieldDescriptor {
            name: #name,
            kind: #kind,
            tag: #tag,
            exported: #exported,
        }
    }
}
