// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Rust type classification.
//!
//! Only the last path segment is inspected, so `std::string::String` and
//! `alloc::vec::Vec<u8>` are recognized as well as their short forms.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{GenericArgument, PathArguments, Type};

/// Storage kind of a scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    String,
    Blob,
    Unsupported
}

impl Kind {
    /// Classify a field type.
    pub fn of(ty: &Type) -> Self {
        match ty {
            Type::Group(group) => Self::of(&group.elem),
            Type::Paren(paren) => Self::of(&paren.elem),
            Type::Path(path) if path.qself.is_none() => {
                let Some(segment) = path.path.segments.last() else {
                    return Self::Unsupported;
                };
                match (segment.ident.to_string().as_str(), &segment.arguments) {
                    (name, PathArguments::None) => Self::primitive(name),
                    ("Vec", PathArguments::AngleBracketed(args)) => {
                        match single_type(args.args.iter()) {
                            Some(elem) if is_u8(elem) => Self::Blob,
                            _ => Self::Unsupported
                        }
                    }
                    ("Box", PathArguments::AngleBracketed(args)) => {
                        match single_type(args.args.iter()) {
                            Some(Type::Path(inner)) if inner.path.is_ident("str") => Self::String,
                            Some(Type::Slice(slice)) if is_u8(&slice.elem) => Self::Blob,
                            _ => Self::Unsupported
                        }
                    }
                    _ => Self::Unsupported
                }
            }
            _ => Self::Unsupported
        }
    }

    fn primitive(name: &str) -> Self {
        match name {
            "bool" => Self::Bool,
            "isize" => Self::Int,
            "i8" => Self::Int8,
            "i16" => Self::Int16,
            "i32" => Self::Int32,
            "i64" => Self::Int64,
            "usize" => Self::Uint,
            "u8" => Self::Uint8,
            "u16" => Self::Uint16,
            "u32" => Self::Uint32,
            "u64" => Self::Uint64,
            "f32" => Self::Float32,
            "f64" => Self::Float64,
            "String" => Self::String,
            _ => Self::Unsupported
        }
    }
}

impl ToTokens for Kind {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let variant = match self {
            Self::Bool => quote!(Bool),
            Self::Int => quote!(Int),
            Self::Int8 => quote!(Int8),
            Self::Int16 => quote!(Int16),
            Self::Int32 => quote!(Int32),
            Self::Int64 => quote!(Int64),
            Self::Uint => quote!(Uint),
            Self::Uint8 => quote!(Uint8),
            Self::Uint16 => quote!(Uint16),
            Self::Uint32 => quote!(Uint32),
            Self::Uint64 => quote!(Uint64),
            Self::Float32 => quote!(Float32),
            Self::Float64 => quote!(Float64),
            Self::String => quote!(String),
            Self::Blob => quote!(Blob),
            Self::Unsupported => quote!(Unsupported)
        };
        tokens.extend(quote!(::tablemap::FieldKind::#variant));
    }
}

fn single_type<'a>(mut args: impl Iterator<Item = &'a GenericArgument>) -> Option<&'a Type> {
    match (args.next(), args.next()) {
        (Some(GenericArgument::Type(ty)), None) => Some(ty),
        _ => None
    }
}

fn is_u8(ty: &Type) -> bool {
    matches!(ty, Type::Path(path) if path.qself.is_none() && path.path.is_ident("u8"))
}
