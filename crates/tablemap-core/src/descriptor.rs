// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Static struct descriptors.
//!
//! `#[derive(Schema)]` emits one [`StructDescriptor`] per struct. It lists
//! every declared field in declaration order together with its storage
//! [`FieldKind`], the raw tag string and whether the field is `pub`. The
//! [`Extractor`](crate::Extractor) turns a descriptor into a
//! [`Table`](crate::Table); descriptors themselves carry no SQL semantics.
//!
//! # Generated Shape
//!
//! ```rust,ignore
//! #[derive(Schema)]
//! pub struct User {
//!     #[tablemap(tag = "pk autoincr")]
//!     pub id: i64,
//!     pub name: String,
//! }
//!
//! // Expands to roughly:
//! impl Schema for User {
//!     fn descriptor() -> &'static StructDescriptor {
//!         static DESCRIPTOR: StructDescriptor = StructDescriptor {
//!             name:    "User",
//!             type_id: TypeId::of::<User>,
//!             fields:  &[
//!                 FieldDescriptor { name: "id", kind: FieldKind::Int64, tag: "pk autoincr", exported: true },
//!                 FieldDescriptor { name: "name", kind: FieldKind::String, tag: "", exported: true },
//!             ],
//!         };
//!         &DESCRIPTOR
//!     }
//! }
//! ```

use std::{any::TypeId, rc::Rc, sync::Arc};

/// Types that can be mapped to a table.
///
/// Implemented by `#[derive(Schema)]`. Pointer types delegate to their
/// pointee, so `&User`, `Box<User>` and `Arc<User>` resolve to the same
/// table as `User`.
pub trait Schema {
    /// Descriptor of the underlying struct.
    fn descriptor() -> &'static StructDescriptor;
}

impl<T: Schema + ?Sized> Schema for &T {
    fn descriptor() -> &'static StructDescriptor {
        T::descriptor()
    }
}

impl<T: Schema + ?Sized> Schema for &mut T {
    fn descriptor() -> &'static StructDescriptor {
        T::descriptor()
    }
}

impl<T: Schema + ?Sized> Schema for Box<T> {
    fn descriptor() -> &'static StructDescriptor {
        T::descriptor()
    }
}

impl<T: Schema + ?Sized> Schema for Rc<T> {
    fn descriptor() -> &'static StructDescriptor {
        T::descriptor()
    }
}

impl<T: Schema + ?Sized> Schema for Arc<T> {
    fn descriptor() -> &'static StructDescriptor {
        T::descriptor()
    }
}

/// Compile-time description of a struct.
#[derive(Debug)]
pub struct StructDescriptor {
    /// Rust struct name (e.g. `UserProfile`).
    pub name: &'static str,

    /// Identity of the struct type, used as the schema cache key.
    pub type_id: fn() -> TypeId,

    /// Declared fields in declaration order.
    pub fields: &'static [FieldDescriptor]
}

impl StructDescriptor {
    /// Resolve the cache key of this struct.
    #[must_use]
    pub fn type_key(&self) -> TypeId {
        (self.type_id)()
    }
}

/// Compile-time description of a single field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Rust field name.
    pub name: &'static str,

    /// Storage kind derived from the field type.
    pub kind: FieldKind,

    /// Raw tag string from `#[tablemap(tag = "...")]`, empty when absent.
    pub tag: &'static str,

    /// Whether the field is declared `pub`.
    pub exported: bool
}

impl FieldDescriptor {
    /// Whether the field is tagged `-` (skip entirely).
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.tag == "-"
    }
}

/// Storage kind of a field.
///
/// Scalar kinds carry a logical type name used by the dialects;
/// [`Embedded`](Self::Embedded) points at a nested descriptor whose fields
/// are flattened into the parent; everything else is
/// [`Unsupported`](Self::Unsupported) and never becomes a column.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// `bool`
    Bool,
    /// `isize`
    Int,
    /// `i8`
    Int8,
    /// `i16`
    Int16,
    /// `i32`
    Int32,
    /// `i64`
    Int64,
    /// `usize`
    Uint,
    /// `u8`
    Uint8,
    /// `u16`
    Uint16,
    /// `u32`
    Uint32,
    /// `u64`
    Uint64,
    /// `f32`
    Float32,
    /// `f64`
    Float64,
    /// `String`, `Box<str>`
    String,
    /// `Vec<u8>`, `Box<[u8]>`
    Blob,
    /// Field marked `#[tablemap(embed)]`.
    Embedded(fn() -> &'static StructDescriptor),
    /// Any other type, including nested structs that are not embedded.
    Unsupported
}

impl FieldKind {
    /// Logical type name for scalar kinds.
    ///
    /// Returns `None` for embedded and unsupported fields.
    #[must_use]
    pub const fn logical_type(&self) -> Option<&'static str> {
        Some(match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::String => "string",
            Self::Blob => "blob",
            Self::Embedded(_) | Self::Unsupported => return None
        })
    }

    /// Nested descriptor for embedded fields.
    #[must_use]
    pub fn embedded(&self) -> Option<&'static StructDescriptor> {
        match self {
            Self::Embedded(descriptor) => Some(descriptor()),
            _ => None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Point;

    impl Schema for Point {
        fn descriptor() -> &'static StructDescriptor {
            static DESCRIPTOR: StructDescriptor = StructDescriptor {
                name:    "Point",
                type_id: TypeId::of::<Point>,
                fields:  &[FieldDescriptor {
                    name:     "x",
                    kind:     FieldKind::Int32,
                    tag:      "",
                    exported: true
                }]
            };
            &DESCRIPTOR
        }
    }

    #[test]
    fn pointers_resolve_to_pointee() {
        let direct = Point::descriptor() as *const StructDescriptor;
        assert_eq!(<&Point>::descriptor() as *const _, direct);
        assert_eq!(<Box<Point>>::descriptor() as *const _, direct);
        assert_eq!(<Arc<Point>>::descriptor() as *const _, direct);
        assert_eq!(<Rc<&Point>>::descriptor() as *const _, direct);
        assert_eq!(Point::descriptor().type_key(), TypeId::of::<Point>());
    }

    #[test]
    fn logical_type_names() {
        assert_eq!(FieldKind::Bool.logical_type(), Some("bool"));
        assert_eq!(FieldKind::Int.logical_type(), Some("int"));
        assert_eq!(FieldKind::Uint16.logical_type(), Some("uint16"));
        assert_eq!(FieldKind::Float64.logical_type(), Some("float64"));
        assert_eq!(FieldKind::Blob.logical_type(), Some("blob"));
        assert_eq!(FieldKind::Unsupported.logical_type(), None);
        assert_eq!(
            FieldKind::Embedded(Point::descriptor).logical_type(),
            None
        );
    }

    #[test]
    fn embedded_returns_nested_descriptor() {
        let kind = FieldKind::Embedded(Point::descriptor);
        assert_eq!(kind.embedded().map(|d| d.name), Some("Point"));
        assert!(FieldKind::String.embedded().is_none());
    }

    #[test]
    fn skip_tag() {
        let field = FieldDescriptor {
            name:     "secret",
            kind:     FieldKind::String,
            tag:      "-",
            exported: true
        };
        assert!(field.is_skipped());
    }
}
