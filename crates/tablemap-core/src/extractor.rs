// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Schema extraction.
//!
//! The [`Extractor`] turns a [`StructDescriptor`] into a [`Table`] and
//! memoizes the result per struct type.
//!
//! # Field Selection
//!
//! Fields are walked in declaration order. A field is ignored when:
//!
//! - its tag is exactly `-`
//! - its type is [`FieldKind::Unsupported`]
//! - it is not `pub` (embedded fields are exempt)
//!
//! Embedded fields are flattened depth-first after all directly declared
//! fields of the same struct. When two fields share a Rust field name, the
//! first one seen wins, so a field on the outer struct shadows one of the same
//! name on an embedded struct.
//!
//! # Caching
//!
//! Tables are keyed by [`TypeId`]. Lookups take a shared lock; on a miss the
//! table is derived without holding any lock and inserted under the exclusive
//! lock if no other thread got there first. Failed derivations are not cached.

use std::{
    any::TypeId,
    collections::HashMap,
    sync::{
        Arc, PoisonError, RwLock,
        atomic::{AtomicUsize, Ordering}
    }
};

use crate::{
    config::ExtractorConfig,
    descriptor::{FieldDescriptor, FieldKind, Schema, StructDescriptor},
    error::{Error, Result},
    table::{Column, ForeignKey, Table},
    tag::{self, TagEntry}
};

/// Derives and caches table schemas.
///
/// # Example
///
/// ```rust,ignore
/// use tablemap::{Extractor, ExtractorConfig, Schema};
///
/// #[derive(Schema)]
/// pub struct User {
///     #[tablemap(tag = "pk autoincr")]
///     pub id: i64,
///     pub name: String,
/// }
///
/// let extractor = Extractor::new(ExtractorConfig::default().with_table_prefix("app_"));
/// let table = extractor.extract::<User>()?;
/// assert_eq!(table.name, "app_user");
/// ```
#[derive(Debug, Default)]
pub struct Extractor {
    config:      ExtractorConfig,
    tables:      RwLock<HashMap<TypeId, Arc<Table>>>,
    derivations: AtomicUsize
}

impl Extractor {
    /// Create an extractor with an empty cache.
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            config,
            tables: RwLock::new(HashMap::new()),
            derivations: AtomicUsize::new(0)
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Table for `T`, deriving it on first use.
    ///
    /// # Errors
    ///
    /// [`Error::Tag`] when a field tag is malformed.
    pub fn extract<T: Schema + ?Sized>(&self) -> Result<Arc<Table>> {
        self.extract_descriptor(T::descriptor())
    }

    /// Table for the type of `value`.
    ///
    /// References and smart pointers resolve to the pointee's table.
    ///
    /// # Errors
    ///
    /// Same as [`extract`](Self::extract).
    pub fn extract_value<T: Schema + ?Sized>(&self, _value: &T) -> Result<Arc<Table>> {
        self.extract::<T>()
    }

    /// Table for a raw descriptor.
    ///
    /// # Errors
    ///
    /// Same as [`extract`](Self::extract).
    pub fn extract_descriptor(&self, descriptor: &'static StructDescriptor) -> Result<Arc<Table>> {
        let key = descriptor.type_key();
        if let Some(table) = self
            .tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(Arc::clone(table));
        }

        let derived = Arc::new(self.derive(descriptor)?);

        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(tables.entry(key).or_insert(derived)))
    }

    /// Number of times a table was actually derived.
    ///
    /// Stays at one per type once cached, but may exceed that when several
    /// threads miss the cache at the same time.
    #[must_use]
    pub fn derivations(&self) -> usize {
        self.derivations.load(Ordering::Relaxed)
    }

    fn derive(&self, descriptor: &'static StructDescriptor) -> Result<Table> {
        self.derivations.fetch_add(1, Ordering::Relaxed);

        let mut table = Table {
            name:      format!(
                "{}{}",
                self.config.table_prefix,
                (self.config.name_mapper)(descriptor.name)
            ),
            type_name: descriptor.name,
            columns:   Vec::new()
        };

        let mut fields = Vec::new();
        flatten(descriptor, &mut fields, &mut Vec::new());

        for field in fields {
            let Some(column) = self.column(field, &mut table.name)? else {
                continue;
            };
            if table.column(&column.name).is_some() {
                tracing::warn!(
                    "{}: column `{}` of field `{}` already defined, dropped",
                    descriptor.name,
                    column.name,
                    field.name
                );
                continue;
            }
            table.columns.push(column);
        }

        tracing::debug!(
            "derived table `{}` from `{}` with {} columns",
            table.name,
            descriptor.name,
            table.columns.len()
        );
        Ok(table)
    }

    /// Build the column for one field, `None` when its tag skips it.
    fn column(&self, field: &FieldDescriptor, table_name: &mut String) -> Result<Option<Column>> {
        let mut column = Column::new(
            (self.config.name_mapper)(field.name),
            field.kind.logical_type().unwrap_or_default()
        );
        column.field = field.name;
        column.has_default = self.config.emit_defaults;
        column.nullable = !self.config.not_null;

        for entry in tag::entries(field.tag) {
            let entry = entry.map_err(|source| Error::Tag {
                field: field.name.to_string(),
                source
            })?;
            match entry {
                TagEntry::Table(name) => *table_name = name,
                TagEntry::Column(name) => column.name = name,
                TagEntry::Skip => return Ok(None),
                TagEntry::Type(ty) => column.logical_type = ty,
                TagEntry::Precision(precision) => column.precision = Some(precision),
                TagEntry::DbType(db_type) => column.db_type = Some(db_type),
                TagEntry::PrimaryKey(on) => column.primary_key = on,
                TagEntry::AutoIncrement(on) => column.auto_increment = on,
                TagEntry::NotNull(on) => column.nullable = !on,
                TagEntry::Default {
                    enabled,
                    value
                } => {
                    column.has_default = enabled;
                    column.default_value =
                        (self.config.emit_defaults && enabled && !value.is_empty()).then_some(value);
                }
                TagEntry::Unique(group) => {
                    column.unique = true;
                    column.unique_group = group;
                }
                TagEntry::ForeignKey {
                    table,
                    column: referenced
                } => {
                    column.foreign_key = Some(ForeignKey {
                        table,
                        column: referenced
                    });
                }
            }
        }
        Ok(Some(column))
    }
}

/// Collect eligible fields, direct fields first, then embedded structs.
///
/// `path` holds the structs currently being walked so a self-embedding
/// struct cannot recurse forever.
fn flatten(
    descriptor: &'static StructDescriptor,
    fields: &mut Vec<&'static FieldDescriptor>,
    path: &mut Vec<TypeId>
) {
    let key = descriptor.type_key();
    if path.contains(&key) {
        return;
    }
    path.push(key);

    let mut embedded = Vec::new();
    for field in descriptor.fields {
        if field.is_skipped() {
            continue;
        }
        match field.kind {
            FieldKind::Embedded(nested) => embedded.push(nested),
            FieldKind::Unsupported => {}
            _ if !field.exported => {}
            _ => {
                if !fields.iter().any(|f| f.name == field.name) {
                    fields.push(field);
                }
            }
        }
    }
    for nested in embedded {
        flatten(nested(), fields, path);
    }

    path.pop();
}
