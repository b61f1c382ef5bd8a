// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Statement memoization.
//!
//! Generated SQL only depends on the struct type and the builder settings,
//! so it can be computed once and shared. Three flavours are offered:
//!
//! | Type | Key | Typical use |
//! |------|-----|-------------|
//! | [`StatementCache`] + [`StatementSlot`] | caller-owned slot | `static` slots next to repository code |
//! | [`SqlHolder`] | the holder itself | one statement stored in a struct field |
//! | `StatementBuilder::with_cache` | caller source location | ad-hoc call sites |
//!
//! Every flavour computes outside of any lock, so the closure may itself use
//! the cache. Under contention the closure can run more than once; the first
//! stored text wins and is what every caller receives. Failed computations are
//! never stored.
//!
//! # Example
//!
//! ```
//! use tablemap_core::{StatementCache, StatementSlot};
//!
//! static FIND_USER: StatementSlot = StatementSlot::new();
//!
//! let cache = StatementCache::new();
//! let sql = cache.get(&FIND_USER, || "SELECT id FROM users WHERE id = :id".to_string());
//! assert_eq!(&*sql, "SELECT id FROM users WHERE id = :id");
//! assert!(FIND_USER.is_set());
//! ```

use std::{
    collections::HashMap,
    convert::Infallible,
    hash::Hash,
    sync::{
        Arc, OnceLock, PoisonError, RwLock,
        atomic::{AtomicU32, Ordering}
    }
};

/// Caller-owned handle into a [`StatementCache`].
///
/// Zero means "not computed yet". A slot is bound to the first cache that
/// fills it.
#[derive(Debug, Default)]
pub struct StatementSlot(AtomicU32);

impl StatementSlot {
    /// Empty slot, usable in `static` items.
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    /// Whether a statement was stored for this slot.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.id() != 0
    }

    fn id(&self) -> u32 {
        self.0.load(Ordering::Acquire)
    }
}

/// Source of slot ids, shared by every cache so ids never collide.
static NEXT_SLOT_ID: AtomicU32 = AtomicU32::new(1);

/// Statement texts indexed by [`StatementSlot`].
#[derive(Debug, Default)]
pub struct StatementCache {
    texts: RwLock<HashMap<u32, Arc<str>>>
}

impl StatementCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Statement stored for `slot`, computing it with `f` on first use.
    pub fn get(&self, slot: &StatementSlot, f: impl FnOnce() -> String) -> Arc<str> {
        match self.try_get(slot, || Ok::<_, Infallible>(f())) {
            Ok(sql) => sql,
            Err(never) => match never {}
        }
    }

    /// Fallible variant of [`get`](Self::get). Errors leave the slot empty.
    ///
    /// # Errors
    ///
    /// Whatever `f` returns.
    pub fn try_get<E>(
        &self,
        slot: &StatementSlot,
        f: impl FnOnce() -> Result<String, E>
    ) -> Result<Arc<str>, E> {
        let id = slot.id();
        if id != 0 {
            let stored = self
                .texts
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .get(&id)
                .cloned();
            if let Some(sql) = stored {
                return Ok(sql);
            }
            tracing::warn!("statement slot {} belongs to another cache", id);
            return f().map(Arc::from);
        }

        let sql: Arc<str> = Arc::from(f()?);

        let mut texts = self.texts.write().unwrap_or_else(PoisonError::into_inner);
        let id = slot.id();
        if id != 0 {
            return Ok(texts.get(&id).cloned().unwrap_or(sql));
        }
        let id = NEXT_SLOT_ID.fetch_add(1, Ordering::Relaxed);
        if let Err(claimed) = slot.0.compare_exchange(0, id, Ordering::AcqRel, Ordering::Acquire) {
            // another cache bound the slot in the meantime
            return Ok(texts.get(&claimed).cloned().unwrap_or(sql));
        }
        texts.insert(id, Arc::clone(&sql));
        tracing::trace!("cached statement {}: {}", id, sql);
        Ok(sql)
    }

    /// Number of stored statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.texts.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing was stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single lazily computed statement.
///
/// ```
/// use tablemap_core::SqlHolder;
///
/// let holder = SqlHolder::new();
/// assert_eq!(&*holder.get(|| "DELETE FROM t".to_string()), "DELETE FROM t");
/// assert_eq!(&*holder.get(|| unreachable!()), "DELETE FROM t");
/// ```
#[derive(Debug, Default)]
pub struct SqlHolder(OnceLock<Arc<str>>);

impl SqlHolder {
    /// Empty holder, usable in `static` items.
    #[must_use]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Stored statement, computing it with `f` on first use.
    pub fn get(&self, f: impl FnOnce() -> String) -> Arc<str> {
        Arc::clone(self.0.get_or_init(|| Arc::from(f())))
    }

    /// Fallible variant of [`get`](Self::get). Errors leave the holder empty.
    ///
    /// # Errors
    ///
    /// Whatever `f` returns.
    pub fn try_get<E>(&self, f: impl FnOnce() -> Result<String, E>) -> Result<Arc<str>, E> {
        if let Some(sql) = self.0.get() {
            return Ok(Arc::clone(sql));
        }
        let sql: Arc<str> = Arc::from(f()?);
        Ok(Arc::clone(self.0.get_or_init(|| sql)))
    }

    /// Statement if already computed.
    #[must_use]
    pub fn peek(&self) -> Option<Arc<str>> {
        self.0.get().cloned()
    }
}

/// Statement texts keyed by an arbitrary key, used for call-site caching.
#[derive(Debug)]
pub(crate) struct KeyedStatements<K> {
    texts: RwLock<HashMap<K, Arc<str>>>
}

impl<K> Default for KeyedStatements<K> {
    fn default() -> Self {
        Self {
            texts: RwLock::new(HashMap::new())
        }
    }
}

impl<K: Eq + Hash + std::fmt::Debug> KeyedStatements<K> {
    pub(crate) fn try_get<E>(
        &self,
        key: K,
        f: impl FnOnce() -> Result<String, E>
    ) -> Result<Arc<str>, E> {
        if let Some(sql) = self
            .texts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(Arc::clone(sql));
        }

        let sql: Arc<str> = Arc::from(f()?);

        let mut texts = self.texts.write().unwrap_or_else(PoisonError::into_inner);
        tracing::trace!("cached statement for {:?}: {}", key, sql);
        Ok(Arc::clone(texts.entry(key).or_insert(sql)))
    }

    pub(crate) fn len(&self) -> usize {
        self.texts.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
