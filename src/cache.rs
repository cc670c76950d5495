//! Compute-once memo cells.
//!
//! `MemoSlot` holds a single lazily built value in a `OnceLock`; `MemoMap`
//! holds one per key in a moka cache with no capacity bound, so entries are
//! never evicted. Both build at most once per key even under concurrent
//! first access.

use moka::sync::Cache;
use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::{Arc, OnceLock};

pub struct MemoSlot<V> {
    cell: OnceLock<Arc<V>>,
}

impl<V> Default for MemoSlot<V> {
    fn default() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }
}

impl<V> MemoSlot<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Arc<V>> {
        self.cell.get().cloned()
    }

    /// Return the cached value, running `build` first if the slot is empty.
    /// Concurrent callers wait for the one running build.
    pub fn get_or_build(&self, build: impl FnOnce() -> V) -> Arc<V> {
        Arc::clone(self.cell.get_or_init(|| Arc::new(build())))
    }

    pub fn is_built(&self) -> bool {
        self.cell.get().is_some()
    }
}

/// Keyed memo table on an unbounded moka cache. `get_with` coalesces
/// concurrent builds for the same key.
pub struct MemoMap<K, V> {
    cells: Cache<K, Arc<V>>,
}

impl<K, V> Default for MemoMap<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn default() -> Self {
        Self {
            cells: Cache::builder().build(),
        }
    }
}

impl<K, V> MemoMap<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `key`, if one has finished building.
    pub fn get<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cells.get(key)
    }

    /// Return the value for `key`, running `build` if it has never been
    /// built. Two callers racing on the same key build once; the loser
    /// blocks until the winner's value is in place.
    pub fn get_or_build<Q>(&self, key: &Q, build: impl FnOnce() -> V) -> Arc<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        self.cells.get_with_by_ref(key, || Arc::new(build()))
    }

    /// Number of keys with a finished value.
    pub fn len(&self) -> usize {
        self.cells.run_pending_tasks();
        self.cells.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
